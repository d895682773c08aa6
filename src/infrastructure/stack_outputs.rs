/// スタックアウトプットモジュール
///
/// デプロイ済みスタックの出力値（関数名など）を環境変数`STACK_OUTPUTS`
/// から読み込む。統合テストが呼び出し対象の関数を特定するために使用する。
use std::collections::HashMap;

use thiserror::Error;

/// スタックアウトプット読み込みのエラー型
#[derive(Debug, Error)]
pub enum StackOutputsError {
    #[error("STACK_OUTPUTSのJSON解析エラー: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// デプロイ済みスタックの出力値
///
/// `STACK_OUTPUTS`環境変数はキーと値のJSONオブジェクトとして設定される。
/// 未設定の場合は空のオブジェクトとして扱う。
#[derive(Debug, Clone, Default)]
pub struct StackOutputs {
    outputs: HashMap<String, String>,
}

impl StackOutputs {
    /// 明示的な値で新しいStackOutputsを作成（テスト用）
    pub fn new(outputs: HashMap<String, String>) -> Self {
        Self { outputs }
    }

    /// STACK_OUTPUTS環境変数からスタックアウトプットを読み込み
    ///
    /// 環境変数が未設定の場合は空の出力として成功する。
    /// JSONとして解析できない場合はエラーを返す。
    pub fn from_env() -> Result<Self, StackOutputsError> {
        let raw = std::env::var("STACK_OUTPUTS").unwrap_or_else(|_| "{}".to_string());
        let outputs = serde_json::from_str(&raw)?;
        Ok(Self { outputs })
    }

    /// 出力値をキーで取得
    pub fn get(&self, key: &str) -> Option<&str> {
        self.outputs.get(key).map(String::as_str)
    }

    /// 出力が空かどうか
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_from_env_default_is_empty() {
        // 環境変数未設定時のデフォルト値テスト
        unsafe {
            std::env::remove_var("STACK_OUTPUTS");
        }

        let outputs = StackOutputs::from_env().expect("読み込みに失敗");

        assert!(outputs.is_empty());
        assert_eq!(outputs.get("FunctionName"), None);
    }

    #[test]
    #[serial]
    fn test_from_env_parses_json_object() {
        unsafe {
            std::env::set_var(
                "STACK_OUTPUTS",
                r#"{"FunctionName": "sample-project-echo", "Region": "eu-west-1"}"#,
            );
        }

        let outputs = StackOutputs::from_env().expect("読み込みに失敗");

        assert_eq!(outputs.get("FunctionName"), Some("sample-project-echo"));
        assert_eq!(outputs.get("Region"), Some("eu-west-1"));
        assert_eq!(outputs.get("Missing"), None);

        // クリーンアップ
        unsafe {
            std::env::remove_var("STACK_OUTPUTS");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_json_is_error() {
        unsafe {
            std::env::set_var("STACK_OUTPUTS", "not-json");
        }

        let result = StackOutputs::from_env();

        assert!(matches!(result, Err(StackOutputsError::InvalidJson(_))));

        // クリーンアップ
        unsafe {
            std::env::remove_var("STACK_OUTPUTS");
        }
    }
}
