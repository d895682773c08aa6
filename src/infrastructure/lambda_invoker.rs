//! Lambda呼び出しモジュール
//!
//! デプロイ済みLambda関数に対する同期呼び出し（RequestResponse）を提供する。
//! 統合テストがデプロイ済みインスタンスへイベントを送信し、
//! デコード済みレスポンスを検証するために使用する。

use async_trait::async_trait;
use aws_sdk_lambda::Client as LambdaClient;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

/// Lambda呼び出しのエラー型
#[derive(Debug, Error)]
pub enum InvokeError {
    /// AWS SDK エラー
    #[error("AWS Lambda APIエラー: {0}")]
    Api(String),
    /// 呼び出した関数自体がエラーを返した
    #[error("関数エラー: {0}")]
    FunctionError(String),
    /// ペイロードのJSON変換失敗
    #[error("ペイロードのJSON変換エラー: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    /// レスポンスにペイロードが含まれない
    #[error("レスポンスペイロードが空です")]
    EmptyPayload,
}

/// Lambda呼び出しトレイト（テスト用の抽象化）
#[async_trait]
pub trait FunctionInvoker: Send + Sync {
    /// 関数を同期呼び出しし、デコード済みレスポンスを返却する
    ///
    /// # 引数
    /// * `function_name` - Lambda関数の名前またはARN
    /// * `event` - 関数への入力イベント
    ///
    /// # 戻り値
    /// * `Ok(Value)` - デコード済みの関数レスポンス
    /// * `Err(InvokeError)` - 呼び出しまたはデコードの失敗
    async fn invoke(&self, function_name: &str, event: &Value) -> Result<Value, InvokeError>;
}

/// 実際のAWS Lambda SDKを使用した呼び出し実装
pub struct AwsFunctionInvoker {
    client: LambdaClient,
}

impl AwsFunctionInvoker {
    /// 新しいAwsFunctionInvokerを作成
    pub fn new(client: LambdaClient) -> Self {
        Self { client }
    }

    /// AWS設定からデフォルトのクライアントを作成
    pub async fn from_config() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = LambdaClient::new(&config);
        Self::new(client)
    }
}

#[async_trait]
impl FunctionInvoker for AwsFunctionInvoker {
    async fn invoke(&self, function_name: &str, event: &Value) -> Result<Value, InvokeError> {
        let payload = serde_json::to_vec(event)?;

        // RequestResponseで同期呼び出し
        let output = self
            .client
            .invoke()
            .function_name(function_name)
            .invocation_type(InvocationType::RequestResponse)
            .payload(Blob::new(payload))
            .send()
            .await
            .map_err(|err| {
                warn!(
                    function_name = %function_name,
                    error = %err,
                    "Invokeエラー"
                );
                InvokeError::Api(err.to_string())
            })?;

        // 関数側のエラーはAPIエラーと区別して返却
        if let Some(function_error) = output.function_error() {
            warn!(
                function_name = %function_name,
                function_error = %function_error,
                "関数がエラーを返却"
            );
            return Err(InvokeError::FunctionError(function_error.to_string()));
        }

        let blob = output.payload().ok_or(InvokeError::EmptyPayload)?;
        let response = serde_json::from_slice(blob.as_ref())?;

        info!(
            function_name = %function_name,
            status_code = output.status_code(),
            "Invoke成功"
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;

    /// テスト用のモック呼び出し実装
    ///
    /// デプロイ済みエコー関数と同じ応答形式（statusCode + body）を返す。
    struct MockFunctionInvoker {
        /// invoke呼び出し回数
        call_count: AtomicUsize,
        /// エラーを返す場合のメッセージ
        function_error: Option<String>,
    }

    impl MockFunctionInvoker {
        fn new() -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                function_error: None,
            }
        }

        fn with_function_error(message: impl Into<String>) -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                function_error: Some(message.into()),
            }
        }

        fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FunctionInvoker for MockFunctionInvoker {
        async fn invoke(&self, _function_name: &str, event: &Value) -> Result<Value, InvokeError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);

            if let Some(message) = &self.function_error {
                return Err(InvokeError::FunctionError(message.clone()));
            }

            Ok(json!({
                "statusCode": 200,
                "body": event.to_string(),
            }))
        }
    }

    // ==================== invoke テスト ====================

    #[tokio::test]
    async fn test_invoke_decodes_echo_response() {
        let invoker = MockFunctionInvoker::new();
        let event = json!({"foo": "bar"});

        let response = invoker
            .invoke("sample-project-echo", &event)
            .await
            .expect("呼び出しに失敗");

        assert_eq!(response["statusCode"], 200);
        assert_eq!(response["body"], event.to_string());
        assert_eq!(invoker.call_count(), 1);
    }

    #[tokio::test]
    async fn test_invoke_empty_event() {
        let invoker = MockFunctionInvoker::new();

        let response = invoker
            .invoke("sample-project-echo", &json!({}))
            .await
            .expect("呼び出しに失敗");

        assert_eq!(response["statusCode"], 200);
        assert_eq!(response["body"], "{}");
    }

    #[tokio::test]
    async fn test_invoke_surfaces_function_error() {
        let invoker = MockFunctionInvoker::with_function_error("Unhandled");

        let result = invoker.invoke("sample-project-echo", &json!({})).await;

        match result {
            Err(InvokeError::FunctionError(message)) => assert_eq!(message, "Unhandled"),
            other => panic!("FunctionErrorを期待: {:?}", other),
        }
    }

    // ==================== InvokeError テスト ====================

    #[test]
    fn test_invoke_error_display() {
        let err = InvokeError::Api("timeout".to_string());
        assert_eq!(err.to_string(), "AWS Lambda APIエラー: timeout");

        let err = InvokeError::FunctionError("Unhandled".to_string());
        assert_eq!(err.to_string(), "関数エラー: Unhandled");

        let err = InvokeError::EmptyPayload;
        assert_eq!(err.to_string(), "レスポンスペイロードが空です");
    }
}
