/// ログ基盤モジュール
///
/// Lambda環境向けの構造化ログ設定を提供する。
/// tracingクレートを使用し、JSON形式での出力をサポートする。
use std::sync::Once;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// ログサブスクライバー初期化用の同期プリミティブ
static INIT: Once = Once::new();

/// LOG_LEVEL環境変数で指定可能なログレベル
///
/// 標準的なシビリティ名をtracingのレベルフィルターにマッピングする。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// LOG_LEVEL環境変数からログレベルを読み込み
    ///
    /// 未設定または未知の値の場合はINFOにフォールバックする。
    pub fn from_env() -> Self {
        std::env::var("LOG_LEVEL")
            .map(|value| Self::parse(&value))
            .unwrap_or(LogLevel::Info)
    }

    /// シビリティ名をパース（大文字小文字は区別しない）
    ///
    /// 認識する値: DEBUG, INFO, WARNING, ERROR, CRITICAL
    /// 未知の値はINFOにフォールバックする。
    fn parse(value: &str) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "DEBUG" => LogLevel::Debug,
            "INFO" => LogLevel::Info,
            "WARNING" => LogLevel::Warning,
            "ERROR" => LogLevel::Error,
            "CRITICAL" => LogLevel::Critical,
            _ => LogLevel::Info,
        }
    }

    /// EnvFilterに渡すフィルターディレクティブを取得
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            // tracingにCRITICALは存在しないため、ERRORとして扱う
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// JSON形式での構造化ログ出力を設定する。フィルタリングは環境変数
/// `RUST_LOG`が設定されていればそれを優先し、なければ`LOG_LEVEL`
/// （デフォルトはINFO）から決定する。
///
/// この関数は複数回呼び出しても安全で、最初の呼び出しのみ初期化を実行する。
///
/// # 使用例
/// ```ignore
/// use echo_function::infrastructure::init_logging;
///
/// init_logging();
/// tracing::info!("Lambda function started");
/// ```
pub fn init_logging() {
    INIT.call_once(|| {
        // RUST_LOGを優先、なければLOG_LEVELからフィルターを構築
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(LogLevel::from_env().as_directive()));

        // JSON形式のログレイヤー（Lambda/CloudWatch向け）
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .flatten_event(true)
            .with_current_span(false);

        // サブスクライバーを構築して初期化
        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .init();
    });
}
