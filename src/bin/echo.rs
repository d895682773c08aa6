/// Echo Lambda関数
///
/// イベントを受信してログ出力し、statusCode=200とシリアライズ済み
/// イベントをそのまま返却する。イベントのスキーマは強制せず、
/// コンテキストは未使用のまま受け渡す。
use echo_function::application::{EchoHandler, EchoResponse};
use echo_function::infrastructure::{LogTracer, Tracer, TracerConfig, init_logging};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tracing::trace;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // トレーサーはプロセス起動時に一度だけ構築し、ハンドラーに注入する
    let tracer = LogTracer::new(TracerConfig::from_env());
    let echo_handler = EchoHandler::new(tracer);
    let echo_handler = &echo_handler;

    // Lambda関数を初期化して実行
    let func = service_fn(move |event: LambdaEvent<Value>| async move {
        handler(echo_handler, event).await
    });
    lambda_runtime::run(func).await?;
    Ok(())
}

/// Lambda関数のメインハンドラー
///
/// # 処理フロー
/// 1. 呼び出しコンテキストからリクエストIDを取得（それ以外は未使用）
/// 2. アプリケーション層のEchoHandlerに委譲
///
/// # 引数
/// * `echo_handler` - 注入済みのエコーハンドラー
/// * `event` - 任意の構造を持つイベントと呼び出しコンテキスト
///
/// # 戻り値
/// 常に`Ok(EchoResponse)`（statusCode=200）
async fn handler<T: Tracer>(
    echo_handler: &EchoHandler<T>,
    event: LambdaEvent<Value>,
) -> Result<EchoResponse, Error> {
    trace!(request_id = %event.context.request_id, "呼び出しを受信");

    Ok(echo_handler.handle(&event.payload))
}
