/// エコーハンドラー
///
/// Lambdaが受信したイベントをログ出力し、そのままレスポンスとして
/// 返却するアプリケーション層の処理を実行する
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::infrastructure::Tracer;

/// エコーハンドラーのレスポンス
///
/// 呼び出し元ランタイムへ返却するJSONシリアライズ可能な構造体。
/// ワイヤー上は`statusCode`（整数）と`body`（文字列）の2フィールドになる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EchoResponse {
    /// HTTPステータスコード（常に200）
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// シリアライズ済みイベント
    pub body: String,
}

/// イベントをエコーバックするハンドラー
///
/// ステートレスな単発処理であり、呼び出し間で状態を共有しない。
/// トレーサーはコンストラクタで注入され、グローバル状態には依存しない。
pub struct EchoHandler<T>
where
    T: Tracer,
{
    /// 計装用トレーサー
    tracer: T,
}

impl<T> EchoHandler<T>
where
    T: Tracer,
{
    /// 新しいEchoHandlerを作成
    pub fn new(tracer: T) -> Self {
        Self { tracer }
    }

    /// イベントを処理してエコーレスポンスを返却
    ///
    /// # 処理フロー
    /// 1. サブセグメントを開始
    /// 2. イベントをJSON文字列にシリアライズ
    /// 3. シリアライズ済みイベントをINFOレベルでログ出力
    /// 4. statusCode=200とシリアライズ済みイベントをレスポンスとして返却
    ///
    /// # 引数
    /// * `event` - 任意の構造を持つイベント（スキーマは強制しない）
    ///
    /// # 戻り値
    /// * `EchoResponse` - statusCodeは常に200、bodyはイベントのJSON文字列
    pub fn handle(&self, event: &Value) -> EchoResponse {
        self.tracer.begin_subsegment("handler");

        // イベントをシリアライズ（ログとbodyで同じ表現を使用）
        let body = event.to_string();

        info!(event = %body, "イベントを受信");

        let response = EchoResponse {
            status_code: 200,
            body,
        };

        self.tracer.end_subsegment("handler");
        response
    }
}
