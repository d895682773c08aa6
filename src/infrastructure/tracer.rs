//! トレーサーモジュール
//!
//! 計装基盤（X-Ray相当）をプロセス起動時に一度だけ構築し、
//! ハンドラーへ明示的に注入するための抽象化を提供する。
//! グローバル状態を変更せず、テスト時はモック実装に差し替え可能。

use tracing::{debug, error};

/// Lambda実行環境がトレースIDを設定する環境変数
const TRACE_ID_ENV: &str = "_X_AMZN_TRACE_ID";

/// トレースコンテキスト欠落時の動作
///
/// 呼び出し環境がトレースIDを提供しなかった場合の戦略。
/// `AWS_XRAY_CONTEXT_MISSING`環境変数で選択する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextMissing {
    /// エラーログを出力して処理を継続（デフォルト）
    LogError,
    /// 何もせず処理を継続
    IgnoreError,
}

impl ContextMissing {
    /// 環境変数の値をパース（未知の値はLOG_ERROR）
    fn parse(value: &str) -> Self {
        match value {
            "IGNORE_ERROR" => ContextMissing::IgnoreError,
            _ => ContextMissing::LogError,
        }
    }
}

/// トレーサー設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracerConfig {
    /// トレースコンテキスト欠落時の動作
    context_missing: ContextMissing,
}

impl TracerConfig {
    /// 明示的な値で新しいTracerConfigを作成（テスト用）
    pub fn new(context_missing: ContextMissing) -> Self {
        Self { context_missing }
    }

    /// 環境変数からTracerConfigを作成
    ///
    /// 環境変数:
    /// - AWS_XRAY_CONTEXT_MISSING: LOG_ERROR（デフォルト）またはIGNORE_ERROR
    pub fn from_env() -> Self {
        let context_missing = std::env::var("AWS_XRAY_CONTEXT_MISSING")
            .map(|value| ContextMissing::parse(&value))
            .unwrap_or(ContextMissing::LogError);

        Self { context_missing }
    }

    /// トレースコンテキスト欠落時の動作を取得
    pub fn context_missing(&self) -> ContextMissing {
        self.context_missing
    }
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self::new(ContextMissing::LogError)
    }
}

/// トレーサートレイト（テスト用の抽象化）
pub trait Tracer: Send + Sync {
    /// 処理区間のサブセグメントを開始する
    fn begin_subsegment(&self, name: &str);

    /// 処理区間のサブセグメントを終了する
    fn end_subsegment(&self, name: &str);
}

/// 構造化ログへトレースイベントを出力するトレーサー実装
///
/// Lambda実行環境が設定するトレースID（`_X_AMZN_TRACE_ID`）を
/// 各サブセグメントに付与する。トレースIDが存在しない場合は
/// 設定されたcontext-missing戦略に従う。
pub struct LogTracer {
    config: TracerConfig,
}

impl LogTracer {
    /// 新しいLogTracerを作成
    pub fn new(config: TracerConfig) -> Self {
        Self { config }
    }

    /// 実行環境からトレースIDを取得
    ///
    /// トレースIDが存在しない場合はcontext-missing戦略に従って
    /// エラーログを出力（LOG_ERROR）または無視（IGNORE_ERROR）する。
    fn trace_id(&self) -> Option<String> {
        match std::env::var(TRACE_ID_ENV) {
            Ok(trace_id) => Some(trace_id),
            Err(_) => {
                if self.config.context_missing() == ContextMissing::LogError {
                    error!(
                        env_var = TRACE_ID_ENV,
                        "トレースコンテキストが見つかりません"
                    );
                }
                None
            }
        }
    }
}

impl Tracer for LogTracer {
    fn begin_subsegment(&self, name: &str) {
        match self.trace_id() {
            Some(trace_id) => {
                debug!(
                    subsegment = name,
                    trace_id = %trace_id,
                    "サブセグメント開始"
                );
            }
            None => {
                debug!(subsegment = name, "サブセグメント開始（トレースIDなし）");
            }
        }
    }

    fn end_subsegment(&self, name: &str) {
        debug!(subsegment = name, "サブセグメント終了");
    }
}
