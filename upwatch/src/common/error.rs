//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `ApiError`は`status_code()`と`external_message()`を提供し、
//! 内部の詳細を外部に漏らさずにHTTPレスポンスを生成できます。

use axum::http::StatusCode;
use thiserror::Error;

/// 永続化層のエラー
#[derive(Debug, Error)]
pub enum StoreError {
    /// 指定IDの監視対象が存在しない
    #[error("Monitor not found: {0}")]
    NotFound(i64),

    /// データベースエラー
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// 起動時設定のエラー（致命的）
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必須キーが未設定
    #[error("{0} must be provided via environment variables")]
    MissingKey(&'static str),
}

/// APIレイヤーのエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// リクエストボディが不正
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// 入力値の検証エラー（メッセージはそのまま返す）
    #[error("Validation error: {0}")]
    Validation(&'static str),

    /// 監視対象が存在しない
    #[error("Monitor not found: {0}")]
    MonitorNotFound(i64),

    /// Authorizationヘッダー未指定
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// 権限不足
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// 永続化エラー（`context`は外部向けメッセージ）
    #[error("{context}: {source}")]
    Store {
        /// 外部向けメッセージ
        context: &'static str,
        /// 原因
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// 永続化エラーを外部向けメッセージ付きでラップする
    pub fn store(context: &'static str, source: StoreError) -> Self {
        match source {
            StoreError::NotFound(id) => Self::MonitorNotFound(id),
            source => Self::Store { context, source },
        }
    }

    /// 外部クライアント向けの安全なメッセージ
    ///
    /// DBエラー等の内部詳細はログにのみ出力する。
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "Invalid request",
            Self::Validation(message) => *message,
            Self::MonitorNotFound(_) => "Monitor not found",
            Self::Authentication(_) => "Authorization header required",
            Self::Authorization(_) => "Forbidden",
            Self::Store { context, .. } => *context,
        }
    }

    /// HTTPステータスコード
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::MonitorNotFound(_) => StatusCode::NOT_FOUND,
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::Authorization(_) => StatusCode::FORBIDDEN,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type alias (store)
pub type StoreResult<T> = Result<T, StoreError>;
