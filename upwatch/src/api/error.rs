//! APIエラーレスポンス
//!
//! 本文は常に `{"message": "..."}`。内部の詳細はログにのみ出力する。

use crate::common::error::ApiError;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let payload = json!({
            "message": self.external_message()
        });

        (status, Json(payload)).into_response()
    }
}
