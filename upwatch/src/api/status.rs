//! 全体ステータスAPI

use crate::common::error::ApiError;
use crate::health::GlobalStatus;
use crate::AppState;
use axum::{extract::State, Json};

/// GET /status
pub async fn get_status(State(state): State<AppState>) -> Result<Json<GlobalStatus>, ApiError> {
    let global = state
        .health
        .get_global_status()
        .await
        .map_err(|e| ApiError::store("Failed to fetch status", e))?;
    Ok(Json(global))
}
