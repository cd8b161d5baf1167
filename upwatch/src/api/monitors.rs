//! 監視対象管理API
//!
//! 作成・更新が成功すると、その監視対象のオンデマンドチェックを起動する。

use crate::common::error::ApiError;
use crate::types::monitor::{Monitor, MonitorPatch, NewMonitor};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};

/// 監視対象作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateMonitorRequest {
    /// 表示名
    #[serde(default)]
    pub name: Option<String>,
    /// 種別
    #[serde(default, rename = "type")]
    pub monitor_type: Option<String>,
    /// プローブ対象URL
    #[serde(default)]
    pub url: Option<String>,
}

/// 監視対象更新リクエスト（指定したフィールドのみ更新）
#[derive(Debug, Deserialize)]
pub struct UpdateMonitorRequest {
    /// 表示名
    #[serde(default)]
    pub name: Option<String>,
    /// 種別
    #[serde(default, rename = "type")]
    pub monitor_type: Option<String>,
    /// プローブ対象URL
    #[serde(default)]
    pub url: Option<String>,
}

impl CreateMonitorRequest {
    /// 欠落・空文字のフィールドは不正なリクエスト、空白のみは必須エラーとする
    fn validate(self) -> Result<NewMonitor, ApiError> {
        let present = |value: Option<String>| match value {
            Some(v) if !v.is_empty() => Ok(v.trim().to_string()),
            _ => Err(ApiError::InvalidRequest("missing required field".to_string())),
        };
        let name = present(self.name)?;
        let monitor_type = present(self.monitor_type)?;
        let url = present(self.url)?;

        if name.is_empty() || monitor_type.is_empty() || url.is_empty() {
            return Err(ApiError::Validation("Name, type, and url are required"));
        }
        validate_url(&url)?;

        Ok(NewMonitor {
            name,
            monitor_type,
            url,
        })
    }
}

impl UpdateMonitorRequest {
    fn validate(self) -> Result<MonitorPatch, ApiError> {
        let name = non_empty(self.name, "Name cannot be empty")?;
        let monitor_type = non_empty(self.monitor_type, "Type cannot be empty")?;
        let url = non_empty(self.url, "URL cannot be empty")?;
        if let Some(url) = &url {
            validate_url(url)?;
        }

        Ok(MonitorPatch {
            name,
            monitor_type,
            url,
        })
    }
}

fn non_empty(value: Option<String>, message: &'static str) -> Result<Option<String>, ApiError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if v.is_empty() => Err(ApiError::Validation(message)),
        other => Ok(other),
    }
}

fn validate_url(url: &str) -> Result<(), ApiError> {
    Url::parse(url)
        .map(|_| ())
        .map_err(|_| ApiError::Validation("Invalid URL"))
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::MonitorNotFound(0))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))
}

/// GET /monitor
pub async fn list_monitors(State(state): State<AppState>) -> Result<Json<Vec<Monitor>>, ApiError> {
    let monitors = state
        .health
        .list_monitors()
        .await
        .map_err(|e| ApiError::store("Failed to fetch monitors", e))?;
    Ok(Json(monitors))
}

/// POST /monitor
pub async fn create_monitor(
    State(state): State<AppState>,
    payload: Result<Json<CreateMonitorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Monitor>), ApiError> {
    let new = json_body(payload)?.validate()?;

    let monitor = state
        .store
        .create(&new)
        .await
        .map_err(|e| ApiError::store("Failed to create monitor", e))?;

    tracing::info!(monitor_id = monitor.id, url = %monitor.url, "Monitor created");
    state.health.on_monitor_created(monitor.id);

    Ok((StatusCode::CREATED, Json(monitor)))
}

/// PUT /monitor/:id
pub async fn update_monitor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateMonitorRequest>, JsonRejection>,
) -> Result<Json<Monitor>, ApiError> {
    let request = json_body(payload)?;
    let id = parse_id(&id)?;

    // 存在確認を検証より先に行う
    state
        .store
        .get(id)
        .await
        .map_err(|e| ApiError::store("Failed to update monitor", e))?;

    let patch = request.validate()?;
    let monitor = state
        .store
        .update_metadata(id, &patch)
        .await
        .map_err(|e| ApiError::store("Failed to update monitor", e))?;

    tracing::info!(monitor_id = monitor.id, "Monitor updated");
    state.health.on_monitor_updated(monitor.id);

    Ok(Json(monitor))
}

/// DELETE /monitor/:id
///
/// 存在しないIDでも成功を返す。
pub async fn delete_monitor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let removed = state
        .store
        .delete(id)
        .await
        .map_err(|e| ApiError::store("Failed to delete monitor", e))?;

    if removed {
        tracing::info!(monitor_id = id, "Monitor deleted");
    } else {
        tracing::debug!(monitor_id = id, "Delete requested for unknown monitor");
    }

    Ok(Json(json!({"message": "Monitor deleted"})))
}
