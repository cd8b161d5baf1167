//! REST APIハンドラー
//!
//! 全ルートにアクセスキー検証を適用する（GETは読み取りキー、それ以外は管理者キー）。

/// エラーレスポンス
pub mod error;

/// 監視対象CRUD
pub mod monitors;

/// 全体ステータス
pub mod status;

use crate::auth::middleware::require_access;
use crate::AppState;
use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

/// アプリケーションルーターを構築
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/monitor",
            get(monitors::list_monitors).post(monitors::create_monitor),
        )
        .route(
            "/monitor/:id",
            put(monitors::update_monitor).delete(monitors::delete_monitor),
        )
        .route("/status", get(status::get_status))
        .route_layer(middleware::from_fn_with_state(
            state.access.clone(),
            require_access,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
