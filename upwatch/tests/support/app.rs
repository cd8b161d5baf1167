use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::Value;
use upwatch::auth::AccessKeys;
use upwatch::db::migrations::initialize_database;
use upwatch::db::traits::SharedMonitorStore;
use upwatch::shutdown::ShutdownController;
use upwatch::types::{Monitor, MonitorStatus};
use upwatch::{api, AppState};

use super::http::{spawn_router, TestServer};

pub const READ_KEY: &str = "test-read-key";
pub const ADMIN_KEY: &str = "test-admin-key";

/// 実ポートで起動したテスト用アプリケーション
#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub store: SharedMonitorStore,
    pub client: Client,
}

#[allow(dead_code)]
impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.server.addr(), path)
    }

    pub async fn get(&self, path: &str, key: Option<&str>) -> Response {
        let mut request = self.client.get(self.url(path));
        if let Some(key) = key {
            request = request.header("Authorization", key);
        }
        request.send().await.unwrap()
    }

    pub async fn post_json(&self, path: &str, key: Option<&str>, body: &Value) -> Response {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(key) = key {
            request = request.header("Authorization", key);
        }
        request.send().await.unwrap()
    }

    pub async fn post_raw(&self, path: &str, key: &str, body: &'static str) -> Response {
        self.client
            .post(self.url(path))
            .header("Authorization", key)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn put_json(&self, path: &str, key: Option<&str>, body: &Value) -> Response {
        let mut request = self.client.put(self.url(path)).json(body);
        if let Some(key) = key {
            request = request.header("Authorization", key);
        }
        request.send().await.unwrap()
    }

    pub async fn delete(&self, path: &str, key: Option<&str>) -> Response {
        let mut request = self.client.delete(self.url(path));
        if let Some(key) = key {
            request = request.header("Authorization", key);
        }
        request.send().await.unwrap()
    }

    /// 監視対象の状態が `UNKNOWN` 以外になるまで待つ
    pub async fn wait_for_probe(&self, id: i64) -> Monitor {
        for _ in 0..80 {
            let monitor = self.store.get(id).await.unwrap();
            if monitor.status != MonitorStatus::Unknown && monitor.last_check.is_some() {
                return monitor;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        panic!("monitor {} was never probed", id);
    }

    pub async fn stop(self) {
        self.state.shutdown.request_shutdown();
        self.server.stop().await;
    }
}

/// インメモリDBでアプリケーションを起動する（スケジューラーは開始しない）
pub async fn spawn_test_app() -> TestApp {
    spawn_test_app_with_interval(Duration::from_secs(30)).await
}

/// チェック間隔を指定してアプリケーションを起動する
pub async fn spawn_test_app_with_interval(check_interval: Duration) -> TestApp {
    let pool = initialize_database("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    let store: SharedMonitorStore = Arc::new(pool);

    let state = AppState::new(
        store.clone(),
        AccessKeys::new(READ_KEY, ADMIN_KEY),
        check_interval,
        ShutdownController::default(),
    )
    .expect("Failed to build app state");

    let server = spawn_router(api::create_app(state.clone())).await;

    TestApp {
        server,
        state,
        store,
        client: Client::new(),
    }
}
