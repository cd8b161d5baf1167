//! 全体ステータスAPIの統合テスト

use reqwest::StatusCode;
use serde_json::{json, Value};
use upwatch::types::{NewMonitor, ProbeResult};

use crate::support::app::{spawn_test_app, ADMIN_KEY, READ_KEY};

fn new_monitor(name: &str) -> NewMonitor {
    NewMonitor {
        name: name.to_string(),
        monitor_type: "http".to_string(),
        url: "http://127.0.0.1:9/".to_string(),
    }
}

#[tokio::test]
async fn status_with_no_monitors_is_unknown() {
    let app = spawn_test_app().await;

    let response = app.get("/status", Some(READ_KEY)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"status": "UNKNOWN", "monitors": 0, "healthy_monitors": 0})
    );

    app.stop().await;
}

#[tokio::test]
async fn status_with_mixed_monitors_is_degraded() {
    let app = spawn_test_app().await;

    for (name, code) in [("a", 200), ("b", 204), ("c", 404)] {
        let monitor = app.store.create(&new_monitor(name)).await.unwrap();
        app.store
            .update_probe_result(monitor.id, &ProbeResult::responded(code, 12))
            .await
            .unwrap();
    }

    let body: Value = app
        .get("/status", Some(ADMIN_KEY))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(
        body,
        json!({"status": "DEGRADED", "monitors": 3, "healthy_monitors": 2})
    );

    app.stop().await;
}

#[tokio::test]
async fn status_all_unhealthy_or_unknown() {
    let app = spawn_test_app().await;

    let a = app.store.create(&new_monitor("a")).await.unwrap();
    app.store.create(&new_monitor("b")).await.unwrap();

    let body: Value = app.get("/status", Some(READ_KEY)).await.json().await.unwrap();
    assert_eq!(body["status"], "UNKNOWN");

    app.store
        .update_probe_result(a.id, &ProbeResult::unreachable())
        .await
        .unwrap();

    let body: Value = app.get("/status", Some(READ_KEY)).await.json().await.unwrap();
    assert_eq!(body["status"], "UNHEALTHY");
    assert_eq!(body["monitors"], 2);
    assert_eq!(body["healthy_monitors"], 0);

    app.stop().await;
}
