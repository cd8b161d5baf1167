//! 監視対象CRUD APIの統合テスト

use reqwest::StatusCode;
use serde_json::{json, Value};
use upwatch::types::{MonitorStatus, ProbeResult};

use crate::support::app::{spawn_test_app, ADMIN_KEY, READ_KEY};

#[tokio::test]
async fn create_monitor_returns_201_with_unknown_status() {
    let app = spawn_test_app().await;

    let response = app
        .post_json(
            "/monitor",
            Some(ADMIN_KEY),
            &json!({"name": "  api ", "type": "http", "url": "http://127.0.0.1:9/health"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["name"], "api");
    assert_eq!(body["type"], "http");
    assert_eq!(body["url"], "http://127.0.0.1:9/health");
    assert_eq!(body["status"], "UNKNOWN");
    assert!(body["last_check"].is_null());
    assert_eq!(body["last_response_code"], 0);
    assert_eq!(body["last_response_time_ms"], 0);

    app.stop().await;
}

#[tokio::test]
async fn create_monitor_validation_errors() {
    let app = spawn_test_app().await;

    let cases = [
        (json!({"name": "api", "type": "http"}), "Invalid request"),
        (
            json!({"name": "", "type": "http", "url": "https://example.com"}),
            "Invalid request",
        ),
        (
            json!({"name": "   ", "type": "http", "url": "https://example.com"}),
            "Name, type, and url are required",
        ),
        (
            json!({"name": "api", "type": "http", "url": "example.com/health"}),
            "Invalid URL",
        ),
    ];

    for (body, expected) in cases {
        let response = app.post_json("/monitor", Some(ADMIN_KEY), &body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: Value = response.json().await.unwrap();
        assert_eq!(json["message"], expected);
    }

    assert!(app.store.list_all().await.unwrap().is_empty());
    app.stop().await;
}

#[tokio::test]
async fn create_monitor_malformed_json_is_invalid_request() {
    let app = spawn_test_app().await;

    let response = app.post_raw("/monitor", ADMIN_KEY, "{not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: Value = response.json().await.unwrap();
    assert_eq!(json["message"], "Invalid request");

    app.stop().await;
}

#[tokio::test]
async fn list_monitors_in_id_order() {
    let app = spawn_test_app().await;

    for name in ["first", "second", "third"] {
        let response = app
            .post_json(
                "/monitor",
                Some(ADMIN_KEY),
                &json!({"name": name, "type": "http", "url": "http://127.0.0.1:9/"}),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.get("/monitor", Some(READ_KEY)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let monitors: Vec<Value> = response.json().await.unwrap();
    let names: Vec<&str> = monitors
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["first", "second", "third"]);

    let ids: Vec<i64> = monitors.iter().map(|m| m["id"].as_i64().unwrap()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);

    app.stop().await;
}

#[tokio::test]
async fn update_monitor_partial_fields() {
    let app = spawn_test_app().await;
    let created: Value = app
        .post_json(
            "/monitor",
            Some(ADMIN_KEY),
            &json!({"name": "api", "type": "http", "url": "http://127.0.0.1:9/"}),
        )
        .await
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let response = app
        .put_json(
            &format!("/monitor/{}", id),
            Some(ADMIN_KEY),
            &json!({"name": " renamed "}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "renamed");
    assert_eq!(updated["type"], "http");
    assert_eq!(updated["url"], "http://127.0.0.1:9/");

    app.stop().await;
}

#[tokio::test]
async fn update_monitor_url_change_resets_status() {
    let app = spawn_test_app().await;
    let created: Value = app
        .post_json(
            "/monitor",
            Some(ADMIN_KEY),
            &json!({"name": "api", "type": "http", "url": "http://127.0.0.1:9/"}),
        )
        .await
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    // 作成時のオンデマンドチェックの完了を待ってから結果を上書きする
    app.wait_for_probe(id).await;
    app.store
        .update_probe_result(id, &ProbeResult::responded(200, 10))
        .await
        .unwrap();

    // 名前のみの変更では状態を保持
    let updated: Value = app
        .put_json(
            &format!("/monitor/{}", id),
            Some(ADMIN_KEY),
            &json!({"type": "https"}),
        )
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(updated["status"], "HEALTHY");

    // URL変更でUNKNOWNに戻る
    let updated: Value = app
        .put_json(
            &format!("/monitor/{}", id),
            Some(ADMIN_KEY),
            &json!({"url": "http://127.0.0.1:9/other"}),
        )
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(updated["url"], "http://127.0.0.1:9/other");
    assert_eq!(updated["status"], "UNKNOWN");

    app.stop().await;
}

#[tokio::test]
async fn update_monitor_validation_and_not_found() {
    let app = spawn_test_app().await;
    let created: Value = app
        .post_json(
            "/monitor",
            Some(ADMIN_KEY),
            &json!({"name": "api", "type": "http", "url": "http://127.0.0.1:9/"}),
        )
        .await
        .json()
        .await
        .unwrap();
    let path = format!("/monitor/{}", created["id"]);

    let cases = [
        (json!({"name": ""}), "Name cannot be empty"),
        (json!({"type": "  "}), "Type cannot be empty"),
        (json!({"url": ""}), "URL cannot be empty"),
        (json!({"url": "nope"}), "Invalid URL"),
    ];
    for (body, expected) in cases {
        let response = app.put_json(&path, Some(ADMIN_KEY), &body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: Value = response.json().await.unwrap();
        assert_eq!(json["message"], expected);
    }

    let response = app
        .put_json("/monitor/999999", Some(ADMIN_KEY), &json!({"name": "x"}))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json: Value = response.json().await.unwrap();
    assert_eq!(json["message"], "Monitor not found");

    app.stop().await;
}

#[tokio::test]
async fn delete_monitor_is_idempotent() {
    let app = spawn_test_app().await;
    let created: Value = app
        .post_json(
            "/monitor",
            Some(ADMIN_KEY),
            &json!({"name": "api", "type": "http", "url": "http://127.0.0.1:9/"}),
        )
        .await
        .json()
        .await
        .unwrap();
    let path = format!("/monitor/{}", created["id"]);

    for _ in 0..2 {
        let response = app.delete(&path, Some(ADMIN_KEY)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = response.json().await.unwrap();
        assert_eq!(json["message"], "Monitor deleted");
    }

    let monitors: Vec<Value> = app.get("/monitor", Some(READ_KEY)).await.json().await.unwrap();
    assert!(monitors.is_empty());

    app.stop().await;
}

#[tokio::test]
async fn created_monitor_status_comes_from_probe() {
    let app = spawn_test_app().await;
    let created: Value = app
        .post_json(
            "/monitor",
            Some(ADMIN_KEY),
            &json!({"name": "api", "type": "http", "url": "http://127.0.0.1:9/", "status": "HEALTHY"}),
        )
        .await
        .json()
        .await
        .unwrap();
    // クライアントが指定した状態は無視される
    assert_eq!(created["status"], "UNKNOWN");

    let probed = app.wait_for_probe(created["id"].as_i64().unwrap()).await;
    assert_eq!(probed.status, MonitorStatus::Unhealthy);

    app.stop().await;
}
