//! 監視対象データベース操作
//!
//! メタデータ更新とプローブ結果の書き戻しは別々のUPDATE文で行い、
//! 互いのカラムを上書きしない。

use crate::types::monitor::{Monitor, MonitorPatch, MonitorStatus, NewMonitor, ProbeResult};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

const SELECT_COLUMNS: &str = r#"
    SELECT id, name, type AS monitor_type, url, status, last_check,
           last_response_code, last_response_time_ms
    FROM monitors
"#;

/// 監視対象を登録（状態はUNKNOWN、未チェック）
pub async fn create_monitor(pool: &SqlitePool, new: &NewMonitor) -> Result<Monitor, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO monitors (name, type, url, status, last_check, last_response_code, last_response_time_ms)
        VALUES (?, ?, ?, ?, NULL, 0, 0)
        "#,
    )
    .bind(&new.name)
    .bind(&new.monitor_type)
    .bind(&new.url)
    .bind(MonitorStatus::Unknown.as_str())
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    get_monitor(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// 監視対象一覧を取得（ID昇順）
pub async fn list_monitors(pool: &SqlitePool) -> Result<Vec<Monitor>, sqlx::Error> {
    let rows = sqlx::query_as::<_, MonitorRow>(&format!("{SELECT_COLUMNS} ORDER BY id ASC"))
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// IDで監視対象を取得
pub async fn get_monitor(pool: &SqlitePool, id: i64) -> Result<Option<Monitor>, sqlx::Error> {
    let row = sqlx::query_as::<_, MonitorRow>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.into()))
}

/// メタデータ（名前・種別・URL）を部分更新
///
/// URLが実際に変わった場合のみ状態をUNKNOWNに戻す。
/// SQLiteのUPDATEは右辺を更新前の値で評価するため、`url` の比較は旧値に対して行われる。
pub async fn update_monitor_metadata(
    pool: &SqlitePool,
    id: i64,
    patch: &MonitorPatch,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE monitors SET
            name = COALESCE(?, name),
            type = COALESCE(?, type),
            status = CASE WHEN ? IS NOT NULL AND ? <> url THEN ? ELSE status END,
            url = COALESCE(?, url)
        WHERE id = ?
        "#,
    )
    .bind(&patch.name)
    .bind(&patch.monitor_type)
    .bind(&patch.url)
    .bind(&patch.url)
    .bind(MonitorStatus::Unknown.as_str())
    .bind(&patch.url)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// プローブ結果を書き戻す（結果カラムのみ）
pub async fn update_probe_result(
    pool: &SqlitePool,
    id: i64,
    probe: &ProbeResult,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE monitors SET
            status = ?, last_check = ?, last_response_code = ?, last_response_time_ms = ?
        WHERE id = ?
        "#,
    )
    .bind(probe.status.as_str())
    .bind(probe.checked_at.to_rfc3339())
    .bind(i64::from(probe.response_code))
    .bind(i64::try_from(probe.latency_ms).unwrap_or(i64::MAX))
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// 監視対象を削除
pub async fn delete_monitor(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM monitors WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[derive(sqlx::FromRow)]
struct MonitorRow {
    id: i64,
    name: String,
    monitor_type: String,
    url: String,
    status: String,
    last_check: Option<String>,
    last_response_code: i64,
    last_response_time_ms: i64,
}

impl From<MonitorRow> for Monitor {
    fn from(row: MonitorRow) -> Self {
        Monitor {
            id: row.id,
            name: row.name,
            monitor_type: row.monitor_type,
            url: row.url,
            status: row.status.parse().unwrap_or_default(),
            last_check: row
                .last_check
                .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                .map(|dt| dt.with_timezone(&Utc)),
            last_response_code: u16::try_from(row.last_response_code).unwrap_or(0),
            last_response_time_ms: u64::try_from(row.last_response_time_ms).unwrap_or(0),
        }
    }
}
