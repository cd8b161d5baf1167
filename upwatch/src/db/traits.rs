//! Repository traitパターン定義
//!
//! 監視対象の永続化を抽象化する。HTTPハンドラーとスケジューラーは
//! `Arc<dyn MonitorStore>` を共有し、具体的な保存先を意識しない。

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::common::error::{StoreError, StoreResult};
use crate::types::monitor::{Monitor, MonitorPatch, NewMonitor, ProbeResult};

/// 共有ストアハンドル
pub type SharedMonitorStore = Arc<dyn MonitorStore>;

/// 監視対象CRUDとプローブ結果書き戻しのRepository trait
///
/// 同時に呼び出されても安全であること。書き戻しは「最後の書き込みが勝つ」。
#[async_trait]
pub trait MonitorStore: Send + Sync {
    /// 監視対象を登録（UNKNOWN・未チェックで作成）
    async fn create(&self, new: &NewMonitor) -> StoreResult<Monitor>;
    /// 全監視対象をID昇順で取得
    async fn list_all(&self) -> StoreResult<Vec<Monitor>>;
    /// IDで取得（存在しなければ `NotFound`）
    async fn get(&self, id: i64) -> StoreResult<Monitor>;
    /// メタデータを部分更新し、更新後のレコードを返す
    async fn update_metadata(&self, id: i64, patch: &MonitorPatch) -> StoreResult<Monitor>;
    /// 削除（削除した場合true）
    async fn delete(&self, id: i64) -> StoreResult<bool>;
    /// プローブ結果を書き戻す（結果カラムのみ。行が無ければ `NotFound`）
    async fn update_probe_result(&self, id: i64, result: &ProbeResult) -> StoreResult<()>;
}

#[async_trait]
impl MonitorStore for SqlitePool {
    async fn create(&self, new: &NewMonitor) -> StoreResult<Monitor> {
        Ok(super::monitors::create_monitor(self, new).await?)
    }

    async fn list_all(&self) -> StoreResult<Vec<Monitor>> {
        Ok(super::monitors::list_monitors(self).await?)
    }

    async fn get(&self, id: i64) -> StoreResult<Monitor> {
        super::monitors::get_monitor(self, id)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn update_metadata(&self, id: i64, patch: &MonitorPatch) -> StoreResult<Monitor> {
        // 変更なしはUPDATEを発行しない
        if patch.is_empty() {
            return self.get(id).await;
        }
        if !super::monitors::update_monitor_metadata(self, id, patch).await? {
            return Err(StoreError::NotFound(id));
        }
        self.get(id).await
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(super::monitors::delete_monitor(self, id).await?)
    }

    async fn update_probe_result(&self, id: i64, result: &ProbeResult) -> StoreResult<()> {
        if super::monitors::update_probe_result(self, id, result).await? {
            Ok(())
        } else {
            Err(StoreError::NotFound(id))
        }
    }
}
