//! ヘルスサービス
//!
//! HTTP層から見たコアの入口。作成・更新イベントでオンデマンドチェックを起動し、
//! 全体ステータスと一覧を提供する。

use crate::common::error::StoreResult;
use crate::db::traits::SharedMonitorStore;
use crate::health::aggregator::{aggregate, GlobalStatus};
use crate::health::scheduler::MonitorScheduler;
use crate::types::monitor::Monitor;

/// ヘルスサービス
#[derive(Clone)]
pub struct HealthService {
    store: SharedMonitorStore,
    scheduler: MonitorScheduler,
}

impl HealthService {
    /// 新しいサービスを作成
    pub fn new(store: SharedMonitorStore, scheduler: MonitorScheduler) -> Self {
        Self { store, scheduler }
    }

    /// 監視対象が作成された
    pub fn on_monitor_created(&self, id: i64) {
        drop(self.scheduler.trigger(id));
    }

    /// 監視対象が更新された
    pub fn on_monitor_updated(&self, id: i64) {
        drop(self.scheduler.trigger(id));
    }

    /// 全体ステータスを計算する
    pub async fn get_global_status(&self) -> StoreResult<GlobalStatus> {
        let monitors = self.store.list_all().await?;
        Ok(aggregate(monitors.iter().map(|m| m.status)))
    }

    /// 監視対象一覧（ID昇順）
    pub async fn list_monitors(&self) -> StoreResult<Vec<Monitor>> {
        self.store.list_all().await
    }

    /// スケジューラーへの参照
    pub fn scheduler(&self) -> &MonitorScheduler {
        &self.scheduler
    }
}
