//! プローブスケジューラー
//!
//! 一定間隔のバッチチェックと、作成・更新直後のオンデマンドチェックを提供する。
//! 各プローブは独立したタスクとして起動し、完了を待たない。

use crate::common::error::StoreError;
use crate::db::traits::SharedMonitorStore;
use crate::health::prober::Prober;
use crate::shutdown::ShutdownController;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// デフォルトのチェック間隔（秒）
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 30;

/// 監視対象スケジューラー
#[derive(Clone)]
pub struct MonitorScheduler {
    store: SharedMonitorStore,
    prober: Prober,
    check_interval: Duration,
    shutdown: ShutdownController,
}

impl MonitorScheduler {
    /// 新しいスケジューラーを作成（間隔はデフォルト）
    ///
    /// `shutdown` はプロセス全体の停止シグナル。観測するとループを抜ける。
    pub fn new(store: SharedMonitorStore, prober: Prober, shutdown: ShutdownController) -> Self {
        Self {
            store,
            prober,
            check_interval: Duration::from_secs(DEFAULT_CHECK_INTERVAL_SECS),
            shutdown,
        }
    }

    /// チェック間隔を設定（0はデフォルトへフォールバック）
    pub fn with_interval(mut self, check_interval: Duration) -> Self {
        self.check_interval = if check_interval.is_zero() {
            Duration::from_secs(DEFAULT_CHECK_INTERVAL_SECS)
        } else {
            check_interval
        };
        self
    }

    /// 設定済みのチェック間隔
    pub fn check_interval(&self) -> Duration {
        self.check_interval
    }

    /// バックグラウンドで定期バッチを開始
    ///
    /// 最初のバッチは1間隔後に実行される。
    pub fn start(&self) -> SchedulerHandle {
        let stop = ShutdownController::default();
        let scheduler = self.clone();
        let loop_stop = stop.clone();
        let task = tokio::spawn(async move { scheduler.monitor_loop(loop_stop).await });

        SchedulerHandle { stop, task }
    }

    async fn monitor_loop(&self, stop: ShutdownController) {
        let mut timer = interval(self.check_interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_secs = self.check_interval.as_secs_f64(),
            "Monitor scheduler started"
        );

        // `interval()` は初回に即時tickするため読み捨てる
        timer.tick().await;

        loop {
            tokio::select! {
                _ = stop.wait() => break,
                _ = self.shutdown.wait() => break,
                _ = timer.tick() => {
                    self.run_batch().await;
                }
            }
        }

        info!("Monitor scheduler stopped");
    }

    /// 全監視対象を1回ずつプローブするタスクを起動する
    ///
    /// 一覧取得に失敗した場合はログを出してバッチを諦める（次のtickで再試行）。
    pub async fn run_batch(&self) -> Vec<JoinHandle<()>> {
        let monitors = match self.store.list_all().await {
            Ok(monitors) => monitors,
            Err(e) => {
                error!(error = %e, "Failed to list monitors for batch check");
                return Vec::new();
            }
        };

        debug!(count = monitors.len(), "Starting batch check");

        monitors
            .into_iter()
            .map(|monitor| {
                let prober = self.prober.clone();
                let store = self.store.clone();
                tokio::spawn(async move {
                    prober.check_monitor(store.as_ref(), &monitor).await;
                })
            })
            .collect()
    }

    /// 指定IDの監視対象を1回プローブするタスクを起動する（呼び出し元はブロックしない）
    ///
    /// 存在しないIDはログを出して破棄する。
    pub fn trigger(&self, id: i64) -> JoinHandle<()> {
        let prober = self.prober.clone();
        let store = self.store.clone();

        tokio::spawn(async move {
            let monitor = match store.get(id).await {
                Ok(monitor) => monitor,
                Err(StoreError::NotFound(_)) => {
                    warn!(monitor_id = id, "Triggered check for unknown monitor");
                    return;
                }
                Err(e) => {
                    error!(monitor_id = id, error = %e, "Failed to load monitor for triggered check");
                    return;
                }
            };
            prober.check_monitor(store.as_ref(), &monitor).await;
        })
    }
}

/// 起動中のスケジューラーループへのハンドル
pub struct SchedulerHandle {
    stop: ShutdownController,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// ループに停止を通知し、終了を待つ
    ///
    /// 実行中のプローブは中断も待機もしない。
    pub async fn stop(self) {
        self.stop.request_shutdown();
        if let Err(e) = self.task.await {
            error!(error = %e, "Monitor scheduler task failed");
        }
    }

    /// ループが終了済みか
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
