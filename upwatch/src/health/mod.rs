//! ヘルスチェック監視
//!
//! 監視対象への定期・オンデマンドのプローブと、全体ステータスの集計。

pub mod aggregator;
pub mod prober;
pub mod scheduler;
pub mod service;

pub use aggregator::{aggregate, GlobalStatus};
pub use prober::Prober;
pub use scheduler::{MonitorScheduler, SchedulerHandle};
pub use service::HealthService;
