//! 全体ステータス集計
//!
//! 個々の監視対象の状態から単一の全体ステータスを導出する。
//! リクエストごとに計算し、キャッシュしない。

use crate::types::monitor::MonitorStatus;
use serde::{Deserialize, Serialize};

/// 全体ステータス
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlobalStatus {
    /// 集計された状態
    pub status: MonitorStatus,
    /// 監視対象の総数
    pub monitors: usize,
    /// `HEALTHY` の監視対象数
    pub healthy_monitors: usize,
}

/// 状態の列から全体ステータスを集計する
///
/// 1. 監視対象なし → `UNKNOWN`
/// 2. 全て `HEALTHY` → `HEALTHY`
/// 3. `HEALTHY`・`DEGRADED` が無く全て `UNKNOWN` → `UNKNOWN`
/// 4. `HEALTHY`・`DEGRADED` が無い → `UNHEALTHY`
/// 5. それ以外 → `DEGRADED`
pub fn aggregate<I>(statuses: I) -> GlobalStatus
where
    I: IntoIterator<Item = MonitorStatus>,
{
    let mut total = 0usize;
    let mut healthy = 0usize;
    let mut degraded = 0usize;
    let mut unknown = 0usize;

    for status in statuses {
        total += 1;
        match status {
            MonitorStatus::Healthy => healthy += 1,
            MonitorStatus::Degraded => degraded += 1,
            MonitorStatus::Unknown => unknown += 1,
            MonitorStatus::Unhealthy => {}
        }
    }

    let status = if total == 0 {
        MonitorStatus::Unknown
    } else if healthy == total {
        MonitorStatus::Healthy
    } else if healthy == 0 && degraded == 0 {
        if unknown == total {
            MonitorStatus::Unknown
        } else {
            MonitorStatus::Unhealthy
        }
    } else {
        MonitorStatus::Degraded
    };

    GlobalStatus {
        status,
        monitors: total,
        healthy_monitors: healthy,
    }
}
