//! 監視対象プローバー
//!
//! 監視対象URLへGETを1回送信し、応答コードから稼働状態を導出して書き戻す。
//! リトライは行わない。通信エラーは `UNHEALTHY`（コード0・応答時間0）として記録する。
//! 開始したプローブはプロセス停止要求があっても最後まで実行する。

use crate::common::error::StoreError;
use crate::db::traits::MonitorStore;
use crate::types::monitor::{Monitor, ProbeResult};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// プローブのタイムアウト（秒）
pub const PROBE_TIMEOUT_SECS: u64 = 10;

/// HTTPプローバー
///
/// クローンは同じコネクションプールを共有する。
#[derive(Clone)]
pub struct Prober {
    client: Client,
}

impl Prober {
    /// 新しいプローバーを作成
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client })
    }

    /// URLへGETを1回送信して結果を分類する（書き戻しは行わない）
    pub async fn probe(&self, url: &str) -> ProbeResult {
        let request = match self.client.get(url).build() {
            Ok(request) => request,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to build probe request");
                return ProbeResult::unreachable();
            }
        };

        let started = Instant::now();
        match self.client.execute(request).await {
            Ok(response) => {
                let code = response.status().as_u16();
                let latency_ms = elapsed_ms(started.elapsed());
                // 本文は読まない
                drop(response);
                ProbeResult::responded(code, latency_ms)
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Probe request failed");
                ProbeResult::unreachable()
            }
        }
    }

    /// 監視対象をプローブし、結果をストアへ1回だけ書き戻す
    ///
    /// プローブ中に削除された場合は書き戻しが `NotFound` となり、ログのみ出力して破棄する。
    pub async fn check_monitor(&self, store: &dyn MonitorStore, monitor: &Monitor) -> ProbeResult {
        let result = self.probe(&monitor.url).await;

        debug!(
            monitor_id = monitor.id,
            status = %result.status,
            response_code = result.response_code,
            latency_ms = result.latency_ms,
            "Probe completed"
        );

        match store.update_probe_result(monitor.id, &result).await {
            Ok(()) => {}
            Err(StoreError::NotFound(id)) => {
                info!(monitor_id = id, "Monitor removed during probe, result discarded");
            }
            Err(e) => {
                error!(monitor_id = monitor.id, error = %e, "Failed to record probe result");
            }
        }

        result
    }
}

/// 応答を受信した場合の応答時間（ミリ秒、切り上げ）
///
/// 0は通信エラー専用の値なので、1ms未満の応答も1msとして記録する。
fn elapsed_ms(elapsed: Duration) -> u64 {
    let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
    micros.div_ceil(1000).max(1)
}
