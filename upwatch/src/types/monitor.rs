//! 監視対象（Monitor）関連の型定義
//!
//! 監視対象の定義と、最新のプローブ結果を1レコードで保持する。
//! 履歴は保持しない（最新の結果のみ）。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 監視対象の稼働状態
///
/// クライアントから直接設定されることはなく、常にプローブ結果から導出される。
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum MonitorStatus {
    /// 2xx/3xx 応答
    Healthy,
    /// 4xx 応答
    Degraded,
    /// 5xx 応答、または接続失敗
    Unhealthy,
    /// 未確認（作成直後・URL変更直後）
    #[default]
    Unknown,
}

impl MonitorStatus {
    /// MonitorStatusを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "HEALTHY",
            Self::Degraded => "DEGRADED",
            Self::Unhealthy => "UNHEALTHY",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// HTTPステータスコードから稼働状態を導出する
    ///
    /// - `[200, 400)` → `HEALTHY`
    /// - `[400, 500)` → `DEGRADED`
    /// - `0`（接続失敗）、`>= 500`、その他 → `UNHEALTHY`
    pub fn from_response_code(code: u16) -> Self {
        match code {
            200..=399 => Self::Healthy,
            400..=499 => Self::Degraded,
            _ => Self::Unhealthy,
        }
    }
}

impl FromStr for MonitorStatus {
    type Err = std::convert::Infallible;

    /// 大文字小文字を区別しない。未知の値は `UNKNOWN` として扱う。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_uppercase().as_str() {
            "HEALTHY" => Self::Healthy,
            "DEGRADED" => Self::Degraded,
            "UNHEALTHY" => Self::Unhealthy,
            _ => Self::Unknown,
        })
    }
}

impl std::fmt::Display for MonitorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 監視対象
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Monitor {
    /// 一意なID（作成時に採番、不変）
    pub id: i64,
    /// 表示名
    pub name: String,
    /// 種別（自由記述）
    #[serde(rename = "type")]
    pub monitor_type: String,
    /// プローブ対象URL
    pub url: String,
    /// 稼働状態
    pub status: MonitorStatus,
    /// 最終チェック日時（初回プローブ完了まではnull）
    pub last_check: Option<DateTime<Utc>>,
    /// 最終HTTPステータスコード（接続失敗時は0）
    pub last_response_code: u16,
    /// 最終応答時間（ミリ秒、接続失敗時は0）
    pub last_response_time_ms: u64,
}

/// 監視対象の作成パラメータ（検証済み）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMonitor {
    /// 表示名
    pub name: String,
    /// 種別
    pub monitor_type: String,
    /// プローブ対象URL
    pub url: String,
}

/// 監視対象メタデータの部分更新
///
/// `None` のフィールドは変更しない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorPatch {
    /// 表示名
    pub name: Option<String>,
    /// 種別
    pub monitor_type: Option<String>,
    /// プローブ対象URL
    pub url: Option<String>,
}

impl MonitorPatch {
    /// 変更が一つもないか
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.monitor_type.is_none() && self.url.is_none()
    }
}

/// 1回のプローブ結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    /// 導出された稼働状態
    pub status: MonitorStatus,
    /// プローブ完了日時
    pub checked_at: DateTime<Utc>,
    /// HTTPステータスコード（接続失敗時は0）
    pub response_code: u16,
    /// 応答時間（ミリ秒、接続失敗時は0）
    pub latency_ms: u64,
}

impl ProbeResult {
    /// HTTP応答が得られた場合の結果
    pub fn responded(response_code: u16, latency_ms: u64) -> Self {
        Self {
            status: MonitorStatus::from_response_code(response_code),
            checked_at: Utc::now(),
            response_code,
            latency_ms,
        }
    }

    /// 接続失敗（DNS・接続・TLS・タイムアウト）の結果
    pub fn unreachable() -> Self {
        Self {
            status: MonitorStatus::Unhealthy,
            checked_at: Utc::now(),
            response_code: 0,
            latency_ms: 0,
        }
    }
}
