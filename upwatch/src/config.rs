//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to legacy variable names with warning logs, plus the `AppConfig` loaded at startup.

use crate::common::error::ConfigError;
use crate::health::scheduler::DEFAULT_CHECK_INTERVAL_SECS;
use std::time::Duration;

/// Get an environment variable with fallback to a legacy name
///
/// If the new variable name is set, returns its value.
/// If only the old (legacy) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use upwatch::config::get_env_with_fallback;
///
/// let port = get_env_with_fallback("UPWATCH_PORT", "PORT");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// ログ出力形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// 人間向けの1行形式
    #[default]
    Compact,
    /// 構造化JSON
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Compact
        }
    }
}

/// アプリケーション設定
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 読み取り専用キー
    pub read_key: String,
    /// 管理者キー
    pub admin_key: String,
    /// バッチチェック間隔（秒、0は既定値へフォールバック）
    pub check_interval_secs: u64,
    /// SQLite接続URL
    pub database_url: String,
    /// バインドホスト
    pub host: String,
    /// バインドポート
    pub port: u16,
}

// キーをログに出さない
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("read_key", &"<redacted>")
            .field("admin_key", &"<redacted>")
            .field("check_interval_secs", &self.check_interval_secs)
            .field("database_url", &self.database_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    ///
    /// 読み取りキー・管理者キーのいずれかが未設定（または空白のみ）の場合はエラー。
    pub fn from_env() -> Result<Self, ConfigError> {
        let read_key = required_key("UPWATCH_READ_KEY", "READ_KEY")?;
        let admin_key = required_key("UPWATCH_ADMIN_KEY", "ADMIN_KEY")?;

        let check_interval_secs = get_env_with_fallback_parse(
            "UPWATCH_CHECK_INTERVAL_SECS",
            "CHECK_INTERVAL_SECONDS",
            DEFAULT_CHECK_INTERVAL_SECS,
        );

        Ok(Self {
            read_key,
            admin_key,
            check_interval_secs,
            database_url: get_env_with_fallback_or(
                "UPWATCH_DATABASE_URL",
                "DATABASE_URL",
                "sqlite:monitors.db",
            ),
            host: get_env_with_fallback_or("UPWATCH_HOST", "HOST", "0.0.0.0"),
            port: get_env_with_fallback_parse("UPWATCH_PORT", "PORT", 8080u16),
        })
    }

    /// バッチチェック間隔
    ///
    /// 0秒は既定値（30秒）として扱う。
    pub fn check_interval(&self) -> Duration {
        if self.check_interval_secs == 0 {
            Duration::from_secs(DEFAULT_CHECK_INTERVAL_SECS)
        } else {
            Duration::from_secs(self.check_interval_secs)
        }
    }
}

/// ログ形式を環境変数から取得（ロガー初期化前に参照される）
pub fn log_format_from_env() -> LogFormat {
    get_env_with_fallback("UPWATCH_LOG_FORMAT", "RUST_LOG_FORMAT")
        .map(|value| LogFormat::parse(&value))
        .unwrap_or_default()
}

fn required_key(new_name: &'static str, old_name: &str) -> Result<String, ConfigError> {
    get_env_with_fallback(new_name, old_name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingKey(new_name))
}
