//! ロギング初期化ユーティリティ
//!
//! `RUST_LOG` でフィルタ（既定: info）、ログ形式は `AppConfig::log_format` で選択する。

use crate::config::LogFormat;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, Layer,
};

/// 指定したログ形式でグローバルsubscriberを初期化する
///
/// 既に初期化済みの場合はエラーを返す。
pub fn init(format: LogFormat) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let log_layer = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_filter(env_filter)
            .boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .with_filter(env_filter)
            .boxed(),
    };

    tracing_subscriber::registry().with(log_layer).try_init()
}
