//! CLI module for upwatch

pub mod serve;

use clap::{Parser, Subcommand};

/// upwatch - HTTP uptime monitoring service
#[derive(Parser, Debug)]
#[command(name = "upwatch")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    UPWATCH_READ_KEY             Read-only access key (required)
    UPWATCH_ADMIN_KEY            Admin access key (required)
    UPWATCH_CHECK_INTERVAL_SECS  Batch check interval in seconds (default: 30)
    UPWATCH_DATABASE_URL         Database URL (default: sqlite:monitors.db)
    UPWATCH_HOST                 Bind address (default: 0.0.0.0)
    UPWATCH_PORT                 Listen port (default: 8080)
    UPWATCH_LOG_FORMAT           compact | json (default: compact)
    RUST_LOG                     Log filter (default: info)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the monitoring server
    Serve(serve::ServeArgs),
}
