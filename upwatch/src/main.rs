//! upwatch Server Entry Point

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use upwatch::auth::AccessKeys;
use upwatch::cli::{serve::ServeArgs, Cli, Commands};
use upwatch::config::{log_format_from_env, AppConfig};
use upwatch::db::migrations::initialize_database;
use upwatch::shutdown::ShutdownController;
use upwatch::{logging, server, AppState};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // .envは任意
    let _ = dotenvy::dotenv();

    // ロガーは設定読み込みより先に初期化する
    if let Err(e) = logging::init(log_format_from_env()) {
        eprintln!("failed to initialize logging: {}", e);
    }

    let args = match cli.command {
        Some(Commands::Serve(args)) => args,
        None => ServeArgs::default(),
    };

    if let Err(e) = run_server(args).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    info!(?config, "Configuration loaded");

    let pool = initialize_database(&config.database_url)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;

    let shutdown = ShutdownController::default();
    let state = AppState::new(
        Arc::new(pool.clone()),
        AccessKeys::new(&config.read_key, &config.admin_key),
        config.check_interval(),
        shutdown.clone(),
    )
    .context("failed to build HTTP client")?;

    let scheduler = state.health.scheduler().start();

    let host = args.host.unwrap_or(config.host);
    let port = args.port.unwrap_or(config.port);
    let bind_addr = format!("{}:{}", host, port);

    let result = server::run(state, &bind_addr)
        .await
        .with_context(|| format!("server error on {}", bind_addr));

    shutdown.request_shutdown();
    scheduler.stop().await;
    pool.close().await;

    result
}
