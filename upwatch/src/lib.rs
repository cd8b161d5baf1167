//! upwatch
//!
//! HTTP監視対象を定期的にプローブし、全体の稼働状態を提供するサーバー

#![warn(missing_docs)]

/// 共通定義（エラー型）
pub mod common;

/// REST APIハンドラー
pub mod api;

/// アクセスキー認可
pub mod auth;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// プローブ・スケジューリング・集計
pub mod health;

/// ロギング初期化ユーティリティ
pub mod logging;

/// axumサーバー起動・シャットダウンハンドリング
pub mod server;

/// Cooperative shutdown controller
pub mod shutdown;

/// 型定義
pub mod types;

use std::time::Duration;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// 監視対象ストア
    pub store: db::traits::SharedMonitorStore,
    /// ヘルスサービス（オンデマンドチェック・集計）
    pub health: health::HealthService,
    /// アクセスキー
    pub access: auth::AccessKeys,
    /// Cooperative shutdown controller
    pub shutdown: shutdown::ShutdownController,
}

impl AppState {
    /// ストアとキーからアプリケーション状態を組み立てる
    ///
    /// スケジューラーは作成するだけで開始しない（`health.scheduler().start()` で開始）。
    pub fn new(
        store: db::traits::SharedMonitorStore,
        access: auth::AccessKeys,
        check_interval: Duration,
        shutdown: shutdown::ShutdownController,
    ) -> Result<Self, reqwest::Error> {
        let prober = health::Prober::new()?;
        let scheduler = health::MonitorScheduler::new(store.clone(), prober, shutdown.clone())
            .with_interval(check_interval);
        let health = health::HealthService::new(store.clone(), scheduler);

        Ok(Self {
            store,
            health,
            access,
            shutdown,
        })
    }
}
