use std::sync::Arc;

use orderboard_app::Board;
use orderboard_store::app_config::Config;
use orderboard_store::{FileOrderSource, OrderRepository};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orderboard_app=debug,orderboard_store=info,orderboard_schedule=info".into()),
        )
        // stdout carries the board JSON
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;
    tracing::info!("Starting order board from {}", config.source.snapshot_path);

    let source = Arc::new(FileOrderSource::new(&config.source.snapshot_path));
    let repo = Arc::new(OrderRepository::new());
    let board = Board::new(config, source, repo);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested");
            let _ = shutdown_tx.send(true);
        }
    });

    board.run(shutdown_rx).await
}
