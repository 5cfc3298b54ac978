use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use orderboard_schedule::Scheduler;
use orderboard_store::app_config::Config;
use orderboard_store::{OrderRepository, OrderSource};
use tokio::sync::watch;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::view::{render, BoardView};

/// Current wall-clock time in the shop's offset. The only place the board reads the clock.
pub fn shop_now(utc_offset_minutes: i32) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(utc_offset_minutes * 60).unwrap_or_else(|| {
        warn!(utc_offset_minutes, "invalid UTC offset, falling back to UTC");
        Utc.fix()
    });
    Utc::now().with_timezone(&offset)
}

/// Periodically refreshes the order snapshot and re-renders the board.
pub struct Board {
    config: Config,
    scheduler: Scheduler,
    source: Arc<dyn OrderSource>,
    repo: Arc<OrderRepository>,
}

impl Board {
    pub fn new(config: Config, source: Arc<dyn OrderSource>, repo: Arc<OrderRepository>) -> Self {
        let scheduler = Scheduler::new(config.scheduling.clone());
        Self {
            config,
            scheduler,
            source,
            repo,
        }
    }

    pub fn repo(&self) -> &Arc<OrderRepository> {
        &self.repo
    }

    /// Refresh the snapshot. A failed fetch keeps the previous snapshot on the board.
    pub async fn refresh_once(&self) -> bool {
        match self.repo.refresh(self.source.as_ref(), self.config.source.limit).await {
            Ok(_) => true,
            Err(e) => {
                error!("Failed to refresh orders: {}", e);
                false
            }
        }
    }

    /// One refresh-and-render cycle at `now`.
    pub async fn tick(&self, now: DateTime<FixedOffset>) -> BoardView {
        self.refresh_once().await;
        let orders = self.repo.snapshot().await;
        render(&self.scheduler, &orders, self.config.board.card_limit(), now)
    }

    /// Tick on the configured interval until `shutdown` flips to `true`,
    /// writing each view to stdout as one JSON line.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> anyhow::Result<()> {
        let mut ticker = interval(self.config.board.refresh_interval());
        info!(
            interval_secs = self.config.board.refresh_interval_seconds,
            max_cards = self.config.board.card_limit(),
            "board refresh loop started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let view = self.tick(shop_now(self.config.board.utc_offset_minutes)).await;
                    debug!(
                        cards = view.cards.len(),
                        printable = view.print_run.iter().map(|c| c.entries.len()).sum::<usize>(),
                        "board rendered"
                    );
                    println!("{}", serde_json::to_string(&view)?);
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("board refresh loop stopped");
        Ok(())
    }
}
