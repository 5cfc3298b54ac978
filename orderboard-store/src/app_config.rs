use orderboard_schedule::SchedulingRules;
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub scheduling: SchedulingRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub snapshot_path: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BoardConfig {
    #[serde(default = "default_max_cards")]
    pub max_cards: usize,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_seconds: u64,
    /// Offset of the shop's wall clock from UTC; decides what "today" is.
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            max_cards: default_max_cards(),
            refresh_interval_seconds: default_refresh_interval(),
            utc_offset_minutes: default_utc_offset(),
        }
    }
}

/// Upper bound on `max_cards`; roughly six months of business days.
pub const MAX_CARDS_LIMIT: usize = 130;

impl BoardConfig {
    pub fn card_limit(&self) -> usize {
        self.max_cards.min(MAX_CARDS_LIMIT)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_seconds.max(1))
    }
}

fn default_limit() -> usize { 50 }
fn default_max_cards() -> usize { 20 }
fn default_refresh_interval() -> u64 { 60 }
fn default_utc_offset() -> i32 { 180 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Layer `default`, the `RUN_MODE` file and `local` from `dir`, then `ORDERBOARD__*` env vars.
    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::from(dir.join("default")))
            // Optional per-environment overrides
            .add_source(config::File::from(dir.join(&run_mode)).required(false))
            // Not checked in
            .add_source(config::File::from(dir.join("local")).required(false))
            // Eg. `ORDERBOARD__BOARD__MAX_CARDS=10`
            .add_source(config::Environment::with_prefix("ORDERBOARD").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
