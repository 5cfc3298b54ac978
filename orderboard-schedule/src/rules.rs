use serde::{Deserialize, Serialize};

/// Business rules the scheduler runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingRules {
    /// An open order becomes old once strictly more whole days than this have passed.
    pub old_after_days: i64,
    /// Business days from creation for express or international orders.
    pub express_window_days: u32,
    /// Business days from creation for everything else.
    pub standard_window_days: u32,
    /// Business days from today for old orders.
    pub old_window_days: u32,
    /// Destinations outside this country count as international.
    pub home_country: String,
    /// strftime pattern for card labels.
    pub card_label_format: String,
}

impl Default for SchedulingRules {
    fn default() -> Self {
        Self {
            old_after_days: 10,
            express_window_days: 1,
            standard_window_days: 7,
            old_window_days: 10,
            home_country: "Lebanon".to_string(),
            card_label_format: "%a %d %b".to_string(),
        }
    }
}
