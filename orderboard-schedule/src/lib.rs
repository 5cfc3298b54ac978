pub mod calendar;
pub mod cards;
pub mod print;
pub mod report;
pub mod rules;
pub mod scheduler;
pub mod status;

pub use cards::DateCard;
pub use print::{is_cash_on_delivery, packing_marker, PackingMarker, PrintCard, PrintEntry};
pub use rules::SchedulingRules;
pub use scheduler::{has_note, is_exchange, is_express, Category, Scheduler};
pub use status::OrderStatus;

#[cfg(test)]
pub(crate) mod testing {
    use chrono::{DateTime, Duration, FixedOffset, TimeZone};
    use orderboard_shared::Order;

    /// Wednesday 2024-05-15 12:00 Beirut summer time.
    pub fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 15, 12, 0, 0)
            .unwrap()
    }

    pub fn order(name: &str, days_old: i64) -> Order {
        let mut order = Order::new("shop.myshopify.com", name.trim_start_matches('#'), name);
        order.created_at = Some(now() - Duration::days(days_old));
        order.shipping_method = Some("Standard".to_string());
        order.shipping_country = Some("Lebanon".to_string());
        order
    }
}
