use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate};
use orderboard_shared::Order;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::rules::SchedulingRules;
use crate::status::OrderStatus;

static EXPRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bexpress\b").expect("Invalid express regex"));

static SHIPPED_OR_COMPLETE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(shipped|complete)\b").expect("Invalid shipped/complete regex")
});

/// Sort bucket within a card. Declaration order is the print order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Express,
    International,
    Note,
    Exchange,
    Old,
    Regular,
}

/// Shipping method mentions the whole word "express".
pub fn is_express(order: &Order) -> bool {
    order
        .shipping_method
        .as_deref()
        .is_some_and(|method| EXPRESS.is_match(method))
}

/// Any of the local note, the Shopify note or a non-blank note attribute.
pub fn has_note(order: &Order) -> bool {
    let filled = |text: &Option<String>| text.as_deref().is_some_and(|t| !t.trim().is_empty());

    filled(&order.local_note)
        || filled(&order.note)
        || order
            .note_attributes
            .iter()
            .any(|attr| !attr.value.trim().is_empty())
}

/// Exchange orders are flagged either by tag or by the order source.
pub fn is_exchange(order: &Order) -> bool {
    order.has_tag("exchange")
        || order
            .source_name
            .as_deref()
            .is_some_and(|source| source.trim().eq_ignore_ascii_case("exchange"))
}

/// Assigns delivery dates and categories to orders.
///
/// Every time-dependent method takes `now` explicitly; "today" is the
/// calendar date of `now` in its own offset.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    rules: SchedulingRules,
}

impl Scheduler {
    pub fn new(rules: SchedulingRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &SchedulingRules {
        &self.rules
    }

    pub fn status_of(&self, order: &Order) -> OrderStatus {
        OrderStatus::of(order)
    }

    pub fn is_express(&self, order: &Order) -> bool {
        is_express(order)
    }

    /// Destination is set and is not the home country.
    pub fn is_outside_home(&self, order: &Order) -> bool {
        match order.shipping_country.as_deref().map(str::trim) {
            Some(country) if !country.is_empty() => {
                country.to_lowercase() != self.rules.home_country.trim().to_lowercase()
            }
            _ => false,
        }
    }

    /// Unshipped order whose age in whole days exceeds the threshold.
    pub fn is_old(&self, order: &Order, now: DateTime<FixedOffset>) -> bool {
        let Some(reference) = order.reference_timestamp() else {
            return false;
        };
        let age_days = (now - reference).num_days();
        let tag_text = order.tags.join(",");

        age_days > self.rules.old_after_days && !SHIPPED_OR_COMPLETE.is_match(&tag_text)
    }

    pub fn category_of(&self, order: &Order, now: DateTime<FixedOffset>) -> Category {
        let exchange = is_exchange(order);

        if is_express(order) {
            Category::Express
        } else if self.is_outside_home(order) {
            Category::International
        } else if has_note(order) && !exchange {
            Category::Note
        } else if exchange {
            Category::Exchange
        } else if self.is_old(order, now) {
            Category::Old
        } else {
            Category::Regular
        }
    }

    /// Target delivery date, or `None` when the order no longer needs delivering.
    ///
    /// A date that has already passed is never returned; it is moved forward
    /// relative to today instead. Weekends are never returned.
    pub fn deliver_date_for(&self, order: &Order, now: DateTime<FixedOffset>) -> Option<NaiveDate> {
        let today = now.date_naive();

        if let Some(explicit) = order.deliver_by {
            if explicit < today {
                return Some(self.reschedule_overdue(order, now));
            }
            return Some(calendar::next_business_day_on_or_after(explicit));
        }

        if !self.status_of(order).is_schedulable() {
            return None;
        }

        let automatic = if self.is_old(order, now) {
            calendar::add_business_days(today, self.rules.old_window_days)
        } else {
            let created = order
                .reference_timestamp()
                .map(|ts| ts.with_timezone(now.offset()).date_naive())
                .unwrap_or(today);
            let window = if self.is_express(order) || self.is_outside_home(order) {
                self.rules.express_window_days
            } else {
                self.rules.standard_window_days
            };
            calendar::add_business_days(created, window)
        };

        if automatic < today {
            return Some(self.reschedule_overdue(order, now));
        }
        Some(calendar::next_business_day_on_or_after(automatic))
    }

    fn reschedule_overdue(&self, order: &Order, now: DateTime<FixedOffset>) -> NaiveDate {
        let today = now.date_naive();
        if self.is_old(order, now) {
            calendar::add_business_days(today, self.rules.old_window_days)
        } else {
            calendar::add_business_days(today, 1)
        }
    }
}
