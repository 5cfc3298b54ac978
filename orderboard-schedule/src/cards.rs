use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::{DateTime, FixedOffset, NaiveDate};
use orderboard_shared::Order;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar;
use crate::scheduler::Scheduler;

/// One business day of scheduled deliveries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateCard {
    pub date: NaiveDate,
    pub label: String,
    pub orders: Vec<Order>,
}

impl DateCard {
    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

impl Scheduler {
    /// Bucket open orders into `max_cards` consecutive business-day cards,
    /// starting with the first business day after today.
    ///
    /// Orders dated outside the card window are left out.
    pub fn build_cards(
        &self,
        orders: &[Order],
        max_cards: usize,
        now: DateTime<FixedOffset>,
    ) -> Vec<DateCard> {
        let mut by_date: BTreeMap<NaiveDate, Vec<&Order>> = BTreeMap::new();
        let mut unscheduled = 0usize;

        for order in orders.iter().filter(|o| self.status_of(o).is_schedulable()) {
            match self.deliver_date_for(order, now) {
                Some(date) => by_date.entry(date).or_default().push(order),
                None => unscheduled += 1,
            }
        }

        let mut cards = Vec::new();
        let mut day = now
            .date_naive()
            .succ_opt()
            .map(calendar::next_business_day_on_or_after);

        while cards.len() < max_cards {
            let Some(date) = day else { break };
            if calendar::is_business_day(date) {
                let mut assigned: Vec<Order> = by_date
                    .remove(&date)
                    .unwrap_or_default()
                    .into_iter()
                    .cloned()
                    .collect();
                assigned.sort_by(|a, b| {
                    self.category_of(a, now)
                        .cmp(&self.category_of(b, now))
                        .then_with(|| a.order_name.cmp(&b.order_name))
                });
                cards.push(DateCard {
                    date,
                    label: self.label_for(date),
                    orders: assigned,
                });
            }
            day = date.succ_opt();
        }

        debug!(
            cards = cards.len(),
            scheduled = cards.iter().map(|c| c.orders.len()).sum::<usize>(),
            outside_window = by_date.values().map(Vec::len).sum::<usize>(),
            unscheduled,
            today = %now.date_naive(),
            "built delivery cards"
        );

        cards
    }

    fn label_for(&self, date: NaiveDate) -> String {
        let mut label = String::new();
        // An invalid pattern surfaces as a formatting error, not a panic.
        if write!(label, "{}", date.format(&self.rules().card_label_format)).is_err() {
            return date.format("%Y-%m-%d").to_string();
        }
        label
    }
}
