use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate};
use orderboard_shared::Order;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::cards::DateCard;
use crate::scheduler::{has_note, is_exchange, is_express, Category, Scheduler};

static NORTH_LEBANON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)north\s*lebanon").expect("Invalid north zone regex"));

static SOUTH_LEBANON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)south\s*lebanon").expect("Invalid south zone regex"));

/// Large marker stamped on a packing slip. Serializes as the printed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackingMarker {
    #[serde(rename = "EXPRESS")]
    Express,
    /// North Lebanon run.
    #[serde(rename = "N")]
    North,
    /// South Lebanon run.
    #[serde(rename = "A")]
    South,
}

/// One order as it appears on the printed delivery summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintEntry {
    pub order: Order,
    pub category: Category,
    pub marker: Option<PackingMarker>,
    pub cash_on_delivery: bool,
}

/// A day of the printed delivery summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintCard {
    pub date: NaiveDate,
    pub label: String,
    pub entries: Vec<PrintEntry>,
}

impl PackingMarker {
    pub fn text(&self) -> &'static str {
        match self {
            PackingMarker::Express => "EXPRESS",
            PackingMarker::North => "N",
            PackingMarker::South => "A",
        }
    }
}

pub fn packing_marker(order: &Order) -> Option<PackingMarker> {
    if is_express(order) {
        return Some(PackingMarker::Express);
    }
    let method = order.shipping_method.as_deref().unwrap_or_default();
    if NORTH_LEBANON.is_match(method) {
        Some(PackingMarker::North)
    } else if SOUTH_LEBANON.is_match(method) {
        Some(PackingMarker::South)
    } else {
        None
    }
}

pub fn is_cash_on_delivery(order: &Order) -> bool {
    let gateway = order.payment_gateway.as_deref().unwrap_or_default().to_lowercase();
    gateway.contains("cod") || gateway.contains("cash on delivery")
}

impl Scheduler {
    /// Whether the order goes on the printed delivery summary.
    ///
    /// Old orders without any note are never printed.
    pub fn should_print_card(&self, order: &Order, now: DateTime<FixedOffset>) -> bool {
        let noted = has_note(order);
        if self.is_old(order, now) && !noted {
            return false;
        }
        self.is_express(order) || self.is_outside_home(order) || noted || is_exchange(order)
    }

    /// The label an order is printed under, `None` when it is not printed.
    pub fn print_status(&self, order: &Order, now: DateTime<FixedOffset>) -> Option<Category> {
        self.should_print_card(order, now)
            .then(|| self.category_of(order, now))
    }

    /// Printable entry for an order, `None` when it is not printed.
    pub fn print_entry(&self, order: &Order, now: DateTime<FixedOffset>) -> Option<PrintEntry> {
        self.print_status(order, now).map(|category| PrintEntry {
            order: order.clone(),
            category,
            marker: packing_marker(order),
            cash_on_delivery: is_cash_on_delivery(order),
        })
    }

    /// Printable subset of a card sequence, keeping card order.
    /// Cards with nothing to print are dropped.
    pub fn print_run(&self, cards: &[DateCard], now: DateTime<FixedOffset>) -> Vec<PrintCard> {
        cards
            .iter()
            .filter_map(|card| {
                let entries: Vec<PrintEntry> = card
                    .orders
                    .iter()
                    .filter_map(|o| self.print_entry(o, now))
                    .collect();
                (!entries.is_empty()).then(|| PrintCard {
                    date: card.date,
                    label: card.label.clone(),
                    entries,
                })
            })
            .collect()
    }
}
