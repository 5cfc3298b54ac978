use chrono::{DateTime, FixedOffset};
use orderboard_schedule::{report, DateCard, PrintCard, Scheduler};
use orderboard_shared::Order;
use serde::Serialize;

/// Everything the board and the delivery printout need for one refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub generated_at: DateTime<FixedOffset>,
    pub cards: Vec<DateCard>,
    pub print_run: Vec<PrintCard>,
    pub grand_total: f64,
    pub currency: Option<String>,
}

pub fn render(
    scheduler: &Scheduler,
    orders: &[Order],
    max_cards: usize,
    now: DateTime<FixedOffset>,
) -> BoardView {
    let cards = scheduler.build_cards(orders, max_cards, now);
    let print_run = scheduler.print_run(&cards, now);

    BoardView {
        generated_at: now,
        cards,
        print_run,
        grand_total: report::grand_total(orders),
        currency: report::totals_currency(orders).map(str::to_string),
    }
}
