use orderboard_shared::Order;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Board status, derived from the order's tags on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Complete,
    Cancel,
    Shipped,
    Processing,
    Pending,
}

impl OrderStatus {
    /// Tag-backed statuses, highest precedence first.
    const PRECEDENCE: [OrderStatus; 4] = [
        OrderStatus::Complete,
        OrderStatus::Cancel,
        OrderStatus::Shipped,
        OrderStatus::Processing,
    ];

    /// Classify an order. Any order without a recognised status tag is pending,
    /// whatever its fulfillment status says, so nothing drops off the board.
    pub fn of(order: &Order) -> Self {
        Self::PRECEDENCE
            .into_iter()
            .find(|status| order.has_tag(status.as_str()))
            .unwrap_or(OrderStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Complete => "complete",
            OrderStatus::Cancel => "cancel",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Processing => "processing",
            OrderStatus::Pending => "pending",
        }
    }

    /// Only pending and processing orders still need a delivery date.
    pub fn is_schedulable(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tags: &[&str]) -> Order {
        let mut order = Order::new("shop", "1", "#1");
        order.tags = tags.iter().map(|t| t.to_string()).collect();
        order
    }

    #[test]
    fn test_untagged_is_pending() {
        assert_eq!(OrderStatus::of(&tagged(&[])), OrderStatus::Pending);

        let mut order = tagged(&["vip"]);
        order.fulfillment_status = Some("fulfilled".to_string());
        assert_eq!(OrderStatus::of(&order), OrderStatus::Pending);
    }

    #[test]
    fn test_precedence() {
        assert_eq!(OrderStatus::of(&tagged(&["processing", "shipped"])), OrderStatus::Shipped);
        assert_eq!(OrderStatus::of(&tagged(&["shipped", "cancel"])), OrderStatus::Cancel);
        assert_eq!(OrderStatus::of(&tagged(&["Processing"])), OrderStatus::Processing);
    }

    #[test]
    fn test_complete_wins_over_any_combination() {
        let others = ["cancel", "shipped", "processing", "exchange", "vip"];
        for mask in 0..(1u32 << others.len()) {
            let mut tags: Vec<&str> = others
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, t)| *t)
                .collect();
            tags.push("COMPLETE");
            assert_eq!(OrderStatus::of(&tagged(&tags)), OrderStatus::Complete);
        }
    }

    #[test]
    fn test_partial_words_do_not_match() {
        assert_eq!(OrderStatus::of(&tagged(&["completed?"])), OrderStatus::Pending);
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&OrderStatus::Cancel).unwrap(), "\"cancel\"");
    }
}
