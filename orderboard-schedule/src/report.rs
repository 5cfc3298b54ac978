use orderboard_shared::Order;

/// Sum of order totals; orders without a total count as zero.
pub fn grand_total(orders: &[Order]) -> f64 {
    orders.iter().filter_map(|o| o.total).sum()
}

/// First non-empty currency in the snapshot, used to label the totals row.
pub fn totals_currency(orders: &[Order]) -> Option<&str> {
    orders
        .iter()
        .filter_map(|o| o.currency.as_deref())
        .find(|c| !c.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let mut a = Order::new("shop", "1", "#1");
        a.total = Some(10.5);
        a.currency = Some("".to_string());
        let b = Order::new("shop", "2", "#2");
        let mut c = Order::new("shop", "3", "#3");
        c.total = Some(4.5);
        c.currency = Some("USD".to_string());

        let orders = vec![a, b, c];
        assert_eq!(grand_total(&orders), 15.0);
        assert_eq!(totals_currency(&orders), Some("USD"));
        assert_eq!(totals_currency(&[]), None);
    }
}
