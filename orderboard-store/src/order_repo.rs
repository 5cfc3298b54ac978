use chrono::NaiveDate;
use orderboard_shared::{Order, OrderKey};
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};
use crate::source::OrderSource;

/// In-memory order snapshot shared by the refresh loop and the board.
///
/// Delivery dates and local notes entered by staff survive refreshes as
/// long as upstream does not send its own value.
#[derive(Default)]
pub struct OrderRepository {
    orders: RwLock<Vec<Order>>,
}

impl OrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a fresh snapshot. Returns the number of orders kept.
    pub async fn replace(&self, incoming: Vec<Order>) -> usize {
        let mut orders = self.orders.write().await;

        let previous: HashMap<OrderKey, (Option<NaiveDate>, Option<String>)> = orders
            .drain(..)
            .map(|o| (o.key(), (o.deliver_by, o.local_note)))
            .collect();

        let mut seen = HashSet::new();
        for mut order in incoming {
            let key = order.key();
            if !seen.insert(key.clone()) {
                warn!(order = %key, "duplicate order in snapshot, keeping the first");
                continue;
            }
            if let Some((deliver_by, local_note)) = previous.get(&key) {
                if order.deliver_by.is_none() {
                    order.deliver_by = *deliver_by;
                }
                if order.local_note.is_none() {
                    order.local_note = local_note.clone();
                }
            }
            orders.push(order);
        }

        orders.len()
    }

    /// Fetch from `source` and replace the snapshot.
    pub async fn refresh(&self, source: &dyn OrderSource, limit: usize) -> StoreResult<usize> {
        let fetched = source.fetch_orders(limit).await?;
        let count = self.replace(fetched).await;
        info!(count, "order snapshot refreshed");
        Ok(count)
    }

    /// Clone of the current snapshot, in upstream order.
    pub async fn snapshot(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }

    pub async fn get(&self, key: &OrderKey) -> Option<Order> {
        self.orders.read().await.iter().find(|o| &o.key() == key).cloned()
    }

    /// Set or clear the staff-entered delivery date and note. Blank notes clear the note.
    pub async fn set_delivery(
        &self,
        key: &OrderKey,
        deliver_by: Option<NaiveDate>,
        local_note: Option<String>,
    ) -> StoreResult<Order> {
        let mut orders = self.orders.write().await;
        let order = find_mut(&mut orders, key)?;

        order.deliver_by = deliver_by;
        order.local_note = local_note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        info!(order = %key, deliver_by = ?order.deliver_by, "delivery details updated");
        Ok(order.clone())
    }

    /// Returns `true` when the tag was added.
    pub async fn add_tag(&self, key: &OrderKey, tag: &str) -> StoreResult<bool> {
        let mut orders = self.orders.write().await;
        Ok(find_mut(&mut orders, key)?.add_tag(tag))
    }
}

fn find_mut<'a>(orders: &'a mut [Order], key: &OrderKey) -> StoreResult<&'a mut Order> {
    orders
        .iter_mut()
        .find(|o| o.shop_domain == key.shop_domain && o.order_id == key.order_id)
        .ok_or_else(|| StoreError::NotFound(key.to_string()))
}
