use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use super::order::{deserialize_optional_timestamp, split_tags, NoteAttribute, Order};
use crate::pii::Masked;

/// Body of a Shopify `orders/create` / `orders/updated` webhook.
///
/// Only the fields the board reads are modelled; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyOrderPayload {
    pub id: u64,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub updated_at: Option<DateTime<FixedOffset>>,
    pub fulfillment_status: Option<String>,
    #[serde(default)]
    pub tags: String,
    pub current_total_price: Option<String>,
    pub total_price: Option<String>,
    pub currency: Option<String>,
    pub email: Option<String>,
    pub note: Option<String>,
    #[serde(default)]
    pub note_attributes: Vec<NoteAttribute>,
    pub source_name: Option<String>,
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub shipping_lines: Vec<ShippingLine>,
    #[serde(default)]
    pub payment_gateway_names: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShippingAddress {
    pub country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShippingLine {
    pub title: Option<String>,
}

impl ShopifyOrderPayload {
    /// Map the webhook body onto the board's order record for `shop_domain`.
    pub fn into_order(self, shop_domain: &str) -> Order {
        let total = self
            .current_total_price
            .as_deref()
            .or(self.total_price.as_deref())
            .and_then(|p| p.trim().parse().ok());

        Order {
            shop_domain: shop_domain.to_string(),
            order_id: self.id.to_string(),
            order_name: self.name.unwrap_or_else(|| self.id.to_string()),
            created_at: self.created_at,
            updated_at: self.updated_at,
            fulfillment_status: self.fulfillment_status,
            tags: split_tags(&self.tags),
            shipping_method: self.shipping_lines.into_iter().find_map(|l| l.title),
            shipping_country: self.shipping_address.and_then(|a| a.country),
            note: self.note,
            note_attributes: self.note_attributes,
            source_name: self.source_name,
            payment_gateway: self.payment_gateway_names.into_iter().next(),
            customer_email: self.email.map(Masked),
            total,
            currency: self.currency,
            deliver_by: None,
            local_note: None,
        }
    }
}
