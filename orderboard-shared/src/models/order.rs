use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::pii::Masked;

/// A store order as mirrored from Shopify into the board's snapshot.
///
/// Everything except `deliver_by` and `local_note` comes from upstream;
/// those two are set from the board by staff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    #[serde(alias = "SHOP_DOMAIN")]
    pub shop_domain: String,
    #[serde(alias = "ORDER_ID")]
    pub order_id: String,
    #[serde(alias = "ORDER_NAME", alias = "name")]
    pub order_name: String,
    #[serde(alias = "CREATED_AT", deserialize_with = "deserialize_optional_timestamp")]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(alias = "UPDATED_AT", deserialize_with = "deserialize_optional_timestamp")]
    pub updated_at: Option<DateTime<FixedOffset>>,
    #[serde(alias = "FULFILLMENT_STATUS")]
    pub fulfillment_status: Option<String>,
    #[serde(alias = "TAGS", deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub shipping_method: Option<String>,
    pub shipping_country: Option<String>,
    pub note: Option<String>,
    pub note_attributes: Vec<NoteAttribute>,
    pub source_name: Option<String>,
    pub payment_gateway: Option<String>,
    #[serde(alias = "CUSTOMER_EMAIL")]
    pub customer_email: Option<Masked<String>>,
    #[serde(alias = "TOTAL", deserialize_with = "deserialize_total")]
    pub total: Option<f64>,
    #[serde(alias = "CURRENCY")]
    pub currency: Option<String>,
    pub deliver_by: Option<NaiveDate>,
    pub local_note: Option<String>,
}

/// A `name`/`value` pair from Shopify's cart attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteAttribute {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// Identity of an order across shops.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderKey {
    pub shop_domain: String,
    pub order_id: String,
}

impl OrderKey {
    pub fn new(shop_domain: impl Into<String>, order_id: impl Into<String>) -> Self {
        Self {
            shop_domain: shop_domain.into(),
            order_id: order_id.into(),
        }
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.shop_domain, self.order_id)
    }
}

impl Order {
    pub fn new(
        shop_domain: impl Into<String>,
        order_id: impl Into<String>,
        order_name: impl Into<String>,
    ) -> Self {
        Self {
            shop_domain: shop_domain.into(),
            order_id: order_id.into(),
            order_name: order_name.into(),
            ..Self::default()
        }
    }

    pub fn key(&self) -> OrderKey {
        OrderKey::new(self.shop_domain.clone(), self.order_id.clone())
    }

    /// Trimmed, non-empty tags.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty())
    }

    /// Case-insensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Add a tag unless the order already carries it.
    /// Returns `true` when the tag set changed.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.has_tag(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// The timestamp the order's age is measured from.
    pub fn reference_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        self.created_at.or(self.updated_at)
    }
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTags {
        List(Vec<String>),
        Joined(String),
    }

    let raw: Option<RawTags> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawTags::List(list)) => list
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        Some(RawTags::Joined(joined)) => split_tags(&joined),
        None => Vec::new(),
    })
}

/// Shopify stores tags as one comma-separated string.
pub(crate) fn split_tags(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// RFC 3339, or the Sheets export's `%Y-%m-%d %H:%M:%S` read as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok()?;
        FixedOffset::east_opt(0).map(|utc| utc.from_utc_datetime(&naive))
    })
}

/// Blank, malformed or non-string timestamps become `None` instead of failing the snapshot.
pub(crate) fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let raw: Option<RawTimestamp> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawTimestamp::Text(text)) => parse_timestamp(&text),
        Some(RawTimestamp::Other(_)) | None => None,
    })
}

fn deserialize_total<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTotal {
        Number(f64),
        Text(String),
    }

    let raw: Option<RawTotal> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawTotal::Number(n)) => Some(n),
        Some(RawTotal::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}
