pub mod models;
pub mod pii;

pub use models::{NoteAttribute, Order, OrderKey, ShopifyOrderPayload};
pub use pii::Masked;
