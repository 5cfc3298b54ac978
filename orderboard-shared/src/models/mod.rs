pub mod order;
pub mod shopify;

pub use order::{NoteAttribute, Order, OrderKey};
pub use shopify::ShopifyOrderPayload;
