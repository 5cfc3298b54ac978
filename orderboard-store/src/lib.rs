pub mod app_config;
pub mod error;
pub mod order_repo;
pub mod source;

pub use error::StoreError;
pub use order_repo::OrderRepository;
pub use source::{FileOrderSource, OrderSource};
