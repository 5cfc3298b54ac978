pub mod board;
pub mod view;

pub use board::{shop_now, Board};
pub use view::{render, BoardView};
