pub mod data_structures;
pub mod display_formatter;
pub mod shared;
pub mod snapshot;
pub mod view_model;

pub use data_structures::*;
pub use display_formatter::{format_cell, format_row, OrderBookColumn, ORDER_BOOK_HEADERS};
pub use shared::SharedOrderBook;
pub use snapshot::BookSnapshot;
pub use view_model::OrderBookViewModel;
