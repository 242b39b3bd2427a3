pub mod display_formatter;
pub mod types;
pub mod view_model;

pub use display_formatter::{HistoryColumn, HISTORY_HEADERS};
pub use types::*;
pub use view_model::TradeHistoryViewModel;
