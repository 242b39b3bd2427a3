use rust_decimal::{Decimal, RoundingStrategy};

use super::data_structures::{DisplayRow, RowKind};
use crate::config::OrderBookSettings;

/// 盘口表头
pub const ORDER_BOOK_HEADERS: [&str; 3] = ["Price", "Amount", "Total"];

/// 盘口列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBookColumn {
    Price,
    Amount,
    Total,
}

impl OrderBookColumn {
    pub const ALL: [OrderBookColumn; 3] = [
        OrderBookColumn::Price,
        OrderBookColumn::Amount,
        OrderBookColumn::Total,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn header(&self) -> &'static str {
        ORDER_BOOK_HEADERS[*self as usize]
    }
}

/// 按固定小数位格式化，先四舍五入
pub fn format_decimal(value: Decimal, precision: u32) -> String {
    let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", precision as usize, rounded)
}

fn format_optional(value: Option<Decimal>, precision: u32) -> String {
    value
        .map(|v| format_decimal(v, precision))
        .unwrap_or_default()
}

/// 单元格文本
///
/// 中间行：价格列显示中间价，数量列显示价差，总额列为空。
/// 不可用的值显示为空字符串。
pub fn format_cell(row: &DisplayRow, column: OrderBookColumn, settings: &OrderBookSettings) -> String {
    match (row.kind, column) {
        (RowKind::Mid, OrderBookColumn::Price) => format_optional(row.price, settings.price_precision),
        (RowKind::Mid, OrderBookColumn::Amount) => format_optional(row.spread, settings.price_precision),
        (RowKind::Mid, OrderBookColumn::Total) => String::new(),
        (_, OrderBookColumn::Price) => format_optional(row.price, settings.price_precision),
        (_, OrderBookColumn::Amount) => format_optional(row.size, settings.amount_precision),
        (_, OrderBookColumn::Total) => format_optional(row.total, settings.total_precision),
    }
}

/// 整行文本，列顺序与表头一致
pub fn format_row(row: &DisplayRow, settings: &OrderBookSettings) -> [String; 3] {
    OrderBookColumn::ALL.map(|column| format_cell(row, column, settings))
}
