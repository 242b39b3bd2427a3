use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::orderbook::Tone;

/// 买卖方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[serde(alias = "Buy", alias = "BUY")]
    Buy,
    #[serde(alias = "Sell", alias = "SELL")]
    Sell,
}

impl Side {
    /// 买 -> positive，卖 -> negative
    pub fn tone(&self) -> Tone {
        match self {
            Side::Buy => Tone::Positive,
            Side::Sell => Tone::Negative,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "Buy",
            Side::Sell => "Sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            other => Err(format!("unknown side: {}", other)),
        }
    }
}

/// 委托状态，未识别的状态原样保留
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Open,
    Partial,
    Filled,
    Cancelled,
    Rejected,
    Other(String),
}

impl OrderStatus {
    /// 只有挂单中和部分成交的委托可以撤单
    pub fn is_cancelable(&self) -> bool {
        matches!(self, OrderStatus::Open | OrderStatus::Partial)
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Open => "Open",
            OrderStatus::Partial => "Partial",
            OrderStatus::Filled => "Filled",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Rejected => "Rejected",
            OrderStatus::Other(s) => s,
        }
    }

    // 排序用
    pub(crate) fn rank(&self) -> u8 {
        match self {
            OrderStatus::Open => 0,
            OrderStatus::Partial => 1,
            OrderStatus::Filled => 2,
            OrderStatus::Cancelled => 3,
            OrderStatus::Rejected => 4,
            OrderStatus::Other(_) => 5,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => OrderStatus::Open,
            "partial" | "partially filled" | "partially_filled" => OrderStatus::Partial,
            "filled" => OrderStatus::Filled,
            "cancelled" | "canceled" => OrderStatus::Cancelled,
            "rejected" => OrderStatus::Rejected,
            _ => OrderStatus::Other(s),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        OrderStatus::from(s.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 委托类型
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderType {
    Limit,
    Market,
    StopLimit,
    StopMarket,
    Other(String),
}

impl OrderType {
    pub fn as_str(&self) -> &str {
        match self {
            OrderType::Limit => "Limit",
            OrderType::Market => "Market",
            OrderType::StopLimit => "Stop Limit",
            OrderType::StopMarket => "Stop Market",
            OrderType::Other(s) => s,
        }
    }
}

impl From<String> for OrderType {
    fn from(s: String) -> Self {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "limit" => OrderType::Limit,
            "market" => OrderType::Market,
            "stoplimit" => OrderType::StopLimit,
            "stopmarket" => OrderType::StopMarket,
            _ => OrderType::Other(s),
        }
    }
}

impl From<&str> for OrderType {
    fn from(s: &str) -> Self {
        OrderType::from(s.to_string())
    }
}

impl From<OrderType> for String {
    fn from(order_type: OrderType) -> Self {
        order_type.as_str().to_string()
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 委托/成交记录，由订单管理方提供
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub order_id: String,
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub order_type: OrderType,
    pub side: Side,
    pub price: Decimal,
    pub amount: Decimal,
    pub filled_percent: Decimal,
    pub total: Decimal,
    pub status: OrderStatus,
}

impl TradeRecord {
    pub fn cancelable(&self) -> bool {
        self.status.is_cancelable()
    }

    /// "ETH/USDT" -> "USDT"
    pub fn quote_asset(&self) -> Option<&str> {
        self.symbol.split_once('/').map(|(_, quote)| quote)
    }
}

/// 渲染层读取的一行
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryRow<'a> {
    pub record: &'a TradeRecord,
    pub cancelable: bool,
    pub side_tone: Tone,
}

impl<'a> HistoryRow<'a> {
    pub fn new(record: &'a TradeRecord) -> Self {
        Self {
            record,
            cancelable: record.cancelable(),
            side_tone: record.side.tone(),
        }
    }
}

/// 列表筛选，对应界面上的 Open Orders / Order History 标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryFilter {
    #[default]
    All,
    OpenOrders,
    OrderHistory,
}

impl HistoryFilter {
    pub fn matches(&self, record: &TradeRecord) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::OpenOrders => record.cancelable(),
            HistoryFilter::OrderHistory => !record.cancelable(),
        }
    }
}

impl FromStr for HistoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(HistoryFilter::All),
            "open_orders" => Ok(HistoryFilter::OpenOrders),
            "order_history" => Ok(HistoryFilter::OrderHistory),
            other => Err(format!("unknown history filter: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Symbol,
    Timestamp,
    Price,
    Amount,
    Total,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// 撤单请求结果，过期请求不是错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    /// 已向订单管理方发出信号，本地列表不变
    Requested { order_id: String },
    /// 最新列表中已没有该委托
    Stale,
    /// 委托存在但状态不可撤
    NotCancelable { status: OrderStatus },
}

impl CancelOutcome {
    pub fn is_requested(&self) -> bool {
        matches!(self, CancelOutcome::Requested { .. })
    }
}
