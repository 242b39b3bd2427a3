use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 每侧默认显示的最大档位数
pub const DEFAULT_MAX_LEVELS: usize = 7;

/// 价格档位：价格 + 数量，总额在读取时计算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: Decimal,
    pub size: Decimal,
}

impl PriceLevel {
    pub fn new(price: Decimal, size: Decimal) -> Self {
        Self { price, size }
    }

    /// 超出 Decimal 表示范围时为 None
    pub fn total(&self) -> Option<Decimal> {
        self.price.checked_mul(self.size)
    }

    /// 数量为0表示该档位已被移除
    pub fn is_removed(&self) -> bool {
        self.size.is_zero()
    }
}

impl From<(Decimal, Decimal)> for PriceLevel {
    fn from((price, size): (Decimal, Decimal)) -> Self {
        Self::new(price, size)
    }
}

/// 行类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Ask,
    Mid,
    Bid,
}

impl RowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowKind::Ask => "ask",
            RowKind::Mid => "mid",
            RowKind::Bid => "bid",
        }
    }
}

/// 语义颜色类别，由渲染层映射成具体颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

/// 中间价相对上一次快照的变动方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MidDirection {
    Up,
    Down,
    #[default]
    Flat,
}

impl MidDirection {
    /// 没有上一次中间价时视为 Flat
    pub fn between(previous: Option<Decimal>, current: Decimal) -> Self {
        match previous {
            Some(prev) if current > prev => MidDirection::Up,
            Some(prev) if current < prev => MidDirection::Down,
            _ => MidDirection::Flat,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            MidDirection::Up => Tone::Positive,
            MidDirection::Down => Tone::Negative,
            MidDirection::Flat => Tone::Neutral,
        }
    }
}

/// 行地址：内部统一用带标签的变体，扁平索引只在边界换算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowSlot {
    Ask(usize),
    Mid,
    Bid(usize),
}

impl RowSlot {
    pub fn kind(&self) -> RowKind {
        match self {
            RowSlot::Ask(_) => RowKind::Ask,
            RowSlot::Mid => RowKind::Mid,
            RowSlot::Bid(_) => RowKind::Bid,
        }
    }

    /// 扁平索引 -> 行地址，越界返回 None
    pub fn from_index(index: usize, ask_count: usize, bid_count: usize) -> Option<Self> {
        if index < ask_count {
            Some(RowSlot::Ask(index))
        } else if index == ask_count {
            Some(RowSlot::Mid)
        } else if index - ask_count - 1 < bid_count {
            Some(RowSlot::Bid(index - ask_count - 1))
        } else {
            None
        }
    }

    pub fn to_index(&self, ask_count: usize) -> usize {
        match *self {
            RowSlot::Ask(i) => i,
            RowSlot::Mid => ask_count,
            RowSlot::Bid(i) => ask_count + 1 + i,
        }
    }
}

/// 渲染层逐行读取的数据
///
/// 中间行：`price` 为中间价，`spread` 为价差，`size`/`total` 为空，`depth_ratio` 固定为1。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub kind: RowKind,
    pub price: Option<Decimal>,
    pub size: Option<Decimal>,
    pub total: Option<Decimal>,
    pub spread: Option<Decimal>,
    pub depth_ratio: f64,
    pub tone: Tone,
}

impl DisplayRow {
    pub fn is_mid(&self) -> bool {
        self.kind == RowKind::Mid
    }
}
