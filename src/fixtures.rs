//! 演示数据，与仪表盘内置的测试数据一致

use chrono::{DateTime, Duration};
use rust_decimal::Decimal;

use crate::error::ViewModelResult;
use crate::history::{OrderStatus, OrderType, Side, TradeRecord};
use crate::orderbook::{BookSnapshot, PriceLevel};

const DEMO_LEVELS: i64 = 10;
// 2025-01-26 17:30:00 UTC
const DEMO_ORDER_TIME: i64 = 1_737_912_600;

/// 卖盘：100.50 起每档 +1，数量 1.5 起每档 +0.1
pub fn demo_asks(offset: i64) -> Vec<PriceLevel> {
    (0..DEMO_LEVELS)
        .map(|i| {
            PriceLevel::new(
                Decimal::new(10050, 2) + Decimal::from(i + offset),
                Decimal::new(15 + i, 1),
            )
        })
        .collect()
}

/// 买盘：100.00 起每档 -1，数量 2.0 起每档 +0.2
pub fn demo_bids(offset: i64) -> Vec<PriceLevel> {
    (0..DEMO_LEVELS)
        .map(|i| {
            PriceLevel::new(
                Decimal::from(100 - i + offset),
                Decimal::new(20 + 2 * i, 1),
            )
        })
        .collect()
}

/// 整体平移 `offset` 个价位的快照
pub fn demo_snapshot(offset: i64, max_levels: usize) -> ViewModelResult<BookSnapshot> {
    BookSnapshot::new(demo_asks(offset), demo_bids(offset), max_levels)
}

pub fn demo_trade_records() -> Vec<TradeRecord> {
    let base_time = DateTime::from_timestamp(DEMO_ORDER_TIME, 0).unwrap_or_default();

    (0..8)
        .map(|i: i64| TradeRecord {
            order_id: format!("{}", 1000 + i),
            symbol: "ETH/USDT".to_string(),
            timestamp: base_time - Duration::minutes(i * 5),
            order_type: if i % 2 == 0 { OrderType::StopLimit } else { OrderType::Limit },
            side: if i % 3 != 0 { Side::Buy } else { Side::Sell },
            price: Decimal::new(90, 2),
            amount: Decimal::new(85, 1),
            filled_percent: Decimal::from(10),
            total: Decimal::from(715),
            status: if i % 2 != 0 { OrderStatus::Open } else { OrderStatus::Partial },
        })
        .collect()
}
