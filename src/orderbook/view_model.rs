use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::data_structures::*;
use super::snapshot::BookSnapshot;
use crate::error::{ViewModelError, ViewModelResult};
use crate::events::{ChangeNotifier, Event, EventType};

/// 盘口视图模型
///
/// 两阶段约定：`apply_snapshot` 一次性计算并缓存中间价、价差、方向和深度基数，
/// 之后所有读取都是纯访问，重复读取不会改变方向。
/// 跨快照保留的状态只有上一次的中间价。
#[derive(Debug)]
pub struct OrderBookViewModel {
    snapshot: BookSnapshot,
    max_levels: usize,

    // 每次快照计算一次
    mid_price: Option<Decimal>,
    spread: Option<Decimal>,
    direction: MidDirection,
    max_amount: Decimal,

    last_mid_price: Option<Decimal>,
    update_count: u64,

    notifier: Option<ChangeNotifier>,
}

impl OrderBookViewModel {
    /// 以空盘口创建
    pub fn new(max_levels: usize) -> ViewModelResult<Self> {
        let snapshot = BookSnapshot::empty(max_levels)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// 以初始档位创建，构造本身即第一次快照
    pub fn from_levels(
        asks: Vec<PriceLevel>,
        bids: Vec<PriceLevel>,
        max_levels: usize,
    ) -> ViewModelResult<Self> {
        let snapshot = BookSnapshot::new(asks, bids, max_levels)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn from_snapshot(snapshot: BookSnapshot) -> Self {
        let max_levels = snapshot.max_levels();
        let mut model = Self {
            snapshot,
            max_levels,
            mid_price: None,
            spread: None,
            direction: MidDirection::Flat,
            max_amount: Decimal::ONE,
            last_mid_price: None,
            update_count: 1,
            notifier: None,
        };
        model.recompute();
        model
    }

    pub fn with_notifier(mut self, notifier: ChangeNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// 数据源入口：替换卖盘/买盘
    pub fn update_order_book(
        &mut self,
        asks: Vec<PriceLevel>,
        bids: Vec<PriceLevel>,
    ) -> ViewModelResult<()> {
        let snapshot = BookSnapshot::new(asks, bids, self.max_levels)?;
        self.apply_snapshot(snapshot);
        Ok(())
    }

    /// 替换快照并在同一步里更新派生值和方向，随后发布变更事件
    pub fn apply_snapshot(&mut self, snapshot: BookSnapshot) {
        if let Some(change) = self.stage_snapshot(snapshot) {
            change.publish();
        }
    }

    /// 只替换状态，返回尚未发布的变更事件
    ///
    /// 持锁调用方应在释放锁之后再发布，订阅者可能在回调里读取盘口。
    pub(crate) fn stage_snapshot(&mut self, snapshot: BookSnapshot) -> Option<PendingChange> {
        self.snapshot = snapshot.limited_to(self.max_levels);
        self.update_count += 1;
        self.recompute();

        log::debug!(
            "order book snapshot #{}: {} asks, {} bids, mid {:?}, direction {:?}",
            self.update_count,
            self.snapshot.asks().len(),
            self.snapshot.bids().len(),
            self.mid_price,
            self.direction
        );

        self.notifier.clone().map(|notifier| PendingChange {
            notifier,
            event: Event::new(
                EventType::OrderBookChanged {
                    row_count: self.row_count(),
                    direction: self.direction,
                },
                "order_book",
            ),
        })
    }

    /// 切换交易对时调用，清除方向参考，计数归零
    pub fn reset(&mut self) -> ViewModelResult<()> {
        self.last_mid_price = None;
        self.direction = MidDirection::Flat;
        self.snapshot = BookSnapshot::empty(self.max_levels)?;
        self.recompute();
        self.update_count = 0;
        Ok(())
    }

    fn recompute(&mut self) {
        match (self.snapshot.best_ask(), self.snapshot.best_bid()) {
            (Some(ask), Some(bid)) => {
                let mid = mid_of(ask.price, bid.price);
                self.direction = MidDirection::between(self.last_mid_price, mid);
                self.mid_price = Some(mid);
                self.spread = ask.price.checked_sub(bid.price);
                self.last_mid_price = Some(mid);
            }
            _ => {
                // 单边盘口：中间价不可用，方向回到中性
                self.mid_price = None;
                self.spread = None;
                self.direction = MidDirection::Flat;
                self.last_mid_price = None;
            }
        }

        self.max_amount = self
            .snapshot
            .asks()
            .iter()
            .chain(self.snapshot.bids())
            .map(|level| level.size)
            .max()
            .unwrap_or(Decimal::ONE);
    }

    pub fn row_count(&self) -> usize {
        self.snapshot.asks().len() + 1 + self.snapshot.bids().len()
    }

    pub fn slot_at(&self, index: usize) -> ViewModelResult<RowSlot> {
        RowSlot::from_index(index, self.snapshot.asks().len(), self.snapshot.bids().len())
            .ok_or_else(|| ViewModelError::invalid_index(index, self.row_count()))
    }

    pub fn index_of(&self, slot: RowSlot) -> usize {
        slot.to_index(self.snapshot.asks().len())
    }

    pub fn row_at(&self, index: usize) -> ViewModelResult<DisplayRow> {
        let slot = self.slot_at(index)?;
        self.row(slot)
            .ok_or_else(|| ViewModelError::invalid_index(index, self.row_count()))
    }

    pub fn row(&self, slot: RowSlot) -> Option<DisplayRow> {
        match slot {
            RowSlot::Ask(i) => self
                .snapshot
                .asks()
                .get(i)
                .map(|level| self.level_row(RowKind::Ask, level, Tone::Negative)),
            RowSlot::Bid(i) => self
                .snapshot
                .bids()
                .get(i)
                .map(|level| self.level_row(RowKind::Bid, level, Tone::Positive)),
            RowSlot::Mid => Some(DisplayRow {
                kind: RowKind::Mid,
                price: self.mid_price,
                size: None,
                total: None,
                spread: self.spread,
                depth_ratio: 1.0,
                tone: self.direction.tone(),
            }),
        }
    }

    fn level_row(&self, kind: RowKind, level: &PriceLevel, tone: Tone) -> DisplayRow {
        DisplayRow {
            kind,
            price: Some(level.price),
            size: Some(level.size),
            total: level.total(),
            spread: None,
            depth_ratio: self.depth_ratio(level.size),
            tone,
        }
    }

    /// 全部行，顺序与扁平索引一致
    pub fn rows(&self) -> Vec<DisplayRow> {
        (0..self.row_count())
            .filter_map(|index| self.row_at(index).ok())
            .collect()
    }

    /// 数量相对双边最大数量的比例
    pub fn depth_ratio(&self, size: Decimal) -> f64 {
        (size / self.max_amount).to_f64().unwrap_or(0.0)
    }

    /// 深度条基数：双边最大数量，空盘口时为1
    pub fn max_amount(&self) -> Decimal {
        self.max_amount
    }

    pub fn max_depth_ratio_basis(&self) -> Decimal {
        self.max_amount
    }

    pub fn mid_price(&self) -> Option<Decimal> {
        self.mid_price
    }

    pub fn spread(&self) -> Option<Decimal> {
        self.spread
    }

    pub fn direction(&self) -> MidDirection {
        self.direction
    }

    pub fn last_mid_price(&self) -> Option<Decimal> {
        self.last_mid_price
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    pub fn snapshot(&self) -> &BookSnapshot {
        &self.snapshot
    }

    pub fn asks(&self) -> &[PriceLevel] {
        self.snapshot.asks()
    }

    pub fn bids(&self) -> &[PriceLevel] {
        self.snapshot.bids()
    }

    /// 已应用的快照数量（含构造时的初始快照）
    pub fn update_count(&self) -> u64 {
        self.update_count
    }
}

/// 已完成状态替换、等待发布的变更事件
#[must_use]
pub(crate) struct PendingChange {
    notifier: ChangeNotifier,
    event: Event,
}

impl PendingChange {
    pub(crate) fn publish(self) -> usize {
        self.notifier.publish(self.event)
    }
}

// 两价之和溢出时按各自一半相加
fn mid_of(ask: Decimal, bid: Decimal) -> Decimal {
    match ask.checked_add(bid) {
        Some(sum) => sum / Decimal::TWO,
        None => ask / Decimal::TWO + bid / Decimal::TWO,
    }
}
