use rust_decimal::Decimal;

use super::data_structures::PriceLevel;
use crate::error::{ViewModelError, ViewModelResult};

/// 不可变的盘口快照
///
/// 在行情线程上构建，然后整体交给 UI 线程替换。构建时完成：
/// 校验数量非负、丢弃数量为0的档位、按 `max_levels` 截断。
/// 不排序也不合并同价档位，数据源负责按价格排好序。
#[derive(Debug, Clone, PartialEq)]
pub struct BookSnapshot {
    asks: Vec<PriceLevel>,
    bids: Vec<PriceLevel>,
    max_levels: usize,
}

impl BookSnapshot {
    pub fn new(
        asks: Vec<PriceLevel>,
        bids: Vec<PriceLevel>,
        max_levels: usize,
    ) -> ViewModelResult<Self> {
        if max_levels == 0 {
            return Err(ViewModelError::InvalidMaxLevels);
        }

        Ok(Self {
            asks: Self::prepare_side(asks, max_levels)?,
            bids: Self::prepare_side(bids, max_levels)?,
            max_levels,
        })
    }

    pub fn empty(max_levels: usize) -> ViewModelResult<Self> {
        Self::new(Vec::new(), Vec::new(), max_levels)
    }

    fn prepare_side(levels: Vec<PriceLevel>, max_levels: usize) -> ViewModelResult<Vec<PriceLevel>> {
        if let Some(bad) = levels.iter().find(|level| level.size < Decimal::ZERO) {
            return Err(ViewModelError::NegativeSize { price: bad.price });
        }

        Ok(levels
            .into_iter()
            .filter(|level| !level.is_removed())
            .take(max_levels)
            .collect())
    }

    /// 进一步收窄到 `max_levels`，不会放宽
    pub fn limited_to(mut self, max_levels: usize) -> Self {
        if max_levels < self.max_levels {
            self.asks.truncate(max_levels);
            self.bids.truncate(max_levels);
            self.max_levels = max_levels;
        }
        self
    }

    /// 卖盘，价格升序，第一个为最优卖价
    pub fn asks(&self) -> &[PriceLevel] {
        &self.asks
    }

    /// 买盘，价格降序，第一个为最优买价
    pub fn bids(&self) -> &[PriceLevel] {
        &self.bids
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }

    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    pub fn is_two_sided(&self) -> bool {
        !self.asks.is_empty() && !self.bids.is_empty()
    }
}
