use std::cmp::Ordering;

use super::types::*;
use crate::error::{ViewModelError, ViewModelResult};
use crate::events::{ChangeNotifier, Event, EventType};

/// 委托/成交列表视图模型
///
/// 只持有订单管理方推送列表的只读投影。行默认按推送顺序排列，
/// 排序和筛选都需要显式调用，并在列表更新后继续生效。
#[derive(Debug, Default)]
pub struct TradeHistoryViewModel {
    records: Vec<TradeRecord>,
    // 当前可见行在 records 中的下标
    view: Vec<usize>,
    filter: HistoryFilter,
    sort: Option<(SortKey, SortOrder)>,
    notifier: Option<ChangeNotifier>,
}

impl TradeHistoryViewModel {
    pub fn new(records: Vec<TradeRecord>) -> Self {
        let mut model = Self {
            records,
            ..Default::default()
        };
        model.rebuild_view();
        model
    }

    pub fn with_notifier(mut self, notifier: ChangeNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_filter(mut self, filter: HistoryFilter) -> Self {
        self.filter = filter;
        self.rebuild_view();
        self
    }

    /// 数据源入口：整体替换列表
    pub fn update_trade_history(&mut self, records: Vec<TradeRecord>) {
        self.records = records;
        self.rebuild_view();

        log::info!(
            "trade history updated: {} records, {} visible",
            self.records.len(),
            self.view.len()
        );
        self.notify_changed();
    }

    fn notify_changed(&self) {
        if let Some(notifier) = &self.notifier {
            notifier.publish(Event::new(
                EventType::TradeHistoryChanged {
                    row_count: self.row_count(),
                },
                "trade_history",
            ));
        }
    }

    fn rebuild_view(&mut self) {
        let filter = self.filter;
        self.view = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| filter.matches(record))
            .map(|(index, _)| index)
            .collect();

        if let Some((key, order)) = self.sort {
            let records = &self.records;
            // 稳定排序，相同键保持推送顺序
            self.view.sort_by(|&a, &b| {
                let ordering = compare_by(&records[a], &records[b], key);
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }
    }

    pub fn set_filter(&mut self, filter: HistoryFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.rebuild_view();
            self.notify_changed();
        }
    }

    pub fn filter(&self) -> HistoryFilter {
        self.filter
    }

    pub fn sort_by(&mut self, key: SortKey, order: SortOrder) {
        self.sort = Some((key, order));
        self.rebuild_view();
        self.notify_changed();
    }

    /// 恢复推送顺序
    pub fn clear_sort(&mut self) {
        if self.sort.take().is_some() {
            self.rebuild_view();
            self.notify_changed();
        }
    }

    pub fn sort(&self) -> Option<(SortKey, SortOrder)> {
        self.sort
    }

    pub fn row_count(&self) -> usize {
        self.view.len()
    }

    pub fn row_at(&self, index: usize) -> ViewModelResult<HistoryRow<'_>> {
        self.view
            .get(index)
            .map(|&record_index| HistoryRow::new(&self.records[record_index]))
            .ok_or_else(|| ViewModelError::invalid_index(index, self.row_count()))
    }

    pub fn rows(&self) -> impl Iterator<Item = HistoryRow<'_>> + '_ {
        self.view
            .iter()
            .map(move |&record_index| HistoryRow::new(&self.records[record_index]))
    }

    /// 未经筛选排序的原始列表
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn find(&self, order_id: &str) -> Option<&TradeRecord> {
        self.records.iter().find(|record| record.order_id == order_id)
    }

    /// 向订单管理方发出撤单信号
    ///
    /// 本地列表不会改变，直到订单管理方通过 `update_trade_history` 确认。
    pub fn request_cancel(&self, order_id: &str) -> CancelOutcome {
        let Some(record) = self.find(order_id) else {
            log::warn!("cancel requested for unknown order {}, ignoring", order_id);
            return CancelOutcome::Stale;
        };

        if !record.cancelable() {
            log::warn!(
                "cancel requested for order {} in status {}, ignoring",
                order_id,
                record.status
            );
            return CancelOutcome::NotCancelable {
                status: record.status.clone(),
            };
        }

        log::debug!("cancel requested for order {}", order_id);
        if let Some(notifier) = &self.notifier {
            notifier.publish(Event::new(
                EventType::CancelRequested {
                    order_id: order_id.to_string(),
                },
                "trade_history",
            ));
        }

        CancelOutcome::Requested {
            order_id: order_id.to_string(),
        }
    }
}

fn compare_by(a: &TradeRecord, b: &TradeRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Symbol => a.symbol.cmp(&b.symbol),
        SortKey::Timestamp => a.timestamp.cmp(&b.timestamp),
        SortKey::Price => a.price.cmp(&b.price),
        SortKey::Amount => a.amount.cmp(&b.amount),
        SortKey::Total => a.total.cmp(&b.total),
        SortKey::Status => a.status.rank().cmp(&b.status.rank()),
    }
}
