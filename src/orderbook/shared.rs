use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::data_structures::PriceLevel;
use super::snapshot::BookSnapshot;
use super::view_model::OrderBookViewModel;
use crate::error::ViewModelResult;

/// 跨线程共享的盘口视图模型
///
/// 行情线程构建 `BookSnapshot`，通过 `apply` 在写锁内完成替换和方向更新；
/// 渲染线程通过 `read` 在读锁内访问，看到的行与方向一定来自同一个快照。
/// 变更事件在写锁释放后才发布，订阅者可以在回调里直接 `read`。
#[derive(Debug, Clone)]
pub struct SharedOrderBook {
    inner: Arc<RwLock<OrderBookViewModel>>,
}

impl SharedOrderBook {
    pub fn new(model: OrderBookViewModel) -> Self {
        Self {
            inner: Arc::new(RwLock::new(model)),
        }
    }

    // 写锁内只做内存替换，中毒时沿用内部数据
    fn write_guard(&self) -> RwLockWriteGuard<'_, OrderBookViewModel> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, OrderBookViewModel> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn apply(&self, snapshot: BookSnapshot) {
        let change = self.write_guard().stage_snapshot(snapshot);
        if let Some(change) = change {
            change.publish();
        }
    }

    /// 校验档位后应用，失败时保持原状态
    pub fn update(&self, asks: Vec<PriceLevel>, bids: Vec<PriceLevel>) -> ViewModelResult<()> {
        let max_levels = self.read(|vm| vm.max_levels());
        self.apply(BookSnapshot::new(asks, bids, max_levels)?);
        Ok(())
    }

    pub fn read<R>(&self, f: impl FnOnce(&OrderBookViewModel) -> R) -> R {
        f(&self.read_guard())
    }

    /// 闭包内触发的通知仍在写锁内发布，更新快照请用 `apply`
    pub fn write<R>(&self, f: impl FnOnce(&mut OrderBookViewModel) -> R) -> R {
        f(&mut self.write_guard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ChangeNotifier;
    use crate::orderbook::MidDirection;
    use rust_decimal::Decimal;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    fn snapshot(mid: i64) -> BookSnapshot {
        let asks = vec![PriceLevel::new(Decimal::from(mid + 1), Decimal::ONE)];
        let bids = vec![PriceLevel::new(Decimal::from(mid - 1), Decimal::ONE)];
        BookSnapshot::new(asks, bids, 7).unwrap()
    }

    #[test]
    fn test_feed_thread_snapshots_applied_in_order() {
        let shared = SharedOrderBook::new(OrderBookViewModel::new(7).unwrap());
        let (tx, rx) = mpsc::channel();

        let feed = thread::spawn(move || {
            for mid in [100, 101, 101, 99] {
                tx.send(snapshot(mid)).unwrap();
            }
        });

        let mut observed = Vec::new();
        for snap in rx {
            shared.apply(snap);
            observed.push(shared.read(|vm| (vm.mid_price(), vm.direction())));
        }
        feed.join().unwrap();

        assert_eq!(
            observed,
            vec![
                (Some(Decimal::from(100)), MidDirection::Flat),
                (Some(Decimal::from(101)), MidDirection::Up),
                (Some(Decimal::from(101)), MidDirection::Flat),
                (Some(Decimal::from(99)), MidDirection::Down),
            ]
        );
    }

    #[test]
    fn test_subscriber_can_read_during_apply() {
        let notifier = ChangeNotifier::new();
        let shared = SharedOrderBook::new(
            OrderBookViewModel::new(7).unwrap().with_notifier(notifier.clone()),
        );

        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let (book, sink) = (shared.clone(), seen.clone());
        notifier.subscribe("OrderBookChanged", move |_| {
            let row_count = book.read(|vm| vm.row_count());
            sink.lock().unwrap().push(row_count);
        });

        // 回调内读锁若与写锁重入会卡死，放到子线程里限时等待
        let (done_tx, done_rx) = mpsc::channel();
        let worker = shared.clone();
        thread::spawn(move || {
            worker.apply(snapshot(100));
            worker.update(Vec::new(), Vec::new()).unwrap();
            done_tx.send(()).unwrap();
        });

        assert!(done_rx.recv_timeout(Duration::from_secs(5)).is_ok());
        assert_eq!(*seen.lock().unwrap(), vec![3, 1]);
    }

    #[test]
    fn test_update_rejects_negative_size() {
        let shared = SharedOrderBook::new(OrderBookViewModel::new(7).unwrap());
        shared.apply(snapshot(100));

        let bad = vec![PriceLevel::new(Decimal::from(101), Decimal::from(-1))];
        assert!(shared.update(bad, Vec::new()).is_err());
        assert_eq!(shared.read(|vm| vm.mid_price()), Some(Decimal::from(100)));
    }
}
