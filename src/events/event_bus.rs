use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::event_types::Event;

/// 事件处理器类型定义
pub type EventHandler = Arc<dyn Fn(&Event) + Send + Sync>;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NotifierStats {
    pub total_events_published: u64,
    pub total_deliveries: u64,
    pub handler_errors: u64,
}

#[derive(Default)]
struct NotifierInner {
    handlers: HashMap<String, Vec<EventHandler>>,
    global_handlers: Vec<EventHandler>,
    stats: NotifierStats,
}

/// 变更通知总线
///
/// 视图模型在状态替换完成后同步发布事件，渲染层通过订阅得知需要重绘。
/// 克隆得到的是同一条总线的句柄。处理器在锁外执行，处理器内部可以再次发布事件。
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    inner: Arc<Mutex<NotifierInner>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, NotifierInner> {
        // 处理器在锁外执行，锁中毒只可能来自统计更新，数据仍然可用
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 订阅指定类型的事件
    pub fn subscribe<F>(&self, event_type: &str, handler: F)
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.lock()
            .handlers
            .entry(event_type.to_string())
            .or_default()
            .push(Arc::new(handler));
    }

    /// 订阅全部事件
    pub fn subscribe_global<F>(&self, handler: F)
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.lock().global_handlers.push(Arc::new(handler));
    }

    /// 同步分发事件，返回成功送达的处理器数量
    pub fn publish(&self, event: Event) -> usize {
        let handlers: Vec<EventHandler> = {
            let mut inner = self.lock();
            inner.stats.total_events_published += 1;
            inner
                .global_handlers
                .iter()
                .chain(
                    inner
                        .handlers
                        .get(event.event_type.type_name())
                        .into_iter()
                        .flatten(),
                )
                .cloned()
                .collect()
        };

        let mut delivered = 0;
        let mut failed = 0;
        for handler in &handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handler(&event)));
            match result {
                Ok(()) => delivered += 1,
                Err(_) => {
                    log::error!("subscriber panicked while handling {}", event.event_type.type_name());
                    failed += 1;
                }
            }
        }

        let mut inner = self.lock();
        inner.stats.total_deliveries += delivered as u64;
        inner.stats.handler_errors += failed;
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        let inner = self.lock();
        inner.global_handlers.len() + inner.handlers.values().map(Vec::len).sum::<usize>()
    }

    pub fn stats(&self) -> NotifierStats {
        self.lock().stats.clone()
    }

    pub fn reset_stats(&self) {
        self.lock().stats = NotifierStats::default();
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscriber_count())
            .field("stats", &self.stats())
            .finish()
    }
}
