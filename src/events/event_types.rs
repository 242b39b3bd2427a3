use crate::orderbook::MidDirection;

/// 视图模型对外发出的事件
#[derive(Debug, Clone, PartialEq)]
pub enum EventType {
    /// 盘口快照已替换
    OrderBookChanged {
        row_count: usize,
        direction: MidDirection,
    },
    /// 委托/成交列表已替换
    TradeHistoryChanged { row_count: usize },
    /// 撤单请求，由订单管理方处理并通过下一次列表更新确认
    CancelRequested { order_id: String },
}

impl EventType {
    /// 获取事件类型的字符串表示
    pub fn type_name(&self) -> &'static str {
        match self {
            EventType::OrderBookChanged { .. } => "OrderBookChanged",
            EventType::TradeHistoryChanged { .. } => "TradeHistoryChanged",
            EventType::CancelRequested { .. } => "CancelRequested",
        }
    }

    /// 是否为数据变更通知（渲染层需要重绘）
    pub fn is_data_change(&self) -> bool {
        matches!(
            self,
            EventType::OrderBookChanged { .. } | EventType::TradeHistoryChanged { .. }
        )
    }

    pub fn is_cancel(&self) -> bool {
        matches!(self, EventType::CancelRequested { .. })
    }
}

/// 事件优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventPriority {
    Normal = 0,
    High = 1,
}

/// 事件结构体
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    pub timestamp: i64,
    pub source: String,
    pub priority: EventPriority,
}

impl Event {
    pub fn new(event_type: EventType, source: impl Into<String>) -> Self {
        let priority = match &event_type {
            EventType::CancelRequested { .. } => EventPriority::High,
            EventType::OrderBookChanged { .. } | EventType::TradeHistoryChanged { .. } => {
                EventPriority::Normal
            }
        };

        Self {
            event_type,
            timestamp: chrono::Utc::now().timestamp_millis(),
            source: source.into(),
            priority,
        }
    }

    pub fn with_priority(mut self, priority: EventPriority) -> Self {
        self.priority = priority;
        self
    }
}
