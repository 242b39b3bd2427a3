// 视图模型错误处理
//
// 只有真正的编程错误才会出现在这里：
// - 行索引越界（渲染层传入了错误的行号）
// - 快照数据违反数据模型（负数数量、max_levels 为 0）
//
// 单边盘口为空、撤单请求过期等属于正常运行状态，不通过错误返回。

use rust_decimal::Decimal;
use thiserror::Error;

/// 视图模型统一错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewModelError {
    /// 行索引超出 `[0, row_count)`
    #[error("row index {index} out of range (row count {row_count})")]
    InvalidIndex { index: usize, row_count: usize },

    /// 价格档位数量为负
    #[error("negative size at price level {price}")]
    NegativeSize { price: Decimal },

    /// 每侧最大档位数必须至少为 1
    #[error("max levels must be at least 1")]
    InvalidMaxLevels,
}

impl ViewModelError {
    pub fn invalid_index(index: usize, row_count: usize) -> Self {
        ViewModelError::InvalidIndex { index, row_count }
    }

    /// 是否为渲染层的调用错误
    pub fn is_index_error(&self) -> bool {
        matches!(self, ViewModelError::InvalidIndex { .. })
    }
}

pub type ViewModelResult<T> = Result<T, ViewModelError>;
