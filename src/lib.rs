// 核心模块
pub mod config;
pub mod error;
pub mod events;
pub mod fixtures;
pub mod history;
pub mod orderbook;

// 重新导出主要类型
pub use config::{ConfigError, ConfigManager, GlobalConfig, LoggingConfig};
pub use error::{ViewModelError, ViewModelResult};
pub use events::{ChangeNotifier, Event, EventType};
pub use history::{CancelOutcome, HistoryFilter, TradeHistoryViewModel, TradeRecord};
pub use orderbook::{
    BookSnapshot, DisplayRow, MidDirection, OrderBookViewModel, PriceLevel, RowKind, RowSlot,
    SharedOrderBook, Tone,
};

use once_cell::sync::OnceCell;

/// 库的版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static LOGGING_INITIALIZED: OnceCell<()> = OnceCell::new();

/// 初始化日志系统 - 写入日志文件，避免干扰终端输出
///
/// 日志级别取自配置，`RUST_LOG` 优先。重复调用不会重复初始化。
pub fn init_logging(config: &LoggingConfig) {
    LOGGING_INITIALIZED.get_or_init(|| {
        use std::fs::OpenOptions;

        let level = config.level_filter().unwrap_or(log::LevelFilter::Info);
        let mut builder = env_logger::Builder::new();
        builder.filter_level(level).parse_default_env();

        match OpenOptions::new().create(true).append(true).open(&config.file) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(_) => {
                // 无法创建日志文件时退回到stderr
                builder.target(env_logger::Target::Stderr);
            }
        }

        if builder.try_init().is_err() {
            log::debug!("logger already installed, keeping existing one");
        }
    });
}
