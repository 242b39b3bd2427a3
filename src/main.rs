use std::env;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use money_matcher::config::ConfigManager;
use money_matcher::events::{ChangeNotifier, EventType};
use money_matcher::fixtures::{demo_snapshot, demo_trade_records};
use money_matcher::history::{display_formatter as history_fmt, HISTORY_HEADERS};
use money_matcher::orderbook::{format_row, ORDER_BOOK_HEADERS};
use money_matcher::{
    init_logging, BookSnapshot, OrderBookViewModel, SharedOrderBook, TradeHistoryViewModel,
    ViewModelError,
};

// 演示行情：中间价先上行再回落
const DEMO_OFFSETS: [i64; 5] = [0, 1, 1, -1, 2];

fn main() {
    let config_path = env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let mut config_manager = ConfigManager::with_path(&config_path);
    let config = config_manager.load_or_default().global().clone();

    init_logging(&config.logging);
    log::info!("{} v{} starting", config.system.name, config.system.version);

    if let Err(e) = run(&config) {
        log::error!("demo failed: {}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &money_matcher::GlobalConfig) -> Result<(), ViewModelError> {
    let notifier = ChangeNotifier::new();
    notifier.subscribe_global(|event| {
        log::info!("[{}] {}", event.source, event.event_type.type_name());
    });
    notifier.subscribe("CancelRequested", |event| {
        if let EventType::CancelRequested { order_id } = &event.event_type {
            println!(">> cancel signalled for order {}", order_id);
        }
    });

    let max_levels = config.order_book.max_levels;
    let book = SharedOrderBook::new(
        OrderBookViewModel::new(max_levels)?.with_notifier(notifier.clone()),
    );

    // 行情线程只构建不可变快照，UI线程负责替换
    let (tx, rx) = mpsc::channel::<BookSnapshot>();
    let feed = thread::spawn(move || -> Result<(), ViewModelError> {
        for offset in DEMO_OFFSETS {
            let snapshot = demo_snapshot(offset, max_levels)?;
            if tx.send(snapshot).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(50));
        }
        Ok(())
    });

    for snapshot in rx {
        book.apply(snapshot);
        book.read(|vm| print_order_book(vm, config));
    }

    match feed.join() {
        Ok(result) => result?,
        Err(_) => log::error!("feed thread panicked"),
    }

    let history = TradeHistoryViewModel::new(demo_trade_records())
        .with_filter(config.trade_history.default_filter)
        .with_notifier(notifier.clone());
    print_history(&history, config);

    if let Some(row) = history.rows().next() {
        let order_id = row.record.order_id.clone();
        println!("{:?}", history.request_cancel(&order_id));
    }
    println!("{:?}", history.request_cancel("does-not-exist"));

    let stats = notifier.stats();
    log::info!(
        "notifier: {} published, {} delivered, {} handler errors",
        stats.total_events_published,
        stats.total_deliveries,
        stats.handler_errors
    );
    Ok(())
}

fn print_order_book(vm: &OrderBookViewModel, config: &money_matcher::GlobalConfig) {
    println!(
        "\n{:>12} {:>12} {:>12}   depth   (direction: {:?})",
        ORDER_BOOK_HEADERS[0], ORDER_BOOK_HEADERS[1], ORDER_BOOK_HEADERS[2],
        vm.direction()
    );
    for row in vm.rows() {
        let [price, amount, total] = format_row(&row, &config.order_book);
        let bar = "#".repeat((row.depth_ratio * 10.0).round() as usize);
        println!(
            "{:>12} {:>12} {:>12}   {:<10} {}",
            price,
            amount,
            total,
            bar,
            row.kind.as_str()
        );
    }
}

fn print_history(history: &TradeHistoryViewModel, config: &money_matcher::GlobalConfig) {
    println!("\n{}", HISTORY_HEADERS.join(" | "));
    for row in history.rows() {
        let cells = history_fmt::format_row(&row, &config.trade_history);
        println!("{}", cells.join(" | "));
    }
}
