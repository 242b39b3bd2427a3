use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use money_matcher::config::{ConfigError, ConfigManager};
use money_matcher::events::{ChangeNotifier, EventType};
use money_matcher::fixtures::{demo_snapshot, demo_trade_records};
use money_matcher::history::HistoryFilter;
use money_matcher::orderbook::{format_row, MidDirection};
use money_matcher::{OrderBookViewModel, SharedOrderBook, TradeHistoryViewModel};
use rust_decimal_macros::dec;

#[test]
fn test_config_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut manager = ConfigManager::with_path(&path);
    manager.global_mut().order_book.max_levels = 12;
    manager.global_mut().trade_history.default_filter = HistoryFilter::OrderHistory;
    manager.save().unwrap();

    let mut reloaded = ConfigManager::with_path(&path);
    reloaded.load().unwrap();
    assert!(reloaded.is_loaded());
    assert_eq!(reloaded.global().order_book.max_levels, 12);
    assert_eq!(reloaded.global().trade_history.default_filter, HistoryFilter::OrderHistory);
}

#[test]
fn test_missing_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = ConfigManager::with_path(dir.path().join("absent.toml"));

    assert!(matches!(manager.load(), Err(ConfigError::FileNotFound(_))));
    manager.load_or_default();
    assert!(manager.is_loaded());
    assert_eq!(manager.global().order_book.max_levels, 7);
}

#[test]
fn test_invalid_config_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[order_book]\nmax_levels = 0\n").unwrap();

    let mut manager = ConfigManager::with_path(&path);
    assert!(matches!(manager.load(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_demo_book_renders_seven_levels_per_side() {
    let model = OrderBookViewModel::from_snapshot(demo_snapshot(0, 7).unwrap());
    let settings = money_matcher::config::OrderBookSettings::default();

    assert_eq!(model.row_count(), 15);
    assert_eq!(model.mid_price(), Some(dec!(100.25)));
    assert_eq!(model.spread(), Some(dec!(0.50)));

    let mid = model.row_at(7).unwrap();
    assert_eq!(format_row(&mid, &settings), ["100.25", "0.50", ""]);

    let best_ask = model.row_at(0).unwrap();
    assert_eq!(format_row(&best_ask, &settings), ["100.50", "1.5000", "150.75"]);
}

#[test]
fn test_shared_book_notifies_in_feed_order() {
    let notifier = ChangeNotifier::new();
    let directions = Arc::new(Mutex::new(Vec::new()));
    let sink = directions.clone();
    notifier.subscribe("OrderBookChanged", move |event| {
        if let EventType::OrderBookChanged { direction, .. } = event.event_type {
            sink.lock().unwrap().push(direction);
        }
    });

    let book = SharedOrderBook::new(OrderBookViewModel::new(7).unwrap().with_notifier(notifier.clone()));
    let (tx, rx) = mpsc::channel();
    let feed = thread::spawn(move || {
        for offset in [0, 1, 1, -2] {
            tx.send(demo_snapshot(offset, 7).unwrap()).unwrap();
        }
    });

    for snapshot in rx {
        book.apply(snapshot);
    }
    feed.join().unwrap();

    assert_eq!(
        *directions.lock().unwrap(),
        vec![MidDirection::Flat, MidDirection::Up, MidDirection::Flat, MidDirection::Down]
    );
    assert_eq!(notifier.stats().total_events_published, 4);
}

#[test]
fn test_renderer_subscription_counts_repaints() {
    let notifier = ChangeNotifier::new();
    let repaints = Arc::new(AtomicUsize::new(0));
    let counter = repaints.clone();
    notifier.subscribe_global(move |event| {
        if event.event_type.is_data_change() {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });

    let mut book = OrderBookViewModel::new(7).unwrap().with_notifier(notifier.clone());
    let mut history = TradeHistoryViewModel::new(Vec::new()).with_notifier(notifier.clone());

    book.apply_snapshot(demo_snapshot(0, 7).unwrap());
    history.update_trade_history(demo_trade_records());
    history.request_cancel("1001");

    assert_eq!(repaints.load(Ordering::SeqCst), 2);
    assert_eq!(notifier.stats().total_events_published, 3);
}

#[test]
fn test_concurrent_reader_sees_consistent_rows() {
    let book = SharedOrderBook::new(OrderBookViewModel::new(7).unwrap());
    let stop = Arc::new(AtomicBool::new(false));

    let reader = {
        let (book, stop) = (book.clone(), stop.clone());
        thread::spawn(move || {
            let mut reads = 0usize;
            while !stop.load(Ordering::SeqCst) || reads == 0 {
                // 同一读锁内的行与方向来自同一个快照
                book.read(|vm| {
                    let mid = vm.row_at(vm.asks().len()).unwrap();
                    assert_eq!(mid.price, vm.mid_price());
                    assert_eq!(mid.tone, vm.direction().tone());
                    assert_eq!(vm.rows().len(), vm.row_count());
                });
                reads += 1;
            }
            reads
        })
    };

    let feed = {
        let book = book.clone();
        thread::spawn(move || {
            for round in 0..200i64 {
                book.apply(demo_snapshot(round % 5 - 2, 7).unwrap());
            }
        })
    };

    feed.join().unwrap();
    stop.store(true, Ordering::SeqCst);
    assert!(reader.join().unwrap() > 0);
}

#[test]
fn test_subscriber_repaints_from_shared_book() {
    let notifier = ChangeNotifier::new();
    let book = SharedOrderBook::new(OrderBookViewModel::new(7).unwrap().with_notifier(notifier.clone()));

    let painted = Arc::new(Mutex::new(Vec::new()));
    {
        let (book, painted) = (book.clone(), painted.clone());
        notifier.subscribe("OrderBookChanged", move |_| {
            let mid = book.read(|vm| vm.mid_price());
            painted.lock().unwrap().push(mid);
        });
    }

    let (done_tx, done_rx) = mpsc::channel();
    let feed = {
        let book = book.clone();
        thread::spawn(move || {
            for offset in [0, 1] {
                book.apply(demo_snapshot(offset, 7).unwrap());
            }
            done_tx.send(()).unwrap();
        })
    };

    assert!(done_rx.recv_timeout(Duration::from_secs(5)).is_ok());
    feed.join().unwrap();
    assert_eq!(*painted.lock().unwrap(), vec![Some(dec!(100.25)), Some(dec!(101.25))]);
}
