//! End-to-end replay of the reference order flow.
//!
//! The same scenario is driven through an in-memory sink and through a
//! rendezvous channel with a consumer thread; both must see the identical
//! action sequence.

use std::thread;

use dense_lob::sink::{consume_until_done, ChannelSink};
use dense_lob::types::{Action, ActionKind, NO_ORDER};
use dense_lob::{ActionLog, Order, OrderBook, OrderStatus};

fn act(kind: ActionKind, order_id: u64, from: u64, amount: u64, price: u64) -> Action {
    Action::new(kind, order_id, from, amount, price)
}

/// Submit the reference flow into any book
fn run_scenario<S: dense_lob::ActionSink>(book: &mut OrderBook<S>) {
    // Should all go into the book
    book.submit(Order::sell(1, 50, 50)).unwrap();
    book.submit(Order::sell(2, 45, 25)).unwrap();
    book.submit(Order::sell(3, 45, 25)).unwrap();
    // Two partial fills at 45 and one fill at 50
    book.submit(Order::buy(4, 55, 75)).unwrap();
    book.cancel(1).unwrap();
    // Should all go into the book
    book.submit(Order::buy(5, 55, 20)).unwrap();
    book.submit(Order::buy(6, 50, 15)).unwrap();
    // One partial fill at 55 and one fill at 50
    book.submit(Order::sell(7, 45, 25)).unwrap();
    book.complete().unwrap();
}

fn expected_trace() -> Vec<Action> {
    use ActionKind::*;
    vec![
        act(Sell, 1, NO_ORDER, 50, 50),
        act(Sell, 2, NO_ORDER, 25, 45),
        act(Sell, 3, NO_ORDER, 25, 45),
        act(Buy, 4, NO_ORDER, 75, 55),
        act(PartialFilled, 4, 2, 25, 45),
        act(PartialFilled, 4, 3, 25, 45),
        act(Filled, 4, 1, 25, 50),
        act(Cancel, 1, NO_ORDER, 0, 0),
        act(Cancelled, 1, NO_ORDER, 0, 0),
        act(Buy, 5, NO_ORDER, 20, 55),
        act(Buy, 6, NO_ORDER, 15, 50),
        act(Sell, 7, NO_ORDER, 25, 45),
        act(PartialFilled, 7, 5, 20, 55),
        act(Filled, 7, 6, 5, 50),
        act(Done, NO_ORDER, NO_ORDER, 0, 0),
    ]
}

#[test]
fn reference_trace_in_memory() {
    let mut book = OrderBook::new(Vec::new());
    run_scenario(&mut book);

    assert_eq!(book.into_sink(), expected_trace());
}

#[test]
fn reference_trace_over_rendezvous_channel() {
    let (sink, rx) = ChannelSink::rendezvous();
    let consumer = thread::spawn(move || {
        let mut log = Vec::new();
        for action in rx {
            let done = action.is_done();
            log.push(action);
            if done {
                break;
            }
        }
        log
    });

    let mut book = OrderBook::new(sink);
    run_scenario(&mut book);
    drop(book);

    assert_eq!(consumer.join().unwrap(), expected_trace());
}

#[test]
fn reference_trace_console_output() {
    let (sink, rx) = ChannelSink::bounded(16);
    let printer = thread::spawn(move || {
        let mut out = Vec::new();
        let count = consume_until_done(rx, &mut out).unwrap();
        (count, String::from_utf8(out).unwrap())
    });

    let mut book = OrderBook::new(sink);
    run_scenario(&mut book);
    drop(book);

    let (count, text) = printer.join().unwrap();
    assert_eq!(count, 15);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "SELL - Order: 1, Amount: 50, Price: 50");
    assert_eq!(lines[3], "BUY - Order: 4, Amount: 75, Price: 55");
    assert_eq!(lines[4], "PARTIAL_FILLED - Order: 4, Filled 25@45, From: 2");
    assert_eq!(lines[6], "FILLED - Order: 4, Filled 25@50, From: 1");
    assert_eq!(lines[7], "CANCEL - Order: 1");
    assert_eq!(lines[8], "CANCELLED - Order: 1");
    assert_eq!(lines[14], "DONE");
}

#[test]
fn reference_book_state_after_replay() {
    let mut book = OrderBook::new(Vec::new());

    book.submit(Order::sell(1, 50, 50)).unwrap();
    book.submit(Order::sell(2, 45, 25)).unwrap();
    book.submit(Order::sell(3, 45, 25)).unwrap();
    book.submit(Order::buy(4, 55, 75)).unwrap();

    // Order 1 left its level with 25 still on it
    let order_1 = book.order(1).unwrap();
    assert_eq!(order_1.remaining, 25);
    assert_eq!(order_1.status(), OrderStatus::Open);
    assert!(!book.is_resident(1));
    assert_eq!(book.ask_cursor(), 51);
    assert!(book.best_ask().is_none());

    // Cancelling it has no fill effect and releases it
    book.cancel(1).unwrap();
    assert!(!book.contains_order(1));
    assert_eq!(book.order_count(), 0);

    book.submit(Order::buy(5, 55, 20)).unwrap();
    book.submit(Order::buy(6, 50, 15)).unwrap();
    assert_eq!(book.bid_cursor(), 55);

    book.submit(Order::sell(7, 45, 25)).unwrap();

    // Order 6 keeps 10 but is no longer reachable
    assert_eq!(book.order(6).unwrap().remaining, 10);
    assert!(!book.is_resident(6));
    assert_eq!(book.bid_cursor(), 49);
    assert!(book.best_bid().is_none());
    assert_eq!(book.resting_count(), 0);
}

#[test]
fn reference_trace_digest_is_stable() {
    let mut a = OrderBook::new(ActionLog::new());
    let mut b = OrderBook::new(ActionLog::new());
    run_scenario(&mut a);
    run_scenario(&mut b);

    let (a, b) = (a.into_sink(), b.into_sink());
    assert_eq!(a.actions(), expected_trace().as_slice());
    assert_eq!(a.digest_hex(), b.digest_hex());
}
