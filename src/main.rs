//! dense-lob - Binary Entry Point
//!
//! Replays a short order flow through the book and prints the action stream
//! from a consumer thread, the way a feed handler would see it.
//!
//! Log verbosity follows `RUST_LOG` (e.g. `RUST_LOG=dense_lob=debug`).

use std::error::Error;
use std::io;
use std::thread;

use tracing::info;
use tracing_subscriber::EnvFilter;

use dense_lob::sink::{consume_until_done, ChannelSink};
use dense_lob::{BookConfig, Order, OrderBook};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let (sink, rx) = ChannelSink::rendezvous();
    let printer = thread::spawn(move || consume_until_done(rx, io::stdout().lock()));

    let mut book = OrderBook::with_config(BookConfig::default(), sink)?;
    info!(max_price = book.max_price(), "book ready");

    // Resting sells, then a buy that pays through two levels
    book.submit(Order::sell(1, 50, 50))?;
    book.submit(Order::sell(2, 45, 25))?;
    book.submit(Order::sell(3, 45, 25))?;
    book.submit(Order::buy(4, 55, 75))?;
    book.cancel(1)?;

    // Resting buys, then a sell that pays through them
    book.submit(Order::buy(5, 55, 20))?;
    book.submit(Order::buy(6, 50, 15))?;
    book.submit(Order::sell(7, 45, 25))?;
    book.complete()?;

    let state_root = book.state_root_hex();
    drop(book);

    let printed = match printer.join() {
        Ok(result) => result?,
        Err(_) => return Err("printer thread panicked".into()),
    };
    info!(actions = printed, state_root = %state_root, "replay finished");

    Ok(())
}
