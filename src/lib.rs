//! # dense-lob
//!
//! Single-instrument limit order book with a deterministic action stream.
//!
//! ## Architecture
//!
//! - **Types**: Core data structures (Order, Action)
//! - **OrderBook**: Dense price ladder with slab-based order storage
//! - **Engine**: Crossing algorithm under price-time priority
//! - **Sink**: Where the action stream goes (memory, channel, console)
//!
//! ## Design Principles
//!
//! 1. **Determinism**: The same requests always produce the same actions
//! 2. **Integer Ticks**: Prices and quantities are plain `u64`
//! 3. **Pre-allocated Memory**: One level per tick, slab for orders
//! 4. **Synchronous Execution**: Each request runs to completion, one at a time
//!
//! ## Example
//!
//! ```
//! use dense_lob::{ActionLog, Order, OrderBook};
//! use dense_lob::types::ActionKind;
//!
//! let mut book = OrderBook::new(ActionLog::new());
//!
//! book.submit(Order::sell(1, 50, 50)).unwrap();
//! book.submit(Order::buy(2, 55, 20)).unwrap();
//! book.cancel(1).unwrap();
//! book.complete().unwrap();
//!
//! let log = book.into_sink();
//! assert_eq!(log.count(ActionKind::Filled), 1);
//! assert!(log.actions().last().unwrap().is_done());
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Action
pub mod types;

/// Order book: dense ladder with slab-based storage
pub mod orderbook;

/// Matching engine: crossing and match step
pub mod engine;

/// Action sinks
pub mod sink;

/// Book sizing
pub mod config;

/// Error types
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::{Action, ActionKind, Order, OrderStatus, Side};
pub use orderbook::{OrderBook, OrderNode, PriceLevel};
pub use sink::{ActionLog, ActionSink, ChannelSink, ConsolePrinter, NoopSink};
pub use config::BookConfig;
pub use error::{ActionError, BookError};
