//! Order book module for the dense-lob matching engine.
//!
//! ## Architecture
//!
//! The order book is a dense price ladder with:
//!
//! - **Slab-based storage**: O(1) order insertion, removal, and lookup
//! - **Price levels**: One FIFO per tick, indexed directly by price
//! - **Price-time priority**: FIFO ordering at each price level
//!
//! ## Components
//!
//! - [`OrderNode`]: Wrapper around `Order` with the forward link for its level
//! - [`PriceLevel`]: Head/tail of the order queue at a single price
//! - [`OrderBook`]: The ladder, id index, cursors and sink
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Rest order | O(1) |
//! | Cancel order by ID | O(1) |
//! | Cross | O(levels swept + orders swept) |
//! | Reconciled best bid/ask | O(distance from cursor) |

pub mod node;
pub mod level;
pub mod book;

pub use node::OrderNode;
pub use level::PriceLevel;
pub use book::OrderBook;
