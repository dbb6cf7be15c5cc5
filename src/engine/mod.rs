//! Matching engine module for dense-lob.
//!
//! ## Matching Rules
//!
//! - **Buy orders** sweep asks upward from the `ask` cursor
//! - **Sell orders** sweep bids downward from the `bid` cursor
//! - **Execution price** is always the resting order's price
//! - **Unfilled quantity** rests on the book at the aggressor's limit
//!
//! The algorithm is implemented directly on [`OrderBook`](crate::OrderBook);
//! see [`matcher`] for the sweep and match-step rules.
//!
//! ## Example
//!
//! ```
//! use dense_lob::OrderBook;
//! use dense_lob::types::{Action, ActionKind, Order};
//!
//! let mut book = OrderBook::new(Vec::new());
//!
//! // Two resting sells at 45, then a buy through them
//! book.submit(Order::sell(2, 45, 25)).unwrap();
//! book.submit(Order::sell(3, 45, 25)).unwrap();
//! book.submit(Order::buy(4, 55, 30)).unwrap();
//!
//! let actions = book.sink();
//! assert_eq!(actions[3], Action::new(ActionKind::PartialFilled, 4, 2, 25, 45));
//! assert_eq!(actions[4], Action::new(ActionKind::Filled, 4, 3, 5, 45));
//! ```

pub mod matcher;
