//! Core data types for dense-lob
//!
//! Both types implement SSZ serialization for deterministic encoding.
//!
//! ## Types
//!
//! - [`Order`]: A good-until-cancelled limit order
//! - [`Side`]: Buy or Sell
//! - [`OrderStatus`]: Order lifecycle status
//! - [`Action`]: One transition of the book, as seen by the sink
//! - [`ActionKind`]: The closed set of action kinds

mod order;
mod action;

// Re-export all types at module level
pub use order::{Order, OrderStatus, Side};
pub use action::{Action, ActionKind, ACTION_WIRE_SIZE, NO_ORDER};
