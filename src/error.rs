//! Error types for dense-lob
//!
//! The matching path itself cannot fail. Errors only arise at the edges:
//! requests the book refuses before touching any state, and action records
//! that do not decode.

use thiserror::Error;

/// A request the book refused. Nothing was emitted and no state changed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("Price {price} outside the book's domain [0, {max_price})")]
    PriceOutOfRange { price: u64, max_price: u64 },

    #[error("Order id 0 is reserved")]
    ReservedOrderId,

    #[error("Order id {0} is still tracked by the book")]
    DuplicateOrderId(u64),

    #[error("Remaining {remaining} exceeds submitted quantity {quantity}")]
    RemainingExceedsQuantity { remaining: u64, quantity: u64 },

    #[error("Book is completed")]
    Completed,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failures decoding or delivering action records.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Unknown action kind: {0}")]
    UnknownKind(u8),

    #[error("Failed to encode action: {0}")]
    Encode(String),

    #[error("Failed to decode action: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
