//! Action records emitted by the order book.
//!
//! Every state change of the book is reported as one [`Action`], appended to
//! the caller's sink at the point in the algorithm where it happens. The
//! stream is append-only and terminated by exactly one `DONE` action.
//!
//! ## Field meaning per kind
//!
//! | Kind             | order_id  | from_order_id | amount              | price          |
//! |------------------|-----------|---------------|---------------------|----------------|
//! | `BUY` / `SELL`   | submitted | -             | remaining at submit | limit price    |
//! | `CANCEL(LED)`    | target id | -             | 0                   | 0              |
//! | `PARTIAL_FILLED` | aggressor | resting       | resting remaining   | resting price  |
//! | `FILLED`         | aggressor | resting       | aggressor remaining | resting price  |
//! | `DONE`           | -         | -             | 0                   | 0              |
//!
//! A `-` is encoded as [`NO_ORDER`].

use std::fmt;

use ssz_rs::prelude::*;

use crate::error::ActionError;
use crate::types::Order;

/// Order id used for "no order" in action records.
pub const NO_ORDER: u64 = 0;

/// Size of an encoded action: kind 1 + four u64 fields.
pub const ACTION_WIRE_SIZE: usize = 33;

/// Kind of an action. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Buy,
    Sell,
    Cancel,
    Cancelled,
    PartialFilled,
    Filled,
    Done,
}

impl ActionKind {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            ActionKind::Buy => 0,
            ActionKind::Sell => 1,
            ActionKind::Cancel => 2,
            ActionKind::Cancelled => 3,
            ActionKind::PartialFilled => 4,
            ActionKind::Filled => 5,
            ActionKind::Done => 6,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ActionKind::Buy),
            1 => Some(ActionKind::Sell),
            2 => Some(ActionKind::Cancel),
            3 => Some(ActionKind::Cancelled),
            4 => Some(ActionKind::PartialFilled),
            5 => Some(ActionKind::Filled),
            6 => Some(ActionKind::Done),
            _ => None,
        }
    }

    /// Wire name of the kind
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Buy => "BUY",
            ActionKind::Sell => "SELL",
            ActionKind::Cancel => "CANCEL",
            ActionKind::Cancelled => "CANCELLED",
            ActionKind::PartialFilled => "PARTIAL_FILLED",
            ActionKind::Filled => "FILLED",
            ActionKind::Done => "DONE",
        }
    }

    /// True for `PARTIAL_FILLED` and `FILLED`
    pub fn is_fill(self) -> bool {
        matches!(self, ActionKind::PartialFilled | ActionKind::Filled)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One book transition.
///
/// ## Example
///
/// ```
/// use dense_lob::types::{Action, ActionKind, Order};
///
/// let aggressor = Order::buy(4, 55, 75);
/// let resting = Order::sell(2, 45, 25);
///
/// let action = Action::partial_filled(&aggressor, &resting);
/// assert_eq!(action.kind().unwrap(), ActionKind::PartialFilled);
/// assert_eq!(action.counterparty(), Some(2));
/// assert_eq!(action.amount, 25);
/// assert_eq!(action.price, 45);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Action {
    /// Kind as u8, see [`ActionKind`]
    pub kind_raw: u8,

    /// Subject of the action
    pub order_id: u64,

    /// Resting counterparty for fills, [`NO_ORDER`] otherwise
    pub from_order_id: u64,

    pub amount: u64,

    pub price: u64,
}

impl Action {
    pub fn new(kind: ActionKind, order_id: u64, from_order_id: u64, amount: u64, price: u64) -> Self {
        Self {
            kind_raw: kind.to_u8(),
            order_id,
            from_order_id,
            amount,
            price,
        }
    }

    /// Acknowledgement of a buy submission
    pub fn buy(order: &Order) -> Self {
        Self::new(ActionKind::Buy, order.id, NO_ORDER, order.remaining, order.price)
    }

    /// Acknowledgement of a sell submission
    pub fn sell(order: &Order) -> Self {
        Self::new(ActionKind::Sell, order.id, NO_ORDER, order.remaining, order.price)
    }

    /// Acknowledgement matching the order's side
    pub fn submitted(order: &Order) -> Self {
        if order.is_buy() {
            Self::buy(order)
        } else {
            Self::sell(order)
        }
    }

    pub fn cancel(order_id: u64) -> Self {
        Self::new(ActionKind::Cancel, order_id, NO_ORDER, 0, 0)
    }

    pub fn cancelled(order_id: u64) -> Self {
        Self::new(ActionKind::Cancelled, order_id, NO_ORDER, 0, 0)
    }

    /// Aggressor matched against the whole of `resting`.
    ///
    /// Must be built before either order is mutated.
    pub fn partial_filled(aggressor: &Order, resting: &Order) -> Self {
        Self::new(
            ActionKind::PartialFilled,
            aggressor.id,
            resting.id,
            resting.remaining,
            resting.price,
        )
    }

    /// Aggressor drained by `resting`.
    ///
    /// Must be built before either order is mutated.
    pub fn filled(aggressor: &Order, resting: &Order) -> Self {
        Self::new(
            ActionKind::Filled,
            aggressor.id,
            resting.id,
            aggressor.remaining,
            resting.price,
        )
    }

    pub fn done() -> Self {
        Self::new(ActionKind::Done, NO_ORDER, NO_ORDER, 0, 0)
    }

    /// Decode the kind.
    ///
    /// Actions built through the constructors always decode; an error means
    /// the record came off the wire corrupted.
    pub fn kind(&self) -> Result<ActionKind, ActionError> {
        ActionKind::from_u8(self.kind_raw).ok_or(ActionError::UnknownKind(self.kind_raw))
    }

    /// Resting order of a fill
    pub fn counterparty(&self) -> Option<u64> {
        if self.from_order_id == NO_ORDER {
            None
        } else {
            Some(self.from_order_id)
        }
    }

    pub fn is_done(&self) -> bool {
        self.kind_raw == ActionKind::Done.to_u8()
    }

    /// SSZ encoding, [`ACTION_WIRE_SIZE`] bytes
    pub fn encode(&self) -> Result<Vec<u8>, ActionError> {
        ssz_rs::serialize(self).map_err(|e| ActionError::Encode(format!("{:?}", e)))
    }

    /// Decode from SSZ bytes, rejecting unknown kinds
    pub fn decode(bytes: &[u8]) -> Result<Self, ActionError> {
        let action: Action =
            ssz_rs::deserialize(bytes).map_err(|e| ActionError::Decode(format!("{:?}", e)))?;
        action.kind()?;
        Ok(action)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind() {
            Ok(kind) => kind.as_str(),
            Err(_) => "UNKNOWN",
        };
        write!(
            f,
            "Action{{ActionType:{},OrderId:{},FromOrderId:{},Amount:{},Price:{}}}",
            kind, self.order_id, self.from_order_id, self.amount, self.price
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
