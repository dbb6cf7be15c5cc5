//! Order types for the dense-lob matching engine.
//!
//! ## SSZ Serialization
//!
//! `Order` derives `SimpleSerialize` from ssz_rs so resting orders can be
//! folded into the book's state root with a stable byte layout.
//! Enums are stored as raw `u8` fields and exposed through typed accessors.
//!
//! ## Units
//!
//! Prices are integer ticks in `[0, max_price)` of the owning book.
//! Quantities are integer lots.

use ssz_rs::prelude::*;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
///
/// Represented as u8 for SSZ compatibility:
/// - Buy = 0
/// - Sell = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid)
    #[default]
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }
}

// ============================================================================
// OrderStatus enum
// ============================================================================

/// Lifecycle status of an order.
///
/// ```text
/// New -> Open -> (Partial)* -> Filled | Cancelled
/// ```
///
/// A resting order consumed by a sweep keeps whatever status it had when it
/// was opened; only the aggressor's status moves on a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    /// Created by the caller, not yet submitted
    #[default]
    New,
    /// Resting in a price level
    Open,
    /// Aggressor that has been partially matched
    Partial,
    /// Aggressor drained to zero
    Filled,
    /// Cancelled by id
    Cancelled,
}

impl OrderStatus {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            OrderStatus::New => 0,
            OrderStatus::Open => 1,
            OrderStatus::Partial => 2,
            OrderStatus::Filled => 3,
            OrderStatus::Cancelled => 4,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(OrderStatus::New),
            1 => Some(OrderStatus::Open),
            2 => Some(OrderStatus::Partial),
            3 => Some(OrderStatus::Filled),
            4 => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A good-until-cancelled limit order.
///
/// ## SSZ Layout
///
/// Fixed-size container of 34 bytes
/// (id 8 + side 1 + price 8 + quantity 8 + remaining 8 + status 1).
///
/// ## Example
///
/// ```
/// use dense_lob::types::{Order, OrderStatus, Side};
///
/// let order = Order::new(1, Side::Sell, 50, 25);
/// assert_eq!(order.side(), Side::Sell);
/// assert_eq!(order.remaining, 25);
/// assert_eq!(order.status(), OrderStatus::New);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Order {
    /// Unique order identifier (assigned by the caller, never 0)
    pub id: u64,

    /// Order side as u8 (0=Buy, 1=Sell)
    pub side_raw: u8,

    /// Limit price in ticks
    pub price: u64,

    /// Quantity as submitted
    pub quantity: u64,

    /// Remaining quantity, decremented by fills and never increased
    pub remaining: u64,

    /// Status as u8, see [`OrderStatus`]
    pub status_raw: u8,
}

impl Order {
    /// Create a new limit order in the `New` state
    ///
    /// # Arguments
    ///
    /// * `id` - Unique order identifier
    /// * `side` - Buy or Sell
    /// * `price` - Limit price in ticks
    /// * `quantity` - Quantity in lots
    pub fn new(id: u64, side: Side, price: u64, quantity: u64) -> Self {
        Self {
            id,
            side_raw: side.to_u8(),
            price,
            quantity,
            remaining: quantity,
            status_raw: OrderStatus::New.to_u8(),
        }
    }

    /// Shorthand for a buy order
    pub fn buy(id: u64, price: u64, quantity: u64) -> Self {
        Self::new(id, Side::Buy, price, quantity)
    }

    /// Shorthand for a sell order
    pub fn sell(id: u64, price: u64, quantity: u64) -> Self {
        Self::new(id, Side::Sell, price, quantity)
    }

    /// Get the order side
    pub fn side(&self) -> Side {
        Side::from_u8(self.side_raw).unwrap_or(Side::Buy)
    }

    /// Get the order status
    pub fn status(&self) -> OrderStatus {
        OrderStatus::from_u8(self.status_raw).unwrap_or(OrderStatus::New)
    }

    /// Set the order status
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status_raw = status.to_u8();
    }

    #[inline]
    pub fn is_buy(&self) -> bool {
        self.side() == Side::Buy
    }

    /// Check if nothing is left to match
    #[inline]
    pub fn is_drained(&self) -> bool {
        self.remaining == 0
    }

    /// Take up to `fill_qty` off the remaining quantity
    ///
    /// # Returns
    ///
    /// The actual quantity taken (may be less if not enough remains)
    pub fn fill(&mut self, fill_qty: u64) -> u64 {
        let actual_fill = fill_qty.min(self.remaining);
        self.remaining -= actual_fill;
        actual_fill
    }

    /// Zero the remaining quantity and mark the order cancelled
    pub fn cancel(&mut self) {
        self.remaining = 0;
        self.set_status(OrderStatus::Cancelled);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
