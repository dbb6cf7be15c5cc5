//! Book configuration.
//!
//! The price ladder is allocated up front, one level per admissible tick, so
//! `max_price` is both the price domain bound and the table length.

use crate::error::BookError;

/// Default exclusive upper bound on prices
pub const DEFAULT_MAX_PRICE: u64 = 100_000;

/// Default number of pre-allocated order slots
pub const DEFAULT_ORDER_CAPACITY: usize = 10_000;

/// Largest ladder the book will allocate
pub const MAX_PRICE_LEVELS: u64 = 1 << 24;

/// Sizing for an [`OrderBook`](crate::orderbook::OrderBook).
///
/// ```
/// use dense_lob::BookConfig;
///
/// let config = BookConfig::default().with_max_price(10_000).with_order_capacity(500);
/// assert!(config.validate().is_ok());
/// assert!(BookConfig::default().with_max_price(0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookConfig {
    /// Prices must lie in `[0, max_price)`
    pub max_price: u64,

    /// Slots reserved in the order slab and id index
    pub order_capacity: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            max_price: DEFAULT_MAX_PRICE,
            order_capacity: DEFAULT_ORDER_CAPACITY,
        }
    }
}

impl BookConfig {
    pub fn new(max_price: u64, order_capacity: usize) -> Self {
        Self {
            max_price,
            order_capacity,
        }
    }

    pub fn with_max_price(mut self, max_price: u64) -> Self {
        self.max_price = max_price;
        self
    }

    pub fn with_order_capacity(mut self, order_capacity: usize) -> Self {
        self.order_capacity = order_capacity;
        self
    }

    /// Check that the ladder is non-empty and within [`MAX_PRICE_LEVELS`]
    pub fn validate(&self) -> Result<(), BookError> {
        if self.max_price == 0 {
            return Err(BookError::InvalidConfig("max_price must be positive".to_string()));
        }
        if self.max_price > MAX_PRICE_LEVELS {
            return Err(BookError::InvalidConfig(format!(
                "max_price {} exceeds the {} level limit",
                self.max_price, MAX_PRICE_LEVELS
            )));
        }
        Ok(())
    }
}
