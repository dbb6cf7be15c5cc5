//! Single-instrument limit order book over a dense price ladder.
//!
//! ## Architecture
//!
//! - **Slab**: Pre-allocated storage for every order the book still tracks
//! - **Ladder**: One [`PriceLevel`] per admissible tick in `[0, max_price)`
//! - **HashMap**: Order ID to slab key mapping for cancel and queries
//! - **Cursors**: `bid`/`ask` sweep estimates (see below)
//!
//! ## Cursors
//!
//! `bid` starts at 0 and `ask` at `max_price` ("no asks"). A resting order
//! only ever improves its side's cursor; a sweep moves the opposite cursor
//! one tick past every level it examines. They are estimates: every
//! non-empty buy level is at or below `bid` and every non-empty sell level is
//! at or above `ask`, but the level under a cursor may be empty. Use
//! [`OrderBook::best_bid`] / [`OrderBook::best_ask`] for reconciled values.
//!
//! `bid` cannot step below tick 0, so a sell sweep that has examined level 0
//! marks the bid side exhausted instead. No sell crosses again until a buy
//! rests.
//!
//! ## Slot lifetime
//!
//! A slot is freed when its order leaves its level drained (filled or
//! cancelled), or when an already unlinked order is cancelled. An order that
//! leaves its level with quantity left (see the matcher) keeps its slot and
//! index entry so it can still be cancelled.
//!
//! ## Example
//!
//! ```
//! use dense_lob::orderbook::OrderBook;
//! use dense_lob::types::{Action, ActionKind, Order};
//!
//! let mut book = OrderBook::new(Vec::new());
//!
//! book.submit(Order::sell(1, 50, 10)).unwrap();
//! book.submit(Order::buy(2, 55, 4)).unwrap();
//!
//! let actions = book.sink();
//! assert_eq!(actions[2], Action::new(ActionKind::Filled, 2, 1, 4, 50));
//! ```

use std::collections::HashMap;

use sha2::{Digest, Sha256};
use slab::Slab;
use tracing::{debug, info};

use crate::config::BookConfig;
use crate::error::BookError;
use crate::orderbook::{OrderNode, PriceLevel};
use crate::sink::ActionSink;
use crate::types::{Action, Order, OrderStatus, Side, NO_ORDER};

/// Limit order book emitting into a sink of type `S`.
#[derive(Debug)]
pub struct OrderBook<S: ActionSink> {
    /// Order storage
    /// Key: slab index, Value: OrderNode
    pub(crate) orders: Slab<OrderNode>,

    /// Dense price ladder, index = price
    pub(crate) levels: Box<[PriceLevel]>,

    /// Order ID to slab key mapping
    pub(crate) order_index: HashMap<u64, usize>,

    /// Highest price that may hold a resting buy
    pub(crate) bid: u64,

    /// Set when a sweep has passed below tick 0; cleared when a buy rests
    pub(crate) bid_exhausted: bool,

    /// Lowest price that may hold a resting sell, `max_price` when none
    pub(crate) ask: u64,

    /// Exclusive upper bound of the price domain
    max_price: u64,

    /// Caller's action sink
    pub(crate) sink: S,

    /// Set once DONE has been emitted
    completed: bool,
}

impl<S: ActionSink> OrderBook<S> {
    /// Create a book with [`BookConfig::default`]
    pub fn new(sink: S) -> Self {
        Self::build(BookConfig::default(), sink)
    }

    /// Create a book with a custom price domain and capacity
    ///
    /// # Errors
    ///
    /// [`BookError::InvalidConfig`] if the config does not validate.
    ///
    /// # Example
    ///
    /// ```
    /// use dense_lob::{BookConfig, OrderBook};
    /// use dense_lob::sink::NoopSink;
    ///
    /// let book = OrderBook::with_config(BookConfig::new(1_000, 100), NoopSink).unwrap();
    /// assert_eq!(book.max_price(), 1_000);
    /// assert_eq!(book.ask_cursor(), 1_000);
    /// ```
    pub fn with_config(config: BookConfig, sink: S) -> Result<Self, BookError> {
        config.validate()?;
        Ok(Self::build(config, sink))
    }

    fn build(config: BookConfig, sink: S) -> Self {
        let levels = vec![PriceLevel::new(); config.max_price as usize].into_boxed_slice();
        Self {
            orders: Slab::with_capacity(config.order_capacity),
            levels,
            order_index: HashMap::with_capacity(config.order_capacity),
            bid: 0,
            bid_exhausted: false,
            ask: config.max_price,
            max_price: config.max_price,
            sink,
            completed: false,
        }
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Submit a limit order.
    ///
    /// Emits the BUY/SELL acknowledgement, crosses the order against the
    /// opposite side, and rests whatever remains at its own price.
    ///
    /// # Errors
    ///
    /// Rejected before anything is emitted when the book is completed, the
    /// price is outside `[0, max_price)`, the id is 0, the id is still
    /// tracked by the book, or `remaining` exceeds `quantity`.
    ///
    /// The incoming status is ignored; every accepted order starts as `New`.
    pub fn submit(&mut self, mut order: Order) -> Result<(), BookError> {
        if self.completed {
            return Err(BookError::Completed);
        }
        if order.price >= self.max_price {
            return Err(BookError::PriceOutOfRange {
                price: order.price,
                max_price: self.max_price,
            });
        }
        if order.id == NO_ORDER {
            return Err(BookError::ReservedOrderId);
        }
        if self.order_index.contains_key(&order.id) {
            return Err(BookError::DuplicateOrderId(order.id));
        }
        if order.remaining > order.quantity {
            return Err(BookError::RemainingExceedsQuantity {
                remaining: order.remaining,
                quantity: order.quantity,
            });
        }
        order.set_status(OrderStatus::New);

        debug!(
            order_id = order.id,
            side = ?order.side(),
            price = order.price,
            amount = order.remaining,
            "submit"
        );

        self.sink.on_action(Action::submitted(&order));

        match order.side() {
            Side::Buy => self.cross_buy(&mut order),
            Side::Sell => self.cross_sell(&mut order),
        }

        if order.remaining > 0 {
            self.open_order(order);
        }

        Ok(())
    }

    /// Cancel an order by id.
    ///
    /// CANCEL and CANCELLED are emitted whether or not the id is known. A
    /// known order has its remaining quantity zeroed in place; if it is still
    /// linked, the next sweep of its level unlinks it as a no-op.
    ///
    /// # Errors
    ///
    /// [`BookError::Completed`] after [`complete`](Self::complete).
    pub fn cancel(&mut self, order_id: u64) -> Result<(), BookError> {
        if self.completed {
            return Err(BookError::Completed);
        }

        self.sink.on_action(Action::cancel(order_id));

        let tracked = self.order_index.get(&order_id).copied();
        match tracked.and_then(|key| self.orders.get_mut(key).map(|node| (key, node))) {
            Some((key, node)) => {
                node.order.cancel();
                let resident = node.resident;
                debug!(order_id, resident, "cancel");

                if !resident {
                    self.orders.remove(key);
                    self.order_index.remove(&order_id);
                }
            }
            None => debug!(order_id, "cancel of unknown order"),
        }

        self.sink.on_action(Action::cancelled(order_id));
        Ok(())
    }

    /// Emit the terminal DONE action. Every later operation is refused.
    ///
    /// # Errors
    ///
    /// [`BookError::Completed`] if the book was already completed.
    pub fn complete(&mut self) -> Result<(), BookError> {
        if self.completed {
            return Err(BookError::Completed);
        }
        self.completed = true;
        self.sink.on_action(Action::done());
        info!(tracked_orders = self.orders.len(), "book completed");
        Ok(())
    }

    /// Rest `order` at the tail of its level and improve its side's cursor
    fn open_order(&mut self, mut order: Order) {
        let order_id = order.id;
        let price = order.price;
        let side = order.side();

        order.set_status(OrderStatus::Open);
        let key = self.orders.insert(OrderNode::new(order));
        self.levels[price as usize].push_back(key, &mut self.orders);
        self.order_index.insert(order_id, key);

        match side {
            Side::Buy if self.bid_exhausted || price > self.bid => {
                self.bid = price;
                self.bid_exhausted = false;
            }
            Side::Sell if price < self.ask => self.ask = price,
            _ => {}
        }

        debug!(order_id, price, bid = self.bid, ask = self.ask, "rest");
    }

    /// Free a popped node's slot if nothing is left on it.
    ///
    /// Returns false when the node keeps quantity and stays tracked.
    pub(crate) fn release_if_drained(&mut self, key: usize) -> bool {
        let (order_id, drained) = match self.orders.get(key) {
            Some(node) => (node.order_id(), node.order.is_drained()),
            None => return false,
        };
        if !drained {
            return false;
        }

        self.orders.remove(key);
        if self.order_index.get(&order_id) == Some(&key) {
            self.order_index.remove(&order_id);
        }
        true
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Look up a tracked order by id
    pub fn order(&self, order_id: u64) -> Option<&Order> {
        let key = *self.order_index.get(&order_id)?;
        self.orders.get(key).map(|node| &node.order)
    }

    /// Check if an order is still tracked
    #[inline]
    pub fn contains_order(&self, order_id: u64) -> bool {
        self.order_index.contains_key(&order_id)
    }

    /// Whether a tracked order is still linked into its level
    pub fn is_resident(&self, order_id: u64) -> bool {
        self.order_index
            .get(&order_id)
            .and_then(|key| self.orders.get(*key))
            .map_or(false, |node| node.resident)
    }

    /// Number of tracked orders (linked or not)
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of linked orders with quantity left
    pub fn resting_count(&self) -> usize {
        self.orders.iter().filter(|(_, node)| node.is_live()).count()
    }

    #[inline]
    pub fn max_price(&self) -> u64 {
        self.max_price
    }

    /// Raw bid cursor. Not authoritative, see the module docs.
    #[inline]
    pub fn bid_cursor(&self) -> u64 {
        self.bid
    }

    /// Whether a sell sweep has run off the bottom of the domain with no
    /// buy resting since
    #[inline]
    pub fn is_bid_exhausted(&self) -> bool {
        self.bid_exhausted
    }

    /// Raw ask cursor. `max_price` means no asks were seen.
    #[inline]
    pub fn ask_cursor(&self) -> u64 {
        self.ask
    }

    /// Highest price with a live resting order, scanning down from the cursor
    pub fn best_bid(&self) -> Option<u64> {
        if self.bid_exhausted {
            return None;
        }
        (0..=self.bid)
            .rev()
            .find(|&price| self.has_live_order(price, Side::Buy))
    }

    /// Lowest price with a live resting order, scanning up from the cursor
    pub fn best_ask(&self) -> Option<u64> {
        (self.ask..self.max_price).find(|&price| self.has_live_order(price, Side::Sell))
    }

    fn has_live_order(&self, price: u64, side: Side) -> bool {
        self.levels
            .get(price as usize)
            .map_or(false, |level| {
                level
                    .keys(&self.orders)
                    .filter_map(|key| self.orders.get(key))
                    .any(|node| node.is_live() && node.order.side() == side)
            })
    }

    /// Remaining quantity linked at `price`
    pub fn level_depth(&self, price: u64) -> u64 {
        self.levels
            .get(price as usize)
            .map_or(0, |level| level.total_remaining(&self.orders))
    }

    /// Orders linked at `price`, oldest first
    pub fn level_orders(&self, price: u64) -> Vec<&Order> {
        match self.levels.get(price as usize) {
            Some(level) => level
                .keys(&self.orders)
                .filter_map(|key| self.orders.get(key))
                .map(|node| &node.order)
                .collect(),
            None => Vec::new(),
        }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    // ========================================================================
    // State Root
    // ========================================================================

    /// SHA-256 over the cursors, the bid exhaustion flag and every linked order.
    ///
    /// Orders are taken in ascending price, then FIFO order, each as its SSZ
    /// encoding. Unlinked orders do not contribute.
    pub fn compute_state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.bid.to_le_bytes());
        hasher.update([self.bid_exhausted as u8]);
        hasher.update(self.ask.to_le_bytes());

        for level in self.levels.iter().filter(|level| !level.is_empty()) {
            for key in level.keys(&self.orders) {
                if let Some(node) = self.orders.get(key) {
                    if let Ok(bytes) = ssz_rs::serialize(&node.order) {
                        hasher.update(&bytes);
                    }
                }
            }
        }

        let result = hasher.finalize();
        let mut root = [0u8; 32];
        root.copy_from_slice(&result);
        root
    }

    pub fn state_root_hex(&self) -> String {
        hex::encode(self.compute_state_root())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
