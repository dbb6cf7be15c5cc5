//! Price level management for orders at the same price.
//!
//! ## Queue Structure
//!
//! ```text
//! head (oldest) -> order2 -> order3 -> tail (newest)
//! ```
//!
//! - New orders are appended at the tail
//! - Sweeps pop from the head
//! - Emptiness is `head.is_none()`; no count is kept

use slab::Slab;

use crate::orderbook::OrderNode;

/// A FIFO of slab keys for orders at a single price.
///
/// The order data lives in the slab; this struct only holds the queue ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceLevel {
    /// Oldest order (slab key), first to be swept
    pub head: Option<usize>,

    /// Newest order (slab key), where new orders are appended
    pub tail: Option<usize>,
}

impl PriceLevel {
    /// Create a new empty price level
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Append an order at the tail of the queue and mark it resident
    ///
    /// # Panics
    ///
    /// Panics if `key` or the current tail doesn't exist in the slab
    pub fn push_back(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let node = slab.get_mut(key).expect("Invalid slab key");
        node.next = None;
        node.resident = true;

        if let Some(tail_key) = self.tail {
            let tail_node = slab.get_mut(tail_key).expect("Invalid tail key");
            tail_node.next = Some(key);
        } else {
            self.head = Some(key);
        }

        self.tail = Some(key);
    }

    /// Unlink the oldest order and return its slab key
    ///
    /// The node stays in the slab; it is only detached from this level.
    ///
    /// # Panics
    ///
    /// Panics if the head key doesn't exist in the slab
    pub fn pop_front(&mut self, slab: &mut Slab<OrderNode>) -> Option<usize> {
        let key = self.head?;
        let node = slab.get_mut(key).expect("Invalid head key");

        self.head = node.next.take();
        node.resident = false;

        if self.head.is_none() {
            self.tail = None;
        }

        Some(key)
    }

    /// Slab keys in FIFO order
    pub fn keys<'a>(&self, slab: &'a Slab<OrderNode>) -> impl Iterator<Item = usize> + 'a {
        std::iter::successors(self.head, move |key| slab.get(*key).and_then(|node| node.next))
    }

    /// Sum of remaining quantity over the queue, cancelled orders count as 0
    pub fn total_remaining(&self, slab: &Slab<OrderNode>) -> u64 {
        self.keys(slab)
            .filter_map(|key| slab.get(key))
            .map(OrderNode::remaining)
            .sum()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
