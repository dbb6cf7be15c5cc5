//! Order node for slab-based storage.
//!
//! ## Design
//!
//! `OrderNode` wraps an `Order` with a forward link so that orders at one
//! price form a singly linked FIFO. Links are slab keys, not references.
//!
//! ## Residency
//!
//! A node is *resident* while it is linked into a price level. Sweeps unlink
//! every node they pass, so a node can stay in the slab (still cancellable by
//! id) after it has left its level. Such a node is never matched again.

use crate::types::Order;

/// Order node stored in the slab.
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The actual order data
    pub order: Order,

    /// Next (newer) order at the same price level (slab key)
    /// None if this is the tail or the node is unlinked
    pub next: Option<usize>,

    /// Whether the node is currently linked into a price level
    pub resident: bool,
}

impl OrderNode {
    /// Create a new order node (not yet linked)
    ///
    /// # Example
    ///
    /// ```
    /// use dense_lob::orderbook::OrderNode;
    /// use dense_lob::types::Order;
    ///
    /// let node = OrderNode::new(Order::buy(1, 55, 20));
    ///
    /// assert!(node.next.is_none());
    /// assert!(!node.resident);
    /// ```
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            next: None,
            resident: false,
        }
    }

    /// Get the order ID
    #[inline]
    pub fn order_id(&self) -> u64 {
        self.order.id
    }

    /// Get the remaining quantity
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.order.remaining
    }

    /// Linked and still holding quantity, i.e. matchable
    #[inline]
    pub fn is_live(&self) -> bool {
        self.resident && self.order.remaining > 0
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
