//! Crossing algorithm.
//!
//! ## Sweep
//!
//! A buy at limit `P` examines the level under the `ask` cursor while
//! `ask <= P` and the buy has quantity left, then steps `ask` up by one tick.
//! A sell does the same against `bid`, stepping down. Once level 0 has been
//! examined the bid side is exhausted and later sells do not cross until a
//! buy rests again.
//!
//! Each examined level is walked head to tail exactly once and every node is
//! unlinked as the walk passes it, whether or not the aggressor still has
//! quantity for it. Nodes passed after the aggressor is drained keep their
//! quantity and status but can no longer be matched: they stay tracked by id
//! and only a cancel releases them.
//!
//! ## Match step
//!
//! | Condition                     | Action           | Amount              |
//! |-------------------------------|------------------|---------------------|
//! | aggressor drained             | none             | -                   |
//! | resting >= aggressor          | `FILLED`         | aggressor remaining |
//! | 0 < resting < aggressor       | `PARTIAL_FILLED` | resting remaining   |
//! | resting drained               | none             | -                   |
//!
//! Fills always execute at the resting order's price and only the aggressor
//! is reported. The resting order's status is left alone.

use tracing::{debug, trace};

use crate::orderbook::OrderBook;
use crate::sink::ActionSink;
use crate::types::{Action, Order, OrderStatus};

impl<S: ActionSink> OrderBook<S> {
    /// Cross a buy against resting sells, moving the `ask` cursor up
    pub(crate) fn cross_buy(&mut self, aggressor: &mut Order) {
        while self.ask <= aggressor.price && aggressor.remaining > 0 {
            self.sweep_level(self.ask, aggressor);
            self.ask += 1;
        }
    }

    /// Cross a sell against resting buys, moving the `bid` cursor down
    pub(crate) fn cross_sell(&mut self, aggressor: &mut Order) {
        while !self.bid_exhausted && self.bid >= aggressor.price && aggressor.remaining > 0 {
            self.sweep_level(self.bid, aggressor);
            if self.bid == 0 {
                self.bid_exhausted = true;
            } else {
                self.bid -= 1;
            }
        }
    }

    /// Walk and unlink the whole chain at `price`
    fn sweep_level(&mut self, price: u64, aggressor: &mut Order) {
        let index = price as usize;

        while let Some(key) = self.levels[index].pop_front(&mut self.orders) {
            if let Some(node) = self.orders.get_mut(key) {
                match_step(aggressor, &mut node.order, &mut self.sink);
            }

            if !self.release_if_drained(key) {
                if let Some(node) = self.orders.get(key) {
                    debug!(
                        order_id = node.order_id(),
                        price,
                        remaining = node.remaining(),
                        "resting order unlinked with quantity left"
                    );
                }
            }
        }
    }
}

/// Match `aggressor` against one `resting` order, emitting at most one fill
pub(crate) fn match_step<S: ActionSink>(aggressor: &mut Order, resting: &mut Order, sink: &mut S) {
    if aggressor.remaining == 0 {
        return;
    }

    if resting.remaining >= aggressor.remaining {
        let action = Action::filled(aggressor, resting);
        trace!(
            order_id = aggressor.id,
            from_order_id = resting.id,
            amount = action.amount,
            price = action.price,
            "filled"
        );
        sink.on_action(action);

        let amount = aggressor.remaining;
        resting.fill(amount);
        aggressor.fill(amount);
        aggressor.set_status(OrderStatus::Filled);
    } else if resting.remaining > 0 {
        let action = Action::partial_filled(aggressor, resting);
        trace!(
            order_id = aggressor.id,
            from_order_id = resting.id,
            amount = action.amount,
            price = action.price,
            "partially filled"
        );
        sink.on_action(action);

        let amount = resting.remaining;
        aggressor.fill(amount);
        aggressor.set_status(OrderStatus::Partial);
        resting.fill(amount);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BookConfig;
    use crate::types::ActionKind;

    fn small_book() -> OrderBook<Vec<Action>> {
        OrderBook::with_config(BookConfig::new(100, 16), Vec::new()).unwrap()
    }

    fn fills(book: &OrderBook<Vec<Action>>) -> Vec<Action> {
        book.sink()
            .iter()
            .filter(|a| a.kind().map(ActionKind::is_fill).unwrap_or(false))
            .cloned()
            .collect()
    }

    #[test]
    fn test_match_step_full_fill() {
        let mut aggressor = Order::buy(4, 55, 25);
        let mut resting = Order::sell(1, 50, 50);
        resting.set_status(OrderStatus::Open);
        let mut sink = Vec::new();

        match_step(&mut aggressor, &mut resting, &mut sink);

        assert_eq!(sink, vec![Action::new(ActionKind::Filled, 4, 1, 25, 50)]);
        assert_eq!(aggressor.remaining, 0);
        assert_eq!(aggressor.status(), OrderStatus::Filled);
        assert_eq!(resting.remaining, 25);
        assert_eq!(resting.status(), OrderStatus::Open);
    }

    #[test]
    fn test_match_step_exact_is_full_fill() {
        let mut aggressor = Order::buy(2, 50, 10);
        let mut resting = Order::sell(1, 50, 10);
        let mut sink = Vec::new();

        match_step(&mut aggressor, &mut resting, &mut sink);

        assert_eq!(sink[0].kind().unwrap(), ActionKind::Filled);
        assert_eq!(resting.remaining, 0);
        // Resting status is never moved by a match
        assert_eq!(resting.status(), OrderStatus::New);
    }

    #[test]
    fn test_match_step_partial_fill() {
        let mut aggressor = Order::buy(4, 55, 75);
        let mut resting = Order::sell(2, 45, 25);
        let mut sink = Vec::new();

        match_step(&mut aggressor, &mut resting, &mut sink);

        assert_eq!(sink, vec![Action::new(ActionKind::PartialFilled, 4, 2, 25, 45)]);
        assert_eq!(aggressor.remaining, 50);
        assert_eq!(aggressor.status(), OrderStatus::Partial);
        assert_eq!(resting.remaining, 0);
    }

    #[test]
    fn test_match_step_noops() {
        let mut sink = Vec::new();

        let mut drained = Order::buy(1, 50, 0);
        let mut resting = Order::sell(2, 50, 10);
        match_step(&mut drained, &mut resting, &mut sink);
        assert_eq!(resting.remaining, 10);

        let mut aggressor = Order::buy(3, 50, 10);
        let mut cancelled = Order::sell(4, 50, 10);
        cancelled.cancel();
        match_step(&mut aggressor, &mut cancelled, &mut sink);
        assert_eq!(aggressor.remaining, 10);

        assert!(sink.is_empty());
    }

    #[test]
    fn test_buy_sweeps_price_then_time() {
        let mut book = small_book();
        book.submit(Order::sell(1, 52, 5)).unwrap();
        book.submit(Order::sell(2, 50, 5)).unwrap();
        book.submit(Order::sell(3, 50, 5)).unwrap();

        book.submit(Order::buy(4, 60, 15)).unwrap();

        assert_eq!(
            fills(&book),
            vec![
                Action::new(ActionKind::PartialFilled, 4, 2, 5, 50),
                Action::new(ActionKind::PartialFilled, 4, 3, 5, 50),
                Action::new(ActionKind::Filled, 4, 1, 5, 52),
            ]
        );
        // The cursor stops one tick past the level that drained the buy
        assert_eq!(book.ask_cursor(), 53);
        assert_eq!(book.order_count(), 0);
    }

    #[test]
    fn test_sweep_unlinks_whole_level() {
        let mut book = small_book();
        book.submit(Order::sell(1, 50, 10)).unwrap();
        book.submit(Order::sell(2, 50, 10)).unwrap();
        book.submit(Order::sell(3, 50, 10)).unwrap();

        book.submit(Order::buy(4, 50, 5)).unwrap();

        assert_eq!(fills(&book), vec![Action::new(ActionKind::Filled, 4, 1, 5, 50)]);

        // Every order at 50 is gone from the level, quantities untouched
        assert!(book.level_orders(50).is_empty());
        assert_eq!(book.order(1).unwrap().remaining, 5);
        assert_eq!(book.order(2).unwrap().remaining, 10);
        assert_eq!(book.order(3).unwrap().remaining, 10);
        assert_eq!(book.order(2).unwrap().status(), OrderStatus::Open);
        assert!(!book.is_resident(2));
        assert_eq!(book.resting_count(), 0);
        assert!(book.best_ask().is_none());

        // Unreachable for later buys
        book.submit(Order::buy(5, 60, 5)).unwrap();
        assert_eq!(fills(&book).len(), 1);
        assert_eq!(book.order(5).unwrap().status(), OrderStatus::Open);
    }

    #[test]
    fn test_cancel_releases_unlinked_order() {
        let mut book = small_book();
        book.submit(Order::sell(1, 50, 10)).unwrap();
        book.submit(Order::sell(2, 50, 10)).unwrap();
        book.submit(Order::buy(3, 50, 5)).unwrap();

        assert!(book.contains_order(2));
        book.cancel(2).unwrap();
        assert!(!book.contains_order(2));
        assert_eq!(book.order_count(), 1);
    }

    #[test]
    fn test_cancelled_order_is_swept_as_noop() {
        let mut book = small_book();
        book.submit(Order::sell(1, 50, 10)).unwrap();
        book.submit(Order::sell(2, 50, 10)).unwrap();
        book.cancel(1).unwrap();

        book.submit(Order::buy(3, 50, 4)).unwrap();

        assert_eq!(fills(&book), vec![Action::new(ActionKind::Filled, 3, 2, 4, 50)]);
        // The cancelled order's slot is released once it is swept
        assert!(!book.contains_order(1));
    }

    #[test]
    fn test_sell_sweeps_down_to_zero() {
        let mut book = small_book();
        book.submit(Order::buy(1, 0, 5)).unwrap();
        book.submit(Order::buy(2, 1, 5)).unwrap();

        book.submit(Order::sell(3, 0, 20)).unwrap();

        assert_eq!(
            fills(&book),
            vec![
                Action::new(ActionKind::PartialFilled, 3, 2, 5, 1),
                Action::new(ActionKind::PartialFilled, 3, 1, 5, 0),
            ]
        );
        // The remainder rests at 0 and the cursor stays in the domain
        assert_eq!(book.bid_cursor(), 0);
        assert_eq!(book.ask_cursor(), 0);
        assert_eq!(book.order(3).unwrap().remaining, 10);
        assert_eq!(book.best_ask(), Some(0));
    }

    #[test]
    fn test_sells_at_bottom_tick_never_cross_each_other() {
        let mut book = small_book();
        book.submit(Order::sell(1, 0, 10)).unwrap();
        book.submit(Order::sell(2, 0, 4)).unwrap();
        book.submit(Order::sell(3, 0, 6)).unwrap();

        assert!(fills(&book).is_empty());
        assert!(book.is_bid_exhausted());
        assert!(book.best_bid().is_none());

        // Both residuals keep their FIFO position at 0
        let ids: Vec<u64> = book.level_orders(0).iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(book.level_depth(0), 20);
        assert_eq!(book.best_ask(), Some(0));
    }

    #[test]
    fn test_resting_buy_clears_bid_exhaustion() {
        let mut book = small_book();
        book.submit(Order::sell(1, 0, 10)).unwrap();
        book.submit(Order::sell(2, 0, 4)).unwrap();

        // A buy at 0 takes the queue oldest first
        book.submit(Order::buy(3, 0, 12)).unwrap();
        assert_eq!(
            fills(&book),
            vec![
                Action::new(ActionKind::PartialFilled, 3, 1, 10, 0),
                Action::new(ActionKind::Filled, 3, 2, 2, 0),
            ]
        );
        assert_eq!(book.ask_cursor(), 1);

        // A buy below every ask rests and reopens the bid side
        book.submit(Order::buy(4, 0, 5)).unwrap();
        assert!(!book.is_bid_exhausted());
        assert_eq!(book.best_bid(), Some(0));

        book.submit(Order::sell(5, 0, 3)).unwrap();
        assert_eq!(
            fills(&book).last(),
            Some(&Action::new(ActionKind::Filled, 5, 4, 3, 0))
        );
        assert!(book.is_bid_exhausted());
    }

    #[test]
    fn test_top_tick_round_trip() {
        let mut book = small_book();
        book.submit(Order::sell(1, 99, 10)).unwrap();
        book.submit(Order::buy(2, 99, 5)).unwrap();
        // The buy swept the last level, so the ask side reads as empty
        assert_eq!(book.ask_cursor(), 100);

        book.submit(Order::buy(3, 99, 3)).unwrap();
        assert_eq!(book.best_bid(), Some(99));
        assert_eq!(book.level_orders(99).len(), 1);

        book.submit(Order::sell(4, 99, 3)).unwrap();
        assert_eq!(
            fills(&book),
            vec![
                Action::new(ActionKind::Filled, 2, 1, 5, 99),
                Action::new(ActionKind::Filled, 4, 3, 3, 99),
            ]
        );
    }

    #[test]
    fn test_residual_buy_rests_and_is_reachable() {
        let mut book = small_book();
        book.submit(Order::sell(1, 40, 10)).unwrap();

        book.submit(Order::buy(2, 45, 30)).unwrap();
        let residual = book.order(2).unwrap();
        assert_eq!(residual.remaining, 20);
        assert_eq!(residual.status(), OrderStatus::Open);
        assert_eq!(book.best_bid(), Some(45));

        book.submit(Order::sell(3, 44, 20)).unwrap();
        assert_eq!(
            fills(&book).last(),
            Some(&Action::new(ActionKind::Filled, 3, 2, 20, 45))
        );
    }

    #[test]
    fn test_no_cross_below_spread() {
        let mut book = small_book();
        book.submit(Order::sell(1, 60, 10)).unwrap();
        book.submit(Order::buy(2, 59, 10)).unwrap();

        assert!(fills(&book).is_empty());
        assert_eq!(book.best_bid(), Some(59));
        assert_eq!(book.best_ask(), Some(60));
        assert_eq!(book.ask_cursor(), 60);
    }
}
