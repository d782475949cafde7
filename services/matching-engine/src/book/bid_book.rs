//! Bid (buy-side) order book
//!
//! Maintains buy orders keyed by price; the highest price is the best
//! bid. A sell taker crosses this side from the top down. Uses BTreeMap
//! for deterministic, in-order traversal with no skips.

use std::collections::BTreeMap;

use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use super::price_level::PriceLevel;
use crate::matching::crossing;
use crate::matching::staging::{BookMutation, StagedMatch};

/// Bid (buy) side order book
///
/// Orders are sorted by price; the highest bid is matched first. At each
/// price level, orders are maintained in FIFO order.
///
/// Invariant: `volume` equals the sum of the level volumes, and no level
/// is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BidBook {
    /// Price levels; BTreeMap iteration is ascending, best bid is last
    levels: BTreeMap<Price, PriceLevel>,
    /// Aggregate unfilled quantity across all levels
    volume: Quantity,
}

impl BidBook {
    /// Create a new empty bid book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
            volume: Quantity::zero(),
        }
    }

    /// Rest an order in the book, creating its level on first use
    pub fn insert(&mut self, order: Order) {
        let level = self
            .levels
            .entry(order.price)
            .or_insert_with(|| PriceLevel::new(order.price));
        level.insert(order);
        self.volume = self.volume + order.amount;
    }

    /// Aggregate unfilled quantity across all levels
    pub fn volume(&self) -> Quantity {
        self.volume
    }

    /// Get the best bid (highest price) and its quantity
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.levels
            .iter()
            .next_back()
            .map(|(price, level)| (*price, level.volume()))
    }

    /// Get the best bid price
    pub fn best_bid_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Get depth snapshot (top N price levels, best first)
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.levels
            .iter()
            .rev()
            .take(depth)
            .map(|(price, level)| (*price, level.volume()))
            .collect()
    }

    /// Check if the bid book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Iterate the levels best-first (descending price)
    pub fn levels(&self) -> impl Iterator<Item = &PriceLevel> {
        self.levels.values().rev()
    }

    /// Stage a cross of `taker` against this side, best price first
    ///
    /// Walks levels from the maximum price downward, stopping at the
    /// first level below `stop_price` (a level at the stop itself is
    /// still marketable) or once the taker amount is exhausted. A level
    /// whose whole volume fits in what is left of the taker is staged
    /// for removal; otherwise its head orders are staged individually.
    ///
    /// The book is not mutated; the returned plan is applied on commit.
    pub fn match_from_best(&self, taker: &Order, stop_price: Option<Price>) -> StagedMatch {
        let mut filled = Vec::new();
        let mut mutations = Vec::new();
        let mut remaining = taker.amount;

        for (&price, level) in self.levels.iter().rev() {
            if !crossing::sell_crosses(price, stop_price) {
                break;
            }

            let drained = remaining >= level.volume();
            let staged = level.stage_match(remaining);

            if drained {
                // every order at this level is consumed; one mutation
                // drops the level wholesale
                mutations.push(BookMutation::RemoveLevel {
                    side: Side::Buy,
                    price,
                });
            } else {
                for _ in &staged.filled {
                    mutations.push(BookMutation::RemoveOrder {
                        side: Side::Buy,
                        price,
                    });
                }
                if let Some(new_amount) = staged.shrink_front_to {
                    mutations.push(BookMutation::ShrinkOrder {
                        side: Side::Buy,
                        price,
                        new_amount,
                    });
                }
            }

            filled.extend(staged.filled);
            remaining = staged.remaining;
            if remaining.is_zero() {
                break;
            }
        }

        StagedMatch {
            filled,
            remaining,
            mutations,
        }
    }

    /// Apply a staged head removal at `price`
    pub(crate) fn remove_front(&mut self, price: Price) {
        if let Some(level) = self.levels.get_mut(&price) {
            if let Some(removed) = level.pop_front() {
                self.volume = self.volume - removed.amount;
            }
            if level.is_empty() {
                self.levels.remove(&price);
            }
        }
    }

    /// Apply a staged head shrink at `price`
    pub(crate) fn shrink_front(&mut self, price: Price, new_amount: Quantity) {
        if let Some(level) = self.levels.get_mut(&price) {
            let taken = level.shrink_front(new_amount);
            self.volume = self.volume - taken;
        }
    }

    /// Drop an entire level, adjusting the side volume
    pub fn remove_level(&mut self, price: Price) {
        if let Some(level) = self.levels.remove(&price) {
            self.volume = self.volume - level.volume();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::OrderId;

    fn bid(id: u64, price: &str, amount: &str) -> Order {
        Order::limit(
            OrderId::new(id),
            Side::Buy,
            price.parse().unwrap(),
            amount.parse().unwrap(),
        )
    }

    fn taker_sell(id: u64, price: &str, amount: &str) -> Order {
        Order::limit(
            OrderId::new(id),
            Side::Sell,
            price.parse().unwrap(),
            amount.parse().unwrap(),
        )
    }

    fn qty(s: &str) -> Quantity {
        s.parse().unwrap()
    }

    fn price(s: &str) -> Price {
        s.parse().unwrap()
    }

    fn seeded() -> BidBook {
        let mut book = BidBook::new();
        book.insert(bid(1, "20", "100"));
        book.insert(bid(2, "20", "150"));
        book.insert(bid(3, "25", "100"));
        book
    }

    #[test]
    fn test_insert_and_best_bid() {
        let book = seeded();
        assert_eq!(book.level_count(), 2);
        assert_eq!(book.volume(), qty("350"));
        assert_eq!(book.best_bid(), Some((price("25"), qty("100"))));
    }

    #[test]
    fn test_same_numeric_price_shares_a_level() {
        let mut book = BidBook::new();
        book.insert(bid(1, "20", "100"));
        book.insert(bid(2, "20.0", "150"));
        book.insert(bid(3, "20.00", "50"));
        assert_eq!(book.level_count(), 1);
        assert_eq!(book.best_bid(), Some((price("20"), qty("300"))));
    }

    #[test]
    fn test_depth_snapshot_best_first() {
        let book = seeded();
        let depth = book.depth_snapshot(2);
        assert_eq!(depth, vec![(price("25"), qty("100")), (price("20"), qty("250"))]);
    }

    #[test]
    fn test_match_walks_max_first() {
        let book = seeded();
        let staged = book.match_from_best(&taker_sell(4, "15", "350"), Some(price("15")));

        let ids: Vec<u64> = staged.filled.iter().map(|o| o.id.as_u64()).collect();
        assert_eq!(ids, vec![3, 1, 2], "best price first, FIFO within a price");
        assert!(staged.remaining.is_zero());
        assert_eq!(
            staged.mutations,
            vec![
                BookMutation::RemoveLevel { side: Side::Buy, price: price("25") },
                BookMutation::RemoveLevel { side: Side::Buy, price: price("20") },
            ]
        );
    }

    #[test]
    fn test_match_stops_at_stop_price() {
        let book = seeded();
        let staged = book.match_from_best(&taker_sell(4, "22", "350"), Some(price("22")));

        assert_eq!(staged.filled.len(), 1);
        assert_eq!(staged.filled[0].id, OrderId::new(3));
        assert_eq!(staged.remaining, qty("250"));
    }

    #[test]
    fn test_match_is_pure_until_applied() {
        let book = seeded();
        let _ = book.match_from_best(&taker_sell(4, "15", "350"), Some(price("15")));
        assert_eq!(book.volume(), qty("350"));
        assert_eq!(book.level_count(), 2);
    }

    #[test]
    fn test_drain_decision_uses_remaining_not_original() {
        // taker 300 exceeds level 20's volume of 250, but by the time the
        // walk reaches it only 200 is left: the level keeps its partially
        // consumed tail and must not be staged for removal.
        let book = seeded();
        let staged = book.match_from_best(&taker_sell(4, "15", "300"), Some(price("15")));

        let ids: Vec<u64> = staged.filled.iter().map(|o| o.id.as_u64()).collect();
        assert_eq!(ids, vec![3, 1]);
        assert!(staged.remaining.is_zero());
        assert_eq!(
            staged.mutations,
            vec![
                BookMutation::RemoveLevel { side: Side::Buy, price: price("25") },
                BookMutation::RemoveOrder { side: Side::Buy, price: price("20") },
                BookMutation::ShrinkOrder { side: Side::Buy, price: price("20"), new_amount: qty("50") },
            ]
        );
    }

    #[test]
    fn test_apply_remove_front_drops_empty_level() {
        let mut book = BidBook::new();
        book.insert(bid(1, "20", "100"));
        book.remove_front(price("20"));
        assert!(book.is_empty());
        assert!(book.volume().is_zero());
    }

    #[test]
    fn test_apply_shrink_front_keeps_volumes_consistent() {
        let mut book = seeded();
        book.shrink_front(price("20"), qty("40"));
        assert_eq!(book.volume(), qty("290"));
        let level = book.levels().find(|l| l.price() == price("20")).unwrap();
        assert_eq!(level.volume(), qty("190"));
    }

    #[test]
    fn test_apply_remove_level() {
        let mut book = seeded();
        book.remove_level(price("20"));
        assert_eq!(book.level_count(), 1);
        assert_eq!(book.volume(), qty("100"));
    }
}
