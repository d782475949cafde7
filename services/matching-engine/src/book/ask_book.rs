//! Ask (sell-side) order book
//!
//! Maintains sell orders keyed by price; the lowest price is the best
//! ask. A buy taker crosses this side from the bottom up. Uses BTreeMap
//! for deterministic, in-order traversal with no skips.

use std::collections::BTreeMap;

use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use super::price_level::PriceLevel;
use crate::matching::crossing;
use crate::matching::staging::{BookMutation, StagedMatch};

/// Ask (sell) side order book
///
/// Orders are sorted by price; the lowest ask is matched first. At each
/// price level, orders are maintained in FIFO order.
///
/// Invariant: `volume` equals the sum of the level volumes, and no level
/// is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AskBook {
    /// Price levels; BTreeMap iteration is ascending, best ask is first
    levels: BTreeMap<Price, PriceLevel>,
    /// Aggregate unfilled quantity across all levels
    volume: Quantity,
}

impl AskBook {
    /// Create a new empty ask book
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

    /// Get the best ask (lowest price) and its quantity
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.levels
            .iter()
            .next()
            .map(|(price, level)| (*price, level.volume()))
    }

    /// Get the best ask price
    pub fn best_ask_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    /// Get depth snapshot (top N price levels, best first)
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.levels
            .iter()
            .take(depth)
            .map(|(price, level)| (*price, level.volume()))
            .collect()
    }

    /// Check if the ask book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Iterate the levels best-first (ascending price)
    pub fn levels(&self) -> impl Iterator<Item = &PriceLevel> {
        self.levels.values()
    }

    /// Stage a cross of `taker` against this side, best price first
    ///
    /// Walks levels from the minimum price upward, stopping at the first
    /// level above `stop_price` (a level at the stop itself is still
    /// marketable) or once the taker amount is exhausted. A level whose
    /// whole volume fits in what is left of the taker is staged for
    /// removal; otherwise its head orders are staged individually.
    ///
    /// The book is not mutated; the returned plan is applied on commit.
    pub fn match_from_best(&self, taker: &Order, stop_price: Option<Price>) -> StagedMatch {
        let mut filled = Vec::new();
        let mut mutations = Vec::new();
        let mut remaining = taker.amount;

        for (&price, level) in self.levels.iter() {
            if !crossing::buy_crosses(price, stop_price) {
                break;
            }

            let drained = remaining >= level.volume();
            let staged = level.stage_match(remaining);

            if drained {
                // every order at this level is consumed; one mutation
                // drops the level wholesale
                mutations.push(BookMutation::RemoveLevel {
                    side: Side::Sell,
                    price,
                });
            } else {
                for _ in &staged.filled {
                    mutations.push(BookMutation::RemoveOrder {
                        side: Side::Sell,
                        price,
                    });
                }
                if let Some(new_amount) = staged.shrink_front_to {
                    mutations.push(BookMutation::ShrinkOrder {
                        side: Side::Sell,
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
