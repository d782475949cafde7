//! Price level implementation with FIFO queue
//!
//! A price level contains all resting orders at a specific price point.
//! Orders are maintained in FIFO order to enforce time priority: the
//! head is the eldest and the first to trade.

use std::collections::VecDeque;
use types::numeric::{Price, Quantity};
use types::order::Order;

/// A price level containing orders at a specific price
///
/// Invariant: `volume` equals the sum of the amounts of the live orders
/// in the queue, and every queued order's price equals the level price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLevel {
    price: Price,
    /// Queue of resting orders at this price (FIFO order)
    orders: VecDeque<Order>,
    /// Total unfilled quantity at this level
    volume: Quantity,
}

/// Staged outcome of matching a taker amount against one level
///
/// `filled` lists the fully consumed orders in FIFO order (one pending
/// head removal each); `shrink_front_to` is the new amount left on a
/// partially consumed head, if any. Nothing has been applied yet.
#[derive(Debug, Clone)]
pub(crate) struct LevelMatch {
    pub filled: Vec<Order>,
    pub remaining: Quantity,
    pub shrink_front_to: Option<Quantity>,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: Price) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
            volume: Quantity::zero(),
        }
    }

    /// The fixed price of this level
    pub fn price(&self) -> Price {
        self.price
    }

    /// Total unfilled quantity at this level
    pub fn volume(&self) -> Quantity {
        self.volume
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of resting orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Iterate the resting orders, eldest first
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// Append an order at the back of the queue (time priority)
    ///
    /// Precondition: `order.price == self.price()`.
    pub(crate) fn insert(&mut self, order: Order) {
        debug_assert_eq!(order.price, self.price, "order price must match level price");
        self.volume = self.volume + order.amount;
        self.orders.push_back(order);
    }

    /// Remove and return the head order, updating volume
    pub(crate) fn pop_front(&mut self) -> Option<Order> {
        let order = self.orders.pop_front()?;
        self.volume = self.volume - order.amount;
        Some(order)
    }

    /// Rewrite the head order's amount to `new_amount`
    ///
    /// Returns the amount taken off the head; the level volume drops by
    /// exactly that, keeping `volume == Σ live amounts`.
    pub(crate) fn shrink_front(&mut self, new_amount: Quantity) -> Quantity {
        let Some(front) = self.orders.front_mut() else {
            return Quantity::zero();
        };
        let taken = front.amount - new_amount;
        front.amount = new_amount;
        self.volume = self.volume - taken;
        taken
    }

    /// Stage a match of `take` against this level without mutating it
    ///
    /// Walks the FIFO from the head. An order smaller than or equal to
    /// what is left is fully consumed; the first larger one absorbs the
    /// rest as a partial fill and stops the walk. A partially consumed
    /// order is not part of `filled`.
    pub(crate) fn stage_match(&self, take: Quantity) -> LevelMatch {
        let mut filled = Vec::new();
        let mut remaining = take;
        let mut shrink_front_to = None;

        for resting in &self.orders {
            if remaining < resting.amount {
                shrink_front_to = Some(resting.amount - remaining);
                remaining = Quantity::zero();
                break;
            }

            filled.push(*resting);
            remaining = remaining - resting.amount;
            if remaining.is_zero() {
                break;
            }
        }

        LevelMatch {
            filled,
            remaining,
            shrink_front_to,
        }
    }
}
