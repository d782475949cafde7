//! Order book and submission entry point
//!
//! One `OrderBook` instance owns one symbol: a bid side and an ask side.
//! `submit` validates the order, stages a match against the opposite
//! side, and hands back a [`Transaction`] for the caller to commit or
//! roll back.

use tracing::debug;

use types::errors::OrderError;
use types::numeric::Quantity;
use types::order::{Order, OrderKind, Side};

use crate::book::{AskBook, BidBook};
use crate::matching::staging::{BookMutation, StagedMatch};
use crate::transaction::Transaction;

/// Single-symbol order book with price-time priority
///
/// Not safe for concurrent mutation; callers serialize submissions and
/// resolve each returned [`Transaction`] before the next `submit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBook {
    bids: BidBook,
    asks: AskBook,
}

impl OrderBook {
    /// Create a new empty order book
    pub fn new() -> Self {
        Self {
            bids: BidBook::new(),
            asks: AskBook::new(),
        }
    }

    /// Read access to the bid side
    pub fn bids(&self) -> &BidBook {
        &self.bids
    }

    /// Read access to the ask side
    pub fn asks(&self) -> &AskBook {
        &self.asks
    }

    /// Validate and stage a submission
    ///
    /// Nothing is applied here. The returned transaction carries the
    /// would-be fills and the mutation plan; the book changes on
    /// `commit` only.
    ///
    /// Outcomes:
    /// - a market order against insufficient opposite volume yields an
    ///   empty transaction (declined, commit is a no-op);
    /// - a fully matched order yields fills ending with the taker at its
    ///   originally submitted amount;
    /// - a partially matched limit order yields the consumed resting
    ///   orders (taker excluded) plus a staged rest of the residual at
    ///   the taker's price.
    ///
    /// # Panics
    /// A market order that passes the liquidity check but is cut off by
    /// its own price cap before filling violates the submission contract
    /// and panics rather than committing a half-filled market order.
    pub fn submit(&mut self, order: Order) -> Result<Transaction<'_>, OrderError> {
        if !order.price.is_positive() {
            return Err(OrderError::BadPrice);
        }
        if !order.amount.is_positive() {
            return Err(OrderError::BadAmount);
        }

        debug!(
            id = %order.id,
            side = ?order.side,
            kind = ?order.kind,
            price = %order.price,
            amount = %order.amount,
            "order submitted"
        );

        match order.kind {
            OrderKind::Market => self.stage_market(order),
            OrderKind::Limit => Ok(self.stage_limit(order)),
        }
    }

    /// Market orders must be fully fillable or are declined outright
    fn stage_market(&mut self, order: Order) -> Result<Transaction<'_>, OrderError> {
        let opposite_volume = match order.side {
            Side::Buy => self.asks.volume(),
            Side::Sell => self.bids.volume(),
        };
        if opposite_volume < order.amount {
            debug!(id = %order.id, %opposite_volume, "market order declined, insufficient volume");
            return Ok(Transaction::empty(self));
        }

        let staged = self.match_opposite(&order);
        assert!(
            staged.remaining.is_zero(),
            "market order {} cut off by its price cap with {} unfilled",
            order.id,
            staged.remaining
        );

        let StagedMatch {
            mut filled,
            mutations,
            ..
        } = staged;
        filled.push(order);
        Ok(Transaction::new(self, filled, mutations))
    }

    /// Limit orders match what is marketable and rest the remainder
    fn stage_limit(&mut self, order: Order) -> Transaction<'_> {
        let staged = self.match_opposite(&order);
        let StagedMatch {
            mut filled,
            remaining,
            mut mutations,
        } = staged;

        if remaining.is_zero() {
            filled.push(order);
        } else {
            let mut resting = order;
            resting.amount = remaining;
            mutations.push(BookMutation::InsertResting(resting));
        }

        Transaction::new(self, filled, mutations)
    }

    fn match_opposite(&self, taker: &Order) -> StagedMatch {
        match taker.side {
            Side::Buy => self.asks.match_from_best(taker, Some(taker.price)),
            Side::Sell => self.bids.match_from_best(taker, Some(taker.price)),
        }
    }

    /// Apply one staged mutation; called by the committing transaction
    pub(crate) fn apply(&mut self, mutation: &BookMutation) {
        match *mutation {
            BookMutation::RemoveOrder { side, price } => match side {
                Side::Buy => self.bids.remove_front(price),
                Side::Sell => self.asks.remove_front(price),
            },
            BookMutation::ShrinkOrder {
                side,
                price,
                new_amount,
            } => match side {
                Side::Buy => self.bids.shrink_front(price, new_amount),
                Side::Sell => self.asks.shrink_front(price, new_amount),
            },
            BookMutation::RemoveLevel { side, price } => match side {
                Side::Buy => self.bids.remove_level(price),
                Side::Sell => self.asks.remove_level(price),
            },
            BookMutation::InsertResting(order) => match order.side {
                Side::Buy => self.bids.insert(order),
                Side::Sell => self.asks.insert(order),
            },
        }
    }

    /// Aggregate unfilled quantity on one side
    pub fn volume(&self, side: Side) -> Quantity {
        match side {
            Side::Buy => self.bids.volume(),
            Side::Sell => self.asks.volume(),
        }
    }
}
