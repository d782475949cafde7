//! Two-phase mutation handle
//!
//! A submission returns a `Transaction` holding the would-be fills and
//! the staged mutation plan. The book changes only when the caller
//! commits; rolling back (or just dropping the handle) leaves the book
//! exactly as it was.
//!
//! The handle mutably borrows its book, so a second `submit` cannot
//! start while a transaction is pending, and `commit`/`rollback` consume
//! the handle, so neither can happen twice.

use tracing::debug;
use types::order::Order;

use crate::engine::OrderBook;
use crate::matching::staging::BookMutation;

/// Staged result of a submission
///
/// Commit applies the staged mutations in order and returns the fills;
/// rollback discards everything.
#[derive(Debug)]
pub struct Transaction<'book> {
    book: &'book mut OrderBook,
    fills: Vec<Order>,
    mutations: Vec<BookMutation>,
}

impl<'book> Transaction<'book> {
    pub(crate) fn new(
        book: &'book mut OrderBook,
        fills: Vec<Order>,
        mutations: Vec<BookMutation>,
    ) -> Self {
        Self {
            book,
            fills,
            mutations,
        }
    }

    /// An empty transaction: no fills, commit is a no-op
    pub(crate) fn empty(book: &'book mut OrderBook) -> Self {
        Self::new(book, Vec::new(), Vec::new())
    }

    /// The orders this submission would consume, in price-time priority
    /// order, before anything is applied
    pub fn fills(&self) -> &[Order] {
        &self.fills
    }

    /// The staged mutation plan, for upstream inspection
    pub fn mutations(&self) -> &[BookMutation] {
        &self.mutations
    }

    /// True when the submission was declined (nothing filled, nothing
    /// staged)
    pub fn is_empty(&self) -> bool {
        self.fills.is_empty() && self.mutations.is_empty()
    }

    /// Apply the staged mutations in order and return the fills
    pub fn commit(self) -> Vec<Order> {
        let Transaction {
            book,
            fills,
            mutations,
        } = self;

        for mutation in &mutations {
            book.apply(mutation);
        }

        debug!(
            fills = fills.len(),
            mutations = mutations.len(),
            "transaction committed"
        );
        fills
    }

    /// Discard the staged mutations without touching the book
    pub fn rollback(self) {
        debug!(
            fills = self.fills.len(),
            mutations = self.mutations.len(),
            "transaction rolled back"
        );
        // dropping the handle discards the plan
    }
}
