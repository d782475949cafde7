//! Matching kernel
//!
//! Single-symbol order matching with price-time priority against a
//! central limit order book.
//!
//! **Key invariants:**
//! - Price-time priority strictly enforced: best opposing price first,
//!   FIFO arrival order within a price level
//! - Deterministic matching (same inputs → same outputs)
//! - Two-phase mutation: submission stages a [`Transaction`]; the book
//!   changes only on commit, never on rollback
//! - Exact decimal arithmetic end to end
//!
//! The kernel is single-threaded and synchronous. A [`OrderBook`] is not
//! safe for concurrent mutation; a serving layer serializes submissions
//! per symbol. The pending [`Transaction`] mutably borrows its book, so
//! the one-outstanding-transaction rule is enforced at compile time.

pub mod book;
pub mod engine;
pub mod matching;
pub mod transaction;

pub use engine::OrderBook;
pub use matching::staging::{BookMutation, StagedMatch};
pub use transaction::Transaction;
