//! Order record and its enums
//!
//! An `Order` is the immutable input to the matching engine. Once resting
//! in the book, only `amount` is ever rewritten (to the unfilled
//! remainder after a partial fill); `id`, `side`, `kind`, and `price`
//! never change.

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Order kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderKind {
    /// Execute immediately against resting liquidity, price acting as a cap
    Market,
    /// Match what is marketable, rest the remainder at `price`
    Limit,
}

/// Order record
///
/// `amount` is the unfilled quantity. A resting order partially consumed
/// by a match has its `amount` rewritten in place to the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub kind: OrderKind,
    pub price: Price,
    pub amount: Quantity,
}

impl Order {
    /// Create a limit order
    pub fn limit(id: OrderId, side: Side, price: Price, amount: Quantity) -> Self {
        Self {
            id,
            side,
            kind: OrderKind::Limit,
            price,
            amount,
        }
    }

    /// Create a market order
    ///
    /// `price` still participates in matching: it caps how deep into the
    /// opposite side the order may walk.
    pub fn market(id: OrderId, side: Side, price: Price, amount: Quantity) -> Self {
        Self {
            id,
            side,
            kind: OrderKind::Market,
            price,
            amount,
        }
    }
}
