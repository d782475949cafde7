//! Staged mutation plan
//!
//! Matching never touches the book directly. A cross produces a
//! [`StagedMatch`]: the would-be fills, the taker's residual, and an
//! ordered list of [`BookMutation`]s that realizes the outcome. The plan
//! is carried by a `Transaction` and applied only on commit, so a caller
//! can inspect the result and still walk away without a trace.

use serde::{Deserialize, Serialize};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

/// One deferred book mutation
///
/// Matching consumes a price level strictly from its FIFO head, so the
/// order-granular variants address "the head of level `price`" rather
/// than carrying handles. Plans are applied in staged order, which keeps
/// that addressing stable across the whole plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookMutation {
    /// Remove the head order of the level at `price` (fully consumed).
    RemoveOrder { side: Side, price: Price },

    /// Rewrite the head order's amount to `new_amount` (partially
    /// consumed). The level volume drops by the amount actually taken.
    ShrinkOrder {
        side: Side,
        price: Price,
        new_amount: Quantity,
    },

    /// Drop the whole level at `price` (drained by the taker).
    RemoveLevel { side: Side, price: Price },

    /// Rest the taker's residual in the book on its own side.
    InsertResting(Order),
}

/// Result of staging a cross against one side of the book
///
/// `filled` holds the resting orders that would be fully consumed, in
/// price-time priority order; `remaining` is the taker amount left after
/// the walk; `mutations` is the plan that makes it real.
#[derive(Debug, Clone, Default)]
pub struct StagedMatch {
    pub filled: Vec<Order>,
    pub remaining: Quantity,
    pub mutations: Vec<BookMutation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::OrderId;

    #[test]
    fn test_mutation_plan_serialization() {
        let resting = Order::limit(
            OrderId::new(9),
            Side::Buy,
            "12".parse().unwrap(),
            "25".parse().unwrap(),
        );
        let plan = vec![
            BookMutation::RemoveOrder {
                side: Side::Sell,
                price: "10".parse().unwrap(),
            },
            BookMutation::ShrinkOrder {
                side: Side::Sell,
                price: "10".parse().unwrap(),
                new_amount: "40".parse().unwrap(),
            },
            BookMutation::RemoveLevel {
                side: Side::Buy,
                price: "15".parse().unwrap(),
            },
            BookMutation::InsertResting(resting),
        ];

        let json = serde_json::to_string(&plan).unwrap();
        let deserialized: Vec<BookMutation> = serde_json::from_str(&json).unwrap();
        assert_eq!(plan, deserialized);
    }

    #[test]
    fn test_mutation_prices_serialize_as_strings() {
        let mutation = BookMutation::ShrinkOrder {
            side: Side::Sell,
            price: "10.50".parse().unwrap(),
            new_amount: "0.1".parse().unwrap(),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        assert!(json.contains("\"10.50\""));
        assert!(json.contains("\"0.1\""));
    }
}
