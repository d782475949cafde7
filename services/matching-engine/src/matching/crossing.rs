//! Crossing detection logic
//!
//! Determines how deep into the opposite side a taker may walk. A level
//! at the taker's own price is still marketable; the walk stops at the
//! first level strictly beyond the cap.

use types::numeric::Price;

/// True when a buy taker capped at `stop_price` can trade at `level_price`.
///
/// An absent cap crosses unconditionally.
pub fn buy_crosses(level_price: Price, stop_price: Option<Price>) -> bool {
    stop_price.map_or(true, |stop| level_price <= stop)
}

/// True when a sell taker capped at `stop_price` can trade at `level_price`.
pub fn sell_crosses(level_price: Price, stop_price: Option<Price>) -> bool {
    stop_price.map_or(true, |stop| level_price >= stop)
}
