//! Exact decimal types for prices and amounts
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point
//! errors). Comparison, ordering, and hashing are defined on the numeric
//! value rather than the textual form, so `10`, `10.0`, and `10.00` are
//! one and the same key everywhere a `Price` indexes a collection.
//!
//! Constructors accept any decimal, including zero and negatives: sign
//! validation is the book's responsibility at submission time, where a
//! bad sign maps to a recoverable error instead of a panic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Price with exact decimal representation
///
/// Serialized as string to prevent JSON number precision loss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// Create a new Price from a Decimal
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create from integer (for testing/convenience)
    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    /// Get the inner decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Strictly positive sign check
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Decimal::from_str(s)?))
    }
}

// Custom serialization to preserve precision
impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let decimal = Decimal::from_str(&s).map_err(serde::de::Error::custom)?;
        Ok(Self(decimal))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quantity with exact decimal representation
///
/// Serialized as string to prevent JSON number precision loss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(Decimal);

impl Quantity {
    /// Create a new Quantity from a Decimal
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Zero quantity
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Create from integer (for testing/convenience)
    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    /// Get the inner decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Check if quantity is zero
    pub fn is_zero(&self) -> bool {
        self.0 == Decimal::ZERO
    }

    /// Strictly positive sign check
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl FromStr for Quantity {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Decimal::from_str(s)?))
    }
}

// Arithmetic operations
impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        assert!(self.0 >= rhs.0, "Quantity subtraction would result in negative");
        Self(self.0 - rhs.0)
    }
}

// Custom serialization to preserve precision
impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let decimal = Decimal::from_str(&s).map_err(serde::de::Error::custom)?;
        Ok(Self(decimal))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_creation() {
        let price = Price::from_u64(50000);
        assert_eq!(price.as_decimal(), Decimal::from(50000));
        assert!(price.is_positive());
    }

    #[test]
    fn test_price_sign() {
        assert!(!"0".parse::<Price>().unwrap().is_positive());
        assert!(!"-1.5".parse::<Price>().unwrap().is_positive());
        assert!("0.0001".parse::<Price>().unwrap().is_positive());
    }

    #[test]
    fn test_price_textual_forms_are_one_key() {
        let a: Price = "10".parse().unwrap();
        let b: Price = "10.0".parse().unwrap();
        let c: Price = "10.00".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.cmp(&c), std::cmp::Ordering::Equal);

        use std::collections::BTreeMap;
        let mut map = BTreeMap::new();
        map.insert(a, 1u8);
        map.insert(b, 2u8);
        map.insert(c, 3u8);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_price_ordering() {
        let low: Price = "9.99".parse().unwrap();
        let high: Price = "10.01".parse().unwrap();
        assert!(low < high);
    }

    #[test]
    fn test_price_serialization() {
        let price: Price = "50000.25".parse().unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"50000.25\"");

        let deserialized: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(price, deserialized);
    }

    #[test]
    fn test_quantity_zero() {
        let qty = Quantity::zero();
        assert!(qty.is_zero());
        assert!(!qty.is_positive());
    }

    #[test]
    fn test_quantity_arithmetic() {
        let q1: Quantity = "2.5".parse().unwrap();
        let q2: Quantity = "1.5".parse().unwrap();

        let sum = q1 + q2;
        assert_eq!(sum.as_decimal(), Decimal::from_str("4.0").unwrap());

        let diff = q1 - q2;
        assert_eq!(diff.as_decimal(), Decimal::from_str("1.0").unwrap());
    }

    #[test]
    #[should_panic(expected = "Quantity subtraction would result in negative")]
    fn test_quantity_underflow_panics() {
        let q1: Quantity = "1.0".parse().unwrap();
        let q2: Quantity = "2.0".parse().unwrap();
        let _ = q1 - q2;
    }

    #[test]
    fn test_quantity_serialization() {
        let qty: Quantity = "1.500".parse().unwrap();
        let json = serde_json::to_string(&qty).unwrap();
        assert_eq!(json, "\"1.500\"");

        let deserialized: Quantity = serde_json::from_str(&json).unwrap();
        assert_eq!(qty, deserialized);
    }

    #[test]
    fn test_deterministic_comparison() {
        // Same inputs always compare the same regardless of textual scale
        let a: Quantity = "0.123456789".parse().unwrap();
        let b: Quantity = "0.1234567890".parse().unwrap();
        assert_eq!(a, b);
    }
}
