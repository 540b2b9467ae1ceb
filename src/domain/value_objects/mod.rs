//! Value Objects for the storefront

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Flat shipping charge added to every cart total.
pub const SHIPPING_FLAT: Decimal = Decimal::from_parts(1599, 0, 0, false, 2);

/// Largest accepted price. Keeps `price * u32::MAX` summed over any cart
/// far below `Decimal::MAX`.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Price kept in its decimal-string form ("29.99") and parsed on demand.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(String);

impl Price {
    pub fn new(value: impl Into<String>) -> Self { Self(value.into().trim().to_string()) }

    /// Formats an amount with two decimal places.
    pub fn from_amount(amount: Decimal) -> Self { Self(format_amount(amount)) }

    pub fn as_str(&self) -> &str { &self.0 }

    /// Parsed amount; unparsable strings count as zero.
    pub fn amount(&self) -> Decimal { parse_or_zero(&self.0) }

    /// `None` when the product does not fit in a `Decimal`.
    pub fn checked_multiply(&self, qty: u32) -> Option<Decimal> { self.amount().checked_mul(Decimal::from(qty)) }

    pub fn saturating_multiply(&self, qty: u32) -> Decimal { self.amount().saturating_mul(Decimal::from(qty)) }

    /// Parses, is not negative and does not exceed [`MAX_PRICE`].
    pub fn is_valid(&self) -> bool {
        Decimal::from_str(&self.0).is_ok_and(|d| !d.is_sign_negative() && d <= MAX_PRICE)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl From<&str> for Price {
    fn from(value: &str) -> Self { Self::new(value) }
}

/// Average review score on a 0–5 scale, stored as a decimal string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(Option<String>);

impl Rating {
    pub fn new(value: impl Into<String>) -> Self { Self(Some(value.into())) }
    pub fn unrated() -> Self { Self(None) }
    pub fn as_str(&self) -> Option<&str> { self.0.as_deref() }

    /// Missing or unparsable ratings compare as zero.
    pub fn value(&self) -> Decimal { self.0.as_deref().map(parse_or_zero).unwrap_or(Decimal::ZERO) }
}

impl Default for Rating {
    fn default() -> Self { Self::new("0") }
}

pub fn parse_or_zero(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_parse() {
        assert_eq!(Price::new("29.99").amount(), Decimal::new(2999, 2));
        assert_eq!(Price::new("abc").amount(), Decimal::ZERO);
        assert!(!Price::new("-1").is_valid());
    }

    #[test]
    fn test_price_bounds() {
        assert!(Price::new("0").is_valid());
        assert!(Price::new("1000000000").is_valid());
        assert!(!Price::new("1000000000.01").is_valid());
        assert!(!Price::new("79228162514264337593543950335").is_valid());
    }

    #[test]
    fn test_multiply_overflow() {
        let huge = Price::new("79228162514264337593543950335");
        assert_eq!(huge.checked_multiply(2), None);
        assert_eq!(huge.saturating_multiply(2), Decimal::MAX);
        assert_eq!(Price::new("2.50").checked_multiply(4), Some(Decimal::new(1000, 2)));
    }

    #[test]
    fn test_price_format() {
        assert_eq!(Price::from_amount(Decimal::new(3598, 2)).as_str(), "35.98");
        assert_eq!(Price::from_amount(Decimal::new(5, 0)).as_str(), "5.00");
    }

    #[test]
    fn test_rating_defaults_to_zero() {
        assert_eq!(Rating::unrated().value(), Decimal::ZERO);
        assert_eq!(Rating::new("n/a").value(), Decimal::ZERO);
        assert_eq!(Rating::new("4.8").value(), Decimal::new(48, 1));
    }

    #[test]
    fn test_shipping_constant() { assert_eq!(SHIPPING_FLAT.to_string(), "15.99"); }
}
