//! Type-safe price and percentage representation using decimal arithmetic.
//!
//! Both types serialize as plain JSON numbers, matching the catalog API, and
//! refuse values outside their range on the way in.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price must be a number (got {0:?})")]
    NotANumber(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// Errors that can occur when parsing a [`Percentage`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PercentageError {
    /// The input is not a decimal number.
    #[error("percentage must be a number (got {0:?})")]
    NotANumber(String),
    /// The value is outside `0..=100`.
    #[error("percentage must be between 0 and 100")]
    OutOfRange,
}

/// A non-negative product price.
///
/// ```
/// use pocket_store_core::Price;
///
/// assert_eq!(Price::parse("9.99").unwrap().to_string(), "9.99");
/// assert!(Price::parse("abc").is_err());
/// assert!(Price::parse("-1").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Parse a price typed by a user.
    ///
    /// Surrounding whitespace is ignored. Anything that is not a plain
    /// decimal number (digits, one optional leading sign, one optional
    /// point) is rejected rather than coerced, so `1_000` and `1e3` fail.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank, not a number, or negative.
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }
        let amount = parse_plain_decimal(trimmed)
            .ok_or_else(|| PriceError::NotANumber(trimmed.to_owned()))?;
        Self::new(amount)
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

/// Two decimal places, half away from zero.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{rounded:.2}")
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

/// `Decimal::from_str` also takes digit separators and exponents; user input
/// may only hold digits, a leading sign and a single point.
fn parse_plain_decimal(input: &str) -> Option<Decimal> {
    let digits = input.strip_prefix(['-', '+']).unwrap_or(input);
    let plain = digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.chars().filter(|&c| c == '.').count() <= 1
        && digits.chars().any(|c| c.is_ascii_digit());
    if !plain {
        return None;
    }
    Decimal::from_str(input).ok()
}

/// A percentage in `0..=100`, used for discounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Percentage(Decimal);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a percentage from a decimal value.
    ///
    /// # Errors
    ///
    /// Returns `PercentageError::OutOfRange` outside `0..=100`.
    pub fn new(value: Decimal) -> Result<Self, PercentageError> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(PercentageError::OutOfRange);
        }
        Ok(Self(value))
    }

    /// Parse an optional percentage typed by a user.
    ///
    /// A blank input means zero. Accepts the same plain decimal syntax as
    /// [`Price::parse`].
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a number or is out of range.
    pub fn parse_optional(input: &str) -> Result<Self, PercentageError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::ZERO);
        }
        let value = parse_plain_decimal(trimmed)
            .ok_or_else(|| PercentageError::NotANumber(trimmed.to_owned()))?;
        Self::new(value)
    }

    /// Returns the decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Percentage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
