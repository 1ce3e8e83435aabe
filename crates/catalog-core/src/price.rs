//! # Price Module
//!
//! Provides the `Price` type for catalog prices.
//!
//! ## Why Integer Prices?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A filter like `minPrice=0.3` would then silently skip an item          │
//! │  priced at "0.1 + 0.2".                                                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (hundredths)                         │
//! │    "42.50" ──parse──► 4250 ──compare/sort──► exact                      │
//! │    4250 ──display──► "42.50"                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::price::Price;
//!
//! let price: Price = "42.5".parse().unwrap();
//! assert_eq!(price.minor_units(), 4250);
//! assert_eq!(price.to_string(), "42.50");
//!
//! // NEVER do this:
//! // let bad = Price::from_f64(42.5); // NO SUCH METHOD EXISTS!
//! ```

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Number of minor units in one major unit.
const MINOR_PER_MAJOR: u64 = 100;

/// Maximum number of fractional digits accepted when parsing.
const MAX_FRACTION_DIGITS: usize = 2;

/// Largest whole number of major units a price can hold.
const MAX_MAJOR_UNITS: u64 = u64::MAX / MINOR_PER_MAJOR;

// =============================================================================
// Price Type
// =============================================================================

/// A non-negative catalog price stored as a count of minor units.
///
/// ## Design Decisions
/// - **u64 (unsigned)**: Prices can never be negative, so the type forbids it
/// - **Single field tuple struct**: Zero-cost abstraction over u64
/// - **Serde as decimal text**: `"1200.00"` survives any JSON parser unchanged.
///   Deserialization also takes a JSON number (`42.5`); its shortest decimal
///   rendering goes through the same text parser, never through float math
///
/// ## Where Price is Used
/// ```text
/// ItemDraft.price ──► Item.price ──┬──► price sort (exact integer compare)
///                                  │
///                                  └──► minPrice / maxPrice bounds (inclusive)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(into = "String")]
pub struct Price(u64);

impl Price {
    /// Creates a price from minor units (hundredths).
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::price::Price;
    ///
    /// let price = Price::from_minor_units(1099);
    /// assert_eq!(price.to_string(), "10.99");
    /// ```
    #[inline]
    pub const fn from_minor_units(units: u64) -> Self {
        Price(units)
    }

    /// Creates a price from a whole number of major units.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::price::Price;
    ///
    /// assert_eq!(Price::from_major(1200).minor_units(), 120_000);
    /// ```
    #[inline]
    pub const fn from_major(major: u64) -> Self {
        Price(major * MINOR_PER_MAJOR)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor_units(&self) -> u64 {
        self.0
    }

    /// Returns the whole major-unit portion.
    #[inline]
    pub const fn major_part(&self) -> u64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor-unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> u64 {
        self.0 % MINOR_PER_MAJOR
    }

    /// Returns a zero price.
    #[inline]
    pub const fn zero() -> Self {
        Price(0)
    }

    /// Parses decimal text into a price, naming `field` in any error.
    ///
    /// ## Accepted Forms
    /// - `"25"`, `"25.5"`, `"25.50"`, `" 25.50 "` (surrounding whitespace trimmed)
    ///
    /// ## Rejected Forms
    /// - `""` → `Required`
    /// - `"-1"` → `Negative`
    /// - `"1.234"`, `"1."`, `".5"`, `"1e3"`, `"abc"` → `InvalidFormat`
    /// - values past `u64::MAX` minor units → `OutOfRange`
    pub fn parse_field(text: &str, field: &str) -> Result<Self, ValidationError> {
        let text = text.trim();

        if text.is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }

        if text.starts_with('-') {
            return Err(ValidationError::Negative {
                field: field.to_string(),
            });
        }

        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
        };

        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (text, None),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("must be a decimal number"));
        }

        let fraction_units = match fraction {
            None => 0,
            Some(digits) => {
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid("must be a decimal number"));
                }
                if digits.len() > MAX_FRACTION_DIGITS {
                    return Err(invalid("must have at most two decimal places"));
                }
                // "5" means 50 hundredths, "05" means 5
                let parsed: u64 = digits
                    .parse()
                    .map_err(|_| invalid("must be a decimal number"))?;
                if digits.len() == 1 {
                    parsed * 10
                } else {
                    parsed
                }
            }
        };

        let out_of_range = || ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_MAJOR_UNITS as i64,
        };

        let whole_units: u64 = whole.parse().map_err(|_| out_of_range())?;
        whole_units
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|units| units.checked_add(fraction_units))
            .map(Price)
            .ok_or_else(out_of_range)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Always renders exactly two fractional digits: `1200.00`, `0.05`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.major_part(), self.minor_part())
    }
}

impl FromStr for Price {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Price::parse_field(s, "price")
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.to_string()
    }
}

/// Accepts `"42.50"` as well as `42.5` / `42`.
impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PriceVisitor)
    }
}

struct PriceVisitor;

impl<'de> Visitor<'de> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative decimal price as a string or number")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Price, E> {
        value.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Price, E> {
        value.to_string().parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Price, E> {
        value.to_string().parse().map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Price, E> {
        if !value.is_finite() {
            return Err(E::custom("price must be a finite number"));
        }
        // `Display` for f64 yields the shortest text that round-trips, so
        // 42.5 becomes "42.5" and 0.1 stays "0.1"
        value.to_string().parse().map_err(E::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
