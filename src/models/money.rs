//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (centimes/cents, i64) to avoid
//! floating-point precision issues. Provides safe arithmetic, percentage
//! helpers and formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored in minor units (hundredths)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest amount accepted from input (one trillion units)
    ///
    /// Totals over every category stay far inside `i64`.
    pub const MAX: Money = Money::from_units(1_000_000_000_000);

    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use lajan::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.units(), 10);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the minor units portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Clamp negative amounts to zero
    pub const fn non_negative(&self) -> Self {
        if self.0 < 0 {
            Self(0)
        } else {
            *self
        }
    }

    /// Subtract, flooring the result at zero
    pub fn saturating_sub_floor(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0).max(0))
    }

    /// Multiply by a factor and round to the nearest whole currency unit
    ///
    /// Non-finite factors yield zero.
    pub fn scale_to_units(&self, factor: f64) -> Self {
        if !factor.is_finite() {
            return Self::zero();
        }
        let units = (self.0 as f64 * factor / 100.0).round();
        Self((units as i64).saturating_mul(100))
    }

    /// Round to the nearest whole currency unit (half away from zero)
    pub fn round_to_units(&self) -> Self {
        self.scale_to_units(1.0)
    }

    /// This amount as a ratio of `whole`, times 100. Zero when `whole` is zero.
    pub fn ratio_percent(&self, whole: Money) -> f64 {
        if whole.is_zero() {
            0.0
        } else {
            self.0 as f64 / whole.0 as f64 * 100.0
        }
    }

    /// The amount as a floating point number of whole units
    pub fn as_units_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "G10.50", "$10.50", "1,500", "10".
    /// Amounts beyond [`Money::MAX`] in either direction are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        // Currency symbol or code, then thousands separators
        let s = s
            .strip_prefix('$')
            .or_else(|| s.strip_prefix('G'))
            .unwrap_or(s)
            .trim();
        let cleaned: String = s.chars().filter(|c| *c != ',').collect();
        let s = cleaned.as_str();

        if s.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let invalid = || MoneyParseError::InvalidFormat(s.to_string());
        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

        let cents = if let Some((units_str, frac_str)) = s.split_once('.') {
            if !is_digits(units_str)
                || !is_digits(frac_str)
                || (units_str.is_empty() && frac_str.is_empty())
            {
                return Err(invalid());
            }

            let units: i64 = if units_str.is_empty() {
                0
            } else {
                units_str.parse().map_err(|_| invalid())?
            };

            // ASCII digits only past this point, so byte slicing is safe
            let frac: i64 = match frac_str.len() {
                0 => 0,
                1 => frac_str.parse::<i64>().map_err(|_| invalid())? * 10,
                _ => frac_str[..2].parse().map_err(|_| invalid())?,
            };

            units
                .checked_mul(100)
                .and_then(|v| v.checked_add(frac))
                .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?
        } else {
            if !is_digits(s) {
                return Err(invalid());
            }
            s.parse::<i64>()
                .ok()
                .and_then(|v| v.checked_mul(100))
                .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?
        };

        if cents > Self::MAX.0 {
            return Err(MoneyParseError::OutOfRange(s.to_string()));
        }

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => {
                write!(f, "Amount {} exceeds the maximum of {}", s, Money::MAX)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}
