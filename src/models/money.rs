//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so that every share, balance and
//! settlement is exact. Division is the only lossy operation and always
//! rounds to the nearest cent, half away from zero.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Largest magnitude accepted from user input, in cents
    ///
    /// Keeps sums of several amounts (subtotal plus tax and service) well
    /// inside `i64`.
    pub const MAX_INPUT_CENTS: i64 = 1_000_000_000_000_000;

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use sharetab::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units and cents
    pub const fn from_units_cents(units: i64, cents: i64) -> Self {
        Self(units * 100 + cents)
    }

    /// Create a Money amount from whole units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Create a Money amount from a ratio of cents, rounded to the nearest cent
    ///
    /// Ties round away from zero, matching the usual "round to 2 decimals"
    /// rule applied to monetary results.
    pub fn from_ratio(numerator: i128, denominator: i128) -> Self {
        assert!(denominator != 0, "money ratio with a zero denominator");
        let (numerator, denominator) = if denominator < 0 {
            (-numerator, -denominator)
        } else {
            (numerator, denominator)
        };
        let rounded = if numerator >= 0 {
            (2 * numerator + denominator) / (2 * denominator)
        } else {
            -((-2 * numerator + denominator) / (2 * denominator))
        };
        Self(rounded as i64)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
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
        Self(self.0.abs())
    }

    /// Multiply by a whole quantity, or `None` on overflow
    pub fn times(&self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(quantity as i64).map(Self)
    }

    /// Add two amounts, or `None` on overflow
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// One of `parts` equal shares, rounded to the nearest cent
    ///
    /// The shares are not reconciled: `parts` copies of the result may differ
    /// from `self` by up to half a cent per share.
    ///
    /// # Panics
    ///
    /// Panics if `parts` is zero. Callers validate their consumer and
    /// participant lists before dividing.
    pub fn split_even(&self, parts: usize) -> Self {
        assert!(parts > 0, "cannot split an amount into zero shares");
        Self::from_ratio(self.0 as i128, parts as i128)
    }

    /// `self × part / whole`, rounded to the nearest cent
    ///
    /// # Panics
    ///
    /// Panics if `whole` is zero.
    pub fn prorate(&self, part: Money, whole: Money) -> Self {
        assert!(!whole.is_zero(), "cannot prorate against a zero total");
        Self::from_ratio(self.0 as i128 * part.0 as i128, whole.0 as i128)
    }

    /// Amount as a floating point number of units, for wire formats only
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Nearest cent to a floating point number of units
    ///
    /// Goes through the shortest decimal form of `value` so that `10.999`
    /// read from JSON rounds exactly like the same text given to [`parse`].
    /// Returns `None` for non-finite or out-of-range values.
    ///
    /// [`parse`]: Money::parse
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Self::parse(&value.to_string()).ok()
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "10", "10.5". Digits past
    /// the second decimal round half away from zero ("10.005" is 10.01).
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let (negative, rest) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        // Drop a leading currency symbol such as "$" or "Rp"
        let rest = rest.trim_start_matches(|c: char| !c.is_ascii_digit() && c != '.');
        if rest.is_empty() {
            return Err(invalid());
        }

        let (whole, fraction) = match rest.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (rest, ""),
        };

        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let digits = fraction.as_bytes();
        let digit = |i: usize| digits.get(i).map_or(0, |d| i64::from(d - b'0'));
        let round_up = i64::from(digit(2) >= 5);
        let cents = digit(0) * 10 + digit(1) + round_up;

        let total = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .filter(|total| *total <= Self::MAX_INPUT_CENTS)
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -total } else { total }))
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
        write!(f, "{}", self.format_with_symbol(""))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::from_f64(value).ok_or_else(|| {
            serde::de::Error::custom(format!("money amount {} is out of range", value))
        })
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
