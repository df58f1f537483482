//! # Decimal Amounts
//!
//! The backend serializes `DecimalField`s as strings (`"1234.50"`) but
//! computed properties such as `total_value` and `unit_price` as JSON
//! numbers. [`Amount`] accepts both and always encodes as a two-place
//! decimal string, which the backend accepts for every decimal field.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// A monetary amount or percentage carried with two decimal places on the wire.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Amount(f64);

impl Amount {
    /// Zero.
    pub const ZERO: Amount = Amount(0.0);

    /// Wrap a raw value.
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// The raw value.
    pub const fn value(self) -> f64 {
        self.0
    }

    /// `self * pct / 100`, i.e. the share of this amount a percentage denotes.
    pub fn percent(self, pct: Amount) -> Amount {
        Amount(self.0 * pct.0 / 100.0)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawAmount::deserialize(deserializer)? {
            RawAmount::Number(n) => Ok(Amount(n)),
            RawAmount::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Amount)
                .ok_or_else(|| de::Error::custom(format!("invalid decimal amount: {s:?}"))),
        }
    }
}
