use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{MAX_AMOUNT_MINOR, MINOR_UNITS_PER_MAJOR};
use crate::core::errors::LedgerError;

/// A fixed-point monetary amount in minor currency units (cents).
///
/// All ledger arithmetic happens on the inner integer, so allocation and
/// aggregation are exact; floating point only appears at the JSON boundary
/// and is validated to two decimal places on the way in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Parse a decimal major-unit value (e.g. `12.34` from a JSON body).
    ///
    /// Rejects non-finite values, values with more than two decimal places,
    /// and magnitudes beyond `MAX_AMOUNT_MINOR`.
    pub fn from_major(value: f64) -> Result<Self, LedgerError> {
        if !value.is_finite() {
            return Err(LedgerError::InvalidAmount(format!(
                "{value} is not a finite number"
            )));
        }
        let scaled = value * MINOR_UNITS_PER_MAJOR as f64;
        let rounded = scaled.round();
        if (scaled - rounded).abs() > 1e-6 {
            return Err(LedgerError::InvalidAmount(format!(
                "{value} has more than two decimal places"
            )));
        }
        let minor = rounded as i64;
        if minor.abs() > MAX_AMOUNT_MINOR {
            return Err(LedgerError::InvalidAmount(format!(
                "{value} exceeds the supported amount range"
            )));
        }
        Ok(Money(minor))
    }

    pub fn to_major(self) -> f64 {
        self.0 as f64 / MINOR_UNITS_PER_MAJOR as f64
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = MINOR_UNITS_PER_MAJOR as u64;
        write!(f, "{sign}{}.{:02}", abs / scale, abs % scale)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_major(value).map_err(serde::de::Error::custom)
    }
}
