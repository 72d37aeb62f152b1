use serde::{Deserialize, Serialize};
use std::fmt;

pub const AMOUNT_DECIMALS: u32 = 2;
pub const AMOUNT_BASE_UNIT: u64 = 100; // 10^2

/// Currency amount in base units (hundredths of a unit).
///
/// Stored as an integer so that bid amounts survive serialization without
/// floating-point drift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub fn from_units(units: f64) -> Self {
        Self((units * AMOUNT_BASE_UNIT as f64) as u64)
    }

    pub fn from_base_units(base: u64) -> Self {
        Self(base)
    }

    pub fn to_units(&self) -> f64 {
        self.0 as f64 / AMOUNT_BASE_UNIT as f64
    }

    pub fn to_base_units(&self) -> u64 {
        self.0
    }

    pub fn checked_add(&self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(&self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_add(&self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(&self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.to_units())
    }
}
