//! Tick-denominated integer types for prices and quantities
//!
//! Prices are expressed in minimum price increments (ticks) and quantities
//! in whole lots, both as unsigned 32-bit integers. Integer arithmetic keeps
//! matching deterministic; there is no floating point anywhere in the core.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Price in minimum price increments (ticks)
///
/// Zero is representable: market orders carry an ignored price, and the
/// gateway rejects zero prices for limit orders before they reach the
/// engine. Serialized as a plain integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u32);

impl Price {
    /// Sentinel carried by market orders; never read during matching
    pub const ZERO: Price = Price(0);

    /// Create a Price from a raw tick count
    pub const fn new(ticks: u32) -> Self {
        Self(ticks)
    }

    /// Get the raw tick count
    pub const fn ticks(&self) -> u32 {
        self.0
    }

    /// Check whether the price is the zero sentinel
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Price {
    fn from(ticks: u32) -> Self {
        Self(ticks)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quantity in whole lots
///
/// Serialized as a plain integer. Subtraction asserts against underflow;
/// quantities only ever shrink by fill amounts already bounded by the
/// remaining quantity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    /// Create a Quantity from a raw lot count
    pub const fn new(lots: u32) -> Self {
        Self(lots)
    }

    /// Get the raw lot count
    pub const fn lots(&self) -> u32 {
        self.0
    }

    /// Check if the quantity is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// The smaller of two quantities
    pub fn min(self, other: Quantity) -> Quantity {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

impl From<u32> for Quantity {
    fn from(lots: u32) -> Self {
        Self(lots)
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        assert!(
            self.0 >= rhs.0,
            "Quantity subtraction would result in negative"
        );
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Quantity {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
