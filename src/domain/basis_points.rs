//! Basis-point representation for percentages.

use core::fmt;

use super::{Amount, Rounding};
use crate::error::LaunchpadError;
use crate::math::div_round;

/// Maximum value that represents 100%.
const MAX_BPS: u32 = 10_000;

/// A percentage expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// # Examples
///
/// ```
/// use curve_launchpad::domain::{Amount, BasisPoints, Rounding};
///
/// let bp = BasisPoints::new(100);
/// assert!(bp.is_valid_percent());
/// let fee = bp.apply(Amount::new(1_000_000_000), Rounding::Up).expect("fits");
/// assert_eq!(fee, Amount::new(10_000_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(MAX_BPS);

    /// Creates a new `BasisPoints` from a raw `u32` value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value is in the valid percentage range (`0..=10_000`).
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= MAX_BPS
    }

    /// Computes `amount * self / 10_000` with explicit rounding.
    ///
    /// The product is formed in `u128`, so only the final narrowing can
    /// fail (possible only for rates above 100%).
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::ArithmeticOverflow`] if the result does not
    /// fit in an [`Amount`].
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> crate::error::Result<Amount> {
        let product = amount.wide() * u128::from(self.0);
        let scaled = div_round(product, u128::from(MAX_BPS), rounding)
            .ok_or(LaunchpadError::DivisionByZero)?;
        Amount::from_wide(scaled).ok_or(LaunchpadError::ArithmeticOverflow(
            "basis points apply overflow",
        ))
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
