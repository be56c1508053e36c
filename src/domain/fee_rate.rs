//! Protocol fee rate taken from the input side of every curve trade.

use core::fmt;

use super::{Amount, BasisPoints, Rounding};
use crate::error::LaunchpadError;
use crate::math::CheckedArithmetic;

/// The admin fee charged on each swap, in basis points of the input.
///
/// Fees are always rounded **up**, so the trader never pays less than the
/// nominal rate. At 1% this is one unit above a floor fee (`amount / 100`)
/// whenever the input is not a multiple of 100. Below 100 units a floor fee
/// would be zero while this one is a single unit, so a 1-unit input is all
/// fee and is rejected.
///
/// # Examples
///
/// ```
/// use curve_launchpad::domain::{Amount, FeeRate};
///
/// let fee = FeeRate::ONE_PERCENT.fee_on(Amount::new(1_000_000_000)).expect("fits");
/// assert_eq!(fee, Amount::new(10_000_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeRate(BasisPoints);

impl FeeRate {
    /// No fee.
    pub const ZERO: Self = Self(BasisPoints::ZERO);

    /// 1.00% fee (100 bp), the launchpad default.
    pub const ONE_PERCENT: Self = Self(BasisPoints::new(100));

    /// Creates a new `FeeRate` from arbitrary [`BasisPoints`].
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Returns `true` if the rate leaves a non-zero net input (`< 100%`).
    #[must_use]
    pub const fn is_tradable(&self) -> bool {
        self.0.get() < BasisPoints::MAX_PERCENT.get()
    }

    /// Computes the fee owed on `amount_in`, rounded up.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::ArithmeticOverflow`] if the fee does not fit
    /// in an [`Amount`].
    pub fn fee_on(&self, amount_in: Amount) -> crate::error::Result<Amount> {
        self.0.apply(amount_in, Rounding::Up)
    }

    /// Splits `amount_in` into `(net, fee)` with `net + fee == amount_in`.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::ArithmeticOverflow`] if the fee computation overflows.
    /// - [`LaunchpadError::InvalidQuantity`] if nothing is left after the fee.
    pub fn split(&self, amount_in: Amount) -> crate::error::Result<(Amount, Amount)> {
        let fee = self.fee_on(amount_in)?;
        let net = amount_in.safe_sub(&fee, "net input underflow")?;
        if net.is_zero() {
            return Err(LaunchpadError::InvalidQuantity("net input after fee is zero"));
        }
        Ok((net, fee))
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        Self::ONE_PERCENT
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeRate({})", self.0)
    }
}
