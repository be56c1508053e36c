//! Virtual-reserve constant-product bonding curve.
//!
//! A fresh bonding-curve pool holds the whole meme supply and no quote at
//! all, so a plain `x · y = k` curve would have no price. The curve
//! therefore prices against an *effective* quote reserve
//!
//! ```text
//! X = virtual_quote_reserve + quote_reserve
//! Y = meme_reserve
//! k = X · Y
//! ```
//!
//! where the virtual part is a fixed per-pool constant that never exists
//! in custody. Only real quote can ever be paid out.
//!
//! # Formulas (net-of-fee input)
//!
//! | Direction | Output |
//! |-----------|--------|
//! | Buy (quote in) | `Y − ⌈k / (X + net)⌉` |
//! | Sell (meme in) | `X − ⌈k / (Y + net)⌉` |
//!
//! The post-trade floor is rounded **up**, which makes the output the
//! largest integer that keeps `(X + Δx)(Y − Δy) ≥ k`.
//!
//! All products are formed in `u128` with checked operations; anything
//! that does not fit fails with [`LaunchpadError::ArithmeticOverflow`].

use core::fmt;

use crate::domain::{Amount, Rounding};
use crate::error::{LaunchpadError, Result};
use crate::math::div_round;

/// Pricing rule shared by every bonding-curve pool.
///
/// The curve is stateless: reserves are passed in on every call, so the
/// same value can price any pool snapshot.
///
/// # Examples
///
/// ```
/// use curve_launchpad::domain::Amount;
/// use curve_launchpad::math::ConstantProductCurve;
///
/// let curve = ConstantProductCurve::new(Amount::new(1_000));
/// let out = curve
///     .buy_output(Amount::ZERO, Amount::new(1_000_000), Amount::new(1_000))
///     .expect("priced");
/// assert_eq!(out, Amount::new(500_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantProductCurve {
    virtual_quote_reserve: Amount,
}

impl ConstantProductCurve {
    /// Creates a curve with the given virtual quote reserve.
    #[must_use]
    pub const fn new(virtual_quote_reserve: Amount) -> Self {
        Self {
            virtual_quote_reserve,
        }
    }

    /// Returns the virtual quote reserve.
    #[must_use]
    pub const fn virtual_quote_reserve(&self) -> Amount {
        self.virtual_quote_reserve
    }

    /// Returns `X = virtual + real` widened to `u128`.
    fn effective_quote(&self, quote_reserve: Amount) -> u128 {
        // Two u64 values cannot overflow a u128.
        self.virtual_quote_reserve.wide() + quote_reserve.wide()
    }

    fn invariant(&self, quote_reserve: Amount, meme_reserve: Amount) -> Result<u128> {
        self.effective_quote(quote_reserve)
            .checked_mul(meme_reserve.wide())
            .ok_or(LaunchpadError::ArithmeticOverflow("curve invariant overflow"))
    }

    /// Meme delivered for `net_in` quote, fee already removed.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::InvalidQuantity`] if `net_in` is zero.
    /// - [`LaunchpadError::InsufficientLiquidity`] if the output rounds to zero.
    /// - [`LaunchpadError::ArithmeticOverflow`] if `k` does not fit in `u128`.
    pub fn buy_output(
        &self,
        quote_reserve: Amount,
        meme_reserve: Amount,
        net_in: Amount,
    ) -> Result<Amount> {
        if net_in.is_zero() {
            return Err(LaunchpadError::InvalidQuantity("net input is zero"));
        }
        let k = self.invariant(quote_reserve, meme_reserve)?;
        let x_after = self.effective_quote(quote_reserve) + net_in.wide();
        let y_floor = div_round(k, x_after, Rounding::Up).ok_or(LaunchpadError::DivisionByZero)?;

        let out = meme_reserve
            .wide()
            .checked_sub(y_floor)
            .ok_or(LaunchpadError::ArithmeticOverflow("meme floor above reserve"))?;
        if out == 0 {
            return Err(LaunchpadError::InsufficientLiquidity);
        }
        Amount::from_wide(out).ok_or(LaunchpadError::ArithmeticOverflow("meme output"))
    }

    /// Quote paid out for `net_in` meme, fee already removed.
    ///
    /// Only the real part of the quote reserve is withdrawable.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::InvalidQuantity`] if `net_in` is zero.
    /// - [`LaunchpadError::InsufficientLiquidity`] if the output rounds to
    ///   zero or exceeds `quote_reserve`.
    /// - [`LaunchpadError::ArithmeticOverflow`] if `k` does not fit in `u128`.
    pub fn sell_output(
        &self,
        quote_reserve: Amount,
        meme_reserve: Amount,
        net_in: Amount,
    ) -> Result<Amount> {
        if net_in.is_zero() {
            return Err(LaunchpadError::InvalidQuantity("net input is zero"));
        }
        let k = self.invariant(quote_reserve, meme_reserve)?;
        let y_after = meme_reserve.wide() + net_in.wide();
        let x_floor = div_round(k, y_after, Rounding::Up).ok_or(LaunchpadError::DivisionByZero)?;

        let out = self
            .effective_quote(quote_reserve)
            .checked_sub(x_floor)
            .ok_or(LaunchpadError::ArithmeticOverflow("quote floor above reserve"))?;
        if out == 0 || out > quote_reserve.wide() {
            return Err(LaunchpadError::InsufficientLiquidity);
        }
        Amount::from_wide(out).ok_or(LaunchpadError::ArithmeticOverflow("quote output"))
    }

    /// Marginal price of one meme unit in quote units.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::DivisionByZero`] if the meme reserve is empty.
    pub fn spot_price(&self, quote_reserve: Amount, meme_reserve: Amount) -> Result<SpotPrice> {
        if meme_reserve.is_zero() {
            return Err(LaunchpadError::DivisionByZero);
        }
        Ok(SpotPrice {
            quote: self.effective_quote(quote_reserve),
            meme: meme_reserve.get(),
        })
    }
}

/// Exact rational price: `quote / meme`.
///
/// Kept as a ratio so no precision is lost; [`to_f64`](Self::to_f64) is
/// for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpotPrice {
    quote: u128,
    meme: u64,
}

impl SpotPrice {
    /// Effective quote reserve (numerator).
    #[must_use]
    pub const fn quote(&self) -> u128 {
        self.quote
    }

    /// Meme reserve (denominator, never zero).
    #[must_use]
    pub const fn meme(&self) -> u64 {
        self.meme
    }

    /// Lossy floating-point view.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        self.quote as f64 / self.meme as f64
    }
}

impl fmt::Display for SpotPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.quote, self.meme)
    }
}
