//! Swap direction and the priced outcome of a curve trade.

use core::fmt;

use super::Amount;
use crate::error::LaunchpadError;

/// Which way a trade crosses the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapDirection {
    /// Quote asset in, meme asset out (a buy).
    QuoteForMeme,
    /// Meme asset in, quote asset out (a sell).
    MemeForQuote,
}

impl SwapDirection {
    /// Returns `true` if the trader pays in the quote asset.
    #[must_use]
    pub const fn quote_in(&self) -> bool {
        matches!(self, Self::QuoteForMeme)
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuoteForMeme => write!(f, "buy"),
            Self::MemeForQuote => write!(f, "sell"),
        }
    }
}

/// A fully priced swap: what goes in, what the fee is, what comes out.
///
/// # Invariants
///
/// - `amount_in > 0`, `amount_out > 0`
/// - `net_in + fee == amount_in` exactly
///
/// # Examples
///
/// ```
/// use curve_launchpad::domain::{Amount, SwapDirection, SwapQuote};
///
/// let q = SwapQuote::new(
///     SwapDirection::QuoteForMeme,
///     Amount::new(1_000),
///     Amount::new(10),
///     Amount::new(42_000),
/// );
/// assert!(q.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapQuote {
    direction: SwapDirection,
    amount_in: Amount,
    fee: Amount,
    amount_out: Amount,
}

impl SwapQuote {
    /// Creates a new `SwapQuote` with validated invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidQuantity`] if either amount is zero
    /// or if `fee >= amount_in`.
    pub const fn new(
        direction: SwapDirection,
        amount_in: Amount,
        fee: Amount,
        amount_out: Amount,
    ) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(LaunchpadError::InvalidQuantity("amount_in must be positive"));
        }
        if amount_out.is_zero() {
            return Err(LaunchpadError::InvalidQuantity("amount_out must be positive"));
        }
        if fee.get() >= amount_in.get() {
            return Err(LaunchpadError::InvalidQuantity("fee must be less than amount_in"));
        }
        Ok(Self {
            direction,
            amount_in,
            fee,
            amount_out,
        })
    }

    /// Returns the trade direction.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Returns the gross input paid by the trader.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the admin fee carved out of the input.
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// Returns the input that actually reaches the curve.
    pub const fn net_in(&self) -> Amount {
        // fee < amount_in is a constructor invariant.
        Amount::new(self.amount_in.get() - self.fee.get())
    }

    /// Returns the output delivered to the trader.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }
}

impl fmt::Display for SwapQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapQuote({} in={}, fee={}, out={})",
            self.direction, self.amount_in, self.fee, self.amount_out
        )
    }
}
