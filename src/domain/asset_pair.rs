//! Ordered `(quote, paired)` pair of distinct assets.

use super::AssetId;
use crate::error::LaunchpadError;

/// An ordered pair of distinct assets: the quote asset buyers pay with and
/// the paired (meme) asset sold along the curve.
///
/// Unlike a liquidity-pool pair, the order is semantic, so `(A, B)` and
/// `(B, A)` are different pairs. [`canonical`](Self::canonical) gives the
/// address-sorted view that external constant-product pools expect.
///
/// # Examples
///
/// ```
/// use curve_launchpad::domain::{AssetId, AssetPair};
///
/// let wsol = AssetId::from_bytes([9u8; 32]);
/// let meme = AssetId::from_bytes([1u8; 32]);
/// let pair = AssetPair::new(wsol, meme).expect("distinct assets");
/// assert_eq!(pair.quote(), wsol);
/// assert_eq!(pair.canonical(), (meme, wsol));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetPair {
    quote: AssetId,
    paired: AssetId,
}

impl AssetPair {
    /// Creates a new pair.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidConfiguration`] if both assets are
    /// the same.
    pub fn new(quote: AssetId, paired: AssetId) -> Result<Self, LaunchpadError> {
        if quote == paired {
            return Err(LaunchpadError::InvalidConfiguration(
                "asset pair requires two distinct assets",
            ));
        }
        Ok(Self { quote, paired })
    }

    /// Returns the quote asset.
    #[must_use]
    pub const fn quote(&self) -> AssetId {
        self.quote
    }

    /// Returns the paired (meme) asset.
    #[must_use]
    pub const fn paired(&self) -> AssetId {
        self.paired
    }

    /// Returns the assets sorted by identity, lower first.
    #[must_use]
    pub fn canonical(&self) -> (AssetId, AssetId) {
        if self.quote < self.paired {
            (self.quote, self.paired)
        } else {
            (self.paired, self.quote)
        }
    }
}
