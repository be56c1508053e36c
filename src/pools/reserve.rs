//! One side of a bonding-curve pool's liquidity.

use crate::domain::{Amount, AssetId, VaultId};
use crate::error::{LaunchpadError, Result};

/// Tracked balance of one asset, backed by a custody vault.
///
/// `tokens` must equal what custody reports for `vault` (net of any fees
/// the pool parks in the same vault); the engine checks this around every
/// mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reserve {
    asset: AssetId,
    vault: VaultId,
    tokens: Amount,
}

impl Reserve {
    /// Creates a reserve holding `tokens` of `asset` in `vault`.
    pub const fn new(asset: AssetId, vault: VaultId, tokens: Amount) -> Self {
        Self {
            asset,
            vault,
            tokens,
        }
    }

    /// Returns the asset held.
    #[must_use]
    pub const fn asset(&self) -> AssetId {
        self.asset
    }

    /// Returns the custody vault handle.
    #[must_use]
    pub const fn vault(&self) -> VaultId {
        self.vault
    }

    /// Returns the tracked balance.
    pub const fn tokens(&self) -> Amount {
        self.tokens
    }

    pub(crate) fn credit(&mut self, amount: Amount) -> Result<()> {
        self.tokens = self
            .tokens
            .checked_add(&amount)
            .ok_or(LaunchpadError::ArithmeticOverflow("reserve overflow"))?;
        Ok(())
    }

    pub(crate) fn debit(&mut self, amount: Amount) -> Result<()> {
        self.tokens = self
            .tokens
            .checked_sub(&amount)
            .ok_or(LaunchpadError::InsufficientLiquidity)?;
        Ok(())
    }

    /// Empties the reserve, returning what it held.
    pub(crate) fn drain(&mut self) -> Amount {
        core::mem::replace(&mut self.tokens, Amount::ZERO)
    }
}
