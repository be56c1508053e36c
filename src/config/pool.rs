//! Creation-time parameters for a single bonding-curve pool.

use super::CurveConfig;
use crate::domain::{AccountId, AssetId, AssetPair, TargetConfigId, VaultId};
use crate::error::LaunchpadError;

/// Everything needed to launch one bonding-curve pool.
///
/// The fee recipient is supplied here, per pool, rather than being a
/// protocol-wide constant.
///
/// # Validation
///
/// - `meme_asset` and `quote_asset` must differ.
/// - The embedded [`CurveConfig`] must validate.
///
/// # Examples
///
/// ```
/// use curve_launchpad::config::{CurveConfig, PoolConfig};
/// use curve_launchpad::domain::{AccountId, AssetId, TargetConfigId, VaultId};
///
/// let cfg = PoolConfig::new(
///     TargetConfigId::new(1),
///     AssetId::from_bytes([1u8; 32]),
///     AssetId::from_bytes([2u8; 32]),
///     AccountId::from_bytes([7u8; 32]),
///     VaultId::new(99),
///     CurveConfig::default(),
/// );
/// assert!(cfg.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    target_config: TargetConfigId,
    meme_asset: AssetId,
    quote_asset: AssetId,
    creator: AccountId,
    fee_vault_quote: VaultId,
    curve: CurveConfig,
}

impl PoolConfig {
    /// Creates a new `PoolConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidConfiguration`] if validation fails.
    pub fn new(
        target_config: TargetConfigId,
        meme_asset: AssetId,
        quote_asset: AssetId,
        creator: AccountId,
        fee_vault_quote: VaultId,
        curve: CurveConfig,
    ) -> Result<Self, LaunchpadError> {
        let config = Self {
            target_config,
            meme_asset,
            quote_asset,
            creator,
            fee_vault_quote,
            curve,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidConfiguration`] if the assets
    /// coincide or the curve is invalid.
    pub fn validate(&self) -> Result<(), LaunchpadError> {
        if self.meme_asset == self.quote_asset {
            return Err(LaunchpadError::InvalidConfiguration(
                "meme and quote assets must differ",
            ));
        }
        self.curve.validate()
    }

    /// Returns the target config the pool is launched under.
    #[must_use]
    pub const fn target_config(&self) -> TargetConfigId {
        self.target_config
    }

    /// Returns the meme asset.
    #[must_use]
    pub const fn meme_asset(&self) -> AssetId {
        self.meme_asset
    }

    /// Returns the quote asset.
    #[must_use]
    pub const fn quote_asset(&self) -> AssetId {
        self.quote_asset
    }

    /// Returns the `(quote, paired)` pair the registry is keyed by.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidConfiguration`] if the assets coincide.
    pub fn asset_pair(&self) -> Result<AssetPair, LaunchpadError> {
        AssetPair::new(self.quote_asset, self.meme_asset)
    }

    /// Returns the account that funds the meme supply and receives the
    /// migrated liquidity.
    #[must_use]
    pub const fn creator(&self) -> AccountId {
        self.creator
    }

    /// Returns the vault collecting quote-side admin fees.
    #[must_use]
    pub const fn fee_vault_quote(&self) -> VaultId {
        self.fee_vault_quote
    }

    /// Returns the curve parameters.
    #[must_use]
    pub const fn curve(&self) -> &CurveConfig {
        &self.curve
    }
}
