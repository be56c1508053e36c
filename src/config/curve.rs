//! Configuration for the bonding curve every pool is launched on.

use crate::domain::{Amount, FeeRate};
use crate::error::LaunchpadError;
use crate::math::ConstantProductCurve;

/// Default virtual quote reserve: 30 quote units at 9 decimals.
pub const DEFAULT_VIRTUAL_QUOTE_RESERVE: u64 = 30_000_000_000;

/// Default meme supply minted into the curve at pool creation.
pub const DEFAULT_INITIAL_MEME_SUPPLY: u64 = 690_000_000_000_000;

/// Immutable curve parameters.
///
/// # Derived Values
///
/// - Genesis invariant: `k = virtual_quote_reserve × initial_meme_supply`
/// - Genesis price (quote per meme): `virtual_quote_reserve / initial_meme_supply`
///
/// # Validation
///
/// - Virtual reserve and supply must be non-zero.
/// - The fee rate must leave a non-zero net input (`< 100%`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveConfig {
    virtual_quote_reserve: Amount,
    initial_meme_supply: Amount,
    fee_rate: FeeRate,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            virtual_quote_reserve: Amount::new(DEFAULT_VIRTUAL_QUOTE_RESERVE),
            initial_meme_supply: Amount::new(DEFAULT_INITIAL_MEME_SUPPLY),
            fee_rate: FeeRate::ONE_PERCENT,
        }
    }
}

impl CurveConfig {
    /// Creates a new `CurveConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidConfiguration`] if any parameter
    /// fails [`validate`](Self::validate).
    pub fn new(
        virtual_quote_reserve: Amount,
        initial_meme_supply: Amount,
        fee_rate: FeeRate,
    ) -> Result<Self, LaunchpadError> {
        let config = Self {
            virtual_quote_reserve,
            initial_meme_supply,
            fee_rate,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidConfiguration`] naming the first
    /// violated rule.
    pub fn validate(&self) -> Result<(), LaunchpadError> {
        if self.virtual_quote_reserve.is_zero() {
            return Err(LaunchpadError::InvalidConfiguration(
                "virtual quote reserve must be non-zero",
            ));
        }
        if self.initial_meme_supply.is_zero() {
            return Err(LaunchpadError::InvalidConfiguration(
                "initial meme supply must be non-zero",
            ));
        }
        if !self.fee_rate.is_tradable() {
            return Err(LaunchpadError::InvalidConfiguration(
                "fee rate must be below 100%",
            ));
        }
        Ok(())
    }

    /// Returns the virtual quote reserve.
    #[must_use]
    pub const fn virtual_quote_reserve(&self) -> Amount {
        self.virtual_quote_reserve
    }

    /// Returns the meme supply seeded into each new pool.
    #[must_use]
    pub const fn initial_meme_supply(&self) -> Amount {
        self.initial_meme_supply
    }

    /// Returns the admin fee rate.
    #[must_use]
    pub const fn fee_rate(&self) -> FeeRate {
        self.fee_rate
    }

    /// Returns the pricing curve these parameters describe.
    #[must_use]
    pub const fn curve(&self) -> ConstantProductCurve {
        ConstantProductCurve::new(self.virtual_quote_reserve)
    }
}
