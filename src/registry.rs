//! TargetConfig registry.
//!
//! Maps each ordered `(quote, paired)` asset pair to the quote amount that
//! must accumulate in a pool before it locks. Records are immutable once
//! created and never removed.

use std::collections::HashMap;

use crate::domain::{Amount, AssetId, AssetPair, TargetConfigId};
use crate::error::{LaunchpadError, Result};

/// Migration threshold for one asset pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetConfig {
    id: TargetConfigId,
    pair: AssetPair,
    target_amount: Amount,
}

impl TargetConfig {
    /// Returns the registry handle.
    #[must_use]
    pub const fn id(&self) -> TargetConfigId {
        self.id
    }

    /// Returns the asset pair this target applies to.
    #[must_use]
    pub const fn pair(&self) -> AssetPair {
        self.pair
    }

    /// Returns the quote amount at which pools lock.
    #[must_use]
    pub const fn target_amount(&self) -> Amount {
        self.target_amount
    }

    /// Returns `true` if `quote_reserve` meets or exceeds the target.
    #[must_use]
    pub fn is_reached_by(&self, quote_reserve: Amount) -> bool {
        quote_reserve >= self.target_amount
    }
}

/// In-memory index of [`TargetConfig`] records.
///
/// Handles are assigned sequentially starting at 1.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetConfigRegistry {
    by_pair: HashMap<AssetPair, TargetConfigId>,
    configs: HashMap<TargetConfigId, TargetConfig>,
    next_id: u64,
}

impl TargetConfigRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the target for `(quote, paired)`.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::InvalidTarget`] if `target_amount` is zero.
    /// - [`LaunchpadError::InvalidConfiguration`] if the two assets are equal.
    /// - [`LaunchpadError::DuplicateConfig`] if the pair already has a target.
    pub fn create(
        &mut self,
        quote: AssetId,
        paired: AssetId,
        target_amount: Amount,
    ) -> Result<TargetConfig> {
        if target_amount.is_zero() {
            return Err(LaunchpadError::InvalidTarget);
        }
        let pair = AssetPair::new(quote, paired)?;
        if self.by_pair.contains_key(&pair) {
            return Err(LaunchpadError::DuplicateConfig);
        }

        let next = self
            .next_id
            .checked_add(1)
            .ok_or(LaunchpadError::ArithmeticOverflow("target config id space"))?;
        let config = TargetConfig {
            id: TargetConfigId::new(next),
            pair,
            target_amount,
        };
        self.next_id = next;
        self.by_pair.insert(pair, config.id);
        self.configs.insert(config.id, config);
        Ok(config)
    }

    /// Looks up the target for `(quote, paired)`.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::NotFound`] if no target is registered.
    pub fn get(&self, quote: AssetId, paired: AssetId) -> Result<TargetConfig> {
        let pair = AssetPair::new(quote, paired)
            .map_err(|_| LaunchpadError::NotFound("target config"))?;
        self.by_pair
            .get(&pair)
            .and_then(|id| self.configs.get(id))
            .copied()
            .ok_or(LaunchpadError::NotFound("target config"))
    }

    /// Looks up a target by handle.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::NotFound`] if the handle is unknown.
    pub fn get_by_id(&self, id: TargetConfigId) -> Result<TargetConfig> {
        self.configs
            .get(&id)
            .copied()
            .ok_or(LaunchpadError::NotFound("target config"))
    }

    /// Number of registered targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
