//! External AMM creation port used by migration.

use thiserror::Error;

use crate::domain::{AccountId, Amount, AssetId, ExternalPoolId};
use crate::error::LaunchpadError;

/// Failure reported by the external AMM.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmPortError {
    /// A pool for the pair already exists on the external AMM.
    #[error("external pool already exists for this pair")]
    PoolExists,

    /// The AMM refused the seed amounts.
    #[error("seed amounts rejected: {0}")]
    InvalidSeed(&'static str),

    /// Any other failure, e.g. the AMM being unreachable.
    #[error("{0}")]
    Unavailable(String),
}

impl From<AmmPortError> for LaunchpadError {
    fn from(err: AmmPortError) -> Self {
        Self::MigrationFailed(err.to_string())
    }
}

/// Creates and seeds a constant-product pool on an external AMM.
///
/// The call is atomic from the launchpad's point of view: on `Err`
/// nothing was created and no LP was credited.
pub trait AmmCreationPort {
    /// Creates a pool for `(asset_a, asset_b)` seeded with the given
    /// amounts and credits the LP shares to `beneficiary`.
    ///
    /// Returns the new pool's identity and the LP amount credited.
    ///
    /// # Errors
    ///
    /// Any [`AmmPortError`]; the launchpad surfaces it as
    /// [`LaunchpadError::MigrationFailed`].
    fn create_pool(
        &self,
        asset_a: AssetId,
        asset_b: AssetId,
        amount_a: Amount,
        amount_b: Amount,
        beneficiary: AccountId,
    ) -> Result<(ExternalPoolId, Amount), AmmPortError>;
}
