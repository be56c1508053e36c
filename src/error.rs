//! Unified error types for the launchpad engine.
//!
//! Every fallible operation in the crate returns [`LaunchpadError`], so a
//! caller always sees a single pass/fail outcome with a typed reason.
//! Port implementations report their own narrower errors
//! ([`CustodyError`](crate::traits::CustodyError),
//! [`AmmPortError`](crate::traits::AmmPortError)) which are folded into
//! this enum at the engine boundary.

use thiserror::Error;

use crate::domain::VaultId;

/// Crate-wide error enum.
///
/// Variants are grouped by the stage at which they surface:
///
/// | Stage | Variants |
/// |-------|----------|
/// | Creation | [`DuplicateConfig`](Self::DuplicateConfig), [`DuplicatePool`](Self::DuplicatePool), [`NotFound`](Self::NotFound), [`InvalidTarget`](Self::InvalidTarget), [`InvalidConfiguration`](Self::InvalidConfiguration) |
/// | Pricing | [`ArithmeticOverflow`](Self::ArithmeticOverflow), [`DivisionByZero`](Self::DivisionByZero), [`InvalidQuantity`](Self::InvalidQuantity), [`InsufficientLiquidity`](Self::InsufficientLiquidity) |
/// | Trading | [`PoolLocked`](Self::PoolLocked), [`SlippageExceeded`](Self::SlippageExceeded), [`InsufficientFunds`](Self::InsufficientFunds), [`CustodyRejected`](Self::CustodyRejected) |
/// | Migration | [`NotLocked`](Self::NotLocked), [`AlreadyMigrated`](Self::AlreadyMigrated), [`MigrationFailed`](Self::MigrationFailed) |
/// | Integrity | [`IntegrityFault`](Self::IntegrityFault), [`RollbackFailed`](Self::RollbackFailed) |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchpadError {
    /// A target config already exists for the `(quote, paired)` pair.
    #[error("target config already exists for this asset pair")]
    DuplicateConfig,

    /// A bonding-curve pool already exists for the `(meme, quote)` pair.
    #[error("pool already exists for this asset pair")]
    DuplicatePool,

    /// A lookup failed; the payload names what was missing.
    #[error("not found: {0}")]
    NotFound(&'static str),

    /// Target amount must be strictly positive.
    #[error("target amount must be greater than zero")]
    InvalidTarget,

    /// A configuration blueprint failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// An intermediate or final value does not fit its fixed-width type.
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(&'static str),

    /// Division by a zero denominator.
    #[error("division by zero")]
    DivisionByZero,

    /// An input amount is unusable (zero, or zero after fees).
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// The curve cannot produce a positive output backed by real reserves.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// Swap attempted on a pool whose curve is locked.
    #[error("pool is locked")]
    PoolLocked,

    /// Realized output is below the caller's floor.
    #[error("slippage exceeded: minimum {min_out}, achievable {actual_out}")]
    SlippageExceeded {
        /// Caller-supplied minimum output.
        min_out: u64,
        /// Output the curve would actually deliver.
        actual_out: u64,
    },

    /// A custody transfer could not be funded.
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// Amount the transfer asked for.
        requested: u64,
        /// Balance available at the source.
        available: u64,
    },

    /// Migration requested before the pool locked.
    #[error("pool is not locked")]
    NotLocked,

    /// Migration requested on a pool that has already migrated.
    #[error("pool has already migrated")]
    AlreadyMigrated,

    /// The external AMM rejected pool creation; the pool is unchanged.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Custody balance diverged from the engine's tracked reserve.
    #[error("integrity fault on vault {vault}: tracked {tracked}, custody reports {actual}")]
    IntegrityFault {
        /// The vault whose balance diverged.
        vault: VaultId,
        /// Balance the pool expects.
        tracked: u64,
        /// Balance custody reports.
        actual: u64,
    },

    /// Custody refused to move funds through a vault.
    #[error("custody rejected transfer on vault {0}")]
    CustodyRejected(VaultId),

    /// A compensating custody leg failed while undoing a partial settlement.
    #[error("rollback failed on vault {0}")]
    RollbackFailed(VaultId),
}

impl LaunchpadError {
    /// Returns `true` if the caller may retry the same operation.
    ///
    /// Slippage failures can be retried after re-quoting; migration
    /// failures leave the pool locked and unmigrated.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::SlippageExceeded { .. } | Self::MigrationFailed(_))
    }

    /// Returns `true` for faults that mean custody and engine state no
    /// longer agree.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::IntegrityFault { .. } | Self::RollbackFailed(_))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, LaunchpadError>;
