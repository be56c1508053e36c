//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use curve_launchpad::prelude::*;
//! ```

pub use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, BasisPoints, ExternalPoolId, FeeRate, PoolId,
    Rounding, SwapDirection, SwapQuote, TargetConfigId, VaultId,
};

pub use crate::traits::{AmmCreationPort, AmmPortError, CustodyError, CustodyPort};

pub use crate::math::{CheckedArithmetic, SpotPrice};

pub use crate::config::{CurveConfig, PoolConfig};

pub use crate::registry::TargetConfig;

pub use crate::pools::{BoundPool, PoolStatus};

pub use crate::engine::{LaunchEvent, Launchpad, MigrationReceipt};

pub use crate::error::{LaunchpadError, Result};
