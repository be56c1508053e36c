//! Fundamental domain value types used throughout the launchpad.
//!
//! Amounts, fee rates, asset and account identities, opaque handles, and
//! swap descriptions. All types are newtypes with validated constructors
//! so invariants are enforced at the edges.

mod amount;
mod asset_id;
mod asset_pair;
mod basis_points;
mod fee_rate;
mod handles;
mod rounding;
mod swap_quote;

pub use amount::Amount;
pub use asset_id::{AccountId, AssetId};
pub use asset_pair::AssetPair;
pub use basis_points::BasisPoints;
pub use fee_rate::FeeRate;
pub use handles::{ExternalPoolId, PoolId, TargetConfigId, VaultId};
pub use rounding::Rounding;
pub use swap_quote::{SwapDirection, SwapQuote};
