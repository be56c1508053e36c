//! Launch events.
//!
//! Every committed state change appends one event to the launchpad's log.
//! Hosts drain the log with
//! [`Launchpad::drain_events`](crate::engine::Launchpad::drain_events) and
//! index it however they like. Failed operations emit nothing.

use crate::domain::{AccountId, Amount, AssetId, PoolId, SwapQuote, TargetConfigId};

use super::MigrationReceipt;

/// A committed state change.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LaunchEvent {
    /// A migration target was registered.
    TargetConfigCreated {
        /// Registry handle.
        config: TargetConfigId,
        /// Quote asset of the pair.
        quote: AssetId,
        /// Paired (meme) asset.
        paired: AssetId,
        /// Quote amount at which pools lock.
        target_amount: Amount,
    },

    /// A bonding-curve pool was created and seeded.
    PoolCreated {
        /// New pool.
        pool: PoolId,
        /// Target it locks against.
        config: TargetConfigId,
        /// Meme asset sold on the curve.
        meme: AssetId,
        /// Quote asset buyers pay with.
        quote: AssetId,
        /// Creator who funded the supply.
        creator: AccountId,
        /// Meme seeded into the curve.
        initial_meme_supply: Amount,
    },

    /// A swap was settled.
    Swapped {
        /// Pool traded against.
        pool: PoolId,
        /// Trader account.
        trader: AccountId,
        /// Direction, input, fee and output.
        fill: SwapQuote,
    },

    /// The pool's quote reserve reached its target; trading is closed.
    Locked {
        /// Pool that locked.
        pool: PoolId,
        /// Quote reserve at the moment of locking.
        quote_reserve: Amount,
        /// Target that was met.
        target_amount: Amount,
    },

    /// Liquidity moved to an external AMM pool.
    Migrated {
        /// Pool that migrated.
        pool: PoolId,
        /// What was handed over.
        receipt: MigrationReceipt,
    },
}

impl LaunchEvent {
    /// Returns the pool the event concerns, if any.
    #[must_use]
    pub const fn pool(&self) -> Option<PoolId> {
        match self {
            Self::TargetConfigCreated { .. } => None,
            Self::PoolCreated { pool, .. }
            | Self::Swapped { pool, .. }
            | Self::Locked { pool, .. }
            | Self::Migrated { pool, .. } => Some(*pool),
        }
    }
}
