//! Lock and migration controller.
//!
//! ```text
//! Open ──(quote_reserve ≥ target)──▶ Locked ──migrate()──▶ Migrated
//! ```
//!
//! The lock check runs after every committed swap. Migration is split in
//! three steps so the engine can interleave custody and the external AMM:
//! [`MigrationPlan::for_pool`] validates and sizes the handoff,
//! [`MigrationPlan::settlement`] moves the liquidity to the creator, and
//! [`complete`] records the external pool once the AMM accepted it.

use crate::domain::{AccountId, Amount, AssetId, AssetPair, ExternalPoolId};
use crate::error::{LaunchpadError, Result};
use crate::pools::{BoundPool, PoolMigration};
use crate::registry::TargetConfig;

use super::Settlement;

/// Locks `pool` if its quote reserve has reached `target`.
///
/// Returns `true` only when this call performed the transition; calling
/// it on an already-locked pool is a no-op.
pub fn refresh_lock(pool: &mut BoundPool, target: &TargetConfig) -> bool {
    if pool.is_locked() || !target.is_reached_by(pool.quote_reserve().tokens()) {
        return false;
    }
    pool.lock()
}

/// Outcome of a successful migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MigrationReceipt {
    /// Pool created on the external AMM.
    pub external_pool: ExternalPoolId,
    /// Meme liquidity handed over.
    pub meme_amount: Amount,
    /// Quote liquidity handed over.
    pub quote_amount: Amount,
    /// LP shares credited to the creator.
    pub lp_credited: Amount,
}

/// Validated, sized migration of one pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationPlan {
    pair: AssetPair,
    meme_amount: Amount,
    quote_amount: Amount,
    creator: AccountId,
}

impl MigrationPlan {
    /// Sizes the handoff from the pool's current reserves.
    ///
    /// Admin fees are not part of the reserves and stay behind.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::NotLocked`] if the pool is still open.
    /// - [`LaunchpadError::AlreadyMigrated`] if it has migrated before.
    /// - [`LaunchpadError::InvalidConfiguration`] if both reserves hold the
    ///   same asset.
    pub fn for_pool(pool: &BoundPool) -> Result<Self> {
        if !pool.is_locked() {
            return Err(LaunchpadError::NotLocked);
        }
        if pool.pool_migration() == PoolMigration::Migrated {
            return Err(LaunchpadError::AlreadyMigrated);
        }
        Ok(Self {
            pair: AssetPair::new(pool.quote_reserve().asset(), pool.meme_reserve().asset())?,
            meme_amount: pool.meme_reserve().tokens(),
            quote_amount: pool.quote_reserve().tokens(),
            creator: pool.creator(),
        })
    }

    /// Returns the meme amount to migrate.
    pub const fn meme_amount(&self) -> Amount {
        self.meme_amount
    }

    /// Returns the quote amount to migrate.
    pub const fn quote_amount(&self) -> Amount {
        self.quote_amount
    }

    /// Returns the account that receives the liquidity and the LP shares.
    #[must_use]
    pub const fn creator(&self) -> AccountId {
        self.creator
    }

    /// Custody legs moving both reserves from the pool's vaults to the
    /// creator.
    #[must_use]
    pub fn settlement(&self, pool: &BoundPool) -> Settlement {
        Settlement::new()
            .transfer_out(pool.meme_reserve().vault(), self.creator, self.meme_amount)
            .transfer_out(pool.quote_reserve().vault(), self.creator, self.quote_amount)
    }

    /// Assets and amounts in the order the external AMM expects: lower
    /// asset identity first.
    #[must_use]
    pub fn amm_order(&self) -> (AssetId, AssetId, Amount, Amount) {
        let (first, second) = self.pair.canonical();
        if first == self.pair.paired() {
            (first, second, self.meme_amount, self.quote_amount)
        } else {
            (first, second, self.quote_amount, self.meme_amount)
        }
    }
}

/// Marks `pool` migrated to `external_pool`, zeroing its reserves.
///
/// # Errors
///
/// - [`LaunchpadError::NotLocked`] / [`LaunchpadError::AlreadyMigrated`]
///   if the pool changed state since the plan was made.
/// - [`LaunchpadError::IntegrityFault`] if the reserves no longer match
///   the plan.
pub fn complete(
    pool: &mut BoundPool,
    plan: &MigrationPlan,
    external_pool: ExternalPoolId,
    lp_credited: Amount,
) -> Result<MigrationReceipt> {
    let (meme, quote) = pool.finish_migration(external_pool)?;
    if meme != plan.meme_amount {
        return Err(LaunchpadError::IntegrityFault {
            vault: pool.meme_reserve().vault(),
            tracked: plan.meme_amount.get(),
            actual: meme.get(),
        });
    }
    if quote != plan.quote_amount {
        return Err(LaunchpadError::IntegrityFault {
            vault: pool.quote_reserve().vault(),
            tracked: plan.quote_amount.get(),
            actual: quote.get(),
        });
    }
    Ok(MigrationReceipt {
        external_pool,
        meme_amount: meme,
        quote_amount: quote,
        lp_credited,
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::{CurveConfig, PoolConfig};
    use crate::domain::{PoolId, SwapDirection, TargetConfigId, VaultId};
    use crate::engine::Leg;
    use crate::pools::PoolStatus;
    use crate::registry::TargetConfigRegistry;

    const SOL: u64 = 1_000_000_000;

    fn meme() -> AssetId {
        AssetId::from_bytes([5u8; 32])
    }

    fn wsol() -> AssetId {
        AssetId::from_bytes([1u8; 32])
    }

    fn target(amount: u64) -> TargetConfig {
        let mut reg = TargetConfigRegistry::new();
        let Ok(tc) = reg.create(wsol(), meme(), Amount::new(amount)) else {
            panic!("expected target");
        };
        tc
    }

    fn make_pool() -> BoundPool {
        let Ok(cfg) = PoolConfig::new(
            TargetConfigId::new(1),
            meme(),
            wsol(),
            AccountId::from_bytes([7u8; 32]),
            VaultId::new(3),
            CurveConfig::default(),
        ) else {
            panic!("expected config");
        };
        let Ok(pool) = BoundPool::new(PoolId::new(1), &cfg, VaultId::new(1), VaultId::new(2))
        else {
            panic!("expected pool");
        };
        pool
    }

    fn buy(pool: &mut BoundPool, amount: u64) {
        assert!(pool
            .swap(SwapDirection::QuoteForMeme, Amount::new(amount), Amount::ZERO)
            .is_ok());
    }

    #[test]
    fn lock_triggers_at_target() {
        let tc = target(2 * SOL);
        let mut pool = make_pool();
        buy(&mut pool, SOL);
        assert!(!refresh_lock(&mut pool, &tc));
        assert_eq!(pool.status(), PoolStatus::Open);
        buy(&mut pool, 2 * SOL);
        assert!(refresh_lock(&mut pool, &tc));
        assert_eq!(pool.status(), PoolStatus::Locked);
        assert!(!refresh_lock(&mut pool, &tc));
    }

    #[test]
    fn exact_target_locks() {
        let mut pool = make_pool();
        buy(&mut pool, SOL);
        let tc = target(pool.quote_reserve().tokens().get());
        assert!(refresh_lock(&mut pool, &tc));
    }

    #[test]
    fn plan_requires_lock() {
        let pool = make_pool();
        assert_eq!(MigrationPlan::for_pool(&pool), Err(LaunchpadError::NotLocked));
    }

    #[test]
    fn plan_moves_reserves_to_creator() {
        let mut pool = make_pool();
        buy(&mut pool, 3 * SOL);
        pool.lock();
        let Ok(plan) = MigrationPlan::for_pool(&pool) else {
            panic!("expected plan");
        };
        assert_eq!(plan.quote_amount(), pool.quote_reserve().tokens());
        assert_eq!(plan.meme_amount(), pool.meme_reserve().tokens());
        let legs = plan.settlement(&pool);
        assert_eq!(legs.legs().len(), 2);
        assert!(matches!(
            legs.legs()[0],
            Leg::Out { vault, to, .. } if vault == VaultId::new(1) && to == plan.creator()
        ));
    }

    #[test]
    fn amm_order_is_canonical() {
        let mut pool = make_pool();
        buy(&mut pool, SOL);
        pool.lock();
        let Ok(plan) = MigrationPlan::for_pool(&pool) else {
            panic!("expected plan");
        };
        // wsol ([1; 32]) sorts before meme ([5; 32]).
        let (a, b, amount_a, amount_b) = plan.amm_order();
        assert_eq!((a, b), (wsol(), meme()));
        assert_eq!(amount_a, plan.quote_amount());
        assert_eq!(amount_b, plan.meme_amount());
    }

    #[test]
    fn complete_zeroes_and_records() {
        let mut pool = make_pool();
        buy(&mut pool, SOL);
        pool.lock();
        let Ok(plan) = MigrationPlan::for_pool(&pool) else {
            panic!("expected plan");
        };
        let Ok(receipt) = complete(&mut pool, &plan, ExternalPoolId::new(8), Amount::new(77))
        else {
            panic!("expected receipt");
        };
        assert_eq!(receipt.external_pool, ExternalPoolId::new(8));
        assert_eq!(receipt.quote_amount, plan.quote_amount());
        assert_eq!(pool.status(), PoolStatus::Migrated);
        assert_eq!(
            MigrationPlan::for_pool(&pool),
            Err(LaunchpadError::AlreadyMigrated)
        );
    }
}
