//! The launchpad facade.
//!
//! [`Launchpad`] owns the target registry and every pool, and drives the
//! custody and AMM ports. All methods take `&self`; a pool is guarded by
//! its own mutex for the whole of an operation, so calls against one pool
//! are serialized while calls against different pools proceed in
//! parallel.
//!
//! Mutating operations work on a copy of the pool and commit it only once
//! custody has settled, so a failed call leaves no trace.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::config::PoolConfig;
use crate::domain::{AccountId, Amount, AssetId, PoolId, SwapDirection, SwapQuote, TargetConfigId};
use crate::error::{LaunchpadError, Result};
use crate::math::SpotPrice;
use crate::pools::BoundPool;
use crate::registry::{TargetConfig, TargetConfigRegistry};
use crate::traits::{AmmCreationPort, CustodyPort};

use super::lifecycle::{self, MigrationPlan, MigrationReceipt};
use super::settlement::{verify_vaults, Settlement};
use super::LaunchEvent;

#[derive(Debug, Default)]
struct PoolIndex {
    pools: HashMap<PoolId, Arc<Mutex<BoundPool>>>,
    by_assets: HashMap<(AssetId, AssetId), PoolId>,
    pending: HashSet<(AssetId, AssetId)>,
    next_id: u64,
}

/// Bonding-curve launch engine.
///
/// Lock order: pool index, then a pool's mutex, then the registry. The
/// event log is only ever locked on its own. The index is never held
/// across a custody or AMM call.
///
/// # Example
///
/// ```rust
/// use curve_launchpad::adapters::{InMemoryAmm, InMemoryLedger};
/// use curve_launchpad::config::{CurveConfig, PoolConfig};
/// use curve_launchpad::domain::{AccountId, Amount, AssetId};
/// use curve_launchpad::engine::Launchpad;
/// use curve_launchpad::traits::CustodyPort;
///
/// let (wsol, meme) = (AssetId::from_bytes([1; 32]), AssetId::from_bytes([2; 32]));
/// let creator = AccountId::from_bytes([7; 32]);
/// let ledger = InMemoryLedger::new();
/// let curve = CurveConfig::default();
/// ledger.mint(creator, meme, curve.initial_meme_supply()).expect("mint");
/// ledger.mint(creator, wsol, Amount::new(5_000_000_000)).expect("mint");
/// let fee_vault = ledger.create_vault(wsol).expect("fee vault");
///
/// let launchpad = Launchpad::new(ledger, InMemoryAmm::new());
/// let target = launchpad
///     .create_target_config(wsol, meme, Amount::new(2_000_000_000))
///     .expect("target");
/// let config = PoolConfig::new(target, meme, wsol, creator, fee_vault, curve).expect("config");
/// let pool = launchpad.create_pool(config).expect("pool");
///
/// let out = launchpad
///     .swap_quote_for_meme(pool, creator, Amount::new(1_000_000_000), Amount::new(1))
///     .expect("swap");
/// assert!(!out.is_zero());
/// ```
#[derive(Debug)]
pub struct Launchpad<C, A> {
    custody: C,
    amm: A,
    registry: RwLock<TargetConfigRegistry>,
    index: RwLock<PoolIndex>,
    events: Mutex<Vec<LaunchEvent>>,
}

impl<C: CustodyPort, A: AmmCreationPort> Launchpad<C, A> {
    /// Creates an empty launchpad over the given ports.
    pub fn new(custody: C, amm: A) -> Self {
        Self {
            custody,
            amm,
            registry: RwLock::new(TargetConfigRegistry::new()),
            index: RwLock::new(PoolIndex::default()),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Returns the custody port.
    pub const fn custody(&self) -> &C {
        &self.custody
    }

    /// Returns the AMM creation port.
    pub const fn amm(&self) -> &A {
        &self.amm
    }

    // -- target configs -------------------------------------------------------

    /// Registers the migration target for `(quote, paired)`.
    ///
    /// # Errors
    ///
    /// See [`TargetConfigRegistry::create`].
    pub fn create_target_config(
        &self,
        quote: AssetId,
        paired: AssetId,
        target_amount: Amount,
    ) -> Result<TargetConfigId> {
        let config = self.registry.write().create(quote, paired, target_amount)?;
        info!(
            config = %config.id(),
            quote = %quote,
            paired = %paired,
            target_amount = target_amount.get(),
            "target config created"
        );
        self.emit(LaunchEvent::TargetConfigCreated {
            config: config.id(),
            quote,
            paired,
            target_amount,
        });
        Ok(config.id())
    }

    /// Looks up the target for `(quote, paired)`.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::NotFound`] if none is registered.
    pub fn target_config(&self, quote: AssetId, paired: AssetId) -> Result<TargetConfig> {
        self.registry.read().get(quote, paired)
    }

    // -- pools ----------------------------------------------------------------

    /// Creates a pool, its two vaults, and seeds the meme vault with the
    /// curve supply taken from the creator.
    ///
    /// The `(meme, quote)` pair is reserved while custody is set up, so a
    /// concurrent creation for the same pair fails fast and trading on
    /// other pools is not held up. A failed creation still consumes its
    /// pool id.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::NotFound`] if the target config does not exist.
    /// - [`LaunchpadError::InvalidConfiguration`] if the target was
    ///   registered for a different asset pair.
    /// - [`LaunchpadError::DuplicatePool`] if the `(meme, quote)` pair
    ///   already has a pool or one is being created.
    /// - Custody errors from vault creation or seeding, after which
    ///   nothing is registered and the pair can be retried. Vaults created
    ///   before the failure are left in custody, empty.
    pub fn create_pool(&self, config: PoolConfig) -> Result<PoolId> {
        config.validate()?;
        let target = self.registry.read().get_by_id(config.target_config())?;
        if target.pair() != config.asset_pair()? {
            return Err(LaunchpadError::InvalidConfiguration(
                "target config is registered for a different asset pair",
            ));
        }

        let key = (config.meme_asset(), config.quote_asset());
        let id = self.reserve(key)?;
        let pool = match self.open_vaults(id, &config) {
            Ok(pool) => pool,
            Err(err) => {
                self.index.write().pending.remove(&key);
                warn!(pool = %id, error = %err, "pool creation failed");
                return Err(err);
            }
        };

        let mut index = self.index.write();
        index.pending.remove(&key);
        index.by_assets.insert(key, id);
        index.pools.insert(id, Arc::new(Mutex::new(pool)));
        drop(index);

        let supply = config.curve().initial_meme_supply();
        info!(
            pool = %id,
            config = %target.id(),
            meme = %config.meme_asset(),
            quote = %config.quote_asset(),
            creator = %config.creator(),
            supply = supply.get(),
            "pool created"
        );
        self.emit(LaunchEvent::PoolCreated {
            pool: id,
            config: target.id(),
            meme: config.meme_asset(),
            quote: config.quote_asset(),
            creator: config.creator(),
            initial_meme_supply: supply,
        });
        Ok(id)
    }

    fn reserve(&self, key: (AssetId, AssetId)) -> Result<PoolId> {
        let mut index = self.index.write();
        if index.by_assets.contains_key(&key) || index.pending.contains(&key) {
            return Err(LaunchpadError::DuplicatePool);
        }
        let next = index
            .next_id
            .checked_add(1)
            .ok_or(LaunchpadError::ArithmeticOverflow("pool id space"))?;
        index.next_id = next;
        index.pending.insert(key);
        Ok(PoolId::new(next))
    }

    fn open_vaults(&self, id: PoolId, config: &PoolConfig) -> Result<BoundPool> {
        let meme_vault = self.custody.create_vault(config.meme_asset())?;
        let quote_vault = self.custody.create_vault(config.quote_asset())?;
        let pool = BoundPool::new(id, config, meme_vault, quote_vault)?;

        let seeded = Settlement::new()
            .transfer_in(meme_vault, config.creator(), config.curve().initial_meme_supply())
            .execute(&self.custody)?;
        if let Err(err) = verify_vaults(&self.custody, &pool) {
            seeded.rollback(&self.custody)?;
            return Err(err);
        }
        Ok(pool)
    }

    /// Returns a snapshot of a pool.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::NotFound`] for an unknown handle.
    pub fn pool(&self, pool_id: PoolId) -> Result<BoundPool> {
        Ok(self.handle(pool_id)?.lock().clone())
    }

    /// Returns a snapshot of the pool trading `meme` against `quote`.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::NotFound`] if no such pool exists.
    pub fn pool_by_assets(&self, meme: AssetId, quote: AssetId) -> Result<BoundPool> {
        let id = self
            .index
            .read()
            .by_assets
            .get(&(meme, quote))
            .copied()
            .ok_or(LaunchpadError::NotFound("pool"))?;
        self.pool(id)
    }

    /// Number of pools created.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.index.read().pools.len()
    }

    /// Marginal meme price of a pool, in quote.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::NotFound`] for an unknown handle.
    /// - [`LaunchpadError::DivisionByZero`] once the meme reserve is empty.
    pub fn spot_price(&self, pool_id: PoolId) -> Result<SpotPrice> {
        self.handle(pool_id)?.lock().spot_price()
    }

    /// Checks custody balances against the pool's tracked reserves.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::IntegrityFault`] on divergence.
    pub fn verify_integrity(&self, pool_id: PoolId) -> Result<()> {
        let handle = self.handle(pool_id)?;
        let pool = handle.lock();
        verify_vaults(&self.custody, &pool)
    }

    // -- trading --------------------------------------------------------------

    /// Prices `amount_in` quote for meme without trading.
    ///
    /// # Errors
    ///
    /// See [`BoundPool::quote_buy`].
    pub fn quote_swap_amount(&self, pool_id: PoolId, amount_in: Amount) -> Result<SwapQuote> {
        self.handle(pool_id)?.lock().quote_buy(amount_in)
    }

    /// Prices `amount_in` meme for quote without trading.
    ///
    /// # Errors
    ///
    /// See [`BoundPool::quote_sell`].
    pub fn quote_sell_amount(&self, pool_id: PoolId, amount_in: Amount) -> Result<SwapQuote> {
        self.handle(pool_id)?.lock().quote_sell(amount_in)
    }

    /// Buys meme with `amount_in` quote from `trader`.
    ///
    /// Returns the meme delivered. Locks the pool if the trade brings the
    /// quote reserve to its target.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::PoolLocked`] once trading has closed.
    /// - [`LaunchpadError::SlippageExceeded`] if fewer than `min_out` would
    ///   be delivered.
    /// - [`LaunchpadError::InsufficientFunds`] if the trader cannot pay.
    /// - [`LaunchpadError::IntegrityFault`] if custody has diverged.
    pub fn swap_quote_for_meme(
        &self,
        pool_id: PoolId,
        trader: AccountId,
        amount_in: Amount,
        min_out: Amount,
    ) -> Result<Amount> {
        self.swap(pool_id, trader, SwapDirection::QuoteForMeme, amount_in, min_out)
            .map(|fill| fill.amount_out())
    }

    /// Sells `amount_in` meme from `trader` for quote.
    ///
    /// # Errors
    ///
    /// As [`swap_quote_for_meme`](Self::swap_quote_for_meme), plus
    /// [`LaunchpadError::InsufficientLiquidity`] when the real quote reserve
    /// cannot cover the output.
    pub fn swap_meme_for_quote(
        &self,
        pool_id: PoolId,
        trader: AccountId,
        amount_in: Amount,
        min_out: Amount,
    ) -> Result<Amount> {
        self.swap(pool_id, trader, SwapDirection::MemeForQuote, amount_in, min_out)
            .map(|fill| fill.amount_out())
    }

    fn swap(
        &self,
        pool_id: PoolId,
        trader: AccountId,
        direction: SwapDirection,
        amount_in: Amount,
        min_out: Amount,
    ) -> Result<SwapQuote> {
        let handle = self.handle(pool_id)?;
        let mut pool = handle.lock();
        let target = self.registry.read().get_by_id(pool.target_config())?;

        let mut next = pool.clone();
        let fill = next.swap(direction, amount_in, min_out)?;
        verify_vaults(&self.custody, &pool)?;

        let settlement = match direction {
            SwapDirection::QuoteForMeme => Settlement::new()
                .transfer_in(pool.quote_reserve().vault(), trader, fill.net_in())
                .transfer_in(pool.fee_vault_quote(), trader, fill.fee())
                .transfer_out(pool.meme_reserve().vault(), trader, fill.amount_out()),
            SwapDirection::MemeForQuote => Settlement::new()
                .transfer_in(pool.meme_reserve().vault(), trader, fill.amount_in())
                .transfer_out(pool.quote_reserve().vault(), trader, fill.amount_out()),
        };
        let applied = settlement.execute(&self.custody)?;
        if let Err(err) = verify_vaults(&self.custody, &next) {
            applied.rollback(&self.custody)?;
            return Err(err);
        }

        let newly_locked = lifecycle::refresh_lock(&mut next, &target);
        *pool = next;

        debug!(
            pool = %pool_id,
            trader = %trader,
            direction = %direction,
            amount_in = fill.amount_in().get(),
            fee = fill.fee().get(),
            amount_out = fill.amount_out().get(),
            "swap settled"
        );
        self.emit(LaunchEvent::Swapped {
            pool: pool_id,
            trader,
            fill,
        });
        if newly_locked {
            info!(
                pool = %pool_id,
                quote_reserve = pool.quote_reserve().tokens().get(),
                target_amount = target.target_amount().get(),
                "pool locked"
            );
            self.emit(LaunchEvent::Locked {
                pool: pool_id,
                quote_reserve: pool.quote_reserve().tokens(),
                target_amount: target.target_amount(),
            });
        }
        Ok(fill)
    }

    // -- migration ------------------------------------------------------------

    /// Moves a locked pool's liquidity to a new external AMM pool.
    ///
    /// Both reserves are paid out of the vaults to the creator, who is
    /// credited the LP shares. Admin fees stay behind.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::NotLocked`] / [`LaunchpadError::AlreadyMigrated`]
    ///   on state-machine violations.
    /// - [`LaunchpadError::MigrationFailed`] if the AMM refuses; custody is
    ///   restored and the call can be retried.
    /// - [`LaunchpadError::IntegrityFault`] if custody has diverged.
    pub fn migrate(&self, pool_id: PoolId) -> Result<MigrationReceipt> {
        let handle = self.handle(pool_id)?;
        let mut pool = handle.lock();
        let plan = MigrationPlan::for_pool(&pool)?;
        verify_vaults(&self.custody, &pool)?;

        let applied = plan.settlement(&pool).execute(&self.custody)?;
        let (asset_a, asset_b, amount_a, amount_b) = plan.amm_order();
        let (external_pool, lp_credited) =
            match self
                .amm
                .create_pool(asset_a, asset_b, amount_a, amount_b, plan.creator())
            {
                Ok(created) => created,
                Err(err) => {
                    warn!(
                        pool = %pool_id,
                        error = %err,
                        "external pool creation failed, restoring vaults"
                    );
                    applied.rollback(&self.custody)?;
                    return Err(err.into());
                }
            };

        let mut next = pool.clone();
        let receipt = match lifecycle::complete(&mut next, &plan, external_pool, lp_credited)
            .and_then(|receipt| verify_vaults(&self.custody, &next).map(|()| receipt))
        {
            Ok(receipt) => receipt,
            Err(err) => {
                error!(
                    pool = %pool_id,
                    external_pool = %external_pool,
                    error = %err,
                    "external pool created but migration could not be recorded"
                );
                return Err(err);
            }
        };
        *pool = next;

        info!(
            pool = %pool_id,
            external_pool = %external_pool,
            meme_amount = receipt.meme_amount.get(),
            quote_amount = receipt.quote_amount.get(),
            lp_credited = receipt.lp_credited.get(),
            "pool migrated"
        );
        self.emit(LaunchEvent::Migrated {
            pool: pool_id,
            receipt,
        });
        Ok(receipt)
    }

    // -- events ---------------------------------------------------------------

    /// Takes every event recorded since the last drain, oldest first.
    pub fn drain_events(&self) -> Vec<LaunchEvent> {
        core::mem::take(&mut *self.events.lock())
    }

    fn emit(&self, event: LaunchEvent) {
        self.events.lock().push(event);
    }

    fn handle(&self, pool_id: PoolId) -> Result<Arc<Mutex<BoundPool>>> {
        self.index
            .read()
            .pools
            .get(&pool_id)
            .cloned()
            .ok_or(LaunchpadError::NotFound("pool"))
    }
}
