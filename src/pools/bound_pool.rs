//! Bonding-curve pool state machine.
//!
//! A [`BoundPool`] sells its meme reserve along a
//! [`ConstantProductCurve`](crate::math::ConstantProductCurve) until its quote reserve reaches the target
//! registered for the pair, then locks and waits for migration.
//!
//! # Swap Algorithm (quote → meme)
//!
//! 1. `fee = ⌈amount_in × fee_bps / 10 000⌉`
//! 2. `net = amount_in − fee`
//! 3. `out = Y − ⌈k / (X + net)⌉`
//! 4. `quote_reserve += net`, `admin_fees_quote += fee`
//! 5. `meme_reserve −= out`
//!
//! The meme → quote direction mirrors this with the fee taken in meme and
//! tracked in `admin_fees_meme`.
//!
//! Everything here is pure state; moving assets in custody is the
//! engine's job.

use core::fmt;

use crate::config::{CurveConfig, PoolConfig};
use crate::domain::{
    AccountId, Amount, ExternalPoolId, PoolId, SwapDirection, SwapQuote, TargetConfigId, VaultId,
};
use crate::error::{LaunchpadError, Result};
use crate::math::{CheckedArithmetic, SpotPrice};

use super::Reserve;

/// Whether a pool's liquidity has left for an external AMM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolMigration {
    /// Liquidity is still on the curve.
    #[default]
    NotMigrated,
    /// Liquidity was handed to an external pool.
    Migrated,
}

/// Lifecycle position of a pool: `Open → Locked → Migrated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolStatus {
    /// Trading on the curve.
    Open,
    /// Target reached; trading closed, awaiting migration.
    Locked,
    /// Liquidity migrated; terminal.
    Migrated,
}

impl fmt::Display for PoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Locked => write!(f, "locked"),
            Self::Migrated => write!(f, "migrated"),
        }
    }
}

/// A bonding-curve pool.
///
/// # State
///
/// - `meme_reserve` / `quote_reserve`: tradable liquidity, fees excluded
/// - `admin_fees_quote` / `admin_fees_meme`: lifetime fee counters, never decrease
/// - `locked`: set once the quote reserve first reaches the target, never cleared
/// - `pool_migration` / `migration_pool_key`: set together, exactly once
///
/// # Example
///
/// ```rust
/// use curve_launchpad::config::{CurveConfig, PoolConfig};
/// use curve_launchpad::domain::{
///     AccountId, Amount, AssetId, PoolId, SwapDirection, TargetConfigId, VaultId,
/// };
/// use curve_launchpad::pools::BoundPool;
///
/// let cfg = PoolConfig::new(
///     TargetConfigId::new(1),
///     AssetId::from_bytes([1u8; 32]),
///     AssetId::from_bytes([2u8; 32]),
///     AccountId::from_bytes([7u8; 32]),
///     VaultId::new(3),
///     CurveConfig::default(),
/// )
/// .expect("valid config");
/// let mut pool = BoundPool::new(PoolId::new(1), &cfg, VaultId::new(1), VaultId::new(2))
///     .expect("pool created");
///
/// let fill = pool
///     .swap(SwapDirection::QuoteForMeme, Amount::new(1_000_000_000), Amount::new(1))
///     .expect("swap ok");
/// assert_eq!(fill.fee(), Amount::new(10_000_000));
/// assert_eq!(pool.quote_reserve().tokens(), Amount::new(990_000_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundPool {
    id: PoolId,
    target_config: TargetConfigId,
    creator: AccountId,
    curve: CurveConfig,
    meme_reserve: Reserve,
    quote_reserve: Reserve,
    fee_vault_quote: VaultId,
    admin_fees_quote: Amount,
    admin_fees_meme: Amount,
    locked: bool,
    pool_migration: PoolMigration,
    migration_pool_key: Option<ExternalPoolId>,
}

impl BoundPool {
    /// Creates a pool holding the full curve supply and no quote.
    ///
    /// # Errors
    ///
    /// Propagates [`PoolConfig::validate`] failures.
    pub fn new(
        id: PoolId,
        config: &PoolConfig,
        meme_vault: VaultId,
        quote_vault: VaultId,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            id,
            target_config: config.target_config(),
            creator: config.creator(),
            curve: *config.curve(),
            meme_reserve: Reserve::new(
                config.meme_asset(),
                meme_vault,
                config.curve().initial_meme_supply(),
            ),
            quote_reserve: Reserve::new(config.quote_asset(), quote_vault, Amount::ZERO),
            fee_vault_quote: config.fee_vault_quote(),
            admin_fees_quote: Amount::ZERO,
            admin_fees_meme: Amount::ZERO,
            locked: false,
            pool_migration: PoolMigration::NotMigrated,
            migration_pool_key: None,
        })
    }

    /// Returns the pool handle.
    #[must_use]
    pub const fn id(&self) -> PoolId {
        self.id
    }

    /// Returns the target config the pool locks against.
    #[must_use]
    pub const fn target_config(&self) -> TargetConfigId {
        self.target_config
    }

    /// Returns the creator account.
    #[must_use]
    pub const fn creator(&self) -> AccountId {
        self.creator
    }

    /// Returns the curve parameters.
    #[must_use]
    pub const fn curve_config(&self) -> &CurveConfig {
        &self.curve
    }

    /// Returns the meme side.
    #[must_use]
    pub const fn meme_reserve(&self) -> &Reserve {
        &self.meme_reserve
    }

    /// Returns the quote side.
    #[must_use]
    pub const fn quote_reserve(&self) -> &Reserve {
        &self.quote_reserve
    }

    /// Returns the vault collecting quote-side fees.
    #[must_use]
    pub const fn fee_vault_quote(&self) -> VaultId {
        self.fee_vault_quote
    }

    /// Returns lifetime quote fees.
    pub const fn admin_fees_quote(&self) -> Amount {
        self.admin_fees_quote
    }

    /// Returns lifetime meme fees (parked in the meme vault).
    pub const fn admin_fees_meme(&self) -> Amount {
        self.admin_fees_meme
    }

    /// Returns `true` once trading has closed.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns the migration flag.
    #[must_use]
    pub const fn pool_migration(&self) -> PoolMigration {
        self.pool_migration
    }

    /// Returns the external pool created at migration, if any.
    #[must_use]
    pub const fn migration_pool_key(&self) -> Option<ExternalPoolId> {
        self.migration_pool_key
    }

    /// Returns the lifecycle position.
    #[must_use]
    pub const fn status(&self) -> PoolStatus {
        match (self.locked, self.pool_migration) {
            (_, PoolMigration::Migrated) => PoolStatus::Migrated,
            (true, PoolMigration::NotMigrated) => PoolStatus::Locked,
            (false, PoolMigration::NotMigrated) => PoolStatus::Open,
        }
    }

    /// Balance the meme vault must hold: reserve plus parked fees.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::ArithmeticOverflow`] if the sum overflows.
    pub fn expected_meme_vault_balance(&self) -> Result<Amount> {
        self.meme_reserve
            .tokens()
            .safe_add(&self.admin_fees_meme, "meme vault expectation")
    }

    /// Marginal price of the meme asset in quote.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::DivisionByZero`] once the meme side is empty.
    pub fn spot_price(&self) -> Result<SpotPrice> {
        self.curve
            .curve()
            .spot_price(self.quote_reserve.tokens(), self.meme_reserve.tokens())
    }

    /// Prices a trade without mutating anything.
    ///
    /// # Errors
    ///
    /// See [`quote_buy`](Self::quote_buy) and [`quote_sell`](Self::quote_sell).
    pub fn quote(&self, direction: SwapDirection, amount_in: Amount) -> Result<SwapQuote> {
        match direction {
            SwapDirection::QuoteForMeme => self.quote_buy(amount_in),
            SwapDirection::MemeForQuote => self.quote_sell(amount_in),
        }
    }

    /// Prices `amount_in` quote for meme.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::PoolLocked`] if trading has closed.
    /// - [`LaunchpadError::InvalidQuantity`] if the input is zero after fees.
    /// - [`LaunchpadError::InsufficientLiquidity`] if the output rounds to zero.
    /// - [`LaunchpadError::ArithmeticOverflow`] on overflow.
    pub fn quote_buy(&self, amount_in: Amount) -> Result<SwapQuote> {
        self.ensure_open()?;
        let (net, fee) = self.curve.fee_rate().split(amount_in)?;
        let out = self.curve.curve().buy_output(
            self.quote_reserve.tokens(),
            self.meme_reserve.tokens(),
            net,
        )?;
        // The reserve must be able to absorb the net input.
        self.quote_reserve
            .tokens()
            .safe_add(&net, "quote reserve overflow")?;
        SwapQuote::new(SwapDirection::QuoteForMeme, amount_in, fee, out)
    }

    /// Prices `amount_in` meme for quote.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::PoolLocked`] if trading has closed.
    /// - [`LaunchpadError::InvalidQuantity`] if the input is zero after fees,
    ///   or if it would push the meme vault above the curve's initial supply.
    /// - [`LaunchpadError::InsufficientLiquidity`] if the output is zero or
    ///   exceeds the real quote reserve.
    /// - [`LaunchpadError::ArithmeticOverflow`] on overflow.
    pub fn quote_sell(&self, amount_in: Amount) -> Result<SwapQuote> {
        self.ensure_open()?;
        let (net, fee) = self.curve.fee_rate().split(amount_in)?;
        let vault_after = self
            .expected_meme_vault_balance()?
            .safe_add(&amount_in, "meme vault overflow")?;
        if vault_after > self.curve.initial_meme_supply() {
            return Err(LaunchpadError::InvalidQuantity(
                "meme inflow exceeds curve supply",
            ));
        }
        let out = self.curve.curve().sell_output(
            self.quote_reserve.tokens(),
            self.meme_reserve.tokens(),
            net,
        )?;
        SwapQuote::new(SwapDirection::MemeForQuote, amount_in, fee, out)
    }

    /// Prices and applies a trade, enforcing the caller's output floor.
    ///
    /// On any error the pool is left untouched.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::SlippageExceeded`] if the output is below `min_out`.
    /// - Any error from [`quote`](Self::quote).
    pub fn swap(
        &mut self,
        direction: SwapDirection,
        amount_in: Amount,
        min_out: Amount,
    ) -> Result<SwapQuote> {
        let fill = self.quote(direction, amount_in)?;
        if fill.amount_out() < min_out {
            return Err(LaunchpadError::SlippageExceeded {
                min_out: min_out.get(),
                actual_out: fill.amount_out().get(),
            });
        }
        self.apply(&fill)?;
        Ok(fill)
    }

    fn apply(&mut self, fill: &SwapQuote) -> Result<()> {
        let (mut meme, mut quote) = (self.meme_reserve, self.quote_reserve);
        let (mut fees_meme, mut fees_quote) = (self.admin_fees_meme, self.admin_fees_quote);

        match fill.direction() {
            SwapDirection::QuoteForMeme => {
                quote.credit(fill.net_in())?;
                meme.debit(fill.amount_out())?;
                fees_quote = fees_quote.safe_add(&fill.fee(), "quote fee overflow")?;
            }
            SwapDirection::MemeForQuote => {
                meme.credit(fill.net_in())?;
                quote.debit(fill.amount_out())?;
                fees_meme = fees_meme.safe_add(&fill.fee(), "meme fee overflow")?;
            }
        }

        self.meme_reserve = meme;
        self.quote_reserve = quote;
        self.admin_fees_meme = fees_meme;
        self.admin_fees_quote = fees_quote;
        Ok(())
    }

    const fn ensure_open(&self) -> Result<()> {
        if self.locked {
            return Err(LaunchpadError::PoolLocked);
        }
        Ok(())
    }

    /// Closes trading. Returns `true` only on the first call.
    pub(crate) fn lock(&mut self) -> bool {
        let newly = !self.locked;
        self.locked = true;
        newly
    }

    /// Moves both reserves out of the curve and records the external pool.
    ///
    /// Returns `(meme, quote)` as they stood before zeroing.
    pub(crate) fn finish_migration(&mut self, key: ExternalPoolId) -> Result<(Amount, Amount)> {
        if !self.locked {
            return Err(LaunchpadError::NotLocked);
        }
        if self.pool_migration == PoolMigration::Migrated {
            return Err(LaunchpadError::AlreadyMigrated);
        }
        let meme = self.meme_reserve.drain();
        let quote = self.quote_reserve.drain();
        self.pool_migration = PoolMigration::Migrated;
        self.migration_pool_key = Some(key);
        Ok((meme, quote))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::AssetId;

    const SOL: u64 = 1_000_000_000;

    fn make_pool() -> BoundPool {
        let Ok(cfg) = PoolConfig::new(
            TargetConfigId::new(1),
            AssetId::from_bytes([1u8; 32]),
            AssetId::from_bytes([2u8; 32]),
            AccountId::from_bytes([7u8; 32]),
            VaultId::new(3),
            CurveConfig::default(),
        ) else {
            panic!("expected valid config");
        };
        let Ok(pool) = BoundPool::new(PoolId::new(1), &cfg, VaultId::new(1), VaultId::new(2))
        else {
            panic!("expected valid pool");
        };
        pool
    }

    // -- construction ---------------------------------------------------------

    #[test]
    fn fresh_pool_is_open() {
        let pool = make_pool();
        assert_eq!(pool.status(), PoolStatus::Open);
        assert_eq!(pool.meme_reserve().tokens(), Amount::new(690_000_000_000_000));
        assert!(pool.quote_reserve().tokens().is_zero());
        assert!(pool.admin_fees_quote().is_zero());
        assert!(pool.admin_fees_meme().is_zero());
        assert_eq!(pool.migration_pool_key(), None);
    }

    // -- buys -----------------------------------------------------------------

    #[test]
    fn buy_splits_input_exactly() {
        let mut pool = make_pool();
        let Ok(fill) = pool.swap(SwapDirection::QuoteForMeme, Amount::new(SOL), Amount::ZERO)
        else {
            panic!("expected Ok");
        };
        assert_eq!(fill.fee(), Amount::new(SOL / 100));
        assert_eq!(
            pool.quote_reserve().tokens().get() + pool.admin_fees_quote().get(),
            SOL
        );
        assert_eq!(
            pool.meme_reserve().tokens().get() + fill.amount_out().get(),
            690_000_000_000_000
        );
    }

    #[test]
    fn quote_matches_swap() {
        let mut pool = make_pool();
        let Ok(q1) = pool.quote_buy(Amount::new(SOL)) else {
            panic!("expected Ok");
        };
        let Ok(q2) = pool.quote_buy(Amount::new(SOL)) else {
            panic!("expected Ok");
        };
        assert_eq!(q1, q2);
        let Ok(fill) = pool.swap(SwapDirection::QuoteForMeme, Amount::new(SOL), Amount::ZERO)
        else {
            panic!("expected Ok");
        };
        assert_eq!(fill, q1);
    }

    #[test]
    fn one_unit_input_is_all_fee() {
        let pool = make_pool();
        assert!(matches!(
            pool.quote_buy(Amount::new(1)),
            Err(LaunchpadError::InvalidQuantity(_))
        ));
        assert!(matches!(
            pool.quote_buy(Amount::ZERO),
            Err(LaunchpadError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn slippage_leaves_pool_untouched() {
        let mut pool = make_pool();
        let before = pool.clone();
        let Ok(q) = pool.quote_buy(Amount::new(SOL)) else {
            panic!("expected Ok");
        };
        let floor = Amount::new(q.amount_out().get() + 1);
        let result = pool.swap(SwapDirection::QuoteForMeme, Amount::new(SOL), floor);
        assert_eq!(
            result,
            Err(LaunchpadError::SlippageExceeded {
                min_out: floor.get(),
                actual_out: q.amount_out().get(),
            })
        );
        assert_eq!(pool, before);
    }

    // -- sells ----------------------------------------------------------------

    #[test]
    fn sell_parks_fee_in_meme() {
        let mut pool = make_pool();
        let Ok(buy) = pool.swap(SwapDirection::QuoteForMeme, Amount::new(SOL), Amount::ZERO)
        else {
            panic!("expected Ok");
        };
        let meme_before = pool.meme_reserve().tokens();
        let Ok(sell) = pool.swap(SwapDirection::MemeForQuote, buy.amount_out(), Amount::ZERO)
        else {
            panic!("expected Ok");
        };
        assert!(!sell.fee().is_zero());
        assert_eq!(pool.admin_fees_meme(), sell.fee());
        assert_eq!(
            pool.meme_reserve().tokens().get() - meme_before.get(),
            sell.net_in().get()
        );
        // Round trip never returns more than was paid in.
        assert!(sell.amount_out().get() < SOL);
    }

    #[test]
    fn sell_on_fresh_pool_exceeds_supply() {
        let pool = make_pool();
        assert!(matches!(
            pool.quote_sell(Amount::new(SOL)),
            Err(LaunchpadError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn sell_above_supply_rejected() {
        let mut pool = make_pool();
        assert!(pool
            .swap(SwapDirection::QuoteForMeme, Amount::new(SOL), Amount::ZERO)
            .is_ok());
        let result = pool.quote_sell(Amount::new(690_000_000_000_000));
        assert!(matches!(result, Err(LaunchpadError::InvalidQuantity(_))));
    }

    // -- lifecycle ------------------------------------------------------------

    #[test]
    fn locked_pool_refuses_trades() {
        let mut pool = make_pool();
        assert!(pool.lock());
        assert!(!pool.lock());
        assert_eq!(pool.status(), PoolStatus::Locked);
        assert_eq!(
            pool.swap(SwapDirection::QuoteForMeme, Amount::new(SOL), Amount::ZERO),
            Err(LaunchpadError::PoolLocked)
        );
        assert_eq!(pool.quote_sell(Amount::new(SOL)), Err(LaunchpadError::PoolLocked));
    }

    #[test]
    fn migration_requires_lock_and_happens_once() {
        let mut pool = make_pool();
        assert_eq!(
            pool.finish_migration(ExternalPoolId::new(5)),
            Err(LaunchpadError::NotLocked)
        );
        assert!(pool
            .swap(SwapDirection::QuoteForMeme, Amount::new(SOL), Amount::ZERO)
            .is_ok());
        let quote = pool.quote_reserve().tokens();
        let meme = pool.meme_reserve().tokens();
        pool.lock();
        assert_eq!(pool.finish_migration(ExternalPoolId::new(5)), Ok((meme, quote)));
        assert_eq!(pool.status(), PoolStatus::Migrated);
        assert_eq!(pool.migration_pool_key(), Some(ExternalPoolId::new(5)));
        assert!(pool.meme_reserve().tokens().is_zero());
        assert!(pool.quote_reserve().tokens().is_zero());
        assert_eq!(
            pool.finish_migration(ExternalPoolId::new(6)),
            Err(LaunchpadError::AlreadyMigrated)
        );
        assert_eq!(pool.migration_pool_key(), Some(ExternalPoolId::new(5)));
    }

    #[test]
    fn spot_price_rises_with_buys() {
        let mut pool = make_pool();
        let Ok(p0) = pool.spot_price() else {
            panic!("expected price");
        };
        assert!(pool
            .swap(SwapDirection::QuoteForMeme, Amount::new(SOL), Amount::ZERO)
            .is_ok());
        let Ok(p1) = pool.spot_price() else {
            panic!("expected price");
        };
        assert!(p1.to_f64() > p0.to_f64());
    }
}
