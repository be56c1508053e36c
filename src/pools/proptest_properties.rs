//! Property-based tests using `proptest` for bonding-curve invariants.
//!
//! 1. **Buy conservation**: `amount_in == Δquote_reserve + fee` and the
//!    meme leaving the reserve equals the trader's output.
//! 2. **Sell conservation**: `amount_in == Δmeme_reserve + fee`.
//! 3. **Price monotonicity**: equal successive buys never get more meme.
//! 4. **Quote idempotence**: pricing twice gives the same answer.
//! 5. **Round trip**: buy then sell everything returns at most the input.
//! 6. **Lock monotonicity**: once locked a pool stays locked.

#![allow(clippy::panic)]

use proptest::prelude::*;

use crate::config::{CurveConfig, PoolConfig};
use crate::domain::{
    AccountId, Amount, AssetId, FeeRate, PoolId, SwapDirection, TargetConfigId, VaultId,
};
use crate::engine::lifecycle;
use crate::pools::BoundPool;
use crate::registry::TargetConfigRegistry;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const MEME: [u8; 32] = [1u8; 32];
const QUOTE: [u8; 32] = [2u8; 32];

fn make_pool(virtual_quote: u64, supply: u64) -> BoundPool {
    let Ok(curve) = CurveConfig::new(
        Amount::new(virtual_quote),
        Amount::new(supply),
        FeeRate::ONE_PERCENT,
    ) else {
        panic!("valid curve config");
    };
    let Ok(cfg) = PoolConfig::new(
        TargetConfigId::new(1),
        AssetId::from_bytes(MEME),
        AssetId::from_bytes(QUOTE),
        AccountId::from_bytes([7u8; 32]),
        VaultId::new(3),
        curve,
    ) else {
        panic!("valid pool config");
    };
    let Ok(pool) = BoundPool::new(PoolId::new(1), &cfg, VaultId::new(1), VaultId::new(2)) else {
        panic!("valid pool");
    };
    pool
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Virtual quote reserve in [1, 100] quote units at 9 decimals.
fn virtual_strategy() -> impl Strategy<Value = u64> {
    1_000_000_000u64..=100_000_000_000u64
}

/// Curve supply spanning small test mints up to the default launch supply.
fn supply_strategy() -> impl Strategy<Value = u64> {
    1_000_000_000u64..=690_000_000_000_000u64
}

/// Buy sizes from 100 lamport-scale units up to 10 quote units.
fn buy_strategy() -> impl Strategy<Value = u64> {
    100u64..=10_000_000_000u64
}

// ---------------------------------------------------------------------------
// Property 1 & 2: Conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_buy_conservation(
        v in virtual_strategy(),
        s in supply_strategy(),
        amount in buy_strategy(),
    ) {
        let mut pool = make_pool(v, s);
        let Ok(fill) = pool.swap(SwapDirection::QuoteForMeme, Amount::new(amount), Amount::ZERO)
        else {
            return Ok(());
        };
        prop_assert_eq!(
            pool.quote_reserve().tokens().get() + pool.admin_fees_quote().get(),
            amount
        );
        prop_assert_eq!(fill.net_in().get() + fill.fee().get(), amount);
        prop_assert_eq!(pool.meme_reserve().tokens().get() + fill.amount_out().get(), s);
    }

    #[test]
    fn prop_sell_conservation(
        v in virtual_strategy(),
        s in supply_strategy(),
        amount in buy_strategy(),
        fraction in 1u64..=100u64,
    ) {
        let mut pool = make_pool(v, s);
        let Ok(buy) = pool.swap(SwapDirection::QuoteForMeme, Amount::new(amount), Amount::ZERO)
        else {
            return Ok(());
        };
        let sell_in = (buy.amount_out().get() / 100 * fraction).max(1);
        let meme_before = pool.meme_reserve().tokens().get();
        let quote_before = pool.quote_reserve().tokens().get();
        let Ok(sell) = pool.swap(SwapDirection::MemeForQuote, Amount::new(sell_in), Amount::ZERO)
        else {
            return Ok(());
        };
        prop_assert_eq!(
            pool.meme_reserve().tokens().get() - meme_before + sell.fee().get(),
            sell_in
        );
        prop_assert_eq!(pool.admin_fees_meme(), sell.fee());
        prop_assert_eq!(
            quote_before - pool.quote_reserve().tokens().get(),
            sell.amount_out().get()
        );
        // Meme only ever comes back from what the curve sold.
        let vault = pool.meme_reserve().tokens().get() + pool.admin_fees_meme().get();
        prop_assert!(vault <= s);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Price monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_successive_buys_get_less(
        v in virtual_strategy(),
        s in supply_strategy(),
        amount in buy_strategy(),
    ) {
        let mut pool = make_pool(v, s);
        let mut last = u64::MAX;
        for _ in 0..5 {
            let Ok(fill) =
                pool.swap(SwapDirection::QuoteForMeme, Amount::new(amount), Amount::ZERO)
            else {
                return Ok(());
            };
            prop_assert!(
                fill.amount_out().get() <= last,
                "buy got more meme than the previous one: {} > {}",
                fill.amount_out().get(), last
            );
            last = fill.amount_out().get();
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Quote idempotence
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quote_is_idempotent(
        v in virtual_strategy(),
        s in supply_strategy(),
        amount in buy_strategy(),
    ) {
        let pool = make_pool(v, s);
        let snapshot = pool.clone();
        let first = pool.quote_buy(Amount::new(amount));
        let second = pool.quote_buy(Amount::new(amount));
        prop_assert_eq!(first, second);
        prop_assert_eq!(pool, snapshot);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Round trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_loses_value(
        v in virtual_strategy(),
        s in supply_strategy(),
        amount in buy_strategy(),
    ) {
        let mut pool = make_pool(v, s);
        let Ok(buy) = pool.swap(SwapDirection::QuoteForMeme, Amount::new(amount), Amount::ZERO)
        else {
            return Ok(());
        };
        let Ok(sell) = pool.swap(SwapDirection::MemeForQuote, buy.amount_out(), Amount::ZERO)
        else {
            return Ok(());
        };
        prop_assert!(
            sell.amount_out().get() < amount,
            "round trip should lose value: final={} >= original={}",
            sell.amount_out().get(), amount
        );
    }
}

// ---------------------------------------------------------------------------
// Property 6: Lock monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_lock_is_monotone(
        target in 1_000_000_000u64..=5_000_000_000u64,
        buys in proptest::collection::vec(buy_strategy(), 1..12),
    ) {
        let mut registry = TargetConfigRegistry::new();
        let Ok(tc) = registry.create(
            AssetId::from_bytes(QUOTE),
            AssetId::from_bytes(MEME),
            Amount::new(target),
        ) else {
            panic!("valid target");
        };
        let mut pool = make_pool(30_000_000_000, 690_000_000_000_000);
        let mut was_locked = false;
        for amount in buys {
            if pool
                .swap(SwapDirection::QuoteForMeme, Amount::new(amount), Amount::ZERO)
                .is_ok()
            {
                lifecycle::refresh_lock(&mut pool, &tc);
            }
            if was_locked {
                prop_assert!(pool.is_locked());
            }
            prop_assert_eq!(
                pool.is_locked(),
                pool.quote_reserve().tokens() >= tc.target_amount()
            );
            was_locked = pool.is_locked();
        }
    }
}
