//! Bonding-curve launch walkthrough.
//!
//! Registers a migration target, launches a meme pool, trades it up to
//! the target, and migrates the liquidity to the in-memory AMM.
//!
//! # Run
//!
//! ```bash
//! cargo run --example launch
//! ```

use curve_launchpad::adapters::{InMemoryAmm, InMemoryLedger};
use curve_launchpad::config::{CurveConfig, PoolConfig};
use curve_launchpad::domain::{AccountId, Amount, AssetId};
use curve_launchpad::engine::{LaunchEvent, Launchpad};
use curve_launchpad::traits::CustodyPort;

const SOL: u64 = 1_000_000_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Bonding-curve launch ===\n");

    // ── 1. Accounts and custody ─────────────────────────────────────────
    let wsol = AssetId::from_bytes([1u8; 32]);
    let meme = AssetId::from_bytes([2u8; 32]);
    let creator = AccountId::from_bytes([0xC0; 32]);
    let alice = AccountId::from_bytes([0xA1; 32]);
    let bob = AccountId::from_bytes([0xB0; 32]);

    let ledger = InMemoryLedger::new();
    let curve = CurveConfig::default();
    ledger.mint(creator, meme, curve.initial_meme_supply())?;
    ledger.mint(alice, wsol, Amount::new(5 * SOL))?;
    ledger.mint(bob, wsol, Amount::new(5 * SOL))?;
    let fee_vault = ledger.create_vault(wsol)?;

    // ── 2. Target and pool ──────────────────────────────────────────────
    let launchpad = Launchpad::new(ledger.clone(), InMemoryAmm::new());
    let target = launchpad.create_target_config(wsol, meme, Amount::new(2 * SOL))?;
    let config = PoolConfig::new(target, meme, wsol, creator, fee_vault, curve)?;
    let pool = launchpad.create_pool(config)?;

    println!("Pool {pool} launched");
    println!("  Meme supply:     {}", curve.initial_meme_supply());
    println!("  Virtual quote:   {}", curve.virtual_quote_reserve());
    println!("  Fee:             {}", curve.fee_rate());
    println!("  Spot price:      {}", launchpad.spot_price(pool)?);

    // ── 3. Alice buys, then sells half back ─────────────────────────────
    let quote = launchpad.quote_swap_amount(pool, Amount::new(SOL))?;
    println!("\nQuote for 1 SOL: {quote}");
    let bought = launchpad.swap_quote_for_meme(pool, alice, Amount::new(SOL), quote.amount_out())?;
    println!("Alice bought {bought} meme");

    let half = Amount::new(bought.get() / 2);
    let got = launchpad.swap_meme_for_quote(pool, alice, half, Amount::ZERO)?;
    println!("Alice sold {half} meme for {got} lamports");
    println!("  Spot price:      {}", launchpad.spot_price(pool)?);

    // ── 4. Bob pushes the pool over its target ──────────────────────────
    let bought = launchpad.swap_quote_for_meme(pool, bob, Amount::new(3 * SOL), Amount::ZERO)?;
    let snapshot = launchpad.pool(pool)?;
    println!("\nBob bought {bought} meme");
    println!("  Quote reserve:   {}", snapshot.quote_reserve().tokens());
    println!("  Status:          {}", snapshot.status());

    match launchpad.swap_quote_for_meme(pool, alice, Amount::new(SOL), Amount::ZERO) {
        Ok(_) => println!("  Unexpected: swap after lock succeeded"),
        Err(err) => println!("  Further buys:    {err}"),
    }

    // ── 5. Migration, with one AMM outage ───────────────────────────────
    launchpad.amm().fail_next("amm paused");
    if let Err(err) = launchpad.migrate(pool) {
        println!("\nFirst migration attempt: {err} (retryable: {})", err.is_retryable());
    }
    let receipt = launchpad.migrate(pool)?;
    println!("Migrated to {}", receipt.external_pool);
    println!("  Meme handed off:  {}", receipt.meme_amount);
    println!("  Quote handed off: {}", receipt.quote_amount);
    println!("  LP to creator:    {}", receipt.lp_credited);
    println!("  Fees kept:        {}", ledger.balance_of(fee_vault)?);
    launchpad.verify_integrity(pool)?;

    // ── 6. Event log ────────────────────────────────────────────────────
    println!("\nEvents:");
    for event in launchpad.drain_events() {
        match event {
            LaunchEvent::Swapped { trader, fill, .. } => println!("  swap  {trader}: {fill}"),
            other => println!("  {other:?}"),
        }
    }

    Ok(())
}
