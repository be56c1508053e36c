//! # Curve Launchpad
//!
//! Bonding-curve token launch engine: sell a fixed meme supply along a
//! virtual-reserve constant-product curve, lock the curve once enough
//! quote has accumulated, and hand the remaining liquidity to an external
//! constant-product AMM exactly once.
//!
//! The engine is deterministic and synchronous. It never touches assets
//! directly; it asks a [`CustodyPort`](traits::CustodyPort) to move them and
//! an [`AmmCreationPort`](traits::AmmCreationPort) to create the external
//! pool. In-memory implementations of both live in [`adapters`].
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` for domain, config, pool and event types |
//!
//! # Quick Start
//!
//! ```rust
//! use curve_launchpad::adapters::{InMemoryAmm, InMemoryLedger};
//! use curve_launchpad::config::{CurveConfig, PoolConfig};
//! use curve_launchpad::domain::{AccountId, Amount, AssetId};
//! use curve_launchpad::engine::Launchpad;
//! use curve_launchpad::pools::PoolStatus;
//! use curve_launchpad::traits::CustodyPort;
//!
//! const SOL: u64 = 1_000_000_000;
//!
//! let wsol = AssetId::from_bytes([1u8; 32]);
//! let meme = AssetId::from_bytes([2u8; 32]);
//! let creator = AccountId::from_bytes([7u8; 32]);
//! let trader = AccountId::from_bytes([8u8; 32]);
//!
//! // 1. Fund the accounts and open a fee vault.
//! let ledger = InMemoryLedger::new();
//! let curve = CurveConfig::default();
//! ledger.mint(creator, meme, curve.initial_meme_supply()).expect("mint");
//! ledger.mint(trader, wsol, Amount::new(10 * SOL)).expect("mint");
//! let fee_vault = ledger.create_vault(wsol).expect("fee vault");
//!
//! // 2. Register a 2 SOL target and launch the pool.
//! let launchpad = Launchpad::new(ledger.clone(), InMemoryAmm::new());
//! let target = launchpad
//!     .create_target_config(wsol, meme, Amount::new(2 * SOL))
//!     .expect("target");
//! let config = PoolConfig::new(target, meme, wsol, creator, fee_vault, curve).expect("config");
//! let pool = launchpad.create_pool(config).expect("pool");
//!
//! // 3. Buy until the target is crossed.
//! let out = launchpad
//!     .swap_quote_for_meme(pool, trader, Amount::new(3 * SOL), Amount::new(1))
//!     .expect("swap");
//! assert_eq!(ledger.balance(trader, meme), out);
//! assert_eq!(launchpad.pool(pool).expect("pool").status(), PoolStatus::Locked);
//!
//! // 4. Migrate the liquidity.
//! let receipt = launchpad.migrate(pool).expect("migrate");
//! assert!(!receipt.lp_credited.is_zero());
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │     Host      │  owns custody + AMM, drains events
//! └──────┬───────┘
//!        │ &self calls
//!        ▼
//! ┌──────────────┐
//! │   Launchpad   │  registry, pool index, settlement, lifecycle
//! └──────┬───────┘
//!        │ per-pool mutex
//!        ▼
//! ┌──────────────┐
//! │   BoundPool   │  reserves, fees, lock, pure curve pricing
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │  Domain/Math  │  Amount, FeeRate, ConstantProductCurve, …
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`FeeRate`](domain::FeeRate), [`AssetId`](domain::AssetId), handles |
//! | [`math`]   | Checked arithmetic, rounding division, [`ConstantProductCurve`](math::ConstantProductCurve) |
//! | [`config`] | [`CurveConfig`](config::CurveConfig) and [`PoolConfig`](config::PoolConfig) blueprints |
//! | [`registry`] | [`TargetConfigRegistry`](registry::TargetConfigRegistry) |
//! | [`pools`]  | [`BoundPool`](pools::BoundPool) state machine |
//! | [`traits`] | Custody and AMM creation ports |
//! | [`adapters`] | In-memory port implementations |
//! | [`engine`] | [`Launchpad`](engine::Launchpad) facade, settlement, lifecycle, events |
//! | [`error`]  | [`LaunchpadError`](error::LaunchpadError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod adapters;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod registry;
pub mod traits;
