//! In-memory port implementations.
//!
//! | Adapter | Port |
//! |---------|------|
//! | [`InMemoryLedger`] | [`CustodyPort`](crate::traits::CustodyPort) |
//! | [`InMemoryAmm`] | [`AmmCreationPort`](crate::traits::AmmCreationPort) |
//!
//! Both are cheap to clone and share state across clones, so a host can
//! keep a handle while the launchpad owns another.

mod amm;
mod ledger;

pub use amm::{ExternalPoolRecord, InMemoryAmm};
pub use ledger::InMemoryLedger;
