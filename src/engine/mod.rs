//! Launch engine.
//!
//! | Item | Role |
//! |------|------|
//! | [`Launchpad`] | Facade over every launch operation |
//! | [`Settlement`] | All-or-nothing multi-leg custody transfer |
//! | [`lifecycle`] | Lock check and migration steps |
//! | [`LaunchEvent`] | Log of committed state changes |

mod events;
mod launchpad;
pub mod lifecycle;
mod settlement;

pub use events::LaunchEvent;
pub use launchpad::Launchpad;
pub use lifecycle::{MigrationPlan, MigrationReceipt};
pub use settlement::{verify_vaults, AppliedSettlement, Leg, Settlement};
