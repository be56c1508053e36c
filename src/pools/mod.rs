//! Bonding-curve pool state.
//!
//! | Type | Role |
//! |------|------|
//! | [`Reserve`] | One tracked asset balance backed by a custody vault |
//! | [`BoundPool`] | The curve's state machine and pure swap pricing |
//! | [`PoolStatus`] | `Open → Locked → Migrated` lifecycle position |

mod bound_pool;
mod reserve;

#[cfg(test)]
mod proptest_properties;

pub use bound_pool::{BoundPool, PoolMigration, PoolStatus};
pub use reserve::Reserve;
