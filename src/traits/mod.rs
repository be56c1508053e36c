//! Port traits the engine consumes.
//!
//! - [`CustodyPort`]: vault creation, transfers, and balance reads.
//! - [`AmmCreationPort`]: one-shot creation of the external pool that
//!   receives migrated liquidity.
//!
//! Both are implemented by the host. In-memory versions live in
//! [`adapters`](crate::adapters).

mod amm;
mod custody;

pub use amm::{AmmCreationPort, AmmPortError};
pub use custody::{CustodyError, CustodyPort};
