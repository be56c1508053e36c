//! Custody port: where the assets a pool tracks actually live.
//!
//! The engine never holds balances itself. Every reserve is backed by a
//! vault owned by a [`CustodyPort`] implementation, and the engine moves
//! value only through the four methods below.
//!
//! # Atomicity
//!
//! Each call is atomic on its own. Multi-leg operations (a swap moves up
//! to three legs) are made all-or-nothing by the engine, which undoes
//! applied legs with their inverses if a later leg fails. Implementations
//! therefore must make `transfer_in` and `transfer_out` exact inverses of
//! each other for the same `(vault, account, amount)`.

use thiserror::Error;

use crate::domain::{AccountId, Amount, AssetId, VaultId};
use crate::error::LaunchpadError;

/// Failure reported by a custody implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustodyError {
    /// The source (account or vault) cannot cover the transfer.
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// Amount the transfer asked for.
        requested: u64,
        /// Balance available at the source.
        available: u64,
    },

    /// The vault handle was never issued by this custody.
    #[error("unknown vault {0}")]
    UnknownVault(VaultId),

    /// The vault is frozen and refuses all transfers.
    #[error("vault {0} is frozen")]
    Frozen(VaultId),

    /// The destination balance would overflow.
    #[error("balance overflow on vault {0}")]
    BalanceOverflow(VaultId),
}

impl From<CustodyError> for LaunchpadError {
    fn from(err: CustodyError) -> Self {
        match err {
            CustodyError::InsufficientFunds {
                requested,
                available,
            } => Self::InsufficientFunds {
                requested,
                available,
            },
            CustodyError::UnknownVault(_) => Self::NotFound("custody vault"),
            CustodyError::Frozen(vault) => Self::CustodyRejected(vault),
            CustodyError::BalanceOverflow(_) => Self::ArithmeticOverflow("custody balance"),
        }
    }
}

/// Asset custody consumed by the launchpad.
///
/// # Contract
///
/// - `create_vault` returns a fresh, empty vault for exactly one asset.
/// - `transfer_in` debits `from` and credits `vault` by `amount`.
/// - `transfer_out` debits `vault` and credits `to` by `amount`.
/// - `balance_of` reports the vault's true balance, which the engine
///   compares against its tracked reserves.
/// - A failed call leaves every balance unchanged.
pub trait CustodyPort {
    /// Opens an empty vault holding `asset`.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn create_vault(&self, asset: AssetId) -> Result<VaultId, CustodyError>;

    /// Moves `amount` from account `from` into `vault`.
    ///
    /// # Errors
    ///
    /// - [`CustodyError::InsufficientFunds`] if `from` cannot cover it.
    /// - [`CustodyError::UnknownVault`] if `vault` does not exist.
    fn transfer_in(&self, vault: VaultId, from: AccountId, amount: Amount)
        -> Result<(), CustodyError>;

    /// Moves `amount` out of `vault` to account `to`.
    ///
    /// # Errors
    ///
    /// - [`CustodyError::InsufficientFunds`] if the vault cannot cover it.
    /// - [`CustodyError::UnknownVault`] if `vault` does not exist.
    fn transfer_out(&self, vault: VaultId, to: AccountId, amount: Amount)
        -> Result<(), CustodyError>;

    /// Returns the vault's current balance.
    ///
    /// # Errors
    ///
    /// Returns [`CustodyError::UnknownVault`] if `vault` does not exist.
    fn balance_of(&self, vault: VaultId) -> Result<Amount, CustodyError>;
}
