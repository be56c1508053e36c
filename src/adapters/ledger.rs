//! In-memory custody ledger.
//!
//! Keeps account balances per `(account, asset)` and vault balances per
//! vault handle behind a single `parking_lot` lock, so every port call is
//! atomic. Cloning the ledger shares the same state, which lets a host
//! hand one clone to the [`Launchpad`](crate::engine::Launchpad) and keep
//! another for funding accounts and inspecting balances.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::{AccountId, Amount, AssetId, VaultId};
use crate::error::LaunchpadError;
use crate::traits::{CustodyError, CustodyPort};

#[derive(Debug, Clone, Copy)]
struct Vault {
    asset: AssetId,
    balance: Amount,
}

#[derive(Debug, Default)]
struct LedgerState {
    accounts: HashMap<(AccountId, AssetId), Amount>,
    vaults: HashMap<VaultId, Vault>,
    frozen: HashSet<VaultId>,
    next_vault: u64,
}

impl LedgerState {
    fn vault(&self, id: VaultId) -> Result<Vault, CustodyError> {
        let vault = self
            .vaults
            .get(&id)
            .copied()
            .ok_or(CustodyError::UnknownVault(id))?;
        if self.frozen.contains(&id) {
            return Err(CustodyError::Frozen(id));
        }
        Ok(vault)
    }

    fn account(&self, account: AccountId, asset: AssetId) -> Amount {
        self.accounts
            .get(&(account, asset))
            .copied()
            .unwrap_or(Amount::ZERO)
    }
}

/// Thread-safe in-memory [`CustodyPort`].
///
/// # Example
///
/// ```rust
/// use curve_launchpad::adapters::InMemoryLedger;
/// use curve_launchpad::domain::{AccountId, Amount, AssetId};
/// use curve_launchpad::traits::CustodyPort;
///
/// let ledger = InMemoryLedger::new();
/// let wsol = AssetId::from_bytes([9u8; 32]);
/// let alice = AccountId::from_bytes([1u8; 32]);
/// ledger.mint(alice, wsol, Amount::new(100)).expect("minted");
///
/// let vault = ledger.create_vault(wsol).expect("vault");
/// ledger.transfer_in(vault, alice, Amount::new(40)).expect("funded");
/// assert_eq!(ledger.balance_of(vault), Ok(Amount::new(40)));
/// assert_eq!(ledger.balance(alice, wsol), Amount::new(60));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    state: Arc<RwLock<LedgerState>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of `asset` to `account` out of thin air.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::ArithmeticOverflow`] if the balance would
    /// overflow.
    pub fn mint(
        &self,
        account: AccountId,
        asset: AssetId,
        amount: Amount,
    ) -> crate::error::Result<()> {
        let mut state = self.state.write();
        let next = state
            .account(account, asset)
            .checked_add(&amount)
            .ok_or(LaunchpadError::ArithmeticOverflow("account balance"))?;
        state.accounts.insert((account, asset), next);
        Ok(())
    }

    /// Returns `account`'s balance of `asset`.
    pub fn balance(&self, account: AccountId, asset: AssetId) -> Amount {
        self.state.read().account(account, asset)
    }

    /// Returns the asset a vault holds, if the vault exists.
    #[must_use]
    pub fn vault_asset(&self, vault: VaultId) -> Option<AssetId> {
        self.state.read().vaults.get(&vault).map(|v| v.asset)
    }

    /// Makes every transfer touching `vault` fail with
    /// [`CustodyError::Frozen`]. Balance reads still succeed.
    pub fn freeze(&self, vault: VaultId) {
        self.state.write().frozen.insert(vault);
    }

    /// Lifts a [`freeze`](Self::freeze).
    pub fn thaw(&self, vault: VaultId) {
        self.state.write().frozen.remove(&vault);
    }
}

impl CustodyPort for InMemoryLedger {
    fn create_vault(&self, asset: AssetId) -> Result<VaultId, CustodyError> {
        let mut state = self.state.write();
        state.next_vault += 1;
        let id = VaultId::new(state.next_vault);
        state.vaults.insert(
            id,
            Vault {
                asset,
                balance: Amount::ZERO,
            },
        );
        Ok(id)
    }

    fn transfer_in(
        &self,
        vault: VaultId,
        from: AccountId,
        amount: Amount,
    ) -> Result<(), CustodyError> {
        let mut state = self.state.write();
        let target = state.vault(vault)?;
        let available = state.account(from, target.asset);
        let remaining = available
            .checked_sub(&amount)
            .ok_or(CustodyError::InsufficientFunds {
                requested: amount.get(),
                available: available.get(),
            })?;
        let credited = target
            .balance
            .checked_add(&amount)
            .ok_or(CustodyError::BalanceOverflow(vault))?;

        state.accounts.insert((from, target.asset), remaining);
        state.vaults.insert(
            vault,
            Vault {
                balance: credited,
                ..target
            },
        );
        Ok(())
    }

    fn transfer_out(
        &self,
        vault: VaultId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), CustodyError> {
        let mut state = self.state.write();
        let source = state.vault(vault)?;
        let remaining = source
            .balance
            .checked_sub(&amount)
            .ok_or(CustodyError::InsufficientFunds {
                requested: amount.get(),
                available: source.balance.get(),
            })?;
        let credited = state
            .account(to, source.asset)
            .checked_add(&amount)
            .ok_or(CustodyError::BalanceOverflow(vault))?;

        state.vaults.insert(
            vault,
            Vault {
                balance: remaining,
                ..source
            },
        );
        state.accounts.insert((to, source.asset), credited);
        Ok(())
    }

    fn balance_of(&self, vault: VaultId) -> Result<Amount, CustodyError> {
        self.state
            .read()
            .vaults
            .get(&vault)
            .map(|v| v.balance)
            .ok_or(CustodyError::UnknownVault(vault))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn wsol() -> AssetId {
        AssetId::from_bytes([9u8; 32])
    }

    fn alice() -> AccountId {
        AccountId::from_bytes([1u8; 32])
    }

    fn funded() -> (InMemoryLedger, VaultId) {
        let ledger = InMemoryLedger::new();
        assert!(ledger.mint(alice(), wsol(), Amount::new(100)).is_ok());
        let Ok(vault) = ledger.create_vault(wsol()) else {
            panic!("expected vault");
        };
        (ledger, vault)
    }

    #[test]
    fn vaults_get_distinct_handles() {
        let ledger = InMemoryLedger::new();
        let (Ok(a), Ok(b)) = (ledger.create_vault(wsol()), ledger.create_vault(wsol())) else {
            panic!("expected vaults");
        };
        assert_ne!(a, b);
        assert_eq!(ledger.vault_asset(a), Some(wsol()));
    }

    #[test]
    fn in_and_out_are_inverse() {
        let (ledger, vault) = funded();
        assert!(ledger.transfer_in(vault, alice(), Amount::new(30)).is_ok());
        assert!(ledger.transfer_out(vault, alice(), Amount::new(30)).is_ok());
        assert_eq!(ledger.balance(alice(), wsol()), Amount::new(100));
        assert_eq!(ledger.balance_of(vault), Ok(Amount::ZERO));
    }

    #[test]
    fn overdraw_is_rejected_without_effect() {
        let (ledger, vault) = funded();
        assert_eq!(
            ledger.transfer_in(vault, alice(), Amount::new(101)),
            Err(CustodyError::InsufficientFunds {
                requested: 101,
                available: 100
            })
        );
        assert_eq!(
            ledger.transfer_out(vault, alice(), Amount::new(1)),
            Err(CustodyError::InsufficientFunds {
                requested: 1,
                available: 0
            })
        );
        assert_eq!(ledger.balance(alice(), wsol()), Amount::new(100));
    }

    #[test]
    fn frozen_vault_refuses_transfers() {
        let (ledger, vault) = funded();
        ledger.freeze(vault);
        assert_eq!(
            ledger.transfer_in(vault, alice(), Amount::new(1)),
            Err(CustodyError::Frozen(vault))
        );
        assert_eq!(ledger.balance_of(vault), Ok(Amount::ZERO));
        ledger.thaw(vault);
        assert!(ledger.transfer_in(vault, alice(), Amount::new(1)).is_ok());
    }

    #[test]
    fn unknown_vault() {
        let ledger = InMemoryLedger::new();
        assert_eq!(
            ledger.balance_of(VaultId::new(42)),
            Err(CustodyError::UnknownVault(VaultId::new(42)))
        );
    }

    #[test]
    fn clones_share_state() {
        let (ledger, vault) = funded();
        let other = ledger.clone();
        assert!(other.transfer_in(vault, alice(), Amount::new(5)).is_ok());
        assert_eq!(ledger.balance_of(vault), Ok(Amount::new(5)));
    }
}
