//! All-or-nothing custody settlement.
//!
//! A [`Settlement`] is an ordered list of custody [`Leg`]s. Executing it
//! applies the legs in order; if one fails, every leg already applied is
//! undone with its inverse, newest first, before the error is returned.
//! A successful execution yields an [`AppliedSettlement`] that can still
//! be undone later, which migration uses when the external AMM refuses
//! the liquidity after it has left the vaults.

use tracing::{error, warn};

use crate::domain::{AccountId, Amount, VaultId};
use crate::error::{LaunchpadError, Result};
use crate::pools::BoundPool;
use crate::traits::{CustodyError, CustodyPort};

/// One custody transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    /// `account → vault`.
    In {
        /// Destination vault.
        vault: VaultId,
        /// Funding account.
        from: AccountId,
        /// Amount moved.
        amount: Amount,
    },
    /// `vault → account`.
    Out {
        /// Source vault.
        vault: VaultId,
        /// Receiving account.
        to: AccountId,
        /// Amount moved.
        amount: Amount,
    },
}

impl Leg {
    /// Returns the vault the leg touches.
    #[must_use]
    pub const fn vault(&self) -> VaultId {
        match self {
            Self::In { vault, .. } | Self::Out { vault, .. } => *vault,
        }
    }

    /// Returns the amount moved.
    pub const fn amount(&self) -> Amount {
        match self {
            Self::In { amount, .. } | Self::Out { amount, .. } => *amount,
        }
    }

    /// Returns the transfer that exactly undoes this one.
    #[must_use]
    pub const fn inverse(&self) -> Self {
        match *self {
            Self::In {
                vault,
                from,
                amount,
            } => Self::Out {
                vault,
                to: from,
                amount,
            },
            Self::Out { vault, to, amount } => Self::In {
                vault,
                from: to,
                amount,
            },
        }
    }

    fn apply<C: CustodyPort + ?Sized>(&self, custody: &C) -> core::result::Result<(), CustodyError> {
        match *self {
            Self::In {
                vault,
                from,
                amount,
            } => custody.transfer_in(vault, from, amount),
            Self::Out { vault, to, amount } => custody.transfer_out(vault, to, amount),
        }
    }
}

/// Ordered custody legs executed as one unit.
///
/// Zero-amount legs are dropped when added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settlement {
    legs: Vec<Leg>,
}

impl Settlement {
    /// Creates an empty settlement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `from → vault`.
    #[must_use]
    pub fn transfer_in(self, vault: VaultId, from: AccountId, amount: Amount) -> Self {
        self.push(Leg::In {
            vault,
            from,
            amount,
        })
    }

    /// Appends `vault → to`.
    #[must_use]
    pub fn transfer_out(self, vault: VaultId, to: AccountId, amount: Amount) -> Self {
        self.push(Leg::Out { vault, to, amount })
    }

    fn push(mut self, leg: Leg) -> Self {
        if !leg.amount().is_zero() {
            self.legs.push(leg);
        }
        self
    }

    /// Returns the legs in execution order.
    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Applies every leg, or none.
    ///
    /// # Errors
    ///
    /// - The failing leg's [`CustodyError`], converted, once all earlier
    ///   legs have been undone.
    /// - [`LaunchpadError::RollbackFailed`] if undoing an earlier leg also
    ///   fails; custody is then out of step with the engine.
    pub fn execute<C: CustodyPort + ?Sized>(self, custody: &C) -> Result<AppliedSettlement> {
        let mut applied = Vec::with_capacity(self.legs.len());
        for leg in self.legs {
            if let Err(err) = leg.apply(custody) {
                warn!(
                    vault = %leg.vault(),
                    amount = leg.amount().get(),
                    error = %err,
                    "custody leg failed, rolling back"
                );
                AppliedSettlement { legs: applied }.rollback(custody)?;
                return Err(err.into());
            }
            applied.push(leg);
        }
        Ok(AppliedSettlement { legs: applied })
    }
}

/// Legs that were applied and can still be undone.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct AppliedSettlement {
    legs: Vec<Leg>,
}

impl AppliedSettlement {
    /// Returns the applied legs in execution order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Undoes every applied leg, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::RollbackFailed`] naming the first vault
    /// whose compensating transfer failed. Later compensations are not
    /// attempted.
    pub fn rollback<C: CustodyPort + ?Sized>(self, custody: &C) -> Result<()> {
        for leg in self.legs.iter().rev() {
            let undo = leg.inverse();
            if let Err(err) = undo.apply(custody) {
                error!(
                    vault = %undo.vault(),
                    amount = undo.amount().get(),
                    error = %err,
                    "compensating custody leg failed"
                );
                return Err(LaunchpadError::RollbackFailed(undo.vault()));
            }
        }
        Ok(())
    }
}

/// Checks custody against a pool's tracked balances.
///
/// The quote vault must hold exactly the quote reserve; the meme vault
/// must hold the meme reserve plus meme-side fees.
///
/// # Errors
///
/// Returns [`LaunchpadError::IntegrityFault`] on the first mismatch.
pub fn verify_vaults<C: CustodyPort + ?Sized>(custody: &C, pool: &BoundPool) -> Result<()> {
    expect_balance(
        custody,
        pool.quote_reserve().vault(),
        pool.quote_reserve().tokens(),
    )?;
    expect_balance(
        custody,
        pool.meme_reserve().vault(),
        pool.expected_meme_vault_balance()?,
    )
}

fn expect_balance<C: CustodyPort + ?Sized>(
    custody: &C,
    vault: VaultId,
    tracked: Amount,
) -> Result<()> {
    let actual = custody.balance_of(vault)?;
    if actual != tracked {
        error!(
            vault = %vault,
            tracked = tracked.get(),
            actual = actual.get(),
            "custody balance diverged from tracked reserve"
        );
        return Err(LaunchpadError::IntegrityFault {
            vault,
            tracked: tracked.get(),
            actual: actual.get(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::adapters::InMemoryLedger;
    use crate::domain::AssetId;

    fn wsol() -> AssetId {
        AssetId::from_bytes([9u8; 32])
    }

    fn alice() -> AccountId {
        AccountId::from_bytes([1u8; 32])
    }

    /// Ledger that fails the listed call numbers (0-based, transfers only).
    struct Scripted {
        inner: InMemoryLedger,
        calls: Mutex<usize>,
        fail_on: Vec<usize>,
    }

    impl Scripted {
        fn tick(&self, vault: VaultId) -> core::result::Result<(), CustodyError> {
            let mut calls = self.calls.lock();
            let n = *calls;
            *calls += 1;
            if self.fail_on.contains(&n) {
                return Err(CustodyError::Frozen(vault));
            }
            Ok(())
        }
    }

    impl CustodyPort for Scripted {
        fn create_vault(&self, asset: AssetId) -> core::result::Result<VaultId, CustodyError> {
            self.inner.create_vault(asset)
        }

        fn transfer_in(
            &self,
            vault: VaultId,
            from: AccountId,
            amount: Amount,
        ) -> core::result::Result<(), CustodyError> {
            self.tick(vault)?;
            self.inner.transfer_in(vault, from, amount)
        }

        fn transfer_out(
            &self,
            vault: VaultId,
            to: AccountId,
            amount: Amount,
        ) -> core::result::Result<(), CustodyError> {
            self.tick(vault)?;
            self.inner.transfer_out(vault, to, amount)
        }

        fn balance_of(&self, vault: VaultId) -> core::result::Result<Amount, CustodyError> {
            self.inner.balance_of(vault)
        }
    }

    fn setup(fail_on: Vec<usize>) -> (Scripted, VaultId, VaultId) {
        let inner = InMemoryLedger::new();
        assert!(inner.mint(alice(), wsol(), Amount::new(1_000)).is_ok());
        let (Ok(a), Ok(b)) = (inner.create_vault(wsol()), inner.create_vault(wsol())) else {
            panic!("expected vaults");
        };
        let port = Scripted {
            inner,
            calls: Mutex::new(0),
            fail_on,
        };
        (port, a, b)
    }

    #[test]
    fn inverse_swaps_direction() {
        let leg = Leg::In {
            vault: VaultId::new(1),
            from: alice(),
            amount: Amount::new(5),
        };
        assert_eq!(
            leg.inverse(),
            Leg::Out {
                vault: VaultId::new(1),
                to: alice(),
                amount: Amount::new(5)
            }
        );
        assert_eq!(leg.inverse().inverse(), leg);
    }

    #[test]
    fn zero_legs_are_dropped() {
        let s = Settlement::new()
            .transfer_in(VaultId::new(1), alice(), Amount::ZERO)
            .transfer_out(VaultId::new(1), alice(), Amount::new(3));
        assert_eq!(s.legs().len(), 1);
    }

    #[test]
    fn all_legs_apply() {
        let (port, a, b) = setup(vec![]);
        let result = Settlement::new()
            .transfer_in(a, alice(), Amount::new(100))
            .transfer_in(b, alice(), Amount::new(50))
            .execute(&port);
        assert!(result.is_ok());
        assert_eq!(port.balance_of(a), Ok(Amount::new(100)));
        assert_eq!(port.balance_of(b), Ok(Amount::new(50)));
        assert_eq!(port.inner.balance(alice(), wsol()), Amount::new(850));
    }

    #[test]
    fn failed_leg_rolls_back_earlier_legs() {
        let (port, a, b) = setup(vec![1]);
        let result = Settlement::new()
            .transfer_in(a, alice(), Amount::new(100))
            .transfer_in(b, alice(), Amount::new(50))
            .execute(&port);
        assert_eq!(result, Err(LaunchpadError::CustodyRejected(b)));
        assert_eq!(port.balance_of(a), Ok(Amount::ZERO));
        assert_eq!(port.balance_of(b), Ok(Amount::ZERO));
        assert_eq!(port.inner.balance(alice(), wsol()), Amount::new(1_000));
    }

    #[test]
    fn insufficient_funds_surfaces_after_rollback() {
        let (port, a, b) = setup(vec![]);
        let result = Settlement::new()
            .transfer_in(a, alice(), Amount::new(600))
            .transfer_in(b, alice(), Amount::new(600))
            .execute(&port);
        assert_eq!(
            result,
            Err(LaunchpadError::InsufficientFunds {
                requested: 600,
                available: 400
            })
        );
        assert_eq!(port.inner.balance(alice(), wsol()), Amount::new(1_000));
    }

    #[test]
    fn failing_compensation_is_reported() {
        // Call 0 applies, call 1 fails, call 2 (the undo of call 0) fails.
        let (port, a, b) = setup(vec![1, 2]);
        let result = Settlement::new()
            .transfer_in(a, alice(), Amount::new(100))
            .transfer_in(b, alice(), Amount::new(50))
            .execute(&port);
        assert_eq!(result, Err(LaunchpadError::RollbackFailed(a)));
    }

    #[test]
    fn applied_settlement_can_be_undone_later() {
        let (port, a, _) = setup(vec![]);
        let Ok(applied) = Settlement::new()
            .transfer_in(a, alice(), Amount::new(10))
            .execute(&port)
        else {
            panic!("expected Ok");
        };
        assert_eq!(applied.legs().len(), 1);
        assert!(applied.rollback(&port).is_ok());
        assert_eq!(port.balance_of(a), Ok(Amount::ZERO));
    }
}
