//! In-memory external AMM.
//!
//! Records every pool it is asked to create and credits the beneficiary
//! `⌊√(amount_a × amount_b)⌋` LP shares, the usual constant-product
//! genesis mint. Failures can be scripted with
//! [`fail_next`](InMemoryAmm::fail_next) to exercise migration retries.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::{AccountId, Amount, AssetId, ExternalPoolId};
use crate::traits::{AmmCreationPort, AmmPortError};

/// A pool created on the in-memory AMM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExternalPoolRecord {
    /// Identity returned to the caller.
    pub id: ExternalPoolId,
    /// First asset as passed in.
    pub asset_a: AssetId,
    /// Second asset as passed in.
    pub asset_b: AssetId,
    /// Seed amount of `asset_a`.
    pub amount_a: Amount,
    /// Seed amount of `asset_b`.
    pub amount_b: Amount,
    /// Account credited with the LP shares.
    pub beneficiary: AccountId,
    /// LP shares credited.
    pub lp_credited: Amount,
}

#[derive(Debug, Default)]
struct AmmState {
    pools: Vec<ExternalPoolRecord>,
    pairs: HashSet<(AssetId, AssetId)>,
    pending_failures: Vec<String>,
}

/// Thread-safe in-memory [`AmmCreationPort`]. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAmm {
    state: Arc<Mutex<AmmState>>,
}

impl InMemoryAmm {
    /// Creates an AMM with no pools.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `create_pool` call fail with `reason`.
    ///
    /// Calls queue up: each pending failure is consumed by one call.
    pub fn fail_next(&self, reason: impl Into<String>) {
        self.state.lock().pending_failures.push(reason.into());
    }

    /// Returns every pool created so far, oldest first.
    #[must_use]
    pub fn pools(&self) -> Vec<ExternalPoolRecord> {
        self.state.lock().pools.clone()
    }

    /// Looks up a created pool.
    #[must_use]
    pub fn pool(&self, id: ExternalPoolId) -> Option<ExternalPoolRecord> {
        self.state.lock().pools.iter().find(|p| p.id == id).copied()
    }

    /// Integer square root via Newton's method.
    fn isqrt(n: u128) -> u128 {
        if n == 0 {
            return 0;
        }
        let mut x = n;
        let mut y = x.div_ceil(2);
        while y < x {
            x = y;
            y = (x + n / x) / 2;
        }
        x
    }
}

impl AmmCreationPort for InMemoryAmm {
    fn create_pool(
        &self,
        asset_a: AssetId,
        asset_b: AssetId,
        amount_a: Amount,
        amount_b: Amount,
        beneficiary: AccountId,
    ) -> Result<(ExternalPoolId, Amount), AmmPortError> {
        let mut state = self.state.lock();
        if !state.pending_failures.is_empty() {
            let reason = state.pending_failures.remove(0);
            return Err(AmmPortError::Unavailable(reason));
        }
        if asset_a == asset_b {
            return Err(AmmPortError::InvalidSeed("assets must differ"));
        }
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(AmmPortError::InvalidSeed("both seed amounts must be non-zero"));
        }
        let key = if asset_a < asset_b {
            (asset_a, asset_b)
        } else {
            (asset_b, asset_a)
        };
        if state.pairs.contains(&key) {
            return Err(AmmPortError::PoolExists);
        }

        // Two u64 values multiply exactly in u128, and the root fits in u64.
        let lp = Self::isqrt(amount_a.wide() * amount_b.wide());
        let lp_credited = Amount::from_wide(lp)
            .ok_or(AmmPortError::InvalidSeed("lp supply overflow"))?;

        let next = u64::try_from(state.pools.len())
            .map_err(|_| AmmPortError::Unavailable("pool id space exhausted".into()))?
            + 1;
        let id = ExternalPoolId::new(next);
        state.pairs.insert(key);
        state.pools.push(ExternalPoolRecord {
            id,
            asset_a,
            asset_b,
            amount_a,
            amount_b,
            beneficiary,
            lp_credited,
        });
        Ok((id, lp_credited))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn asset(n: u8) -> AssetId {
        AssetId::from_bytes([n; 32])
    }

    fn creator() -> AccountId {
        AccountId::from_bytes([7u8; 32])
    }

    #[test]
    fn creates_and_records() {
        let amm = InMemoryAmm::new();
        let Ok((id, lp)) =
            amm.create_pool(asset(1), asset(2), Amount::new(400), Amount::new(100), creator())
        else {
            panic!("expected pool");
        };
        assert_eq!(lp, Amount::new(200));
        let Some(record) = amm.pool(id) else {
            panic!("expected record");
        };
        assert_eq!(record.beneficiary, creator());
        assert_eq!(amm.pools().len(), 1);
    }

    #[test]
    fn duplicate_pair_in_either_order() {
        let amm = InMemoryAmm::new();
        assert!(amm
            .create_pool(asset(1), asset(2), Amount::new(1), Amount::new(1), creator())
            .is_ok());
        assert_eq!(
            amm.create_pool(asset(2), asset(1), Amount::new(1), Amount::new(1), creator()),
            Err(AmmPortError::PoolExists)
        );
    }

    #[test]
    fn scripted_failure_is_consumed_once() {
        let amm = InMemoryAmm::new();
        amm.fail_next("maintenance");
        assert_eq!(
            amm.create_pool(asset(1), asset(2), Amount::new(1), Amount::new(1), creator()),
            Err(AmmPortError::Unavailable("maintenance".into()))
        );
        assert!(amm.pools().is_empty());
        assert!(amm
            .create_pool(asset(1), asset(2), Amount::new(1), Amount::new(1), creator())
            .is_ok());
    }

    #[test]
    fn zero_seed_rejected() {
        let amm = InMemoryAmm::new();
        assert!(matches!(
            amm.create_pool(asset(1), asset(2), Amount::ZERO, Amount::new(1), creator()),
            Err(AmmPortError::InvalidSeed(_))
        ));
    }

    #[test]
    fn isqrt_floors() {
        assert_eq!(InMemoryAmm::isqrt(0), 0);
        assert_eq!(InMemoryAmm::isqrt(15), 3);
        assert_eq!(InMemoryAmm::isqrt(16), 4);
        let max = u128::from(u64::MAX);
        assert_eq!(InMemoryAmm::isqrt(max * max), max);
    }
}
