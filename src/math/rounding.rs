//! Rounding helpers for wide integer division.
//!
//! Curve math forms its products in `u128` and divides back down; every
//! division goes through [`div_round`] so the direction is always explicit.
//!
//! # Convention
//!
//! **Always round against the trader** (reserve-favorable):
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Amount paid out | [`Rounding::Down`] |
//! | Fee charged | [`Rounding::Up`] |
//! | Reserve floor after a trade (`k / x'`) | [`Rounding::Up`] |
//!
//! # Examples
//!
//! ```
//! use curve_launchpad::domain::Rounding;
//! use curve_launchpad::math::div_round;
//!
//! assert_eq!(div_round(10, 3, Rounding::Down), Some(3));
//! assert_eq!(div_round(10, 3, Rounding::Up), Some(4));
//! assert_eq!(div_round(10, 0, Rounding::Down), None);
//! ```

use crate::domain::Rounding;

/// Integer division of `u128` values with explicit rounding direction.
///
/// Returns [`None`] if `denominator` is zero. Never overflows: the ceiling
/// is computed as `floor + (remainder != 0)`.
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let q = numerator / denominator;
    match rounding {
        Rounding::Down => Some(q),
        // q == u128::MAX implies denominator == 1 and a zero remainder.
        Rounding::Up => {
            if numerator % denominator != 0 {
                Some(q + 1)
            } else {
                Some(q)
            }
        }
    }
}
