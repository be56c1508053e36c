//! Arithmetic utilities for curve pricing.
//!
//! This module provides [`CheckedArithmetic`] for overflow-safe operations
//! on [`Amount`](crate::domain::Amount), [`div_round`] for explicit
//! division rounding, and [`ConstantProductCurve`], the bonding-curve
//! pricing rule.

mod checked;
mod curve;
mod rounding;

pub use checked::CheckedArithmetic;
pub use curve::{ConstantProductCurve, SpotPrice};
pub use rounding::div_round;
