//! Explicit rounding direction for integer division.

/// Rounding direction for every division in the engine.
///
/// The protocol convention is to round against the trader: outputs round
/// [`Down`](Self::Down), fees and reserve floors round [`Up`](Self::Up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}
