//! Checked arithmetic trait for [`Amount`].
//!
//! [`CheckedArithmetic`] lifts the `Option`-returning methods on
//! [`Amount`] into [`Result`]s carrying a
//! [`LaunchpadError`] with context, so pricing and state updates can use
//! `?` throughout.
//!
//! # Examples
//!
//! ```
//! use curve_launchpad::domain::Amount;
//! use curve_launchpad::math::CheckedArithmetic;
//!
//! let sum = Amount::new(100).safe_add(&Amount::new(200), "example");
//! assert_eq!(sum, Ok(Amount::new(300)));
//! assert!(Amount::MAX.safe_add(&Amount::new(1), "example").is_err());
//! ```

use crate::domain::Amount;
use crate::error::LaunchpadError;

/// Fallible arithmetic for domain amounts.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - **No saturation**: overflow and underflow both surface as
///   [`LaunchpadError::ArithmeticOverflow`], tagged with `context`.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::ArithmeticOverflow`] on overflow.
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self, LaunchpadError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::ArithmeticOverflow`] if the result would be
    /// negative.
    fn safe_sub(&self, other: &Self, context: &'static str) -> Result<Self, LaunchpadError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self, LaunchpadError> {
        self.checked_add(other)
            .ok_or(LaunchpadError::ArithmeticOverflow(context))
    }

    #[inline]
    fn safe_sub(&self, other: &Self, context: &'static str) -> Result<Self, LaunchpadError> {
        self.checked_sub(other)
            .ok_or(LaunchpadError::ArithmeticOverflow(context))
    }
}
