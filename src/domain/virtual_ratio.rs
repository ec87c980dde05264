//! Virtual reserve ratio in basis points.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Amount;
use crate::error::AmmError;

/// Fixed denominator of every virtual ratio ("base").
pub const VIRTUAL_RATIO_BASE: u32 = 10_000;

/// The fraction of each real deposit that a pool adds as virtual reserve.
///
/// Stored as a numerator ("virt") over the fixed base of 10 000, so
/// `VirtualRatio::new(1_000)` means 0.1 and `VirtualRatio::new(0)` yields a
/// plain constant-product pool. The numerator is also the `virtualParam`
/// under which the registry indexes pools.
///
/// # Examples
///
/// ```
/// use offset_amm::domain::{Amount, VirtualRatio};
///
/// let r = VirtualRatio::new(1_000);
/// let v = r.apply(Amount::new(4_000)).expect("no overflow");
/// assert_eq!(v, Amount::new(400));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct VirtualRatio(u32);

impl VirtualRatio {
    /// No virtual reserve.
    pub const ZERO: Self = Self(0);

    /// Creates a ratio of `numerator / 10 000`.
    pub const fn new(numerator: u32) -> Self {
        Self(numerator)
    }

    /// Returns the numerator ("virt").
    #[must_use]
    pub const fn numerator(&self) -> u32 {
        self.0
    }

    /// Returns the denominator ("base").
    #[must_use]
    pub const fn denominator(&self) -> u32 {
        VIRTUAL_RATIO_BASE
    }

    /// Returns `true` if the ratio adds no virtual reserve.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Computes `amount * virt / base`, rounded down.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the intermediate product overflows.
    pub fn apply(&self, amount: Amount) -> crate::error::Result<Amount> {
        let product = amount
            .get()
            .checked_mul(u128::from(self.0))
            .ok_or(AmmError::Overflow("virtual ratio apply overflow"))?;
        Ok(Amount::new(product / u128::from(VIRTUAL_RATIO_BASE)))
    }
}

impl fmt::Display for VirtualRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, VIRTUAL_RATIO_BASE)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let r = VirtualRatio::new(1_000);
        assert_eq!(r.numerator(), 1_000);
        assert_eq!(r.denominator(), 10_000);
        assert!(!r.is_zero());
        assert!(VirtualRatio::ZERO.is_zero());
    }

    #[test]
    fn apply_rounds_down() {
        let r = VirtualRatio::new(1_000);
        assert_eq!(r.apply(Amount::new(19)), Ok(Amount::new(1)));
        assert_eq!(r.apply(Amount::new(9)), Ok(Amount::ZERO));
    }

    #[test]
    fn apply_full_ratio_is_identity() {
        let r = VirtualRatio::new(10_000);
        assert_eq!(r.apply(Amount::new(12_345)), Ok(Amount::new(12_345)));
    }

    #[test]
    fn apply_overflow() {
        let r = VirtualRatio::new(2);
        let Err(AmmError::Overflow(_)) = r.apply(Amount::MAX) else {
            panic!("expected Overflow");
        };
    }

    #[test]
    fn display() {
        assert_eq!(VirtualRatio::new(1_000).to_string(), "1000/10000");
    }
}
