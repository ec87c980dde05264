//! Ordered pair of distinct assets.

use serde::{Deserialize, Serialize};

use super::Address;
use crate::error::AmmError;

/// An ordered pair of distinct asset addresses, canonically sorted.
///
/// The canonical ordering guarantees `first() < second()`, so `(A, B)` and
/// `(B, A)` produce the same pair and therefore the same pool.
///
/// # Examples
///
/// ```
/// use offset_amm::domain::{Address, AssetPair};
///
/// let x = Address::from_bytes([1u8; 32]);
/// let y = Address::from_bytes([2u8; 32]);
///
/// let pair = AssetPair::new(y, x).expect("distinct assets");
/// assert_eq!(pair.first(), x);
/// assert_eq!(pair.second(), y);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetPair {
    asset_a: Address,
    asset_b: Address,
}

impl AssetPair {
    /// Creates a new canonically-ordered `AssetPair`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::IdenticalAssets`] if both addresses are equal.
    pub fn new(x: Address, y: Address) -> crate::error::Result<Self> {
        if x == y {
            return Err(AmmError::IdenticalAssets);
        }
        let (asset_a, asset_b) = if x < y { (x, y) } else { (y, x) };
        Ok(Self { asset_a, asset_b })
    }

    /// Returns the first asset (lower address).
    #[must_use]
    pub const fn first(&self) -> Address {
        self.asset_a
    }

    /// Returns the second asset (higher address).
    #[must_use]
    pub const fn second(&self) -> Address {
        self.asset_b
    }

    /// Returns `true` if `asset` is one of the two assets.
    #[must_use]
    pub fn contains(&self, asset: &Address) -> bool {
        self.asset_a == *asset || self.asset_b == *asset
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 32])
    }

    #[test]
    fn keeps_sorted_input() {
        let Ok(pair) = AssetPair::new(addr(1), addr(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.first(), addr(1));
        assert_eq!(pair.second(), addr(2));
    }

    #[test]
    fn sorts_reversed_input() {
        let Ok(pair) = AssetPair::new(addr(2), addr(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.first(), addr(1));
        assert_eq!(pair.second(), addr(2));
    }

    #[test]
    fn rejects_identical_assets() {
        assert_eq!(
            AssetPair::new(addr(3), addr(3)),
            Err(AmmError::IdenticalAssets)
        );
    }

    #[test]
    fn both_orderings_are_equal() {
        let (Ok(p1), Ok(p2)) = (AssetPair::new(addr(1), addr(9)), AssetPair::new(addr(9), addr(1)))
        else {
            panic!("expected Ok");
        };
        assert_eq!(p1, p2);
    }

    #[test]
    fn contains_members_only() {
        let Ok(pair) = AssetPair::new(addr(1), addr(2)) else {
            panic!("expected Ok");
        };
        assert!(pair.contains(&addr(1)));
        assert!(pair.contains(&addr(2)));
        assert!(!pair.contains(&addr(3)));
    }
}
