//! Registry key and deterministic pool addressing.

use serde::{Deserialize, Serialize};

use super::{Address, AssetPair, VirtualRatio};
use crate::error::Result;

/// Domain separator mixed into every pool address.
pub const POOL_ADDRESS_DOMAIN: &[u8] = b"OFFSET_AMM_POOL_V1";

/// The identity of a pool: its canonical asset pair plus its virtual ratio.
///
/// Two pools over the same assets with different ratios are distinct pools
/// with distinct addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoolKey {
    pair: AssetPair,
    ratio: VirtualRatio,
}

impl PoolKey {
    /// Builds the key for `(x, y, ratio)` in either asset order.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::IdenticalAssets`](crate::error::AmmError::IdenticalAssets)
    /// if `x == y`.
    pub fn new(x: Address, y: Address, ratio: VirtualRatio) -> Result<Self> {
        Ok(Self {
            pair: AssetPair::new(x, y)?,
            ratio,
        })
    }

    /// Builds the key from an already-canonical pair.
    #[must_use]
    pub const fn from_pair(pair: AssetPair, ratio: VirtualRatio) -> Self {
        Self { pair, ratio }
    }

    /// Returns the canonical asset pair.
    #[must_use]
    pub const fn pair(&self) -> AssetPair {
        self.pair
    }

    /// Returns the virtual ratio.
    #[must_use]
    pub const fn ratio(&self) -> VirtualRatio {
        self.ratio
    }

    /// Derives this pool's address.
    ///
    /// `blake3(domain || asset_a || asset_b || virt as big-endian u32)`
    /// over the canonically ordered assets.
    #[must_use]
    pub fn address(&self) -> Address {
        let mut hasher = blake3::Hasher::new();
        hasher.update(POOL_ADDRESS_DOMAIN);
        hasher.update(&self.pair.first().as_bytes());
        hasher.update(&self.pair.second().as_bytes());
        hasher.update(&self.ratio.numerator().to_be_bytes());
        Address::from_bytes(*hasher.finalize().as_bytes())
    }
}

/// Computes the address a pool over `(x, y, ratio)` has or would have.
///
/// Pure: depends only on the inputs, so callers can locate a pool without
/// consulting the registry.
///
/// # Errors
///
/// Returns [`AmmError::IdenticalAssets`](crate::error::AmmError::IdenticalAssets)
/// if `x == y`.
///
/// # Examples
///
/// ```
/// use offset_amm::domain::{pool_address, Address, VirtualRatio};
///
/// let x = Address::from_bytes([1u8; 32]);
/// let y = Address::from_bytes([2u8; 32]);
/// let r = VirtualRatio::new(1_000);
///
/// assert_eq!(pool_address(x, y, r), pool_address(y, x, r));
/// ```
pub fn pool_address(x: Address, y: Address, ratio: VirtualRatio) -> Result<Address> {
    Ok(PoolKey::new(x, y, ratio)?.address())
}
