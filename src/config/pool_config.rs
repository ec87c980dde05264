//! Configuration for a single virtual-reserve pool.

use crate::domain::{Address, AssetPair, PoolKey, VirtualRatio};
use crate::error::AmmError;

/// Configuration for one pool: the pair it trades and its virtual ratio.
///
/// Both parameters are immutable for the pool's lifetime. A pool starts
/// with no reserves; liquidity arrives through the first `mint`.
///
/// # Derived Values
///
/// - Address: `blake3(domain || asset_a || asset_b || virt_be)`
/// - Initial virtual reserve of each side: `reserve * virt / 10_000` at the first mint
///
/// # Validation
///
/// - The two assets must differ; checked by [`AssetPair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    key: PoolKey,
}

impl PoolConfig {
    /// Creates a configuration for `(x, y)` in either order.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::IdenticalAssets`] if `x == y`.
    pub fn new(x: Address, y: Address, ratio: VirtualRatio) -> Result<Self, AmmError> {
        Ok(Self {
            key: PoolKey::new(x, y, ratio)?,
        })
    }

    /// Returns the canonical asset pair.
    #[must_use]
    pub const fn pair(&self) -> AssetPair {
        self.key.pair()
    }

    /// Returns the virtual ratio.
    #[must_use]
    pub const fn ratio(&self) -> VirtualRatio {
        self.key.ratio()
    }

    /// Returns the registry key.
    #[must_use]
    pub const fn key(&self) -> PoolKey {
        self.key
    }

    /// Returns the derived pool address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.key.address()
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
    fn valid_config() {
        let Ok(cfg) = PoolConfig::new(addr(2), addr(1), VirtualRatio::new(1_000)) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.pair().first(), addr(1));
        assert_eq!(cfg.ratio(), VirtualRatio::new(1_000));
        assert_eq!(cfg.key().address(), cfg.address());
    }

    #[test]
    fn identical_assets_rejected() {
        assert_eq!(
            PoolConfig::new(addr(1), addr(1), VirtualRatio::ZERO),
            Err(AmmError::IdenticalAssets)
        );
    }
}
