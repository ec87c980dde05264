//! Pool registry: deterministic creation, uniqueness and fee governance.

use std::collections::{BTreeMap, HashMap};

use tracing::info;

use crate::config::PoolConfig;
use crate::domain::{Address, Event, EventLog, VirtualRatio};
use crate::error::AmmError;
use crate::pools::PoolEngine;
use crate::traits::FromConfig;

/// Owns every pool and indexes it by `(asset_x, asset_y, virt)`.
///
/// # Flow of [`create_pool`](Self::create_pool)
///
/// 1. Build and validate a [`PoolConfig`] (canonical ordering).
/// 2. Reject a key that is already registered.
/// 3. Construct the pool via [`FromConfig`]; its address is derived from
///    the key alone.
/// 4. Index it under both asset orderings, append it to the pool list and
///    emit `PoolCreated`.
///
/// # Example
///
/// ```rust
/// use offset_amm::domain::{pool_address, Address, EventLog, VirtualRatio};
/// use offset_amm::factory::PoolRegistry;
///
/// let admin = Address::from_bytes([9u8; 32]);
/// let x = Address::from_bytes([1u8; 32]);
/// let y = Address::from_bytes([2u8; 32]);
/// let r = VirtualRatio::new(1_000);
///
/// let mut registry = PoolRegistry::new(admin, None);
/// let mut log = EventLog::new();
/// let pool = registry.create_pool(y, x, r, &mut log).expect("created");
///
/// assert_eq!(Ok(pool), pool_address(x, y, r));
/// assert_eq!(registry.get_pool(x, y, r), Some(pool));
/// assert_eq!(registry.pool_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolRegistry {
    admin: Address,
    fee_recipient: Option<Address>,
    pools: BTreeMap<Address, PoolEngine>,
    all_pools: Vec<Address>,
    index: HashMap<(Address, Address, VirtualRatio), Address>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(admin: Address, fee_recipient: Option<Address>) -> Self {
        Self {
            admin,
            fee_recipient,
            pools: BTreeMap::new(),
            all_pools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Registers a new empty pool for `(x, y, ratio)` and returns its
    /// address.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] if `x == y`.
    /// - [`AmmError::PoolExists`] if the key is already registered.
    pub fn create_pool(
        &mut self,
        x: Address,
        y: Address,
        ratio: VirtualRatio,
        log: &mut EventLog,
    ) -> Result<Address, AmmError> {
        let config = PoolConfig::new(x, y, ratio)?;
        let (asset_a, asset_b) = (config.pair().first(), config.pair().second());
        if self.index.contains_key(&(asset_a, asset_b, ratio)) {
            return Err(AmmError::PoolExists);
        }
        let pool = PoolEngine::from_config(&config)?;
        let address = pool.address();
        if self.pools.contains_key(&address) {
            return Err(AmmError::PoolExists);
        }

        self.pools.insert(address, pool);
        self.index.insert((asset_a, asset_b, ratio), address);
        self.index.insert((asset_b, asset_a, ratio), address);
        self.all_pools.push(address);
        let index = self.all_pools.len() as u64;
        log.emit(Event::PoolCreated {
            asset_a,
            asset_b,
            virtual_ratio: ratio,
            pool: address,
            index,
        });
        info!(pool = %address, %asset_a, %asset_b, virt = ratio.numerator(), index, "pool created");
        Ok(address)
    }

    /// Looks up the pool for `(x, y, ratio)` in either order.
    #[must_use]
    pub fn get_pool(&self, x: Address, y: Address, ratio: VirtualRatio) -> Option<Address> {
        self.index.get(&(x, y, ratio)).copied()
    }

    /// Every pool address in creation order.
    #[must_use]
    pub fn all_pools(&self) -> &[Address] {
        &self.all_pools
    }

    /// Number of pools created.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.all_pools.len()
    }

    /// Returns the pool at `address`.
    #[must_use]
    pub fn pool(&self, address: &Address) -> Option<&PoolEngine> {
        self.pools.get(address)
    }

    /// Returns the pool at `address` mutably.
    pub fn pool_mut(&mut self, address: &Address) -> Option<&mut PoolEngine> {
        self.pools.get_mut(address)
    }

    /// Current protocol fee recipient.
    #[must_use]
    pub const fn fee_recipient(&self) -> Option<Address> {
        self.fee_recipient
    }

    /// Current admin.
    #[must_use]
    pub const fn admin(&self) -> Address {
        self.admin
    }

    /// Turns fee accrual on (`Some`) or off (`None`).
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Unauthorized`] unless `caller` is the admin.
    pub fn set_fee_recipient(
        &mut self,
        caller: Address,
        recipient: Option<Address>,
        log: &mut EventLog,
    ) -> Result<(), AmmError> {
        self.authorize(caller)?;
        let previous = core::mem::replace(&mut self.fee_recipient, recipient);
        log.emit(Event::FeeRecipientChanged {
            previous,
            current: recipient,
        });
        info!(?previous, current = ?recipient, "fee recipient changed");
        Ok(())
    }

    /// Hands admin authority to `new_admin`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Unauthorized`] unless `caller` is the admin.
    pub fn set_admin(
        &mut self,
        caller: Address,
        new_admin: Address,
        log: &mut EventLog,
    ) -> Result<(), AmmError> {
        self.authorize(caller)?;
        let previous = core::mem::replace(&mut self.admin, new_admin);
        log.emit(Event::AdminChanged {
            previous,
            current: new_admin,
        });
        info!(%previous, current = %new_admin, "admin changed");
        Ok(())
    }

    fn authorize(&self, caller: Address) -> Result<(), AmmError> {
        if caller == self.admin {
            Ok(())
        } else {
            Err(AmmError::Unauthorized)
        }
    }
}
