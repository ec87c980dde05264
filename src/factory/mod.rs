//! Pool instantiation and lookup.
//!
//! The [`PoolRegistry`] creates pools from `(asset_x, asset_y, virt)`
//! keys, dispatching construction to
//! [`FromConfig`](crate::traits::FromConfig), and guarantees at most one
//! pool per key. A pool's address is a pure function of its key, see
//! [`pool_address`](crate::domain::pool_address).

mod registry;

pub use registry::PoolRegistry;
