//! Declarative blueprints for pools and exchange hosts.
//!
//! - [`PoolConfig`] describes one pool; the registry turns it into a
//!   [`PoolEngine`](crate::pools::PoolEngine) via
//!   [`FromConfig`](crate::traits::FromConfig).
//! - [`ExchangeConfig`] describes an [`Exchange`](crate::Exchange) at
//!   start-up and can be deserialized with `serde`.

mod exchange_config;
mod pool_config;

pub use exchange_config::ExchangeConfig;
pub use pool_config::PoolConfig;
