//! Generic construction trait for pool instantiation from configuration.
//!
//! [`FromConfig`] provides a uniform interface for creating a pool from its
//! configuration struct. The [`PoolRegistry`](crate::factory::PoolRegistry)
//! uses it when registering a new pool:
//!
//! ```text
//! PoolConfig::new(x, y, ratio)? => PoolEngine::from_config(&cfg)?
//! ```
//!
//! # Validation Contract
//!
//! Implementations **must** validate all configuration invariants during
//! construction. A successfully constructed pool is guaranteed to be in a
//! valid initial state.

use crate::error::AmmError;

/// Generic construction trait for building a pool from a configuration.
///
/// # Implementors
///
/// - `impl FromConfig<PoolConfig> for PoolEngine`
///
/// # Errors
///
/// Returns the first configuration invariant the input violates.
pub trait FromConfig<C>: Sized {
    /// Constructs a new instance from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an [`AmmError`] if the configuration is invalid.
    fn from_config(config: &C) -> Result<Self, AmmError>;
}
