//! Fundamental domain value types used throughout the engine.
//!
//! Addresses, amounts, asset pairs, virtual ratios, pool keys and the
//! notifications the engine emits. Newtypes with validated constructors
//! enforce invariants at the edges.

mod address;
mod amount;
mod asset_pair;
mod event;
mod pool_key;
mod virtual_ratio;

pub use address::Address;
pub use amount::Amount;
pub use asset_pair::AssetPair;
pub use event::{Event, EventLog};
pub use pool_key::{pool_address, PoolKey, POOL_ADDRESS_DOMAIN};
pub use virtual_ratio::{VirtualRatio, VIRTUAL_RATIO_BASE};
