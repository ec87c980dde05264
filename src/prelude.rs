//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use offset_amm::prelude::*;
//! ```

pub use crate::config::{ExchangeConfig, PoolConfig};
pub use crate::domain::{pool_address, Address, Amount, AssetPair, Event, EventLog, VirtualRatio};
pub use crate::error::{AmmError, Result};
pub use crate::exchange::Exchange;
pub use crate::factory::PoolRegistry;
pub use crate::ledger::{AssetBank, LedgerToken, TokenMetadata};
pub use crate::math::{get_amount_in, get_amount_out, quote, CheckedArithmetic, U256};
pub use crate::pools::{CallContext, PoolEngine, SwapReceipt, MINIMUM_SHARES};
pub use crate::traits::{AssetLedger, FromConfig, SwapCallback, SwapCallee};
