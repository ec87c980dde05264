//! Core trait abstractions at the engine's seams.
//!
//! - [`AssetLedger`]: how a pool reads and moves the assets it trades.
//! - [`SwapCallee`]: the flash-swap callback boundary.
//! - [`FromConfig`]: configuration-driven pool construction.

mod asset_ledger;
mod from_config;
mod swap_callee;

pub use asset_ledger::AssetLedger;
pub use from_config::FromConfig;
pub use swap_callee::{SwapCallback, SwapCallee};
