//! The virtual-reserve pool engine and its price accumulator.
//!
//! | Item | Role |
//! |------|------|
//! | [`PoolEngine`] | reserves, shares, invariant, protocol fee |
//! | [`PriceAccumulator`] | wrapping time-weighted price integrals |
//! | [`CallContext`] | sender, clock and fee recipient of one call |
//! | [`SwapTicket`], [`SwapReceipt`] | the two halves of a swap |

mod engine;
mod price_accumulator;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use engine::{CallContext, PoolEngine, SwapReceipt, SwapTicket};
pub use price_accumulator::{average_price, block_timestamp, PriceAccumulator};

use crate::domain::Amount;

/// Shares minted to the zero address on a pool's first deposit and never
/// redeemable.
pub const MINIMUM_SHARES: Amount = Amount::new(1_000);

/// The protocol takes `1 / PROTOCOL_FEE_DENOMINATOR` of fee growth when
/// accrual is on.
pub const PROTOCOL_FEE_DENOMINATOR: u64 = 6;
