//! Flash-swap callback boundary.
//!
//! When a swap is called with non-empty `data`, the pool pays the requested
//! outputs first and then hands control to the recipient's [`SwapCallee`].
//! The callee can do anything the exchange allows, including trading on
//! other pools, as long as the pool's invariant holds once it returns.
//! Re-entering the pool that is mid-swap fails with
//! [`AmmError::Reentrancy`].

use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::exchange::Exchange;

/// The flash-swap request passed to a [`SwapCallee`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapCallback<'a> {
    /// Pool executing the swap.
    pub pool: Address,
    /// Account that called `swap`.
    pub sender: Address,
    /// Asset A already paid to the recipient.
    pub amount_a_out: Amount,
    /// Asset B already paid to the recipient.
    pub amount_b_out: Amount,
    /// Opaque caller data.
    pub data: &'a [u8],
}

/// A contract that receives flash-swap callbacks.
///
/// Registered per recipient address with
/// [`Exchange::register_callee`](crate::Exchange::register_callee).
pub trait SwapCallee {
    /// Called after the outputs were transferred and before the invariant
    /// check. Returning `Err` aborts the swap.
    ///
    /// # Errors
    ///
    /// Any error aborts the enclosing swap, which is then rolled back.
    fn on_swap(&mut self, exchange: &mut Exchange, callback: SwapCallback<'_>) -> Result<(), AmmError>;
}
