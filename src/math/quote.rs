//! Pure quoting helpers for sizing trades against a pool.
//!
//! Callers pass **effective** reserves (as returned by
//! `PoolEngine::get_reserves`), since that is what the pool's invariant is
//! enforced on.

use super::wide::{mul, narrow, widen};
use super::U256;
use crate::domain::Amount;
use crate::error::AmmError;

/// Trading fee numerator, taken from every swap input.
pub const SWAP_FEE_NUMERATOR: u128 = 3;

/// Trading fee denominator.
pub const SWAP_FEE_DENOMINATOR: u128 = 1_000;

/// Given an input amount and a pair of reserves, returns the maximum output
/// the pool will pay after the 0.3% fee.
///
/// `out = in * 997 * reserve_out / (reserve_in * 1000 + in * 997)`
///
/// # Errors
///
/// - [`AmmError::InsufficientInputAmount`] if `amount_in` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
/// - [`AmmError::Overflow`] if the result exceeds 128 bits.
///
/// # Examples
///
/// ```
/// use offset_amm::domain::Amount;
/// use offset_amm::math::get_amount_out;
///
/// let out = get_amount_out(Amount::new(1_000), Amount::new(100_000), Amount::new(100_000));
/// assert_eq!(out, Ok(Amount::new(987)));
/// ```
pub fn get_amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
) -> crate::error::Result<Amount> {
    if amount_in.is_zero() {
        return Err(AmmError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let with_fee = mul(
        widen(amount_in),
        U256::from(SWAP_FEE_DENOMINATOR - SWAP_FEE_NUMERATOR),
        "amount out overflow",
    )?;
    let numerator = mul(with_fee, widen(reserve_out), "amount out overflow")?;
    let denominator = mul(
        widen(reserve_in),
        U256::from(SWAP_FEE_DENOMINATOR),
        "amount out overflow",
    )?
    .checked_add(with_fee)
    .ok_or(AmmError::Overflow("amount out overflow"))?;
    narrow(numerator / denominator, "amount out overflow")
}

/// Given a desired output and a pair of reserves, returns the minimum input
/// that satisfies the invariant, rounded up.
///
/// `in = reserve_in * out * 1000 / ((reserve_out - out) * 997) + 1`
///
/// # Errors
///
/// - [`AmmError::InsufficientOutputAmount`] if `amount_out` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero or
///   `amount_out >= reserve_out`.
/// - [`AmmError::Overflow`] if the result exceeds 128 bits.
pub fn get_amount_in(
    amount_out: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
) -> crate::error::Result<Amount> {
    if amount_out.is_zero() {
        return Err(AmmError::InsufficientOutputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }
    let numerator = mul(
        mul(widen(reserve_in), widen(amount_out), "amount in overflow")?,
        U256::from(SWAP_FEE_DENOMINATOR),
        "amount in overflow",
    )?;
    let remaining = reserve_out.get() - amount_out.get();
    let denominator = mul(
        U256::from(remaining),
        U256::from(SWAP_FEE_DENOMINATOR - SWAP_FEE_NUMERATOR),
        "amount in overflow",
    )?;
    narrow(numerator / denominator + U256::one(), "amount in overflow")
}

/// Given an amount of one asset and a pair of reserves, returns the
/// equivalent amount of the other asset at the current price, without fee.
///
/// # Errors
///
/// - [`AmmError::InsufficientInputAmount`] if `amount_a` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
/// - [`AmmError::Overflow`] if the result exceeds 128 bits.
pub fn quote(amount_a: Amount, reserve_a: Amount, reserve_b: Amount) -> crate::error::Result<Amount> {
    if amount_a.is_zero() {
        return Err(AmmError::InsufficientInputAmount);
    }
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let product = mul(widen(amount_a), widen(reserve_b), "quote overflow")?;
    narrow(product / widen(reserve_a), "quote overflow")
}
