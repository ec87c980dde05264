//! UQ112x112 fixed-point prices.
//!
//! A price is a 256-bit value with 112 fractional bits. Because effective
//! reserves are bounded by [`MAX_RESERVE`], `reserve << 112` always fits in
//! 224 bits, leaving 32 bits of headroom for multiplication by elapsed
//! seconds before the accumulators wrap.

use super::U256;
use crate::domain::Amount;
use crate::error::AmmError;

/// Number of fractional bits.
pub const RESOLUTION: usize = 112;

/// Largest effective reserve a pool may hold: `2^112 - 1`.
pub const MAX_RESERVE: Amount = Amount::new((1u128 << RESOLUTION) - 1);

/// `1.0` in UQ112x112.
#[must_use]
pub fn q112() -> U256 {
    U256::one() << RESOLUTION
}

/// Encodes an integer amount as UQ112x112.
#[must_use]
pub fn encode(value: Amount) -> U256 {
    U256::from(value.get()) << RESOLUTION
}

/// Price of one unit of `base` denominated in `quote`: `quote / base` in
/// UQ112x112.
///
/// # Errors
///
/// Returns [`AmmError::DivisionByZero`] if `base` is zero, or
/// [`AmmError::Overflow`] if `quote` exceeds [`MAX_RESERVE`].
pub fn price(quote: Amount, base: Amount) -> crate::error::Result<U256> {
    if base.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    if quote > MAX_RESERVE {
        return Err(AmmError::Overflow("uq112x112 encode overflow"));
    }
    Ok(encode(quote) / U256::from(base.get()))
}
