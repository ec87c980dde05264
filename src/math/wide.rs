//! 256-bit intermediates for products of two 128-bit amounts.

use uint::construct_uint;

use crate::domain::Amount;
use crate::error::AmmError;

construct_uint! {
    /// Unsigned 256-bit integer for overflow-free intermediate products.
    pub struct U256(4);
}

/// Widens an amount to 256 bits.
#[inline]
#[must_use]
pub fn widen(amount: Amount) -> U256 {
    U256::from(amount.get())
}

/// Narrows a 256-bit value back to an amount.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] with `context` if the value does not fit
/// in 128 bits.
#[inline]
pub fn narrow(value: U256, context: &'static str) -> crate::error::Result<Amount> {
    if value > U256::from(u128::MAX) {
        return Err(AmmError::Overflow(context));
    }
    Ok(Amount::new(value.low_u128()))
}

/// Checked 256-bit multiplication.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] with `context` on overflow.
#[inline]
pub fn mul(a: U256, b: U256, context: &'static str) -> crate::error::Result<U256> {
    a.checked_mul(b).ok_or(AmmError::Overflow(context))
}

/// `floor(a * b / d)` with a 256-bit intermediate, narrowed to an amount.
///
/// # Errors
///
/// Returns [`AmmError::DivisionByZero`] if `d` is zero, or
/// [`AmmError::Overflow`] with `context` if the quotient exceeds 128 bits.
pub fn mul_div(a: Amount, b: Amount, d: Amount, context: &'static str) -> crate::error::Result<Amount> {
    if d.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let product = mul(widen(a), widen(b), context)?;
    narrow(product / widen(d), context)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn widen_narrow_identity() {
        let a = Amount::new(123_456_789);
        assert_eq!(narrow(widen(a), "t"), Ok(a));
        assert_eq!(narrow(widen(Amount::MAX), "t"), Ok(Amount::MAX));
    }

    #[test]
    fn narrow_rejects_wide() {
        let wide = widen(Amount::MAX) + U256::from(1u8);
        assert_eq!(narrow(wide, "wide"), Err(AmmError::Overflow("wide")));
    }

    #[test]
    fn mul_div_uses_wide_intermediate() {
        let big = Amount::new(u128::MAX / 2);
        assert_eq!(mul_div(big, Amount::new(4), Amount::new(4), "t"), Ok(big));
    }

    #[test]
    fn mul_div_floors() {
        assert_eq!(
            mul_div(Amount::new(10), Amount::new(10), Amount::new(3), "t"),
            Ok(Amount::new(33))
        );
    }

    #[test]
    fn mul_div_zero_divisor() {
        assert_eq!(
            mul_div(Amount::new(1), Amount::new(1), Amount::ZERO, "t"),
            Err(AmmError::DivisionByZero)
        );
    }

    #[test]
    fn mul_overflow() {
        let Err(AmmError::Overflow("m")) = mul(U256::MAX, U256::from(2u8), "m") else {
            panic!("expected Overflow");
        };
    }
}
