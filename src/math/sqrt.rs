//! Integer square root.

use super::U256;

/// Floor square root by Babylonian iteration.
///
/// Used for the initial share issue and for the protocol-fee comparison of
/// `sqrt(k)` against `sqrt(k_last)`.
#[must_use]
pub fn isqrt(n: U256) -> U256 {
    if n.is_zero() {
        return U256::zero();
    }
    let mut x = n;
    let mut y = (x >> 1) + (x & U256::one());
    while y < x {
        x = y;
        y = (x + n / x) >> 1;
    }
    x
}
