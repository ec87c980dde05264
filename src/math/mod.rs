//! Arithmetic utilities for the pool engine.
//!
//! This module provides [`CheckedArithmetic`] for overflow-safe operations
//! on [`Amount`](crate::domain::Amount), a 256-bit [`U256`] for
//! intermediate products, an integer square root, UQ112x112 price
//! encoding and the pure quoting helpers.
//!
//! | Item | Use |
//! |------|-----|
//! | [`U256`], [`mul_div`] | invariant and share math without overflow |
//! | [`isqrt`] | initial share issue, protocol fee |
//! | [`price`], [`MAX_RESERVE`] | price accumulator |
//! | [`get_amount_out`], [`get_amount_in`], [`quote`] | trade sizing |

mod checked;
mod quote;
mod sqrt;
mod uq112x112;
mod wide;

pub use checked::CheckedArithmetic;
pub use quote::{get_amount_in, get_amount_out, quote, SWAP_FEE_DENOMINATOR, SWAP_FEE_NUMERATOR};
pub use sqrt::isqrt;
pub use uq112x112::{encode, price, q112, MAX_RESERVE, RESOLUTION};
pub use wide::{mul, mul_div, narrow, widen, U256};
