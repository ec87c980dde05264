//! Time-weighted cumulative price tracking.
//!
//! Each pool integrates its marginal price over time. The integrals are
//! meaningless on their own; an observer samples them twice and divides:
//!
//! ```text
//! twap = (cumulative_2 - cumulative_1) / (t_2 - t_1)      (UQ112x112)
//! ```
//!
//! Both the integrals and the 32-bit timestamp wrap. Differences taken with
//! wrapping subtraction stay correct across a wrap as long as samples are
//! less than 2^32 seconds apart.

use crate::domain::Amount;
use crate::error::AmmError;
use crate::math::{price, U256};

/// Reduces a clock reading to the 32-bit timestamp the accumulator keeps.
#[must_use]
pub const fn block_timestamp(now: u64) -> u32 {
    (now & 0xFFFF_FFFF) as u32
}

/// Wrapping price integrals of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceAccumulator {
    price_a_cumulative: U256,
    price_b_cumulative: U256,
    last_update: u32,
}

impl PriceAccumulator {
    /// An accumulator with zero integrals, last updated at `now`.
    #[must_use]
    pub fn new(now: u64) -> Self {
        Self {
            price_a_cumulative: U256::zero(),
            price_b_cumulative: U256::zero(),
            last_update: block_timestamp(now),
        }
    }

    /// Integral of the price of A in terms of B.
    #[must_use]
    pub const fn price_a_cumulative(&self) -> U256 {
        self.price_a_cumulative
    }

    /// Integral of the price of B in terms of A.
    #[must_use]
    pub const fn price_b_cumulative(&self) -> U256 {
        self.price_b_cumulative
    }

    /// Timestamp (mod 2^32) of the last update.
    #[must_use]
    pub const fn last_update(&self) -> u32 {
        self.last_update
    }

    /// Accrues the prices implied by the reserves that were in force since
    /// the last update, then moves the timestamp to `now`.
    ///
    /// Nothing accrues if no time passed or either reserve was zero.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if a reserve exceeds 112 bits.
    pub fn update(&mut self, reserve_a: Amount, reserve_b: Amount, now: u64) -> Result<(), AmmError> {
        let timestamp = block_timestamp(now);
        let elapsed = timestamp.wrapping_sub(self.last_update);
        if elapsed > 0 && !reserve_a.is_zero() && !reserve_b.is_zero() {
            let elapsed = U256::from(elapsed);
            let (accrued_a, _) = price(reserve_b, reserve_a)?.overflowing_mul(elapsed);
            let (accrued_b, _) = price(reserve_a, reserve_b)?.overflowing_mul(elapsed);
            self.price_a_cumulative = self.price_a_cumulative.overflowing_add(accrued_a).0;
            self.price_b_cumulative = self.price_b_cumulative.overflowing_add(accrued_b).0;
        }
        self.last_update = timestamp;
        Ok(())
    }
}

/// Average UQ112x112 price between two samples of one integral.
///
/// # Errors
///
/// Returns [`AmmError::DivisionByZero`] if the samples share a timestamp.
pub fn average_price(older: U256, newer: U256, elapsed: u32) -> Result<U256, AmmError> {
    if elapsed == 0 {
        return Err(AmmError::DivisionByZero);
    }
    Ok(newer.overflowing_sub(older).0 / U256::from(elapsed))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::math::q112;

    #[test]
    fn first_update_only_sets_timestamp() {
        let mut acc = PriceAccumulator::default();
        let Ok(()) = acc.update(Amount::ZERO, Amount::ZERO, 100) else {
            panic!("expected Ok");
        };
        assert_eq!(acc.last_update(), 100);
        assert!(acc.price_a_cumulative().is_zero());
    }

    #[test]
    fn accrues_elapsed_times_price() {
        let mut acc = PriceAccumulator::new(10);
        let Ok(()) = acc.update(Amount::new(1_000), Amount::new(4_000), 20) else {
            panic!("expected Ok");
        };
        assert_eq!(acc.price_a_cumulative(), q112() * U256::from(40u8));
        assert_eq!(acc.price_b_cumulative(), q112() / U256::from(4u8) * U256::from(10u8));
    }

    #[test]
    fn no_accrual_without_elapsed_time() {
        let mut acc = PriceAccumulator::new(10);
        let Ok(()) = acc.update(Amount::new(1), Amount::new(1), 10) else {
            panic!("expected Ok");
        };
        assert!(acc.price_a_cumulative().is_zero());
    }

    #[test]
    fn timestamp_wraps() {
        let mut acc = PriceAccumulator::new(u64::from(u32::MAX));
        let Ok(()) = acc.update(Amount::new(5), Amount::new(5), u64::from(u32::MAX) + 3) else {
            panic!("expected Ok");
        };
        assert_eq!(acc.last_update(), 2);
        assert_eq!(acc.price_a_cumulative(), q112() * U256::from(3u8));
    }

    #[test]
    fn average_price_between_samples() {
        let mut acc = PriceAccumulator::new(0);
        let Ok(()) = acc.update(Amount::new(2), Amount::new(2), 5) else {
            panic!("expected Ok");
        };
        let first = acc.price_a_cumulative();
        let Ok(()) = acc.update(Amount::new(1), Amount::new(3), 15) else {
            panic!("expected Ok");
        };
        let avg = average_price(first, acc.price_a_cumulative(), 10);
        assert_eq!(avg, Ok(q112() * U256::from(3u8)));
        assert_eq!(average_price(first, first, 0), Err(AmmError::DivisionByZero));
    }

    #[test]
    fn average_price_survives_integral_wrap() {
        let older = U256::MAX - U256::from(9u8);
        let newer = U256::from(10u8);
        assert_eq!(average_price(older, newer, 4), Ok(U256::from(5u8)));
    }
}
