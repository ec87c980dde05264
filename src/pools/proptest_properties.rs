//! Property-based tests using `proptest` for pool invariant validation.
//!
//! 1. **Invariant monotonicity**: effective `k` never decreases across a
//!    random swap sequence and grows strictly when the fee is taken.
//! 2. **Exact quote is tight**: the quoted output settles, one more unit
//!    violates the invariant.
//! 3. **Minimum shares permanence**: full withdrawal leaves the locked
//!    shares in place.
//! 4. **Mint/burn near-inverse**: adding then removing liquidity returns
//!    slightly less than deposited, never more.
//! 5. **Deterministic addressing**: asset order never changes a pool's
//!    address.

use proptest::prelude::*;

use super::MINIMUM_SHARES;
use crate::config::ExchangeConfig;
use crate::domain::{pool_address, Address, Amount, VirtualRatio};
use crate::error::AmmError;
use crate::exchange::Exchange;
use crate::ledger::TokenMetadata;
use crate::math::{get_amount_out, U256};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const SUPPLY: u128 = 1 << 100;

fn asset_x() -> Address {
    Address::from_bytes([1u8; 32])
}

fn asset_y() -> Address {
    Address::from_bytes([2u8; 32])
}

fn lp() -> Address {
    Address::from_bytes([0x11; 32])
}

fn trader() -> Address {
    Address::from_bytes([0x22; 32])
}

/// A funded exchange with one pool seeded with `(ra, rb)`.
fn seeded(virt: u32, ra: u128, rb: u128) -> Option<(Exchange, Address)> {
    let mut ex = Exchange::new(ExchangeConfig::new(Address::from_bytes([0xad; 32])));
    for asset in [asset_x(), asset_y()] {
        ex.deploy_asset(asset, TokenMetadata::new("T", "T", 18), lp(), Amount::new(SUPPLY))
            .ok()?;
        ex.transfer(lp(), asset, trader(), Amount::new(SUPPLY / 2)).ok()?;
    }
    let pool = ex.create_pool(asset_x(), asset_y(), VirtualRatio::new(virt)).ok()?;
    ex.transfer(lp(), asset_x(), pool, Amount::new(ra)).ok()?;
    ex.transfer(lp(), asset_y(), pool, Amount::new(rb)).ok()?;
    let minted = ex.mint(lp(), pool, lp()).ok()?;
    if minted.is_zero() {
        return None;
    }
    Some((ex, pool))
}

fn effective_k(ex: &Exchange, pool: &Address) -> U256 {
    let Some(engine) = ex.pool(pool) else {
        panic!("pool exists");
    };
    let (a, b, _) = engine.get_reserves();
    U256::from(a.get()) * U256::from(b.get())
}

/// Pays `amount_in` of one side and takes the exact quoted output of the
/// other. Returns the output, or `None` if the trade is too small to quote.
fn exact_in(ex: &mut Exchange, pool: Address, a_to_b: bool, amount_in: u128) -> Option<Amount> {
    let engine = ex.pool(&pool)?;
    let (ra, rb, _) = engine.get_reserves();
    let (real_a, real_b) = engine.real_reserves();
    let (asset_in, reserve_in, reserve_out, real_out) = if a_to_b {
        (asset_x(), ra, rb, real_b)
    } else {
        (asset_y(), rb, ra, real_a)
    };
    let out = get_amount_out(Amount::new(amount_in), reserve_in, reserve_out).ok()?;
    if out.is_zero() || out >= real_out {
        return None;
    }
    ex.transfer(trader(), asset_in, pool, Amount::new(amount_in)).ok()?;
    let (a_out, b_out) = if a_to_b { (Amount::ZERO, out) } else { (out, Amount::ZERO) };
    let Ok(_) = ex.swap(trader(), pool, a_out, b_out, trader(), &[]) else {
        panic!("exact quote must settle");
    };
    Some(out)
}

fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000_000_000u128..=1_000_000_000_000_000_000_000u128
}

fn virt_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![Just(0u32), Just(1_000u32), 1u32..=20_000u32]
}

// ---------------------------------------------------------------------------
// Property 1: Invariant monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_effective_k_grows_with_every_swap(
        virt in virt_strategy(),
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        trades in prop::collection::vec((any::<bool>(), 1u32..=1_000u32), 1..12),
    ) {
        let Some((mut ex, pool)) = seeded(virt, ra, rb) else {
            return Ok(());
        };
        for (a_to_b, per_mille) in trades {
            let Some(engine) = ex.pool(&pool) else {
                return Ok(());
            };
            let (real_a, real_b) = engine.real_reserves();
            let base = if a_to_b { real_a.get() } else { real_b.get() };
            let amount_in = base / 1_000 * u128::from(per_mille);
            let before = effective_k(&ex, &pool);
            if exact_in(&mut ex, pool, a_to_b, amount_in).is_none() {
                continue;
            }
            let after = effective_k(&ex, &pool);
            prop_assert!(after > before, "k must grow: before={} after={}", before, after);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Exact quote is tight
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_one_unit_more_than_quote_fails(
        virt in virt_strategy(),
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        per_mille in 1u32..=1_000u32,
    ) {
        let Some((mut ex, pool)) = seeded(virt, ra, rb) else {
            return Ok(());
        };
        let amount_in = ra / 1_000 * u128::from(per_mille);
        let Some(engine) = ex.pool(&pool) else {
            return Ok(());
        };
        let (ea, eb, _) = engine.get_reserves();
        let Ok(out) = get_amount_out(Amount::new(amount_in), ea, eb) else {
            return Ok(());
        };
        let (_, real_b) = engine.real_reserves();
        if out.is_zero() || out.get() + 1 >= real_b.get() {
            return Ok(());
        }
        let Ok(()) = ex.transfer(trader(), asset_x(), pool, Amount::new(amount_in)) else {
            return Ok(());
        };
        let greedy = ex.swap(trader(), pool, Amount::ZERO, Amount::new(out.get() + 1), trader(), &[]);
        prop_assert_eq!(greedy, Err(AmmError::InvariantViolation));
        prop_assert!(ex.swap(trader(), pool, Amount::ZERO, out, trader(), &[]).is_ok());
    }
}

// ---------------------------------------------------------------------------
// Property 3: Minimum shares permanence
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_minimum_shares_survive_full_withdrawal(
        virt in virt_strategy(),
        ra in reserve_strategy(),
        rb in reserve_strategy(),
    ) {
        let Some((mut ex, pool)) = seeded(virt, ra, rb) else {
            return Ok(());
        };
        let Ok(held) = ex.balance_of(&pool, &lp()) else {
            return Ok(());
        };
        let Ok(()) = ex.transfer(lp(), pool, pool, held) else {
            return Ok(());
        };
        if ex.burn(lp(), pool, lp()).is_err() {
            return Ok(());
        }
        prop_assert_eq!(ex.total_supply(&pool), Ok(MINIMUM_SHARES));
        prop_assert_eq!(ex.balance_of(&pool, &Address::zero()), Ok(MINIMUM_SHARES));
        let Some(engine) = ex.pool(&pool) else {
            return Ok(());
        };
        let (real_a, real_b) = engine.real_reserves();
        prop_assert!(!real_a.is_zero() && !real_b.is_zero());
    }
}

// ---------------------------------------------------------------------------
// Property 4: Mint/burn near-inverse
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_add_then_remove_returns_at_most_deposit(
        virt in virt_strategy(),
        ra in reserve_strategy(),
        skew in 1u128..=100u128,
        per_cent in 1u128..=100u128,
    ) {
        let rb = ra / skew;
        let Some((mut ex, pool)) = seeded(virt, ra, rb) else {
            return Ok(());
        };
        let da = ra / 100 * per_cent;
        let db = rb / 100 * per_cent;
        if da == 0 || db == 0 {
            return Ok(());
        }
        let Ok(()) = ex.transfer(trader(), asset_x(), pool, Amount::new(da)) else {
            return Ok(());
        };
        let Ok(()) = ex.transfer(trader(), asset_y(), pool, Amount::new(db)) else {
            return Ok(());
        };
        let Ok(shares) = ex.mint(trader(), pool, trader()) else {
            return Ok(());
        };
        let Ok(()) = ex.transfer(trader(), pool, pool, shares) else {
            return Ok(());
        };
        let Ok((out_a, out_b)) = ex.burn(trader(), pool, trader()) else {
            return Ok(());
        };
        prop_assert!(out_a.get() <= da && out_b.get() <= db);
        prop_assert!(out_a.get() >= da - da / 100, "a: {} vs {}", out_a, da);
        prop_assert!(out_b.get() >= db - db / 100, "b: {} vs {}", out_b, db);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Deterministic addressing
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_pool_address_ignores_asset_order(
        x in any::<[u8; 32]>(),
        y in any::<[u8; 32]>(),
        virt in any::<u32>(),
    ) {
        let (x, y) = (Address::from_bytes(x), Address::from_bytes(y));
        let r = VirtualRatio::new(virt);
        if x == y {
            prop_assert_eq!(pool_address(x, y, r), Err(AmmError::IdenticalAssets));
        } else {
            prop_assert_eq!(pool_address(x, y, r), pool_address(y, x, r));
        }
    }
}
