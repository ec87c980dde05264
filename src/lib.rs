//! # Offset AMM
//!
//! A pairwise constant-product liquidity pool engine with virtual reserve
//! offsets.
//!
//! Each pool trades two fungible assets under the invariant
//! `(reserve_a + v_a) · (reserve_b + v_b) ≥ k`, where the virtual offsets
//! `v_a`, `v_b` are set by a per-pool ratio (`virt / 10_000`). The offsets
//! deepen the pricing curve without any real balance backing them. With a
//! ratio of zero the pool is a plain constant-product market.
//!
//! Pools issue fungible shares, charge a 0.3% trading fee, optionally
//! accrue a 1/6 protocol cut of fee growth, support flash swaps through a
//! callback, and integrate a time-weighted price for oracle use.
//!
//! ## Create a pool, provide liquidity and trade
//!
//! ```rust
//! use offset_amm::prelude::*;
//!
//! const E18: u128 = 1_000_000_000_000_000_000;
//! let admin = Address::from_bytes([0xad; 32]);
//! let lp = Address::from_bytes([0x11; 32]);
//! let (x, y) = (Address::from_bytes([1; 32]), Address::from_bytes([2; 32]));
//!
//! let mut ex = Exchange::new(ExchangeConfig::new(admin));
//! ex.deploy_asset(x, TokenMetadata::new("X", "X", 18), lp, Amount::new(10 * E18)).expect("deploy");
//! ex.deploy_asset(y, TokenMetadata::new("Y", "Y", 18), lp, Amount::new(10 * E18)).expect("deploy");
//!
//! // r = 0.1
//! let pool = ex.create_pool(x, y, VirtualRatio::new(1_000)).expect("create");
//!
//! // Transfer first, call second.
//! ex.transfer(lp, x, pool, Amount::new(E18)).expect("deposit");
//! ex.transfer(lp, y, pool, Amount::new(4 * E18)).expect("deposit");
//! let shares = ex.mint(lp, pool, lp).expect("mint");
//! assert_eq!(shares, Amount::new(2_200_000_000_000_000_000 - 1_000));
//!
//! // Reserves include the virtual offsets.
//! let (ra, rb, _) = ex.pool(&pool).expect("pool").get_reserves();
//! assert_eq!(ra, Amount::new(1_100_000_000_000_000_000));
//! assert_eq!(rb, Amount::new(4_400_000_000_000_000_000));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Exchange    │  clock, atomic calls, flash-swap callbacks
//! └──────┬───────┘
//!        │
//!        ├──────────────────────┐
//!        ▼                      ▼
//! ┌──────────────┐      ┌──────────────┐
//! │ PoolRegistry  │      │  AssetBank    │  deployed LedgerTokens
//! └──────┬───────┘      └──────▲───────┘
//!        │ owns                 │ AssetLedger
//!        ▼                      │
//! ┌──────────────┐              │
//! │  PoolEngine   │─────────────┘
//! └──────┬───────┘
//!        │ shares + PriceAccumulator
//!        ▼
//! ┌──────────────┐
//! │    Domain     │  Address, Amount, VirtualRatio, Event, …
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Address`](domain::Address), [`Amount`](domain::Amount), [`VirtualRatio`](domain::VirtualRatio), [`Event`](domain::Event) |
//! | [`ledger`] | [`LedgerToken`](ledger::LedgerToken) and the [`AssetBank`](ledger::AssetBank) |
//! | [`pools`] | [`PoolEngine`](pools::PoolEngine) and [`PriceAccumulator`](pools::PriceAccumulator) |
//! | [`factory`] | [`PoolRegistry`](factory::PoolRegistry) |
//! | [`exchange`] | [`Exchange`] host runtime |
//! | [`traits`] | [`AssetLedger`](traits::AssetLedger), [`SwapCallee`](traits::SwapCallee), [`FromConfig`](traits::FromConfig) |
//! | [`config`] | [`PoolConfig`](config::PoolConfig), [`ExchangeConfig`](config::ExchangeConfig) |
//! | [`math`] | Checked and 256-bit arithmetic, UQ112x112, quoting |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod factory;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;

pub use exchange::Exchange;
