//! Fungible-token ledgers.
//!
//! [`LedgerToken`] is the balance/allowance ledger used for every asset and
//! for every pool's shares. [`AssetBank`] holds the deployed assets and is
//! the [`AssetLedger`](crate::traits::AssetLedger) pools trade through.

mod bank;
mod token;

pub use bank::AssetBank;
pub use token::{LedgerToken, TokenMetadata};
