//! Collection of deployed asset ledgers.

use std::collections::BTreeMap;

use super::{LedgerToken, TokenMetadata};
use crate::domain::{Address, Amount, EventLog};
use crate::error::AmmError;
use crate::traits::AssetLedger;

/// Every asset deployed on an exchange, keyed by ledger address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetBank {
    assets: BTreeMap<Address, LedgerToken>,
}

impl AssetBank {
    /// Creates an empty bank.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploys a new asset at `address` and mints `supply` to `holder`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::AssetExists`] if the address is taken.
    pub fn deploy(
        &mut self,
        address: Address,
        metadata: TokenMetadata,
        holder: Address,
        supply: Amount,
        log: &mut EventLog,
    ) -> Result<(), AmmError> {
        if self.assets.contains_key(&address) {
            return Err(AmmError::AssetExists);
        }
        let mut token = LedgerToken::new(address, metadata);
        if !supply.is_zero() {
            token.mint(holder, supply, log)?;
        }
        self.assets.insert(address, token);
        Ok(())
    }

    /// Returns `true` if an asset is deployed at `address`.
    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.assets.contains_key(address)
    }

    /// Returns the ledger at `address`.
    #[must_use]
    pub fn get(&self, address: &Address) -> Option<&LedgerToken> {
        self.assets.get(address)
    }

    /// Returns the ledger at `address` mutably.
    pub fn get_mut(&mut self, address: &Address) -> Option<&mut LedgerToken> {
        self.assets.get_mut(address)
    }

    /// Number of deployed assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Returns `true` if nothing is deployed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetLedger for AssetBank {
    fn balance_of(&self, asset: &Address, holder: &Address) -> Result<Amount, AmmError> {
        self.assets
            .get(asset)
            .map(|token| token.balance_of(holder))
            .ok_or(AmmError::UnknownAsset)
    }

    fn transfer(
        &mut self,
        asset: &Address,
        from: Address,
        to: Address,
        amount: Amount,
        log: &mut EventLog,
    ) -> Result<(), AmmError> {
        self.assets
            .get_mut(asset)
            .ok_or(AmmError::UnknownAsset)?
            .transfer(from, to, amount, log)
    }
}
