//! Fungible balance ledger.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Amount, Event, EventLog};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// Descriptive metadata of a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Human-readable name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Display decimals.
    pub decimals: u8,
}

impl TokenMetadata {
    /// Creates metadata from its three parts.
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Metadata shared by every pool's share ledger.
    #[must_use]
    pub fn pool_shares() -> Self {
        Self::new("Offset AMM Shares", "OAMM-S", 18)
    }
}

/// A fungible-token ledger: balances, allowances and total supply.
///
/// Used both for the assets pools trade and for each pool's own share
/// token. Every mutation appends the matching [`Event`] to the supplied
/// log; minting is reported as a transfer from the zero address and
/// burning as a transfer to it.
///
/// Operations check everything before mutating, so a failed call leaves
/// the ledger untouched.
///
/// # Examples
///
/// ```
/// use offset_amm::domain::{Address, Amount, EventLog};
/// use offset_amm::ledger::{LedgerToken, TokenMetadata};
///
/// let token_addr = Address::from_bytes([9u8; 32]);
/// let alice = Address::from_bytes([1u8; 32]);
/// let bob = Address::from_bytes([2u8; 32]);
/// let mut log = EventLog::new();
///
/// let mut token = LedgerToken::new(token_addr, TokenMetadata::new("Test", "TST", 18));
/// token.mint(alice, Amount::new(100), &mut log).expect("mint");
/// token.transfer(alice, bob, Amount::new(40), &mut log).expect("transfer");
///
/// assert_eq!(token.balance_of(&alice), Amount::new(60));
/// assert_eq!(token.balance_of(&bob), Amount::new(40));
/// assert_eq!(log.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerToken {
    address: Address,
    metadata: TokenMetadata,
    total_supply: Amount,
    balances: BTreeMap<Address, Amount>,
    allowances: BTreeMap<(Address, Address), Amount>,
}

impl LedgerToken {
    /// Creates an empty ledger living at `address`.
    #[must_use]
    pub fn new(address: Address, metadata: TokenMetadata) -> Self {
        Self {
            address,
            metadata,
            total_supply: Amount::ZERO,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
        }
    }

    /// Returns the ledger's own address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the ledger's metadata.
    #[must_use]
    pub const fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    /// Returns the ledger's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Returns the ledger's symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Returns the ledger's display decimals.
    #[must_use]
    pub const fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    /// Returns the outstanding supply.
    #[must_use]
    pub const fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Returns `holder`'s balance, zero if it never held any.
    #[must_use]
    pub fn balance_of(&self, holder: &Address) -> Amount {
        self.balances.get(holder).copied().unwrap_or(Amount::ZERO)
    }

    /// Returns what `spender` may still move on behalf of `owner`.
    #[must_use]
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Moves `amount` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds less than
    /// `amount`, or [`AmmError::Overflow`] if `to`'s balance would overflow.
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: Amount,
        log: &mut EventLog,
    ) -> Result<(), AmmError> {
        self.move_balance(from, to, amount)?;
        log.emit(Event::Transfer {
            token: self.address,
            from,
            to,
            amount,
        });
        Ok(())
    }

    /// Sets `spender`'s allowance over `owner`'s balance to `amount`.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: Amount, log: &mut EventLog) {
        self.allowances.insert((owner, spender), amount);
        log.emit(Event::Approval {
            token: self.address,
            owner,
            spender,
            amount,
        });
    }

    /// Moves `amount` from `from` to `to` on behalf of `spender`, consuming
    /// allowance. An allowance of `u128::MAX` is never decreased.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientAllowance`] if the allowance is too
    /// low, plus the errors of [`LedgerToken::transfer`].
    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
        log: &mut EventLog,
    ) -> Result<(), AmmError> {
        let allowed = self.allowance(&from, &spender);
        if allowed < amount {
            return Err(AmmError::InsufficientAllowance);
        }
        self.move_balance(from, to, amount)?;
        if allowed != Amount::MAX {
            self.allowances
                .insert((from, spender), allowed.saturating_sub(&amount));
        }
        log.emit(Event::Transfer {
            token: self.address,
            from,
            to,
            amount,
        });
        Ok(())
    }

    /// Creates `amount` new units for `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the supply would overflow.
    pub fn mint(&mut self, to: Address, amount: Amount, log: &mut EventLog) -> Result<(), AmmError> {
        let supply = self
            .total_supply
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("total supply overflow"))?;
        let balance = self.balance_of(&to).safe_add(&amount)?;
        self.total_supply = supply;
        self.balances.insert(to, balance);
        log.emit(Event::Transfer {
            token: self.address,
            from: Address::zero(),
            to,
            amount,
        });
        Ok(())
    }

    /// Destroys `amount` units held by `from`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds less than
    /// `amount`.
    pub fn burn(&mut self, from: Address, amount: Amount, log: &mut EventLog) -> Result<(), AmmError> {
        let balance = self
            .balance_of(&from)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        let supply = self.total_supply.safe_sub(&amount)?;
        self.balances.insert(from, balance);
        self.total_supply = supply;
        log.emit(Event::Transfer {
            token: self.address,
            from,
            to: Address::zero(),
            amount,
        });
        Ok(())
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), AmmError> {
        let from_balance = self
            .balance_of(&from)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        if from == to {
            return Ok(());
        }
        let to_balance = self
            .balance_of(&to)
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("balance overflow"))?;
        self.balances.insert(from, from_balance);
        self.balances.insert(to, to_balance);
        Ok(())
    }
}
