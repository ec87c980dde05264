//! The seam through which a pool reads and moves the assets it trades.
//!
//! A [`PoolEngine`](crate::pools::PoolEngine) never owns asset balances. It
//! learns what it holds by asking an [`AssetLedger`] for the balance of its
//! own address, and pays out through [`AssetLedger::transfer`]. Reserves
//! are then reconciled to whatever the ledger reports, which is what makes
//! "transfer first, call second" work.

use crate::domain::{Address, Amount, EventLog};
use crate::error::AmmError;

/// Balance reads and transfers across many asset ledgers.
///
/// # Implementors
///
/// - [`AssetBank`](crate::ledger::AssetBank), the exchange's collection
///   of deployed [`LedgerToken`](crate::ledger::LedgerToken)s.
pub trait AssetLedger {
    /// Returns `holder`'s balance of `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownAsset`] if no ledger exists at `asset`.
    fn balance_of(&self, asset: &Address, holder: &Address) -> Result<Amount, AmmError>;

    /// Moves `amount` of `asset` from `from` to `to`, recording the
    /// `Transfer` event in `log`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownAsset`] if no ledger exists at `asset`,
    /// or the ledger's own transfer errors.
    fn transfer(
        &mut self,
        asset: &Address,
        from: Address,
        to: Address,
        amount: Amount,
        log: &mut EventLog,
    ) -> Result<(), AmmError>;
}
