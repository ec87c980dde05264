//! The serialized host runtime.
//!
//! An [`Exchange`] owns the block clock, the deployed assets, the pool
//! registry and the event log, and runs every public call all-or-nothing:
//! the state is snapshotted on entry and restored if the call fails, which
//! discards partial transfers and share mints. The event log is never
//! copied; a failed call cuts it back to its length on entry.
//!
//! Flash-swap callees live outside the snapshot. A callee is taken out of
//! the callee table while it runs, so it cannot be called back recursively.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::config::ExchangeConfig;
use crate::domain::{pool_address, Address, Amount, Event, EventLog, VirtualRatio};
use crate::error::AmmError;
use crate::factory::PoolRegistry;
use crate::ledger::{AssetBank, LedgerToken, TokenMetadata};
use crate::pools::{CallContext, PoolEngine, SwapReceipt};
use crate::traits::{SwapCallback, SwapCallee};

#[derive(Debug, Clone, PartialEq, Eq)]
struct ExchangeState {
    timestamp: u64,
    assets: AssetBank,
    registry: PoolRegistry,
}

/// Single-owner exchange: assets, pools, clock and callbacks.
///
/// # Example
///
/// ```rust
/// use offset_amm::config::ExchangeConfig;
/// use offset_amm::domain::{Address, Amount, VirtualRatio};
/// use offset_amm::ledger::TokenMetadata;
/// use offset_amm::math::get_amount_out;
/// use offset_amm::Exchange;
///
/// const E18: u128 = 1_000_000_000_000_000_000;
/// let admin = Address::from_bytes([0xad; 32]);
/// let alice = Address::from_bytes([0x0a; 32]);
/// let usd = Address::from_bytes([0x01; 32]);
/// let eth = Address::from_bytes([0x02; 32]);
///
/// let mut ex = Exchange::new(ExchangeConfig::new(admin));
/// ex.deploy_asset(usd, TokenMetadata::new("Dollar", "USD", 18), alice, Amount::new(100 * E18)).expect("deploy");
/// ex.deploy_asset(eth, TokenMetadata::new("Ether", "ETH", 18), alice, Amount::new(100 * E18)).expect("deploy");
///
/// let pool = ex.create_pool(usd, eth, VirtualRatio::new(1_000)).expect("create");
/// ex.transfer(alice, usd, pool, Amount::new(E18)).expect("fund");
/// ex.transfer(alice, eth, pool, Amount::new(4 * E18)).expect("fund");
/// ex.mint(alice, pool, alice).expect("mint");
///
/// let (ra, rb, _) = ex.pool(&pool).expect("pool").get_reserves();
/// let out = get_amount_out(Amount::new(E18), ra, rb).expect("quote");
/// ex.transfer(alice, usd, pool, Amount::new(E18)).expect("pay");
/// ex.swap(alice, pool, Amount::ZERO, out, alice, &[]).expect("swap");
/// ```
pub struct Exchange {
    state: ExchangeState,
    events: EventLog,
    callees: HashMap<Address, Box<dyn SwapCallee>>,
}

impl fmt::Debug for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exchange")
            .field("state", &self.state)
            .field("events", &self.events.len())
            .field("callees", &self.callees.len())
            .finish()
    }
}

impl Exchange {
    /// Starts an exchange with no assets and no pools.
    #[must_use]
    pub fn new(config: ExchangeConfig) -> Self {
        Self {
            state: ExchangeState {
                timestamp: config.genesis_timestamp,
                assets: AssetBank::new(),
                registry: PoolRegistry::new(config.admin, config.fee_recipient),
            },
            events: EventLog::new(),
            callees: HashMap::new(),
        }
    }

    // -- clock ------------------------------------------------------------------

    /// Current clock, in seconds.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        self.state.timestamp
    }

    /// Sets the clock.
    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.state.timestamp = timestamp;
    }

    /// Moves the clock forward.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the clock would overflow.
    pub fn advance(&mut self, seconds: u64) -> Result<u64, AmmError> {
        self.state.timestamp = self
            .state
            .timestamp
            .checked_add(seconds)
            .ok_or(AmmError::Overflow("clock overflow"))?;
        Ok(self.state.timestamp)
    }

    // -- ledgers ----------------------------------------------------------------

    /// Deploys an asset and mints its whole `supply` to `holder`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::AssetExists`] if an asset or a pool already lives
    /// at `address`.
    pub fn deploy_asset(
        &mut self,
        address: Address,
        metadata: TokenMetadata,
        holder: Address,
        supply: Amount,
    ) -> Result<(), AmmError> {
        self.atomically("deploy_asset", |ex| {
            let state = &mut ex.state;
            if state.registry.pool(&address).is_some() {
                return Err(AmmError::AssetExists);
            }
            state
                .assets
                .deploy(address, metadata, holder, supply, &mut ex.events)
        })
    }

    /// The ledger at `token`: a deployed asset or a pool's shares.
    #[must_use]
    pub fn ledger(&self, token: &Address) -> Option<&LedgerToken> {
        self.state
            .registry
            .pool(token)
            .map(PoolEngine::shares)
            .or_else(|| self.state.assets.get(token))
    }

    /// `holder`'s balance on the ledger at `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownAsset`] if nothing lives at `token`.
    pub fn balance_of(&self, token: &Address, holder: &Address) -> Result<Amount, AmmError> {
        self.ledger(token)
            .map(|ledger| ledger.balance_of(holder))
            .ok_or(AmmError::UnknownAsset)
    }

    /// Outstanding supply of the ledger at `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownAsset`] if nothing lives at `token`.
    pub fn total_supply(&self, token: &Address) -> Result<Amount, AmmError> {
        self.ledger(token)
            .map(LedgerToken::total_supply)
            .ok_or(AmmError::UnknownAsset)
    }

    /// What `spender` may move on behalf of `owner` at `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownAsset`] if nothing lives at `token`.
    pub fn allowance(
        &self,
        token: &Address,
        owner: &Address,
        spender: &Address,
    ) -> Result<Amount, AmmError> {
        self.ledger(token)
            .map(|ledger| ledger.allowance(owner, spender))
            .ok_or(AmmError::UnknownAsset)
    }

    /// Transfers `amount` of `token` from `sender` to `to`.
    ///
    /// # Errors
    ///
    /// [`AmmError::UnknownAsset`] or the ledger's transfer errors.
    pub fn transfer(
        &mut self,
        sender: Address,
        token: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.atomically("transfer", |ex| {
            let state = &mut ex.state;
            ledger_mut(&mut state.assets, &mut state.registry, &token)?.transfer(
                sender,
                to,
                amount,
                &mut ex.events,
            )
        })
    }

    /// Sets `spender`'s allowance over `owner`'s `token` balance.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownAsset`] if nothing lives at `token`.
    pub fn approve(
        &mut self,
        owner: Address,
        token: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.atomically("approve", |ex| {
            let state = &mut ex.state;
            ledger_mut(&mut state.assets, &mut state.registry, &token)?.approve(
                owner,
                spender,
                amount,
                &mut ex.events,
            );
            Ok(())
        })
    }

    /// Moves `amount` of `token` from `from` to `to` on `spender`'s
    /// allowance.
    ///
    /// # Errors
    ///
    /// [`AmmError::UnknownAsset`] or the ledger's transfer errors.
    pub fn transfer_from(
        &mut self,
        spender: Address,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.atomically("transfer_from", |ex| {
            let state = &mut ex.state;
            ledger_mut(&mut state.assets, &mut state.registry, &token)?.transfer_from(
                spender,
                from,
                to,
                amount,
                &mut ex.events,
            )
        })
    }

    // -- registry ---------------------------------------------------------------

    /// Creates the pool for `(x, y, ratio)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] if `x == y`.
    /// - [`AmmError::UnknownAsset`] if either asset is not deployed.
    /// - [`AmmError::AssetExists`] if an asset occupies the derived address.
    /// - [`AmmError::PoolExists`] if the pool is already registered.
    pub fn create_pool(
        &mut self,
        x: Address,
        y: Address,
        ratio: VirtualRatio,
    ) -> Result<Address, AmmError> {
        self.atomically("create_pool", |ex| {
            let state = &mut ex.state;
            let address = pool_address(x, y, ratio)?;
            if !state.assets.contains(&x) || !state.assets.contains(&y) {
                return Err(AmmError::UnknownAsset);
            }
            if state.assets.contains(&address) {
                return Err(AmmError::AssetExists);
            }
            state.registry.create_pool(x, y, ratio, &mut ex.events)
        })
    }

    /// Looks up the pool for `(x, y, ratio)` in either order.
    #[must_use]
    pub fn get_pool(&self, x: Address, y: Address, ratio: VirtualRatio) -> Option<Address> {
        self.state.registry.get_pool(x, y, ratio)
    }

    /// Every pool address in creation order.
    #[must_use]
    pub fn all_pools(&self) -> &[Address] {
        self.state.registry.all_pools()
    }

    /// Number of pools created.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.state.registry.pool_count()
    }

    /// The pool at `address`.
    #[must_use]
    pub fn pool(&self, address: &Address) -> Option<&PoolEngine> {
        self.state.registry.pool(address)
    }

    /// The registry.
    #[must_use]
    pub const fn registry(&self) -> &PoolRegistry {
        &self.state.registry
    }

    /// Turns protocol fee accrual on or off.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Unauthorized`] unless `caller` is the admin.
    pub fn set_fee_recipient(
        &mut self,
        caller: Address,
        recipient: Option<Address>,
    ) -> Result<(), AmmError> {
        self.atomically("set_fee_recipient", |ex| {
            let state = &mut ex.state;
            state
                .registry
                .set_fee_recipient(caller, recipient, &mut ex.events)
        })
    }

    /// Hands registry admin authority to `new_admin`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Unauthorized`] unless `caller` is the admin.
    pub fn set_admin(&mut self, caller: Address, new_admin: Address) -> Result<(), AmmError> {
        self.atomically("set_admin", |ex| {
            let state = &mut ex.state;
            state.registry.set_admin(caller, new_admin, &mut ex.events)
        })
    }

    // -- pool calls ---------------------------------------------------------------

    /// Mints shares of `pool` to `to` for what was transferred to it.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`] or any [`PoolEngine::mint`] error.
    pub fn mint(&mut self, sender: Address, pool: Address, to: Address) -> Result<Amount, AmmError> {
        self.atomically("mint", |ex| {
            let ctx = ex.context(sender);
            let state = &mut ex.state;
            let engine = state.registry.pool_mut(&pool).ok_or(AmmError::PoolNotFound)?;
            engine.mint(&state.assets, &ctx, to, &mut ex.events)
        })
    }

    /// Burns the shares held at `pool`'s own address, paying `to`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`] or any [`PoolEngine::burn`] error.
    pub fn burn(
        &mut self,
        sender: Address,
        pool: Address,
        to: Address,
    ) -> Result<(Amount, Amount), AmmError> {
        self.atomically("burn", |ex| {
            let ctx = ex.context(sender);
            let state = &mut ex.state;
            let engine = state.registry.pool_mut(&pool).ok_or(AmmError::PoolNotFound)?;
            engine.burn(&mut state.assets, &ctx, to, &mut ex.events)
        })
    }

    /// Swaps on `pool`, paying the outputs to `to` first. With non-empty
    /// `data` the callee registered for `to` runs before settlement.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] for an unknown pool.
    /// - [`AmmError::MissingCallee`] if `data` is set but `to` has no callee.
    /// - Any error of the callee, [`PoolEngine::open_swap`] or
    ///   [`PoolEngine::close_swap`].
    pub fn swap(
        &mut self,
        sender: Address,
        pool: Address,
        amount_a_out: Amount,
        amount_b_out: Amount,
        to: Address,
        data: &[u8],
    ) -> Result<SwapReceipt, AmmError> {
        self.atomically("swap", |ex| {
            let ticket = {
                let state = &mut ex.state;
                let engine = state.registry.pool_mut(&pool).ok_or(AmmError::PoolNotFound)?;
                engine.open_swap(&mut state.assets, amount_a_out, amount_b_out, to, &mut ex.events)?
            };
            if !data.is_empty() {
                let mut callee = ex.callees.remove(&to).ok_or(AmmError::MissingCallee)?;
                debug!(%pool, callee = %to, "invoking swap callee");
                let callback = SwapCallback {
                    pool,
                    sender,
                    amount_a_out,
                    amount_b_out,
                    data,
                };
                let outcome = callee.on_swap(ex, callback);
                ex.callees.insert(to, callee);
                outcome?;
            }
            let ctx = ex.context(sender);
            let state = &mut ex.state;
            let engine = state.registry.pool_mut(&pool).ok_or(AmmError::PoolNotFound)?;
            engine.close_swap(&state.assets, &ctx, ticket, &mut ex.events)
        })
    }

    /// Forces `pool`'s reserves to its balances.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`] or any [`PoolEngine::sync`] error.
    pub fn sync(&mut self, sender: Address, pool: Address) -> Result<(), AmmError> {
        self.atomically("sync", |ex| {
            let ctx = ex.context(sender);
            let state = &mut ex.state;
            let engine = state.registry.pool_mut(&pool).ok_or(AmmError::PoolNotFound)?;
            engine.sync(&state.assets, &ctx, &mut ex.events)
        })
    }

    /// Sends `pool`'s excess balances to `to`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`] or any [`PoolEngine::skim`] error.
    pub fn skim(&mut self, pool: Address, to: Address) -> Result<(Amount, Amount), AmmError> {
        self.atomically("skim", |ex| {
            let state = &mut ex.state;
            let engine = state.registry.pool_mut(&pool).ok_or(AmmError::PoolNotFound)?;
            engine.skim(&mut state.assets, to, &mut ex.events)
        })
    }

    // -- callbacks ------------------------------------------------------------------

    /// Registers the flash-swap callee of `recipient`, returning the one it
    /// replaces.
    pub fn register_callee(
        &mut self,
        recipient: Address,
        callee: Box<dyn SwapCallee>,
    ) -> Option<Box<dyn SwapCallee>> {
        self.callees.insert(recipient, callee)
    }

    /// Removes the flash-swap callee of `recipient`.
    pub fn unregister_callee(&mut self, recipient: &Address) -> Option<Box<dyn SwapCallee>> {
        self.callees.remove(recipient)
    }

    // -- events -----------------------------------------------------------------------

    /// Events emitted by committed calls, oldest first.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        self.events.as_slice()
    }

    /// Drains the event log.
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take()
    }

    // -- internals --------------------------------------------------------------------

    fn context(&self, sender: Address) -> CallContext {
        CallContext::new(sender, self.state.timestamp)
            .with_fee_recipient(self.state.registry.fee_recipient())
    }

    fn atomically<T>(
        &mut self,
        call: &'static str,
        op: impl FnOnce(&mut Self) -> Result<T, AmmError>,
    ) -> Result<T, AmmError> {
        let snapshot = self.state.clone();
        let emitted = self.events.len();
        let result = op(self);
        if let Err(err) = &result {
            self.state = snapshot;
            self.events.truncate(emitted);
            warn!(call, error = %err, "call reverted");
        }
        result
    }
}

fn ledger_mut<'a>(
    assets: &'a mut AssetBank,
    registry: &'a mut PoolRegistry,
    token: &Address,
) -> Result<&'a mut LedgerToken, AmmError> {
    if let Some(pool) = registry.pool_mut(token) {
        return Ok(pool.shares_mut());
    }
    assets.get_mut(token).ok_or(AmmError::UnknownAsset)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const E18: u128 = 1_000_000_000_000_000_000;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 32])
    }

    fn exchange() -> Exchange {
        let mut ex = Exchange::new(ExchangeConfig::new(addr(0xad)).with_genesis_timestamp(50));
        for asset in [0xa0, 0xb0] {
            let Ok(()) = ex.deploy_asset(
                addr(asset),
                TokenMetadata::new("Asset", "AST", 18),
                addr(1),
                Amount::new(100 * E18),
            ) else {
                panic!("deploy failed");
            };
        }
        ex
    }

    #[test]
    fn clock() {
        let mut ex = exchange();
        assert_eq!(ex.timestamp(), 50);
        assert_eq!(ex.advance(10), Ok(60));
        ex.set_timestamp(u64::MAX);
        let Err(AmmError::Overflow(_)) = ex.advance(1) else {
            panic!("expected Overflow");
        };
    }

    #[test]
    fn failed_call_leaves_no_trace() {
        let mut ex = exchange();
        let before = ex.events().len();
        assert_eq!(
            ex.transfer(addr(2), addr(0xa0), addr(1), Amount::new(1)),
            Err(AmmError::InsufficientBalance)
        );
        assert_eq!(ex.events().len(), before);
    }

    #[test]
    fn create_pool_requires_deployed_assets() {
        let mut ex = exchange();
        assert_eq!(
            ex.create_pool(addr(0xa0), addr(0xc0), VirtualRatio::ZERO),
            Err(AmmError::UnknownAsset)
        );
        assert_eq!(
            ex.create_pool(addr(0xa0), addr(0xa0), VirtualRatio::ZERO),
            Err(AmmError::IdenticalAssets)
        );
        assert_eq!(ex.pool_count(), 0);
    }

    #[test]
    fn pool_address_is_share_ledger() {
        let mut ex = exchange();
        let Ok(pool) = ex.create_pool(addr(0xa0), addr(0xb0), VirtualRatio::ZERO) else {
            panic!("create failed");
        };
        let Some(ledger) = ex.ledger(&pool) else {
            panic!("share ledger missing");
        };
        assert_eq!(ledger.symbol(), "OAMM-S");
        assert_eq!(ex.total_supply(&pool), Ok(Amount::ZERO));
        assert_eq!(
            ex.deploy_asset(pool, TokenMetadata::new("X", "X", 0), addr(1), Amount::ZERO),
            Err(AmmError::AssetExists)
        );
    }

    #[test]
    fn unknown_pool_calls() {
        let mut ex = exchange();
        assert_eq!(ex.mint(addr(1), addr(0xee), addr(1)), Err(AmmError::PoolNotFound));
        assert_eq!(ex.sync(addr(1), addr(0xee)), Err(AmmError::PoolNotFound));
        assert_eq!(ex.skim(addr(0xee), addr(1)), Err(AmmError::PoolNotFound));
    }

    #[test]
    fn reverted_swap_cuts_emitted_events() {
        let mut ex = exchange();
        let Ok(pool) = ex.create_pool(addr(0xa0), addr(0xb0), VirtualRatio::new(1_000)) else {
            panic!("create failed");
        };
        for asset in [addr(0xa0), addr(0xb0)] {
            let Ok(()) = ex.transfer(addr(1), asset, pool, Amount::new(E18)) else {
                panic!("deposit failed");
            };
        }
        let Ok(_) = ex.mint(addr(1), pool, addr(1)) else {
            panic!("mint failed");
        };
        let before = ex.events().to_vec();

        // The payout emits a Transfer before settlement rejects the swap.
        assert_eq!(
            ex.swap(addr(1), pool, Amount::new(1_000), Amount::ZERO, addr(1), &[]),
            Err(AmmError::InsufficientInputAmount)
        );
        assert_eq!(ex.events(), before.as_slice());

        let drained = ex.take_events();
        assert_eq!(drained, before);
        assert_eq!(
            ex.swap(addr(1), pool, Amount::new(1_000), Amount::ZERO, addr(1), &[]),
            Err(AmmError::InsufficientInputAmount)
        );
        assert!(ex.events().is_empty());
    }

    #[test]
    fn take_events_drains() {
        let mut ex = exchange();
        assert_eq!(ex.take_events().len(), 2);
        assert!(ex.events().is_empty());
    }
}
