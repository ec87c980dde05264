//! Constant-product pool with virtual reserve offsets.
//!
//! # Model
//!
//! A pool holds real balances of two assets at its own address and tracks
//! a virtual offset per side. Every invariant, share and price computation
//! runs on the **effective** reserve `real + virtual`:
//!
//! ```text
//! (reserve_a + v_a) · (reserve_b + v_b) = k
//! ```
//!
//! At the first deposit `v_x = reserve_x · virt / 10_000`, taken on the
//! reconciled reserve so any synced donation counts. Swaps leave the
//! offsets alone; mints grow them and burns shrink them in proportion to
//! the share supply change, so the offset keeps its weight relative to the
//! real reserve across liquidity events.
//!
//! # Call protocol
//!
//! Assets are transferred to the pool first and the pool is called second.
//! Each entry point reads the pool's balances through an [`AssetLedger`]
//! and reconciles its reserves to them.
//!
//! A swap runs in two phases so that the host can hand control to a
//! flash-swap callee in between: [`PoolEngine::open_swap`] validates, locks
//! and pays out; [`PoolEngine::close_swap`] measures what came back,
//! enforces the invariant and unlocks.
//!
//! # Failure
//!
//! A failing call may leave partial writes in the engine, the share ledger
//! and the asset ledger. The engine is meant to run inside a host that
//! restores its state on error, as [`Exchange`](crate::Exchange) does.

use tracing::debug;

use super::price_accumulator::PriceAccumulator;
use super::{MINIMUM_SHARES, PROTOCOL_FEE_DENOMINATOR};
use crate::config::PoolConfig;
use crate::domain::{Address, Amount, AssetPair, Event, EventLog, VirtualRatio};
use crate::error::AmmError;
use crate::ledger::{LedgerToken, TokenMetadata};
use crate::math::{
    isqrt, mul, mul_div, narrow, widen, CheckedArithmetic, MAX_RESERVE, SWAP_FEE_DENOMINATOR,
    SWAP_FEE_NUMERATOR, U256,
};
use crate::traits::{AssetLedger, FromConfig};

/// Per-call environment supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    /// Account invoking the entry point.
    pub sender: Address,
    /// Current clock, in seconds.
    pub timestamp: u64,
    /// Protocol fee recipient; `None` disables fee accrual.
    pub fee_recipient: Option<Address>,
}

impl CallContext {
    /// A context with fee accrual off.
    #[must_use]
    pub const fn new(sender: Address, timestamp: u64) -> Self {
        Self {
            sender,
            timestamp,
            fee_recipient: None,
        }
    }

    /// Sets the protocol fee recipient.
    #[must_use]
    pub const fn with_fee_recipient(mut self, recipient: Option<Address>) -> Self {
        self.fee_recipient = recipient;
        self
    }
}

/// An open swap: outputs paid, invariant not yet checked.
///
/// Only [`PoolEngine::open_swap`] creates one and only
/// [`PoolEngine::close_swap`] consumes it.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an open swap keeps its pool locked until closed"]
pub struct SwapTicket {
    pool: Address,
    amount_a_out: Amount,
    amount_b_out: Amount,
    to: Address,
}

impl SwapTicket {
    /// Pool the swap runs on.
    #[must_use]
    pub const fn pool(&self) -> Address {
        self.pool
    }

    /// Asset A paid out.
    #[must_use]
    pub const fn amount_a_out(&self) -> Amount {
        self.amount_a_out
    }

    /// Asset B paid out.
    #[must_use]
    pub const fn amount_b_out(&self) -> Amount {
        self.amount_b_out
    }

    /// Recipient of the outputs.
    #[must_use]
    pub const fn to(&self) -> Address {
        self.to
    }
}

/// Settled amounts of a completed swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapReceipt {
    /// Asset A received by the pool.
    pub amount_a_in: Amount,
    /// Asset B received by the pool.
    pub amount_b_in: Amount,
    /// Asset A sent out.
    pub amount_a_out: Amount,
    /// Asset B sent out.
    pub amount_b_out: Amount,
}

/// A virtual-reserve constant-product pool.
///
/// The pool's [`Address`] is at once the holding account for its two
/// assets and the address of its share ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolEngine {
    address: Address,
    pair: AssetPair,
    ratio: VirtualRatio,
    reserve_a: Amount,
    reserve_b: Amount,
    virtual_a: Amount,
    virtual_b: Amount,
    shares: LedgerToken,
    k_last: U256,
    oracle: PriceAccumulator,
    locked: bool,
}

impl FromConfig<PoolConfig> for PoolEngine {
    fn from_config(config: &PoolConfig) -> Result<Self, AmmError> {
        let address = config.address();
        Ok(Self {
            address,
            pair: config.pair(),
            ratio: config.ratio(),
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
            virtual_a: Amount::ZERO,
            virtual_b: Amount::ZERO,
            shares: LedgerToken::new(address, TokenMetadata::pool_shares()),
            k_last: U256::zero(),
            oracle: PriceAccumulator::default(),
            locked: false,
        })
    }
}

impl PoolEngine {
    // -- read surface ---------------------------------------------------------

    /// The pool's address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The canonical asset pair.
    #[must_use]
    pub const fn pair(&self) -> AssetPair {
        self.pair
    }

    /// The immutable virtual ratio.
    #[must_use]
    pub const fn virtual_ratio(&self) -> VirtualRatio {
        self.ratio
    }

    /// Effective reserves and the 32-bit timestamp of the last update.
    #[must_use]
    pub fn get_reserves(&self) -> (Amount, Amount, u32) {
        let (a, b) = self.effective_reserves();
        (a, b, self.oracle.last_update())
    }

    /// Last reconciled real balances.
    #[must_use]
    pub const fn real_reserves(&self) -> (Amount, Amount) {
        (self.reserve_a, self.reserve_b)
    }

    /// Current virtual offsets.
    #[must_use]
    pub const fn virtual_reserves(&self) -> (Amount, Amount) {
        (self.virtual_a, self.virtual_b)
    }

    /// Integral of the price of A in terms of B (UQ112x112 · seconds).
    #[must_use]
    pub const fn price_a_cumulative(&self) -> U256 {
        self.oracle.price_a_cumulative()
    }

    /// Integral of the price of B in terms of A (UQ112x112 · seconds).
    #[must_use]
    pub const fn price_b_cumulative(&self) -> U256 {
        self.oracle.price_b_cumulative()
    }

    /// Effective `k` recorded at the last liquidity event while fee
    /// accrual was on; zero otherwise.
    #[must_use]
    pub const fn k_last(&self) -> U256 {
        self.k_last
    }

    /// The share ledger.
    #[must_use]
    pub const fn shares(&self) -> &LedgerToken {
        &self.shares
    }

    /// The share ledger, mutably, for holder transfers and approvals.
    pub fn shares_mut(&mut self) -> &mut LedgerToken {
        &mut self.shares
    }

    /// `true` while mint, burn or an open swap is executing.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    // -- liquidity ------------------------------------------------------------

    /// Issues shares to `to` for whatever was deposited since the last
    /// reconciliation. Returns the shares minted to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if the pool is locked.
    /// - [`AmmError::InsufficientInitialLiquidity`] if a first deposit does
    ///   not exceed [`MINIMUM_SHARES`].
    /// - [`AmmError::InsufficientLiquidityMinted`] if a follow-up deposit
    ///   is worth zero shares.
    /// - [`AmmError::Overflow`] if an effective reserve would exceed 112
    ///   bits.
    pub fn mint<L: AssetLedger>(
        &mut self,
        ledger: &L,
        ctx: &CallContext,
        to: Address,
        log: &mut EventLog,
    ) -> Result<Amount, AmmError> {
        self.lock()?;
        let result = self.mint_locked(ledger, ctx, to, log);
        self.locked = false;
        result
    }

    fn mint_locked<L: AssetLedger>(
        &mut self,
        ledger: &L,
        ctx: &CallContext,
        to: Address,
        log: &mut EventLog,
    ) -> Result<Amount, AmmError> {
        let (balance_a, balance_b) = self.balances(ledger)?;
        let amount_a = balance_a.safe_sub(&self.reserve_a)?;
        let amount_b = balance_b.safe_sub(&self.reserve_b)?;

        let fee_on = self.mint_protocol_fee(ctx.fee_recipient, log)?;
        let total = self.shares.total_supply();

        let (minted, added_a, added_b) = if total.is_zero() {
            let root = isqrt(mul(widen(amount_a), widen(amount_b), "initial deposit overflow")?);
            let scale = U256::from(self.ratio.numerator()) + U256::from(self.ratio.denominator());
            let scaled = mul(root, scale, "initial shares overflow")?
                / U256::from(self.ratio.denominator());
            let issued = narrow(scaled, "initial shares overflow")?;
            if issued <= MINIMUM_SHARES {
                return Err(AmmError::InsufficientInitialLiquidity);
            }
            self.shares.mint(Address::zero(), MINIMUM_SHARES, log)?;
            (
                issued.safe_sub(&MINIMUM_SHARES)?,
                self.ratio.apply(balance_a)?,
                self.ratio.apply(balance_b)?,
            )
        } else {
            let added_a = virtual_share(amount_a, self.virtual_a, self.reserve_a)?;
            let added_b = virtual_share(amount_b, self.virtual_b, self.reserve_b)?;
            let (effective_a, effective_b) = self.effective_reserves();
            let from_a = shares_for(amount_a.safe_add(&added_a)?, total, effective_a)?;
            let from_b = shares_for(amount_b.safe_add(&added_b)?, total, effective_b)?;
            let minted = match (from_a, from_b) {
                (Some(a), Some(b)) => a.min(b),
                (Some(one), None) | (None, Some(one)) => one,
                (None, None) => Amount::ZERO,
            };
            (minted, added_a, added_b)
        };
        if minted.is_zero() {
            return Err(AmmError::InsufficientLiquidityMinted);
        }
        self.shares.mint(to, minted, log)?;

        let virtual_a = self.virtual_a.safe_add(&added_a)?;
        let virtual_b = self.virtual_b.safe_add(&added_b)?;
        self.update(balance_a, balance_b, virtual_a, virtual_b, ctx.timestamp, log)?;
        if fee_on {
            self.k_last = self.effective_k()?;
        }
        log.emit(Event::Mint {
            pool: self.address,
            sender: ctx.sender,
            amount_a,
            amount_b,
        });
        debug!(
            pool = %self.address,
            amount_a = %amount_a,
            amount_b = %amount_b,
            shares = %minted,
            "liquidity minted"
        );
        Ok(minted)
    }

    /// Redeems the shares held at the pool's own address, paying the real
    /// part of each side's claim to `to` and retiring the matching virtual
    /// part. Returns the real amounts paid.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if the pool is locked.
    /// - [`AmmError::InsufficientLiquidityBurned`] if either payout is
    ///   zero.
    /// - [`AmmError::DivisionByZero`] if the pool was never funded.
    pub fn burn<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        ctx: &CallContext,
        to: Address,
        log: &mut EventLog,
    ) -> Result<(Amount, Amount), AmmError> {
        self.lock()?;
        let result = self.burn_locked(ledger, ctx, to, log);
        self.locked = false;
        result
    }

    fn burn_locked<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        ctx: &CallContext,
        to: Address,
        log: &mut EventLog,
    ) -> Result<(Amount, Amount), AmmError> {
        let (balance_a, balance_b) = self.balances(ledger)?;
        let redeemed = self.shares.balance_of(&self.address);

        let fee_on = self.mint_protocol_fee(ctx.fee_recipient, log)?;
        let total = self.shares.total_supply();

        let amount_a = mul_div(redeemed, balance_a, total, "burn payout overflow")?;
        let amount_b = mul_div(redeemed, balance_b, total, "burn payout overflow")?;
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(AmmError::InsufficientLiquidityBurned);
        }
        let retired_a = mul_div(redeemed, self.virtual_a, total, "burn virtual overflow")?;
        let retired_b = mul_div(redeemed, self.virtual_b, total, "burn virtual overflow")?;

        self.shares.burn(self.address, redeemed, log)?;
        ledger.transfer(&self.pair.first(), self.address, to, amount_a, log)?;
        ledger.transfer(&self.pair.second(), self.address, to, amount_b, log)?;

        let (balance_a, balance_b) = self.balances(ledger)?;
        let virtual_a = self.virtual_a.safe_sub(&retired_a)?;
        let virtual_b = self.virtual_b.safe_sub(&retired_b)?;
        self.update(balance_a, balance_b, virtual_a, virtual_b, ctx.timestamp, log)?;
        if fee_on {
            self.k_last = self.effective_k()?;
        }
        log.emit(Event::Burn {
            pool: self.address,
            sender: ctx.sender,
            amount_a,
            amount_b,
            to,
        });
        debug!(
            pool = %self.address,
            shares = %redeemed,
            amount_a = %amount_a,
            amount_b = %amount_b,
            "liquidity burned"
        );
        Ok((amount_a, amount_b))
    }

    // -- swap -------------------------------------------------------------------

    /// First half of a swap: validates the request, locks the pool and
    /// optimistically pays the outputs to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if the pool is locked.
    /// - [`AmmError::InsufficientOutputAmount`] if both outputs are zero.
    /// - [`AmmError::InsufficientLiquidity`] unless each output is strictly
    ///   below its real reserve.
    /// - [`AmmError::InvalidRecipient`] if `to` is one of the pool's assets.
    pub fn open_swap<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        amount_a_out: Amount,
        amount_b_out: Amount,
        to: Address,
        log: &mut EventLog,
    ) -> Result<SwapTicket, AmmError> {
        if self.locked {
            return Err(AmmError::Reentrancy);
        }
        if amount_a_out.is_zero() && amount_b_out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        if amount_a_out >= self.reserve_a || amount_b_out >= self.reserve_b {
            return Err(AmmError::InsufficientLiquidity);
        }
        if self.pair.contains(&to) {
            return Err(AmmError::InvalidRecipient);
        }
        self.locked = true;
        let paid = self.pay_out(ledger, amount_a_out, amount_b_out, to, log);
        if let Err(err) = paid {
            self.locked = false;
            return Err(err);
        }
        Ok(SwapTicket {
            pool: self.address,
            amount_a_out,
            amount_b_out,
            to,
        })
    }

    fn pay_out<L: AssetLedger>(
        &self,
        ledger: &mut L,
        amount_a_out: Amount,
        amount_b_out: Amount,
        to: Address,
        log: &mut EventLog,
    ) -> Result<(), AmmError> {
        if !amount_a_out.is_zero() {
            ledger.transfer(&self.pair.first(), self.address, to, amount_a_out, log)?;
        }
        if !amount_b_out.is_zero() {
            ledger.transfer(&self.pair.second(), self.address, to, amount_b_out, log)?;
        }
        Ok(())
    }

    /// Second half of a swap: infers the inputs from the balances, enforces
    /// the fee-adjusted invariant on effective reserves, reconciles and
    /// unlocks.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] if the ticket belongs to another pool.
    /// - [`AmmError::InsufficientInputAmount`] if nothing came in.
    /// - [`AmmError::InvariantViolation`] if the adjusted product shrank.
    pub fn close_swap<L: AssetLedger>(
        &mut self,
        ledger: &L,
        ctx: &CallContext,
        ticket: SwapTicket,
        log: &mut EventLog,
    ) -> Result<SwapReceipt, AmmError> {
        if ticket.pool != self.address {
            return Err(AmmError::PoolNotFound);
        }
        let result = self.settle_swap(ledger, ctx, &ticket, log);
        self.locked = false;
        result
    }

    fn settle_swap<L: AssetLedger>(
        &mut self,
        ledger: &L,
        ctx: &CallContext,
        ticket: &SwapTicket,
        log: &mut EventLog,
    ) -> Result<SwapReceipt, AmmError> {
        let (balance_a, balance_b) = self.balances(ledger)?;
        let kept_a = self.reserve_a.safe_sub(&ticket.amount_a_out)?;
        let kept_b = self.reserve_b.safe_sub(&ticket.amount_b_out)?;
        let amount_a_in = balance_a.saturating_sub(&kept_a);
        let amount_b_in = balance_b.saturating_sub(&kept_b);
        if amount_a_in.is_zero() && amount_b_in.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }

        let adjusted_a = adjusted_balance(balance_a, self.virtual_a, amount_a_in)?;
        let adjusted_b = adjusted_balance(balance_b, self.virtual_b, amount_b_in)?;
        let after = mul(adjusted_a, adjusted_b, "swap invariant overflow")?;
        let scale = U256::from(SWAP_FEE_DENOMINATOR) * U256::from(SWAP_FEE_DENOMINATOR);
        let before = mul(self.effective_k()?, scale, "swap invariant overflow")?;
        if after < before {
            return Err(AmmError::InvariantViolation);
        }

        self.update(balance_a, balance_b, self.virtual_a, self.virtual_b, ctx.timestamp, log)?;
        log.emit(Event::Swap {
            pool: self.address,
            sender: ctx.sender,
            amount_a_in,
            amount_b_in,
            amount_a_out: ticket.amount_a_out,
            amount_b_out: ticket.amount_b_out,
            to: ticket.to,
        });
        debug!(
            pool = %self.address,
            amount_a_in = %amount_a_in,
            amount_b_in = %amount_b_in,
            amount_a_out = %ticket.amount_a_out,
            amount_b_out = %ticket.amount_b_out,
            "swap settled"
        );
        Ok(SwapReceipt {
            amount_a_in,
            amount_b_in,
            amount_a_out: ticket.amount_a_out,
            amount_b_out: ticket.amount_b_out,
        })
    }

    // -- recovery ---------------------------------------------------------------

    /// Forces the real reserves to match the held balances.
    ///
    /// # Errors
    ///
    /// [`AmmError::Reentrancy`] if locked; [`AmmError::Overflow`] if an
    /// effective reserve would exceed 112 bits.
    pub fn sync<L: AssetLedger>(
        &mut self,
        ledger: &L,
        ctx: &CallContext,
        log: &mut EventLog,
    ) -> Result<(), AmmError> {
        if self.locked {
            return Err(AmmError::Reentrancy);
        }
        let (balance_a, balance_b) = self.balances(ledger)?;
        self.update(balance_a, balance_b, self.virtual_a, self.virtual_b, ctx.timestamp, log)
    }

    /// Sends any balance above the real reserves to `to`. Returns the
    /// amounts sent.
    ///
    /// # Errors
    ///
    /// [`AmmError::Reentrancy`] if locked.
    pub fn skim<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        to: Address,
        log: &mut EventLog,
    ) -> Result<(Amount, Amount), AmmError> {
        if self.locked {
            return Err(AmmError::Reentrancy);
        }
        let (balance_a, balance_b) = self.balances(ledger)?;
        let excess_a = balance_a.safe_sub(&self.reserve_a)?;
        let excess_b = balance_b.safe_sub(&self.reserve_b)?;
        self.pay_out(ledger, excess_a, excess_b, to, log)?;
        Ok((excess_a, excess_b))
    }

    // -- internals --------------------------------------------------------------

    fn lock(&mut self) -> Result<(), AmmError> {
        if self.locked {
            return Err(AmmError::Reentrancy);
        }
        self.locked = true;
        Ok(())
    }

    fn balances<L: AssetLedger>(&self, ledger: &L) -> Result<(Amount, Amount), AmmError> {
        Ok((
            ledger.balance_of(&self.pair.first(), &self.address)?,
            ledger.balance_of(&self.pair.second(), &self.address)?,
        ))
    }

    // Bounded by MAX_RESERVE in `update`, so the additions cannot saturate.
    fn effective_reserves(&self) -> (Amount, Amount) {
        (
            Amount::new(self.reserve_a.get().saturating_add(self.virtual_a.get())),
            Amount::new(self.reserve_b.get().saturating_add(self.virtual_b.get())),
        )
    }

    fn effective_k(&self) -> Result<U256, AmmError> {
        let (a, b) = self.effective_reserves();
        mul(widen(a), widen(b), "effective k overflow")
    }

    /// Mints the protocol's 1/6 of the `sqrt(k)` growth since the last
    /// liquidity event. Returns whether accrual is on.
    fn mint_protocol_fee(
        &mut self,
        recipient: Option<Address>,
        log: &mut EventLog,
    ) -> Result<bool, AmmError> {
        let Some(recipient) = recipient else {
            self.k_last = U256::zero();
            return Ok(false);
        };
        if self.k_last.is_zero() {
            return Ok(true);
        }
        let root_k = isqrt(self.effective_k()?);
        let root_k_last = isqrt(self.k_last);
        if root_k > root_k_last {
            let total = widen(self.shares.total_supply());
            let numerator = mul(total, root_k - root_k_last, "protocol fee overflow")?;
            let denominator = mul(
                root_k,
                U256::from(PROTOCOL_FEE_DENOMINATOR - 1),
                "protocol fee overflow",
            )? + root_k_last;
            let fee = narrow(numerator / denominator, "protocol fee overflow")?;
            if !fee.is_zero() {
                self.shares.mint(recipient, fee, log)?;
                debug!(pool = %self.address, shares = %fee, "protocol fee minted");
            }
        }
        Ok(true)
    }

    /// Reconciles reserves: bound check, accrue prices on the reserves in
    /// force until now, write the new state and emit `Sync`.
    fn update(
        &mut self,
        balance_a: Amount,
        balance_b: Amount,
        virtual_a: Amount,
        virtual_b: Amount,
        now: u64,
        log: &mut EventLog,
    ) -> Result<(), AmmError> {
        let effective_a = balance_a
            .checked_add(&virtual_a)
            .filter(|r| *r <= MAX_RESERVE)
            .ok_or(AmmError::Overflow("reserve a exceeds 112 bits"))?;
        let effective_b = balance_b
            .checked_add(&virtual_b)
            .filter(|r| *r <= MAX_RESERVE)
            .ok_or(AmmError::Overflow("reserve b exceeds 112 bits"))?;

        let (previous_a, previous_b) = self.effective_reserves();
        self.oracle.update(previous_a, previous_b, now)?;

        self.reserve_a = balance_a;
        self.reserve_b = balance_b;
        self.virtual_a = virtual_a;
        self.virtual_b = virtual_b;
        log.emit(Event::Sync {
            pool: self.address,
            reserve_a: effective_a,
            reserve_b: effective_b,
        });
        Ok(())
    }
}

/// Virtual counterpart of a deposit: `amount · virtual / reserve`, zero for
/// an empty side.
fn virtual_share(amount: Amount, virtual_reserve: Amount, reserve: Amount) -> Result<Amount, AmmError> {
    if reserve.is_zero() {
        return Ok(Amount::ZERO);
    }
    mul_div(amount, virtual_reserve, reserve, "virtual deposit overflow")
}

/// Shares worth `amount` of a side with `effective` reserve; `None` when
/// the side is empty and cannot price the deposit.
fn shares_for(amount: Amount, total: Amount, effective: Amount) -> Result<Option<Amount>, AmmError> {
    if effective.is_zero() {
        return Ok(None);
    }
    mul_div(amount, total, effective, "shares overflow").map(Some)
}

/// `(balance + virtual) · 1000 - amount_in · 3`
fn adjusted_balance(balance: Amount, virtual_reserve: Amount, amount_in: Amount) -> Result<U256, AmmError> {
    let effective = widen(balance) + widen(virtual_reserve);
    let scaled = mul(effective, U256::from(SWAP_FEE_DENOMINATOR), "swap adjust overflow")?;
    let fee = mul(widen(amount_in), U256::from(SWAP_FEE_NUMERATOR), "swap adjust overflow")?;
    scaled
        .checked_sub(fee)
        .ok_or(AmmError::Underflow("swap adjust underflow"))
}
