//! Unified error types for the pool engine.
//!
//! Every fallible operation across the crate returns [`AmmError`]. Each
//! failure cause is its own variant so that callers (routers, arbitrage
//! bots, front-ends) can branch on the cause instead of parsing messages.
//!
//! The variants fall into five groups:
//!
//! | Group | Variants | Raised |
//! |-------|----------|--------|
//! | configuration | `IdenticalAssets`, `PoolExists`, `Unauthorized`, `UnknownAsset`, `AssetExists`, `PoolNotFound` | before any mutation |
//! | liquidity | `InsufficientInitialLiquidity`, `InsufficientLiquidityMinted`, `InsufficientLiquidityBurned` | after computing shares, before any transfer |
//! | invariant | `InsufficientOutputAmount`, `InsufficientInputAmount`, `InsufficientLiquidity`, `InvalidRecipient`, `InvariantViolation`, `MissingCallee` | possibly after optimistic transfers |
//! | concurrency | `Reentrancy` | at entry |
//! | ledger / arithmetic | `InsufficientBalance`, `InsufficientAllowance`, `Overflow`, `Underflow`, `DivisionByZero` | anywhere |

use thiserror::Error;

/// Errors raised by the ledger, the pool engine, the registry and the
/// exchange host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AmmError {
    /// Both sides of a pair are the same asset.
    #[error("identical assets")]
    IdenticalAssets,

    /// A pool with the same assets and virtual ratio is already registered.
    #[error("pool already exists")]
    PoolExists,

    /// The caller is not the registry admin.
    #[error("caller is not authorized")]
    Unauthorized,

    /// The asset has not been deployed on the exchange.
    #[error("unknown asset")]
    UnknownAsset,

    /// A ledger (asset or pool) already occupies the address.
    #[error("asset already exists")]
    AssetExists,

    /// No pool is registered at the given address.
    #[error("pool not found")]
    PoolNotFound,

    /// The first deposit does not mint more than the permanently locked shares.
    #[error("insufficient initial liquidity")]
    InsufficientInitialLiquidity,

    /// A follow-up deposit would mint zero shares.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// Burning the pending shares would pay out zero of at least one asset.
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// A swap requested no output at all.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// A swap received no input on either side.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// A requested output is not strictly below the current reserve.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// The swap recipient is one of the pool's own assets.
    #[error("invalid recipient")]
    InvalidRecipient,

    /// The fee-adjusted constant product decreased ("K").
    #[error("invariant violation: K")]
    InvariantViolation,

    /// Callback data was supplied but the recipient has no registered callee.
    #[error("recipient has no swap callee")]
    MissingCallee,

    /// The pool is already executing a call.
    #[error("reentrant call")]
    Reentrancy,

    /// Balance too low for a transfer or burn.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// Allowance too low for a delegated transfer.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// Arithmetic overflow; the message names the computation.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow; the message names the computation.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;
