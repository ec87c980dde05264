//! Notifications emitted by ledgers, pools and the registry.
//!
//! Every state change appends an [`Event`] to the host's [`EventLog`]. A
//! failed call discards the events it emitted together with its state.

use serde::{Deserialize, Serialize};

use super::{Address, Amount, VirtualRatio};

/// A single notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Balance moved on a ledger. Mints come from, and burns go to, the
    /// zero address.
    Transfer {
        /// Ledger (asset or pool share) address
        token: Address,
        /// Debited holder
        from: Address,
        /// Credited holder
        to: Address,
        /// Amount moved
        amount: Amount,
    },

    /// Allowance set.
    Approval {
        /// Ledger address
        token: Address,
        /// Balance owner
        owner: Address,
        /// Approved spender
        spender: Address,
        /// New allowance
        amount: Amount,
    },

    /// Pool reserves reconciled to balances.
    Sync {
        /// Pool address
        pool: Address,
        /// Effective reserve of asset A
        reserve_a: Amount,
        /// Effective reserve of asset B
        reserve_b: Amount,
    },

    /// Liquidity added.
    Mint {
        /// Pool address
        pool: Address,
        /// Caller
        sender: Address,
        /// Real asset A deposited
        amount_a: Amount,
        /// Real asset B deposited
        amount_b: Amount,
    },

    /// Liquidity removed.
    Burn {
        /// Pool address
        pool: Address,
        /// Caller
        sender: Address,
        /// Real asset A paid out
        amount_a: Amount,
        /// Real asset B paid out
        amount_b: Amount,
        /// Payout recipient
        to: Address,
    },

    /// Trade settled.
    Swap {
        /// Pool address
        pool: Address,
        /// Caller
        sender: Address,
        /// Asset A received by the pool
        amount_a_in: Amount,
        /// Asset B received by the pool
        amount_b_in: Amount,
        /// Asset A sent out
        amount_a_out: Amount,
        /// Asset B sent out
        amount_b_out: Amount,
        /// Output recipient
        to: Address,
    },

    /// Pool registered.
    PoolCreated {
        /// Lower asset
        asset_a: Address,
        /// Higher asset
        asset_b: Address,
        /// Virtual ratio of the pool
        virtual_ratio: VirtualRatio,
        /// Pool address
        pool: Address,
        /// Number of pools after this creation
        index: u64,
    },

    /// Protocol fee recipient changed.
    FeeRecipientChanged {
        /// Old recipient
        previous: Option<Address>,
        /// New recipient
        current: Option<Address>,
    },

    /// Registry admin handed over.
    AdminChanged {
        /// Old admin
        previous: Address,
        /// New admin
        current: Address,
    },
}

/// Append-only, ordered log of [`Event`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends an event.
    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Returns all events in emission order.
    #[must_use]
    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    /// Number of events recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drains the log, returning everything emitted so far.
    pub fn take(&mut self) -> Vec<Event> {
        core::mem::take(&mut self.events)
    }

    /// Drops every event after the first `len`. No-op if the log is
    /// already that short.
    pub fn truncate(&mut self, len: usize) {
        self.events.truncate(len);
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 32])
    }

    #[test]
    fn emit_preserves_order() {
        let mut log = EventLog::new();
        assert!(log.is_empty());
        log.emit(Event::Sync {
            pool: addr(1),
            reserve_a: Amount::new(1),
            reserve_b: Amount::new(2),
        });
        log.emit(Event::AdminChanged {
            previous: addr(2),
            current: addr(3),
        });
        assert_eq!(log.len(), 2);
        let Event::Sync { pool, .. } = log.as_slice()[0] else {
            panic!("expected Sync first");
        };
        assert_eq!(pool, addr(1));
    }

    #[test]
    fn truncate_drops_the_tail() {
        let mut log = EventLog::new();
        for byte in 1..=3 {
            log.emit(Event::AdminChanged {
                previous: addr(byte),
                current: addr(byte + 1),
            });
        }
        log.truncate(1);
        assert_eq!(log.len(), 1);
        assert_eq!(
            log.as_slice()[0],
            Event::AdminChanged {
                previous: addr(1),
                current: addr(2),
            }
        );
        log.truncate(5);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn take_drains() {
        let mut log = EventLog::new();
        log.emit(Event::FeeRecipientChanged {
            previous: None,
            current: Some(addr(5)),
        });
        let drained = log.take();
        assert_eq!(drained.len(), 1);
        assert!(log.is_empty());
    }

    #[test]
    fn events_serialize() {
        let event = Event::Transfer {
            token: addr(1),
            from: Address::zero(),
            to: addr(2),
            amount: Amount::new(1_000),
        };
        let Ok(json) = serde_json::to_string(&event) else {
            panic!("serializable");
        };
        assert!(json.starts_with("{\"Transfer\""));
        let Ok(back) = serde_json::from_str::<Event>(&json) else {
            panic!("deserializable");
        };
        assert_eq!(back, event);
    }
}
