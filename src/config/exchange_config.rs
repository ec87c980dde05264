//! Configuration for an exchange host.

use serde::{Deserialize, Serialize};

use crate::domain::Address;

/// Start-up parameters of an [`Exchange`](crate::Exchange).
///
/// Deserializable so hosts can load it from their own config files:
///
/// ```
/// use offset_amm::config::ExchangeConfig;
///
/// let json = format!(r#"{{ "admin": "0x{}" }}"#, "01".repeat(32));
/// let cfg: ExchangeConfig = serde_json::from_str(&json).expect("valid config");
/// assert!(cfg.fee_recipient.is_none());
/// assert_eq!(cfg.genesis_timestamp, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Registry admin: may change the fee recipient and hand over itself.
    pub admin: Address,
    /// Protocol fee recipient; `None` disables fee accrual.
    #[serde(default)]
    pub fee_recipient: Option<Address>,
    /// Clock value at start-up, in seconds.
    #[serde(default)]
    pub genesis_timestamp: u64,
}

impl ExchangeConfig {
    /// A configuration with fee accrual off and the clock at zero.
    #[must_use]
    pub const fn new(admin: Address) -> Self {
        Self {
            admin,
            fee_recipient: None,
            genesis_timestamp: 0,
        }
    }

    /// Sets the initial fee recipient.
    #[must_use]
    pub const fn with_fee_recipient(mut self, recipient: Address) -> Self {
        self.fee_recipient = Some(recipient);
        self
    }

    /// Sets the initial clock value.
    #[must_use]
    pub const fn with_genesis_timestamp(mut self, timestamp: u64) -> Self {
        self.genesis_timestamp = timestamp;
        self
    }
}
