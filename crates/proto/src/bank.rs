// Path: crates/proto/src/bank.rs
//! Bank module messages: `lattice.bank.v1`.

use crate::tx::Coin;
use prost::Message;
use prost_types::Any;

/// Fully-qualified type URL of [`MsgSend`].
pub const MSG_SEND_TYPE_URL: &str = "/lattice.bank.v1.MsgSend";

/// A single-sender, single-receiver coin transfer.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgSend {
    #[prost(string, tag = "1")]
    pub from_address: String,
    #[prost(string, tag = "2")]
    pub to_address: String,
    #[prost(message, repeated, tag = "3")]
    pub amount: Vec<Coin>,
}

impl MsgSend {
    /// Packs this message into its `Any` representation.
    pub fn to_any(&self) -> Any {
        Any {
            type_url: MSG_SEND_TYPE_URL.to_string(),
            value: self.encode_to_vec(),
        }
    }
}

/// Balance-event kinds emitted by the bank module. These appear both in
/// per-transaction execution events and in block-level finalization events.
pub mod event {
    /// Coins left an account.
    pub const COIN_SPENT: &str = "coin_spent";
    /// Coins arrived at an account.
    pub const COIN_RECEIVED: &str = "coin_received";
    /// Coins were minted into an account.
    pub const COINBASE: &str = "coinbase";
    /// Coins were burned from an account.
    pub const BURN: &str = "burn";

    /// Attribute key naming the account a spend debits.
    pub const ATTR_SPENDER: &str = "spender";
    /// Attribute key naming the account a receive credits.
    pub const ATTR_RECEIVER: &str = "receiver";
    /// Attribute key naming the account a mint credits.
    pub const ATTR_MINTER: &str = "minter";
    /// Attribute key naming the account a burn debits.
    pub const ATTR_BURNER: &str = "burner";
    /// Attribute key carrying the comma-separated coin list.
    pub const ATTR_AMOUNT: &str = "amount";
}
