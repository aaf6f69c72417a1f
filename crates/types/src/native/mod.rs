// Path: crates/types/src/native/mod.rs
//! Shapes returned by the underlying node through the `NodeQuery` capability.
//!
//! These mirror the node's consensus-engine RPC and state-query responses
//! closely enough that the concrete transport can populate them without
//! interpretation; all interpretation belongs to the converter.

use crate::coin::Coin;

/// A block hash wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockId {
    pub hash: Vec<u8>,
}

/// The subset of a native block header the gateway consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    pub chain_id: String,
    pub height: u64,
    /// Nanoseconds since the Unix epoch.
    pub time_unix_nano: i64,
    /// Identifier of the parent block. Empty hash at the initial height.
    pub parent_id: BlockId,
}

/// A native block: header plus raw transaction bytes in block order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeBlock {
    pub block_id: BlockId,
    pub header: BlockHeader,
    pub txs: Vec<Vec<u8>>,
}

/// A single key/value attribute of an emitted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventAttribute {
    pub key: String,
    pub value: String,
}

/// An event emitted during transaction execution or block finalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: String,
    pub attributes: Vec<EventAttribute>,
}

impl Event {
    /// Returns the value of the first attribute with the given key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.iter().find(|a| a.key == key).map(|a| a.value.as_str())
    }
}

/// Execution outcome of one native transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxExecutionResult {
    /// Zero means success; anything else is a revert.
    pub code: u32,
    pub log: String,
    pub gas_wanted: i64,
    pub gas_used: i64,
    pub events: Vec<Event>,
}

/// Per-block execution results: one entry per native transaction, in block
/// order, plus the block-level events not attributable to any transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockResults {
    pub height: u64,
    pub tx_results: Vec<TxExecutionResult>,
    pub block_events: Vec<Event>,
}

/// Static facts about the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    /// The chain identifier the node is running.
    pub network: String,
    pub moniker: String,
    pub version: String,
}

/// Sync progress reported by the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncInfo {
    pub latest_block_height: u64,
    pub latest_block_hash: Vec<u8>,
    pub earliest_block_height: u64,
    pub catching_up: bool,
}

/// Combined node status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStatus {
    pub node_info: NodeInfo,
    pub sync_info: SyncInfo,
}

/// A peer of the underlying node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerInfo {
    pub node_id: String,
    pub moniker: String,
}

/// Result of a synchronous broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastResult {
    /// Zero means the transaction passed admission; anything else is a
    /// rejection described by `log`.
    pub code: u32,
    pub log: String,
    pub hash: Vec<u8>,
}

/// The account facts required to sign on behalf of an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseAccount {
    pub address: String,
    pub account_number: u64,
    pub sequence: u64,
    /// Type URL and raw key bytes of the account's public key, when the
    /// account has signed before.
    pub pub_key: Option<(String, Vec<u8>)>,
}

/// One page of a paginated query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Opaque continuation key; `None` when this is the last page.
    pub next_key: Option<Vec<u8>>,
}

/// One page of the total-supply query.
pub type SupplyPage = Page<Coin>;
