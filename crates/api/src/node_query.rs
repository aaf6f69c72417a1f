// Path: crates/api/src/node_query.rs
//! The `NodeQuery` capability: everything the gateway asks of the node.
//!
//! One trait covers both native interfaces (the application state-query
//! interface and the consensus-engine RPC); the concrete transport behind it
//! lives outside this workspace. Implementations must be side-effect-free
//! except for [`NodeQuery::broadcast_sync`], which is inherently
//! non-idempotent and must never be retried by callers of this trait.

use async_trait::async_trait;
use mesh_types::coin::Coin;
use mesh_types::native::{
    BaseAccount, BlockResults, BroadcastResult, NativeBlock, NodeStatus, Page, PeerInfo,
    TxExecutionResult,
};
use mesh_types::Result;

#[async_trait]
pub trait NodeQuery: Send + Sync {
    /// Fetches the signing-relevant account facts for an address, optionally
    /// pinned to a historical height for a stable snapshot.
    async fn account(&self, address: &str, height: Option<u64>) -> Result<BaseAccount>;

    /// One page of an address's balances, optionally height-pinned.
    async fn balances(
        &self,
        address: &str,
        height: Option<u64>,
        page_key: Option<Vec<u8>>,
    ) -> Result<Page<Coin>>;

    /// One page of the chain's total supply.
    async fn total_supply(&self, page_key: Option<Vec<u8>>) -> Result<Page<Coin>>;

    /// Block at the given height; the current tip when `None`.
    async fn block_by_height(&self, height: Option<u64>) -> Result<NativeBlock>;

    /// Block with the given hash.
    async fn block_by_hash(&self, hash: &[u8]) -> Result<NativeBlock>;

    /// Execution results and events for the block at the given height; the
    /// current tip when `None`.
    async fn block_results(&self, height: Option<u64>) -> Result<BlockResults>;

    /// Raw bytes and execution result of a confirmed transaction.
    async fn tx_by_hash(&self, hash: &[u8]) -> Result<(Vec<u8>, TxExecutionResult)>;

    /// Cheap liveness probe.
    async fn health(&self) -> Result<()>;

    /// Node status: chain id, sync progress, versions.
    async fn status(&self) -> Result<NodeStatus>;

    /// One base64-encoded chunk of the genesis document.
    async fn genesis_chunk(&self, chunk: u64) -> Result<String>;

    /// Raw bytes of every transaction currently in the mempool.
    async fn unconfirmed_txs(&self) -> Result<Vec<Vec<u8>>>;

    /// The node's current peers.
    async fn peers(&self) -> Result<Vec<PeerInfo>>;

    /// Synchronous broadcast: the transaction has passed admission when the
    /// returned code is zero. Non-idempotent.
    async fn broadcast_sync(&self, tx_bytes: Vec<u8>) -> Result<BroadcastResult>;
}
