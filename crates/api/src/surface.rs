// Path: crates/api/src/surface.rs
//! The protocol surface exposed upward to the external transport layer.
//!
//! Every method resolves to either a complete, well-formed payload or a
//! single classified [`mesh_types::GatewayError`]; the transport maps the
//! error to its structured protocol object via
//! [`mesh_types::GatewayError::to_protocol`]. Partial results are never
//! returned.

use async_trait::async_trait;
use mesh_types::protocol::{
    AccountBalanceResponse, AccountIdentifier, BlockIdentifier, BlockResponse,
    BlockTransactionResponse, ConstructionCombineResponse, ConstructionDeriveResponse,
    ConstructionHashResponse, ConstructionMetadataResponse, ConstructionParseResponse,
    ConstructionPayloadsResponse, ConstructionPreprocessResponse, ConstructionSubmitResponse,
    MempoolResponse, MempoolTransactionResponse, Metadata, NetworkListResponse,
    NetworkOptionsResponse, NetworkStatusResponse, Operation, PartialBlockIdentifier, PublicKey,
    Signature, TransactionIdentifier,
};
use mesh_types::Result;

/// The data half of the protocol: queries against confirmed and mempool
/// state.
#[async_trait]
pub trait DataApi: Send + Sync {
    async fn network_list(&self) -> Result<NetworkListResponse>;

    async fn network_options(&self) -> Result<NetworkOptionsResponse>;

    async fn network_status(&self) -> Result<NetworkStatusResponse>;

    /// Balance of an account, optionally at a historical block.
    async fn account_balance(
        &self,
        account: &AccountIdentifier,
        block: Option<&PartialBlockIdentifier>,
    ) -> Result<AccountBalanceResponse>;

    /// A block by height, hash, or the current tip when both are absent.
    async fn block(&self, block: &PartialBlockIdentifier) -> Result<BlockResponse>;

    /// A single transaction of a confirmed block.
    async fn block_transaction(
        &self,
        block: &BlockIdentifier,
        tx: &TransactionIdentifier,
    ) -> Result<BlockTransactionResponse>;

    async fn mempool(&self) -> Result<MempoolResponse>;

    async fn mempool_transaction(
        &self,
        tx: &TransactionIdentifier,
    ) -> Result<MempoolTransactionResponse>;
}

/// The construction half of the protocol: the five-step offline workflow
/// plus the hash and parse helpers. Steps communicate only through the
/// opaque options/metadata bags.
#[async_trait]
pub trait ConstructionApi: Send + Sync {
    /// Step 1: public key → address. Pure, no network I/O.
    async fn derive(&self, public_key: &PublicKey) -> Result<ConstructionDeriveResponse>;

    /// Step 2: operations → options bag + required signers. Offline.
    async fn preprocess(
        &self,
        operations: &[Operation],
        metadata: &Metadata,
    ) -> Result<ConstructionPreprocessResponse>;

    /// Step 3: options bag + live network state → metadata bag. Online.
    async fn metadata(&self, options: &Metadata) -> Result<ConstructionMetadataResponse>;

    /// Step 4: operations + metadata bag + public keys → unsigned
    /// transaction bytes and one signing payload per signer. Offline.
    async fn payloads(
        &self,
        operations: &[Operation],
        metadata: &Metadata,
        public_keys: &[PublicKey],
    ) -> Result<ConstructionPayloadsResponse>;

    /// Step 5a: unsigned bytes + external signatures → signed bytes.
    /// Offline.
    async fn combine(
        &self,
        unsigned_transaction: &str,
        signatures: &[Signature],
    ) -> Result<ConstructionCombineResponse>;

    /// Identifier of a signed transaction without broadcasting it. Offline.
    async fn hash(&self, signed_transaction: &str) -> Result<ConstructionHashResponse>;

    /// Decodes a constructed transaction back into operations (and, when
    /// signed, its signer accounts) so clients can verify intent. Offline.
    async fn parse(&self, transaction: &str, signed: bool) -> Result<ConstructionParseResponse>;

    /// Step 5b: broadcast. A non-zero node result code surfaces as a
    /// broadcast-failure error carrying the node's log, never as success.
    async fn submit(&self, signed_transaction: &str) -> Result<ConstructionSubmitResponse>;
}
