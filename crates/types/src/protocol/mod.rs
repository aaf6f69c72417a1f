// Path: crates/types/src/protocol/mod.rs
//! The chain-agnostic protocol model.
//!
//! These shapes mirror the standardized data/construction API: everything is
//! serde-serialized with `snake_case` wire names, and optional fields are
//! omitted rather than serialized as null so the structures round-trip
//! through the protocol's generic string-keyed maps.

use serde::{Deserialize, Serialize};

/// Generic string-keyed metadata bag used throughout the protocol.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

// -----------------------------------------------------------------------------
// Identifiers
// -----------------------------------------------------------------------------

/// Identifies the blockchain and network a request is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkIdentifier {
    /// The blockchain family name (e.g. the SDK or application name).
    pub blockchain: String,
    /// The specific chain/network name.
    pub network: String,
}

/// Uniquely identifies a block by height and hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockIdentifier {
    /// Block height.
    pub index: u64,
    /// Upper-case hex encoding of the block hash.
    pub hash: String,
}

/// A block reference where either field may be omitted; the node resolves
/// whichever is present (or the current tip when both are absent).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialBlockIdentifier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// Identifies a transaction by its content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionIdentifier {
    /// Upper-case hex encoding of the transaction hash.
    pub hash: String,
}

/// Identifies an account by address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentifier {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl AccountIdentifier {
    pub fn new(address: impl Into<String>) -> Self {
        Self { address: address.into(), metadata: None }
    }
}

/// Position of an operation within a transaction. Indices are zero-based and
/// contiguous within a single transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationIdentifier {
    pub index: u64,
}

// -----------------------------------------------------------------------------
// Amounts
// -----------------------------------------------------------------------------

/// A currency as seen by protocol clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// The native denomination string.
    pub symbol: String,
    /// Number of decimal places in the standard unit representation.
    pub decimals: u32,
}

/// A signed integer value in some currency. `value` is a base-10 string so
/// arbitrary-precision chains fit without loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub value: String,
    pub currency: Currency,
}

impl Amount {
    /// Builds an amount, negating `value` when `negative` is set.
    pub fn new(value: &str, negative: bool, currency: Currency) -> Self {
        let value = if negative { format!("-{value}") } else { value.to_string() };
        Self { value, currency }
    }
}

// -----------------------------------------------------------------------------
// Operations and transactions
// -----------------------------------------------------------------------------

/// One balance-affecting or descriptive effect inside a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub operation_identifier: OperationIdentifier,
    /// Indices of operations this one is paired with: a credit lists its
    /// debit, and every operation reconstructing the same native message
    /// links back to the group's leading operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_operations: Option<Vec<OperationIdentifier>>,
    /// The originating native message type URL or balance-event kind.
    #[serde(rename = "type")]
    pub kind: String,
    /// Present only on confirmed operations; absent on unsigned/constructed
    /// ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountIdentifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    /// Native-message fields not representable as account/amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// An ordered sequence of operations under one content hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_identifier: TransactionIdentifier,
    pub operations: Vec<Operation>,
}

/// A fully-populated protocol block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub block_identifier: BlockIdentifier,
    pub parent_block_identifier: BlockIdentifier,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub transactions: Vec<Transaction>,
}

/// Block header facts without the transaction bodies; what the converter
/// produces from a native block before transactions are assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSummary {
    pub block: BlockIdentifier,
    pub parent_block: BlockIdentifier,
    /// Milliseconds since the Unix epoch.
    pub millisecond_timestamp: i64,
    /// Number of user transactions in the block.
    pub tx_count: u64,
}

// -----------------------------------------------------------------------------
// Keys and signatures
// -----------------------------------------------------------------------------

/// Elliptic curves recognized on the construction surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    Secp256k1,
    Edwards25519,
}

/// A raw public key blob plus its declared curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    /// Hex encoding of the key bytes (compressed SEC1 for secp256k1,
    /// 32 raw bytes for edwards25519).
    pub hex_bytes: String,
    pub curve_type: CurveKind,
}

/// Signature schemes recognized on the construction surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureKind {
    Ecdsa,
    Ed25519,
}

/// The exact bytes one signer must sign, plus who signs them and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningPayload {
    pub account_identifier: AccountIdentifier,
    /// Hex encoding of the bytes to sign.
    pub hex_bytes: String,
    pub signature_type: SignatureKind,
}

/// An externally-produced signature handed back to the combine step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub signing_payload: SigningPayload,
    pub public_key: PublicKey,
    pub signature_type: SignatureKind,
    /// Hex encoding of the signature bytes.
    pub hex_bytes: String,
}

// -----------------------------------------------------------------------------
// Network descriptors
// -----------------------------------------------------------------------------

/// An operation status the gateway may attach to confirmed operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationStatus {
    pub status: String,
    pub successful: bool,
}

/// A peer of the underlying node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peer {
    pub peer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Sync progress of the underlying node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub current_index: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_index: Option<u64>,
    pub synced: bool,
}

/// Version facts advertised through network options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub rosetta_version: String,
    pub node_version: String,
}

/// What this gateway deployment supports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allow {
    pub operation_statuses: Vec<OperationStatus>,
    pub operation_types: Vec<String>,
    pub errors: Vec<ProtocolError>,
    pub historical_balance_lookup: bool,
}

/// A single structured protocol error object. Every response on the surface
/// is either a complete payload or exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolError {
    pub code: u32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub retriable: bool,
}

// -----------------------------------------------------------------------------
// Response envelopes
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkListResponse {
    pub network_identifiers: Vec<NetworkIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStatusResponse {
    pub current_block_identifier: BlockIdentifier,
    pub current_block_timestamp: i64,
    pub genesis_block_identifier: BlockIdentifier,
    pub oldest_block_identifier: BlockIdentifier,
    pub sync_status: SyncStatus,
    pub peers: Vec<Peer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkOptionsResponse {
    pub version: Version,
    pub allow: Allow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalanceResponse {
    pub block_identifier: BlockIdentifier,
    pub balances: Vec<Amount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockResponse {
    pub block: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTransactionResponse {
    pub transaction: Transaction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MempoolResponse {
    pub transaction_identifiers: Vec<TransactionIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MempoolTransactionResponse {
    pub transaction: Transaction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionDeriveResponse {
    pub account_identifier: AccountIdentifier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionPreprocessResponse {
    /// Opaque options bag to feed, unmodified, into the metadata step.
    pub options: Metadata,
    pub required_public_keys: Vec<AccountIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionMetadataResponse {
    /// Opaque metadata bag to feed, unmodified, into the payloads step.
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionPayloadsResponse {
    /// Hex encoding of the canonical unsigned transaction bytes.
    pub unsigned_transaction: String,
    pub payloads: Vec<SigningPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionCombineResponse {
    /// Hex encoding of the fully signed transaction bytes.
    pub signed_transaction: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionHashResponse {
    pub transaction_identifier: TransactionIdentifier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionParseResponse {
    pub operations: Vec<Operation>,
    pub account_identifier_signers: Vec<AccountIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionSubmitResponse {
    pub transaction_identifier: TransactionIdentifier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_serializes_type_field_and_omits_absent_status() {
        let op = Operation {
            operation_identifier: OperationIdentifier { index: 0 },
            related_operations: None,
            kind: "/lattice.bank.v1.MsgSend".into(),
            status: None,
            account: Some(AccountIdentifier::new("lat1abc")),
            amount: None,
            metadata: None,
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["type"], "/lattice.bank.v1.MsgSend");
        assert!(json.get("status").is_none());
        assert!(json.get("related_operations").is_none());
    }

    #[test]
    fn amount_negation() {
        let c = Currency { symbol: "ulat".into(), decimals: 6 };
        assert_eq!(Amount::new("15", true, c.clone()).value, "-15");
        assert_eq!(Amount::new("15", false, c).value, "15");
    }

    #[test]
    fn curve_and_signature_wire_names() {
        assert_eq!(serde_json::to_value(CurveKind::Secp256k1).unwrap(), "secp256k1");
        assert_eq!(serde_json::to_value(CurveKind::Edwards25519).unwrap(), "edwards25519");
        assert_eq!(serde_json::to_value(SignatureKind::Ecdsa).unwrap(), "ecdsa");
    }
}
