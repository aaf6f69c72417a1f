// Path: crates/converter/src/to_native.rs
//! Protocol → native translation.

use crate::ops::group_operations;
use crate::translators::META_SIGNER;
use crate::Converter;
use mesh_proto::crypto::{
    Ed25519PubKey, Secp256k1PubKey, ED25519_PUB_KEY_TYPE_URL, SECP256K1_PUB_KEY_TYPE_URL,
};
use mesh_proto::tx::{AuthInfo, TxBody, TxRaw};
use mesh_proto::Any;
use mesh_types::protocol::{CurveKind, Operation, PublicKey, Signature, SignatureKind};
use mesh_types::{
    GatewayError, Result, BLOCK_TX_HASH_LEN, BLOCK_TX_HASH_MARKER, USER_TX_HASH_LEN,
};
use prost::Message;

/// What kind of transaction a hash identifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    /// An ordinary user transaction.
    User,
    /// The synthetic transaction carrying a block's own balance events.
    BlockSynthetic,
}

/// A validated native public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativePubKey {
    /// Compressed 33-byte SEC1 secp256k1 key.
    Secp256k1(Vec<u8>),
    /// Raw 32-byte ed25519 key.
    Ed25519(Vec<u8>),
}

impl NativePubKey {
    /// The canonical key bytes addresses derive from.
    pub fn raw(&self) -> &[u8] {
        match self {
            Self::Secp256k1(b) | Self::Ed25519(b) => b,
        }
    }

    /// The signature scheme this key verifies.
    pub fn signature_kind(&self) -> SignatureKind {
        match self {
            Self::Secp256k1(_) => SignatureKind::Ecdsa,
            Self::Ed25519(_) => SignatureKind::Ed25519,
        }
    }

    /// Packs the key into its native `Any` representation.
    pub fn to_any(&self) -> Any {
        match self {
            Self::Secp256k1(b) => Secp256k1PubKey { key: b.clone() }.to_any(),
            Self::Ed25519(b) => Ed25519PubKey { key: b.clone() }.to_any(),
        }
    }
}

/// Unpacks a native public-key `Any` into its raw bytes and scheme.
pub(crate) fn pubkey_any_to_raw(any: &Any) -> Result<(Vec<u8>, SignatureKind)> {
    match any.type_url.as_str() {
        SECP256K1_PUB_KEY_TYPE_URL => {
            let pk = Secp256k1PubKey::decode(any.value.as_slice())
                .map_err(|e| GatewayError::Codec(format!("decoding secp256k1 key: {e}")))?;
            Ok((pk.key, SignatureKind::Ecdsa))
        }
        ED25519_PUB_KEY_TYPE_URL => {
            let pk = Ed25519PubKey::decode(any.value.as_slice())
                .map_err(|e| GatewayError::Codec(format!("decoding ed25519 key: {e}")))?;
            Ok((pk.key, SignatureKind::Ed25519))
        }
        other => Err(GatewayError::Codec(format!(
            "unsupported public key type {other:?}"
        ))),
    }
}

/// The protocol → native capability group.
pub struct ToNative<'a> {
    pub(crate) conv: &'a Converter,
}

impl ToNative<'_> {
    /// Reconstructs the body of an unsigned native transaction from a
    /// client-supplied operation list: one native message per operation
    /// group, in group order.
    pub fn unsigned_tx(&self, operations: &[Operation]) -> Result<TxBody> {
        if operations.is_empty() {
            return Err(GatewayError::InvalidOperation(
                "expected at least one operation".into(),
            ));
        }
        let mut messages = Vec::new();
        for group in group_operations(operations)? {
            let translator = self.conv.catalog.resolve(&group[0].kind)?;
            messages.push(translator.to_message(&self.conv.ctx, &group)?);
        }
        Ok(TxBody { messages, memo: String::new(), timeout_height: 0 })
    }

    /// The addresses that must sign a transaction built from `operations`,
    /// in native signer order, deduplicated. Dynamic message types that
    /// cannot expose a signer structurally fall back to the group's
    /// operation-level `signer` metadata.
    pub fn expected_signers(&self, operations: &[Operation]) -> Result<Vec<String>> {
        if operations.is_empty() {
            return Err(GatewayError::BadArgument("no operations".into()));
        }
        let mut signers: Vec<String> = Vec::new();
        for group in group_operations(operations)? {
            let translator = self.conv.catalog.resolve(&group[0].kind)?;
            let msg = translator.to_message(&self.conv.ctx, &group)?;
            let mut group_signers = translator.signer_addresses(&self.conv.ctx, &msg)?;
            if group_signers.is_empty() {
                group_signers = group
                    .iter()
                    .filter_map(|op| op.metadata.as_ref())
                    .filter_map(|m| m.get(META_SIGNER))
                    .filter_map(|v| v.as_str())
                    .map(str::to_string)
                    .collect();
            }
            for signer in group_signers {
                if !signers.contains(&signer) {
                    signers.push(signer);
                }
            }
        }
        if signers.is_empty() {
            return Err(GatewayError::InvalidOperation(
                "could not determine any signer for the operation list".into(),
            ));
        }
        Ok(signers)
    }

    /// Injects externally-produced signatures into an unsigned transaction.
    ///
    /// The unsigned bytes already carry the serialized body and auth section
    /// the signers committed to; both are spliced into the signed
    /// transaction untouched — re-serializing either here would silently
    /// invalidate the signatures.
    pub fn signed_tx(&self, unsigned_tx: &[u8], signatures: &[Signature]) -> Result<Vec<u8>> {
        let raw = TxRaw::decode(unsigned_tx)
            .map_err(|e| GatewayError::Codec(format!("decoding unsigned transaction: {e}")))?;
        let auth_info = AuthInfo::decode(raw.auth_info_bytes.as_slice())
            .map_err(|e| GatewayError::Codec(format!("decoding auth section: {e}")))?;

        if auth_info.signer_infos.len() != signatures.len() {
            return Err(GatewayError::BadArgument(format!(
                "transaction expects {} signature(s), got {}",
                auth_info.signer_infos.len(),
                signatures.len()
            )));
        }

        let mut ordered = Vec::with_capacity(signatures.len());
        for info in &auth_info.signer_infos {
            let key_any = info.public_key.as_ref().ok_or_else(|| {
                GatewayError::Codec("signer info without public key".into())
            })?;
            let (key_bytes, _) = pubkey_any_to_raw(key_any)?;
            let address = self.conv.ctx.address_codec.address_of(&key_bytes);
            let signature = signatures
                .iter()
                .find(|s| s.signing_payload.account_identifier.address == address)
                .ok_or_else(|| {
                    GatewayError::BadArgument(format!("no signature supplied for signer {address}"))
                })?;
            let bytes = hex::decode(&signature.hex_bytes).map_err(|e| {
                GatewayError::BadArgument(format!("signature for {address} is not hex: {e}"))
            })?;
            ordered.push(bytes);
        }

        let signed = TxRaw {
            body_bytes: raw.body_bytes,
            auth_info_bytes: raw.auth_info_bytes,
            signatures: ordered,
        };
        Ok(signed.encode_to_vec())
    }

    /// Decodes a raw public key blob plus declared curve into the native key
    /// representation, validating that the bytes are a point on the curve.
    pub fn pub_key(&self, public_key: &PublicKey) -> Result<NativePubKey> {
        let bytes = hex::decode(&public_key.hex_bytes)
            .map_err(|e| GatewayError::Converter(format!("public key is not hex: {e}")))?;
        match public_key.curve_type {
            CurveKind::Secp256k1 => {
                let key = k256::ecdsa::VerifyingKey::from_sec1_bytes(&bytes).map_err(|e| {
                    GatewayError::Converter(format!("invalid secp256k1 public key: {e}"))
                })?;
                Ok(NativePubKey::Secp256k1(
                    key.to_encoded_point(true).as_bytes().to_vec(),
                ))
            }
            CurveKind::Edwards25519 => {
                let arr: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
                    GatewayError::Converter(format!(
                        "ed25519 public key must be 32 bytes, got {}",
                        bytes.len()
                    ))
                })?;
                ed25519_dalek::VerifyingKey::from_bytes(&arr).map_err(|e| {
                    GatewayError::Converter(format!("invalid ed25519 public key: {e}"))
                })?;
                Ok(NativePubKey::Ed25519(arr.to_vec()))
            }
        }
    }

    /// Classifies a transaction-identifier hash by byte length and returns
    /// the hash normalized for lookup (the synthetic marker is stripped so
    /// the remainder is the block hash).
    pub fn hash_to_tx_kind(&self, hash: &str) -> Result<(TxKind, Vec<u8>)> {
        let bytes = hex::decode(hash)
            .map_err(|e| GatewayError::BadArgument(format!("transaction hash is not hex: {e}")))?;
        match bytes.len() {
            USER_TX_HASH_LEN => Ok((TxKind::User, bytes)),
            BLOCK_TX_HASH_LEN if bytes[0] == BLOCK_TX_HASH_MARKER => {
                Ok((TxKind::BlockSynthetic, bytes[1..].to_vec()))
            }
            n => Err(GatewayError::BadArgument(format!(
                "unrecognized transaction hash length: {n}"
            ))),
        }
    }
}
