// Path: crates/converter/src/to_protocol.rs
//! Native → protocol translation.

use crate::ops::index_operations;
use crate::to_native::pubkey_any_to_raw;
use crate::Converter;
use mesh_proto::bank::event;
use mesh_proto::tx::{AuthInfo, Coin as ProtoCoin, Fee, ModeInfo, SignerInfo, TxBody, TxRaw};
use mesh_types::coin::{parse_coin_list, Coin, DecCoin};
use mesh_types::construction::{ConstructionMetadata, SignerData};
use mesh_types::native::{BaseAccount, Event, NativeBlock, NodeStatus, PeerInfo, TxExecutionResult};
use mesh_types::protocol::{
    AccountIdentifier, Amount, BlockIdentifier, BlockSummary, Operation, OperationIdentifier, Peer,
    PublicKey, SigningPayload, SyncStatus, Transaction, TransactionIdentifier,
};
use mesh_types::{
    GatewayError, Result, BLOCK_TX_HASH_MARKER, STATUS_REVERTED, STATUS_SUCCESS,
};
use prost::Message;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use std::str::FromStr;

/// The native → protocol capability group.
pub struct ToProtocol<'a> {
    pub(crate) conv: &'a Converter,
}

impl ToProtocol<'_> {
    /// Serializes the unsigned transaction exactly once and computes one
    /// signing payload per required signer, in metadata signer order.
    ///
    /// Returns the canonical unsigned transaction bytes (body and auth
    /// section pre-serialized, no signatures) and the payload list. Each
    /// payload is the SHA-256 of the serialized signing document for that
    /// signer.
    pub fn signing_components(
        &self,
        body: &TxBody,
        metadata: &ConstructionMetadata,
        public_keys: &[PublicKey],
    ) -> Result<(Vec<u8>, Vec<SigningPayload>)> {
        if public_keys.len() != metadata.signers_data.len() {
            return Err(GatewayError::BadArgument(format!(
                "metadata names {} signer(s) but {} public key(s) were supplied",
                metadata.signers_data.len(),
                public_keys.len()
            )));
        }
        if metadata.signers_data.is_empty() {
            return Err(GatewayError::BadArgument("metadata names no signers".into()));
        }

        let mut body = body.clone();
        body.memo = metadata.memo.clone();
        let body_bytes = body.encode_to_vec();

        let mut signer_infos = Vec::with_capacity(public_keys.len());
        let mut native_keys = Vec::with_capacity(public_keys.len());
        for (signer, key) in metadata.signers_data.iter().zip(public_keys) {
            let native = self.conv.to_native().pub_key(key)?;
            signer_infos.push(SignerInfo {
                public_key: Some(native.to_any()),
                mode_info: Some(ModeInfo::single_direct()),
                sequence: signer.sequence,
            });
            native_keys.push(native);
        }

        let auth_info = AuthInfo {
            signer_infos,
            fee: Some(self.fee(metadata)?),
        };
        let auth_info_bytes = auth_info.encode_to_vec();

        let unsigned = TxRaw {
            body_bytes: body_bytes.clone(),
            auth_info_bytes: auth_info_bytes.clone(),
            signatures: Vec::new(),
        }
        .encode_to_vec();

        let mut payloads = Vec::with_capacity(metadata.signers_data.len());
        for (signer, native) in metadata.signers_data.iter().zip(&native_keys) {
            let sign_doc = mesh_proto::tx::SignDoc {
                body_bytes: body_bytes.clone(),
                auth_info_bytes: auth_info_bytes.clone(),
                chain_id: signer.chain_id.clone(),
                account_number: signer.account_number,
            };
            let digest = Sha256::digest(sign_doc.encode_to_vec());
            payloads.push(SigningPayload {
                account_identifier: AccountIdentifier::new(&signer.address),
                hex_bytes: hex::encode(digest),
                signature_type: native.signature_kind(),
            });
        }

        Ok((unsigned, payloads))
    }

    /// The fee section implied by the metadata bag: `ceil(gas_price ×
    /// gas_limit)` in the price's denomination.
    fn fee(&self, metadata: &ConstructionMetadata) -> Result<Fee> {
        let mut amount = Vec::new();
        if !metadata.gas_price.is_empty() {
            let price = DecCoin::from_str(&metadata.gas_price)?;
            let total = (price.amount * Decimal::from(metadata.gas_limit)).ceil();
            let units = total.to_u128().ok_or_else(|| {
                GatewayError::BadArgument(format!(
                    "fee {total}{} does not fit an integer coin amount",
                    price.denom
                ))
            })?;
            amount.push(ProtoCoin { denom: price.denom, amount: units.to_string() });
        }
        Ok(Fee {
            amount,
            gas_limit: metadata.gas_limit,
            payer: String::new(),
            granter: String::new(),
        })
    }

    /// Extracts the signing prerequisites of a native account.
    pub fn signer_data(&self, account: &BaseAccount, chain_id: &str) -> SignerData {
        SignerData {
            address: account.address.clone(),
            account_number: account.account_number,
            sequence: account.sequence,
            chain_id: chain_id.to_string(),
            public_key_hex: account.pub_key.as_ref().map(|(_, bytes)| hex::encode(bytes)),
        }
    }

    /// Maps native balances to protocol amounts, filtered to the known
    /// currency set and carrying each currency's registered exponent.
    pub fn amounts(&self, balances: &[Coin], known_currencies: &[Coin]) -> Vec<Amount> {
        balances
            .iter()
            .filter(|coin| known_currencies.iter().any(|k| k.denom == coin.denom))
            .map(|coin| Amount::new(&coin.amount, false, self.conv.ctx.currency(&coin.denom)))
            .collect()
    }

    /// Decodes raw transaction bytes into a protocol transaction. `status`
    /// is attached to every operation iff an execution result is supplied;
    /// unconfirmed transactions carry none.
    pub fn tx(&self, tx_bytes: &[u8], result: Option<&TxExecutionResult>) -> Result<Transaction> {
        let status = result.map(|r| if r.code == 0 { STATUS_SUCCESS } else { STATUS_REVERTED });

        let raw = TxRaw::decode(tx_bytes)
            .map_err(|e| GatewayError::Codec(format!("decoding transaction: {e}")))?;
        let body = TxBody::decode(raw.body_bytes.as_slice())
            .map_err(|e| GatewayError::Codec(format!("decoding transaction body: {e}")))?;

        let mut groups = Vec::with_capacity(body.messages.len());
        for msg in &body.messages {
            let translator = self.conv.catalog.resolve(&msg.type_url)?;
            groups.push(translator.to_operations(&self.conv.ctx, msg, status)?);
        }

        Ok(Transaction {
            transaction_identifier: TransactionIdentifier { hash: self.tx_hash(tx_bytes) },
            operations: index_operations(groups),
        })
    }

    /// Like [`Self::tx`] for a fully signed transaction, additionally
    /// recovering the signer account identifiers from the auth section.
    pub fn ops_and_signers(
        &self,
        signed_tx: &[u8],
    ) -> Result<(Vec<Operation>, Vec<AccountIdentifier>)> {
        let tx = self.tx(signed_tx, None)?;

        let raw = TxRaw::decode(signed_tx)
            .map_err(|e| GatewayError::Codec(format!("decoding transaction: {e}")))?;
        let auth_info = AuthInfo::decode(raw.auth_info_bytes.as_slice())
            .map_err(|e| GatewayError::Codec(format!("decoding auth section: {e}")))?;

        let mut signers = Vec::with_capacity(auth_info.signer_infos.len());
        for info in &auth_info.signer_infos {
            let key_any = info
                .public_key
                .as_ref()
                .ok_or_else(|| GatewayError::Codec("signer info without public key".into()))?;
            let (key_bytes, _) = pubkey_any_to_raw(key_any)?;
            signers.push(AccountIdentifier::new(
                self.conv.ctx.address_codec.address_of(&key_bytes),
            ));
        }

        Ok((tx.operations, signers))
    }

    /// Scans a block's emitted balance-change events into an indexed
    /// operation list for the synthetic block transaction. Event kinds
    /// outside the balance vocabulary are ignored; malformed balance events
    /// are a codec error, never silently dropped.
    pub fn balance_ops(&self, status: &str, events: &[Event]) -> Result<Vec<Operation>> {
        let mut groups = Vec::new();
        for ev in events {
            let (account_key, negative) = match ev.kind.as_str() {
                event::COIN_SPENT => (event::ATTR_SPENDER, true),
                event::COIN_RECEIVED => (event::ATTR_RECEIVER, false),
                event::COINBASE => (event::ATTR_MINTER, false),
                event::BURN => (event::ATTR_BURNER, true),
                _ => continue,
            };
            let account = ev.attribute(account_key).ok_or_else(|| {
                GatewayError::Codec(format!(
                    "{} event is missing its {account_key:?} attribute",
                    ev.kind
                ))
            })?;
            let amount = ev.attribute(event::ATTR_AMOUNT).ok_or_else(|| {
                GatewayError::Codec(format!("{} event is missing its amount attribute", ev.kind))
            })?;
            let coins = parse_coin_list(amount)
                .map_err(|e| GatewayError::Codec(format!("{} event amount: {e}", ev.kind)))?;

            let mut group = Vec::with_capacity(coins.len());
            for (pos, coin) in coins.iter().enumerate() {
                group.push(Operation {
                    operation_identifier: OperationIdentifier { index: pos as u64 },
                    related_operations: (pos > 0)
                        .then(|| vec![OperationIdentifier { index: 0 }]),
                    kind: ev.kind.clone(),
                    status: Some(status.to_string()),
                    account: Some(AccountIdentifier::new(account)),
                    amount: Some(Amount::new(
                        &coin.amount,
                        negative,
                        self.conv.ctx.currency(&coin.denom),
                    )),
                    metadata: None,
                });
            }
            if !group.is_empty() {
                groups.push(group);
            }
        }
        Ok(index_operations(groups))
    }

    /// Maps native block header fields to the protocol block identifier
    /// shape. At the initial height the parent is the block itself.
    pub fn block_response(&self, block: &NativeBlock) -> BlockSummary {
        let identifier = BlockIdentifier {
            index: block.header.height,
            hash: hex::encode_upper(&block.block_id.hash),
        };
        let parent_block = if block.header.height <= 1 || block.header.parent_id.hash.is_empty() {
            identifier.clone()
        } else {
            BlockIdentifier {
                index: block.header.height - 1,
                hash: hex::encode_upper(&block.header.parent_id.hash),
            }
        };
        BlockSummary {
            block: identifier,
            parent_block,
            millisecond_timestamp: block.header.time_unix_nano / 1_000_000,
            tx_count: block.txs.len() as u64,
        }
    }

    /// Deterministic identifier of the synthetic block transaction: the
    /// marker byte followed by the block hash. The marker keeps the
    /// identifier one byte longer than any user transaction hash, so the two
    /// spaces cannot collide.
    pub fn finalize_block_tx_hash(&self, block_hash: &[u8]) -> String {
        let mut bytes = Vec::with_capacity(1 + block_hash.len());
        bytes.push(BLOCK_TX_HASH_MARKER);
        bytes.extend_from_slice(block_hash);
        hex::encode_upper(bytes)
    }

    /// The content hash of raw transaction bytes.
    pub fn tx_hash(&self, tx_bytes: &[u8]) -> String {
        hex::encode_upper(Sha256::digest(tx_bytes))
    }

    /// Identifiers for a list of raw transactions, in order.
    pub fn tx_identifiers(&self, txs: &[Vec<u8>]) -> Vec<TransactionIdentifier> {
        txs.iter()
            .map(|tx| TransactionIdentifier { hash: self.tx_hash(tx) })
            .collect()
    }

    /// Maps the node's peer list.
    pub fn peers(&self, peers: &[PeerInfo]) -> Vec<Peer> {
        peers
            .iter()
            .map(|p| {
                let mut metadata = mesh_types::protocol::Metadata::new();
                metadata.insert("moniker".into(), serde_json::Value::String(p.moniker.clone()));
                Peer { peer_id: p.node_id.clone(), metadata: Some(metadata) }
            })
            .collect()
    }

    /// Maps the node's sync state.
    pub fn sync_status(&self, status: &NodeStatus) -> SyncStatus {
        SyncStatus {
            current_index: status.sync_info.latest_block_height,
            target_index: None,
            synced: !status.sync_info.catching_up,
        }
    }
}
