// Path: crates/client/src/construction.rs
//! The construction workflow: derive → preprocess → metadata → payloads →
//! combine → submit, plus the hash and parse helpers.
//!
//! Every step is stateless on the server side. The options bag produced by
//! preprocess and the metadata bag produced by the metadata step are the
//! only state carried between steps; both round-trip as generic maps and
//! must come back unmodified. The gateway never sees a private key: signing
//! happens between the payloads and combine steps, outside this process.

use crate::facade::GatewayClient;
use async_trait::async_trait;
use mesh_api::ConstructionApi;
use mesh_types::coin::DecCoin;
use mesh_types::construction::{
    from_metadata, to_metadata, ConstructionMetadata, PreprocessOptions,
};
use mesh_types::protocol::{
    AccountIdentifier, ConstructionCombineResponse, ConstructionDeriveResponse,
    ConstructionHashResponse, ConstructionMetadataResponse, ConstructionParseResponse,
    ConstructionPayloadsResponse, ConstructionPreprocessResponse, ConstructionSubmitResponse,
    Metadata, Operation, PublicKey, Signature, TransactionIdentifier,
};
use mesh_types::{GatewayError, Result};
use serde::Deserialize;
use std::str::FromStr;

/// The caller-supplied fee facts of a preprocess request.
#[derive(Debug, Default, Deserialize)]
struct PreprocessRequestMeta {
    #[serde(default)]
    memo: String,
    #[serde(default)]
    gas_limit: u64,
    #[serde(default)]
    gas_price: String,
}

impl GatewayClient {
    /// The fee-suggestion price for the configured denomination.
    fn suggested_gas_price(&self) -> Result<DecCoin> {
        self.config
            .suggest_price_table()?
            .into_iter()
            .find(|price| price.denom == self.config.suggest_denom)
            .ok_or_else(|| {
                GatewayError::Config(format!(
                    "suggested denom {:?} is not in the suggested price table",
                    self.config.suggest_denom
                ))
            })
    }

    fn decode_tx_hex(&self, tx: &str) -> Result<Vec<u8>> {
        hex::decode(tx).map_err(|e| GatewayError::BadArgument(format!("transaction is not hex: {e}")))
    }
}

#[async_trait]
impl ConstructionApi for GatewayClient {
    async fn derive(&self, public_key: &PublicKey) -> Result<ConstructionDeriveResponse> {
        let native = self.converter.to_native().pub_key(public_key)?;
        let address = self
            .converter
            .translate_context()
            .address_codec
            .address_of(native.raw());
        Ok(ConstructionDeriveResponse {
            account_identifier: AccountIdentifier::new(address),
        })
    }

    async fn preprocess(
        &self,
        operations: &[Operation],
        metadata: &Metadata,
    ) -> Result<ConstructionPreprocessResponse> {
        if operations.is_empty() {
            return Err(GatewayError::BadArgument("no operations".into()));
        }

        // signer extraction works on the reconstructed unsigned transaction
        let signers = self.converter.to_native().expected_signers(operations)?;

        let meta: PreprocessRequestMeta = from_metadata(metadata)?;
        if !self.config.enable_fee_suggestion {
            if meta.gas_price.is_empty() {
                return Err(GatewayError::BadArgument("no gas price".into()));
            }
            if meta.gas_limit == 0 {
                return Err(GatewayError::BadArgument("no gas limit".into()));
            }
        }

        let options = PreprocessOptions {
            expected_signers: signers.clone(),
            memo: meta.memo,
            gas_limit: meta.gas_limit,
            gas_price: meta.gas_price,
        };
        Ok(ConstructionPreprocessResponse {
            options: to_metadata(&options)?,
            required_public_keys: signers.into_iter().map(AccountIdentifier::new).collect(),
        })
    }

    async fn metadata(&self, options: &Metadata) -> Result<ConstructionMetadataResponse> {
        let node = self.node()?;
        if options.is_empty() {
            return Err(GatewayError::BadArgument("options length is 0".into()));
        }
        let mut options: PreprocessOptions = from_metadata(options)?;

        // fee suggestion fills whatever the caller left unset
        if self.config.enable_fee_suggestion {
            if options.gas_limit == 0 {
                options.gas_limit = self.config.suggest_gas;
            }
            if options.gas_price.is_empty() {
                options.gas_price = self.suggested_gas_price()?.to_string();
            }
        }

        if options.gas_limit > 0 && !options.gas_price.is_empty() {
            let price = DecCoin::from_str(&options.gas_price)?;
            if !price.is_positive() {
                return Err(GatewayError::BadArgument("gas price must be positive".into()));
            }
        }

        let status = node.status().await?;
        let chain_id = status.node_info.network;

        let mut signers_data = Vec::with_capacity(options.expected_signers.len());
        for signer in &options.expected_signers {
            signers_data.push(self.account_info(signer, None, &chain_id).await?);
        }

        let metadata = ConstructionMetadata {
            chain_id,
            signers_data,
            gas_limit: options.gas_limit,
            gas_price: options.gas_price,
            memo: options.memo,
        };
        Ok(ConstructionMetadataResponse {
            metadata: to_metadata(&metadata)?,
        })
    }

    async fn payloads(
        &self,
        operations: &[Operation],
        metadata: &Metadata,
        public_keys: &[PublicKey],
    ) -> Result<ConstructionPayloadsResponse> {
        if operations.is_empty() {
            return Err(GatewayError::InvalidOperation(
                "expected at least one operation".into(),
            ));
        }
        let body = self.converter.to_native().unsigned_tx(operations)?;
        let metadata: ConstructionMetadata = from_metadata(metadata)?;
        let (unsigned, payloads) = self
            .converter
            .to_protocol()
            .signing_components(&body, &metadata, public_keys)?;
        Ok(ConstructionPayloadsResponse {
            unsigned_transaction: hex::encode(unsigned),
            payloads,
        })
    }

    async fn combine(
        &self,
        unsigned_transaction: &str,
        signatures: &[Signature],
    ) -> Result<ConstructionCombineResponse> {
        let unsigned = self.decode_tx_hex(unsigned_transaction)?;
        let signed = self.converter.to_native().signed_tx(&unsigned, signatures)?;
        Ok(ConstructionCombineResponse {
            signed_transaction: hex::encode(signed),
        })
    }

    async fn hash(&self, signed_transaction: &str) -> Result<ConstructionHashResponse> {
        let signed = self.decode_tx_hex(signed_transaction)?;
        Ok(ConstructionHashResponse {
            transaction_identifier: TransactionIdentifier {
                hash: self.converter.to_protocol().tx_hash(&signed),
            },
        })
    }

    async fn parse(&self, transaction: &str, signed: bool) -> Result<ConstructionParseResponse> {
        let bytes = self.decode_tx_hex(transaction)?;
        if signed {
            let (operations, signers) = self.converter.to_protocol().ops_and_signers(&bytes)?;
            Ok(ConstructionParseResponse {
                operations,
                account_identifier_signers: signers,
            })
        } else {
            let tx = self.converter.to_protocol().tx(&bytes, None)?;
            Ok(ConstructionParseResponse {
                operations: tx.operations,
                account_identifier_signers: Vec::new(),
            })
        }
    }

    async fn submit(&self, signed_transaction: &str) -> Result<ConstructionSubmitResponse> {
        let node = self.node()?;
        let signed = self.decode_tx_hex(signed_transaction)?;
        let result = node.broadcast_sync(signed).await?;
        if result.code != 0 {
            tracing::warn!(
                target: "mesh-client",
                code = result.code,
                log = %result.log,
                "node rejected broadcast transaction"
            );
            // never synthesize a success identifier for a rejected tx
            return Err(GatewayError::Broadcast { code: result.code, log: result.log });
        }

        let mut metadata = Metadata::new();
        metadata.insert("log".into(), serde_json::Value::String(result.log));
        Ok(ConstructionSubmitResponse {
            transaction_identifier: TransactionIdentifier {
                hash: hex::encode_upper(result.hash),
            },
            metadata: Some(metadata),
        })
    }
}
