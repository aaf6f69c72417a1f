// Path: crates/client/src/facade.rs
//! The query façade: composes `NodeQuery` calls and delegates every
//! translation to the converter.
//!
//! No state is cached; every request re-fetches from the node and sees the
//! node's current view. Callers needing point-in-time consistency pin a
//! height through the node's height-scoped query mechanism.

use crate::config::GatewayConfig;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use mesh_api::{DataApi, NodeQuery};
use mesh_converter::{Converter, TxKind};
use mesh_proto::bank::event;
use mesh_types::coin::Coin;
use mesh_types::construction::SignerData;
use mesh_types::protocol::{
    AccountBalanceResponse, AccountIdentifier, Allow, Block, BlockIdentifier, BlockResponse,
    BlockSummary, BlockTransactionResponse, MempoolResponse, MempoolTransactionResponse,
    NetworkListResponse, NetworkOptionsResponse, NetworkStatusResponse, OperationStatus,
    PartialBlockIdentifier, Transaction, TransactionIdentifier, Version,
};
use mesh_types::{GatewayError, Result, STATUS_REVERTED, STATUS_SUCCESS};
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on the node calls of a health check.
pub const NODE_TIMEOUT: Duration = Duration::from_secs(60);

/// Protocol revision implemented by the surface.
pub const PROTOCOL_VERSION: &str = "1.4.13";

static INITIAL_HEIGHT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""initial_height":"(\d+)""#).expect("static regex"));

/// One network client servicing both halves of the protocol surface.
pub struct GatewayClient {
    pub(crate) config: GatewayConfig,
    pub(crate) converter: Arc<Converter>,
    node: Option<Arc<dyn NodeQuery>>,
    version: String,
}

impl GatewayClient {
    /// A client for full online operation.
    pub fn online(
        mut config: GatewayConfig,
        converter: Arc<Converter>,
        node: Arc<dyn NodeQuery>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, converter, Some(node)))
    }

    /// A construction-only client with no node connection; every online
    /// endpoint reports itself unavailable.
    pub fn offline(mut config: GatewayConfig, converter: Arc<Converter>) -> Result<Self> {
        config.offline = true;
        config.validate()?;
        Ok(Self::assemble(config, converter, None))
    }

    fn assemble(
        config: GatewayConfig,
        converter: Arc<Converter>,
        node: Option<Arc<dyn NodeQuery>>,
    ) -> Self {
        Self {
            config,
            converter,
            node,
            version: format!("mesh-gateway/v{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub(crate) fn node(&self) -> Result<&Arc<dyn NodeQuery>> {
        self.node.as_ref().ok_or_else(|| {
            GatewayError::UnavailableOffline(
                "this endpoint requires a node connection".into(),
            )
        })
    }

    /// Health check bounded by [`NODE_TIMEOUT`]: the node must answer its
    /// liveness probe, report a status and serve the supply query.
    pub async fn ready(&self) -> Result<()> {
        let node = self.node()?;
        tokio::time::timeout(NODE_TIMEOUT, async {
            node.health().await?;
            node.status().await?;
            node.total_supply(None).await?;
            Ok::<(), GatewayError>(())
        })
        .await
        .map_err(|_| GatewayError::OnlineClient("health check timed out".into()))??;
        tracing::debug!(target: "mesh-client", "node health check passed");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Block & transaction assembly
    // -------------------------------------------------------------------------

    /// Fetches a block and its execution results, converts every user
    /// transaction in block order and appends the synthetic block
    /// transaction carrying the block-level balance events.
    pub(crate) async fn block_txs(
        &self,
        height: Option<u64>,
    ) -> Result<(BlockSummary, Vec<Transaction>)> {
        let node = self.node()?;
        let (block, results) = tokio::join!(node.block_by_height(height), node.block_results(height));
        let block = block?;
        let results = results?;

        if results.tx_results.len() != block.txs.len() {
            return Err(GatewayError::OnlineClient(format!(
                "block {} carries {} transaction(s) but {} execution result(s)",
                block.header.height,
                block.txs.len(),
                results.tx_results.len()
            )));
        }

        let mut transactions = Vec::with_capacity(block.txs.len() + 1);
        for (tx_bytes, result) in block.txs.iter().zip(&results.tx_results) {
            transactions.push(self.converter.to_protocol().tx(tx_bytes, Some(result))?);
        }
        transactions.push(Transaction {
            transaction_identifier: TransactionIdentifier {
                hash: self
                    .converter
                    .to_protocol()
                    .finalize_block_tx_hash(&block.block_id.hash),
            },
            operations: self
                .converter
                .to_protocol()
                .balance_ops(STATUS_SUCCESS, &results.block_events)?,
        });

        Ok((self.converter.to_protocol().block_response(&block), transactions))
    }

    /// Resolves a partial block reference to a height: explicit index wins,
    /// then hash, then the node's current tip.
    async fn resolve_height(&self, block: Option<&PartialBlockIdentifier>) -> Result<u64> {
        let node = self.node()?;
        match block {
            Some(PartialBlockIdentifier { index: Some(index), .. }) => Ok(*index),
            Some(PartialBlockIdentifier { hash: Some(hash), .. }) => {
                let bytes = hex::decode(hash).map_err(|e| {
                    GatewayError::BadArgument(format!("invalid block hash: {e}"))
                })?;
                Ok(node.block_by_hash(&bytes).await?.header.height)
            }
            _ => Ok(node.status().await?.sync_info.latest_block_height),
        }
    }

    /// A confirmed transaction by identifier hash, dispatching on the
    /// identifier's kind.
    pub(crate) async fn get_tx(&self, hash: &str) -> Result<Transaction> {
        let node = self.node()?;
        let (kind, canonical) = self.converter.to_native().hash_to_tx_kind(hash)?;
        match kind {
            TxKind::User => {
                let (bytes, result) = node.tx_by_hash(&canonical).await?;
                self.converter.to_protocol().tx(&bytes, Some(&result))
            }
            TxKind::BlockSynthetic => {
                // the canonical remainder is the block hash; the synthetic
                // transaction is always the last of its block
                let block = node.block_by_hash(&canonical).await?;
                let (_, mut txs) = self.block_txs(Some(block.header.height)).await?;
                txs.pop().ok_or_else(|| {
                    GatewayError::NotFound(format!("no block transaction for hash {hash}"))
                })
            }
        }
    }

    // -------------------------------------------------------------------------
    // Supply, accounts, genesis
    // -------------------------------------------------------------------------

    /// Walks the paginated total-supply query to assemble the known
    /// currency set.
    pub(crate) async fn coins(&self) -> Result<Vec<Coin>> {
        let node = self.node()?;
        let mut coins = Vec::new();
        let mut page_key = None;
        loop {
            let page = node.total_supply(page_key).await?;
            coins.extend(page.items);
            match page.next_key {
                Some(key) if !key.is_empty() => page_key = Some(key),
                _ => return Ok(coins),
            }
        }
    }

    /// The signing prerequisites of an address, optionally pinned to a
    /// historical height.
    pub(crate) async fn account_info(
        &self,
        address: &str,
        height: Option<u64>,
        chain_id: &str,
    ) -> Result<SignerData> {
        let account = self.node()?.account(address, height).await?;
        Ok(self.converter.to_protocol().signer_data(&account, chain_id))
    }

    async fn genesis_block(&self) -> Result<BlockSummary> {
        let block = self.node()?.block_by_height(Some(1)).await?;
        Ok(self.converter.to_protocol().block_response(&block))
    }

    /// The block at the chain's declared initial height, extracted from the
    /// first genesis chunk. Used when height 1 has been pruned away.
    async fn initial_height_block(&self) -> Result<BlockSummary> {
        let node = self.node()?;
        let chunk = node.genesis_chunk(0).await?;
        let height = extract_initial_height(&chunk)?;
        let block = node.block_by_height(Some(height)).await?;
        Ok(self.converter.to_protocol().block_response(&block))
    }

    async fn oldest_block(&self) -> Result<BlockSummary> {
        let node = self.node()?;
        let status = node.status().await?;
        let block = node
            .block_by_height(Some(status.sync_info.earliest_block_height))
            .await?;
        Ok(self.converter.to_protocol().block_response(&block))
    }

    /// The operation types this deployment can produce: every catalog
    /// message type plus the balance-event kinds.
    fn supported_operation_types(&self) -> Vec<String> {
        let mut types = self.converter.catalog().list_message_urls();
        types.extend(
            [event::COIN_SPENT, event::COIN_RECEIVED, event::COINBASE, event::BURN]
                .map(str::to_string),
        );
        types
    }
}

/// Extracts `"initial_height":"N"` from a base64-encoded genesis chunk.
fn extract_initial_height(chunk_b64: &str) -> Result<u64> {
    let chunk = BASE64
        .decode(chunk_b64)
        .map_err(|e| GatewayError::OnlineClient(format!("decoding genesis chunk: {e}")))?;
    let text = String::from_utf8_lossy(&chunk);
    let captures = INITIAL_HEIGHT_RE
        .captures(&text)
        .ok_or_else(|| GatewayError::OnlineClient("initial height not found in genesis".into()))?;
    captures[1]
        .parse()
        .map_err(|e| GatewayError::OnlineClient(format!("parsing initial height: {e}")))
}

#[async_trait]
impl DataApi for GatewayClient {
    async fn network_list(&self) -> Result<NetworkListResponse> {
        Ok(NetworkListResponse {
            network_identifiers: vec![self.config.network_identifier()],
        })
    }

    async fn network_options(&self) -> Result<NetworkOptionsResponse> {
        Ok(NetworkOptionsResponse {
            version: Version {
                rosetta_version: PROTOCOL_VERSION.to_string(),
                node_version: self.version.clone(),
            },
            allow: Allow {
                operation_statuses: vec![
                    OperationStatus { status: STATUS_SUCCESS.into(), successful: true },
                    OperationStatus { status: STATUS_REVERTED.into(), successful: false },
                ],
                operation_types: self.supported_operation_types(),
                errors: GatewayError::catalog(),
                historical_balance_lookup: true,
            },
        })
    }

    async fn network_status(&self) -> Result<NetworkStatusResponse> {
        let node = self.node()?;
        let status = node.status().await?;
        let sync_status = self.converter.to_protocol().sync_status(&status);

        let current = node
            .block_by_height(Some(status.sync_info.latest_block_height))
            .await?;
        let current = self.converter.to_protocol().block_response(&current);

        let oldest = self.oldest_block().await?;
        // a pruned node may no longer carry the genesis block; fall back to
        // the declared initial height, then to the oldest available block
        let genesis = match self.genesis_block().await {
            Ok(genesis) => genesis,
            Err(_) => match self.initial_height_block().await {
                Ok(initial) => initial,
                Err(_) => oldest.clone(),
            },
        };

        let peers = self.converter.to_protocol().peers(&node.peers().await?);

        Ok(NetworkStatusResponse {
            current_block_identifier: current.block,
            current_block_timestamp: current.millisecond_timestamp,
            genesis_block_identifier: genesis.block,
            oldest_block_identifier: oldest.block,
            sync_status,
            peers,
        })
    }

    async fn account_balance(
        &self,
        account: &AccountIdentifier,
        block: Option<&PartialBlockIdentifier>,
    ) -> Result<AccountBalanceResponse> {
        let node = self.node()?;
        let height = self.resolve_height(block).await?;

        let block = node.block_by_height(Some(height)).await?;
        let summary = self.converter.to_protocol().block_response(&block);

        let mut balances = Vec::new();
        let mut page_key = None;
        loop {
            let page = node
                .balances(&account.address, Some(height), page_key)
                .await?;
            balances.extend(page.items);
            match page.next_key {
                Some(key) if !key.is_empty() => page_key = Some(key),
                _ => break,
            }
        }

        let known = self.coins().await?;
        Ok(AccountBalanceResponse {
            block_identifier: summary.block,
            balances: self.converter.to_protocol().amounts(&balances, &known),
        })
    }

    async fn block(&self, block: &PartialBlockIdentifier) -> Result<BlockResponse> {
        let height = self.resolve_height(Some(block)).await?;
        let (summary, transactions) = self.block_txs(Some(height)).await?;
        Ok(BlockResponse {
            block: Block {
                block_identifier: summary.block,
                parent_block_identifier: summary.parent_block,
                timestamp: summary.millisecond_timestamp,
                transactions,
            },
        })
    }

    async fn block_transaction(
        &self,
        _block: &BlockIdentifier,
        tx: &TransactionIdentifier,
    ) -> Result<BlockTransactionResponse> {
        Ok(BlockTransactionResponse {
            transaction: self.get_tx(&tx.hash).await?,
        })
    }

    async fn mempool(&self) -> Result<MempoolResponse> {
        let txs = self.node()?.unconfirmed_txs().await?;
        Ok(MempoolResponse {
            transaction_identifiers: self.converter.to_protocol().tx_identifiers(&txs),
        })
    }

    async fn mempool_transaction(
        &self,
        tx: &TransactionIdentifier,
    ) -> Result<MempoolTransactionResponse> {
        let (kind, canonical) = self.converter.to_native().hash_to_tx_kind(&tx.hash)?;
        if kind == TxKind::BlockSynthetic {
            return Err(GatewayError::BadArgument(
                "block transactions cannot be unconfirmed".into(),
            ));
        }

        let unconfirmed = self.node()?.unconfirmed_txs().await?;
        for bytes in &unconfirmed {
            if Sha256::digest(bytes).as_slice() == canonical {
                return Ok(MempoolTransactionResponse {
                    // mempool transactions have no execution result and
                    // therefore no operation status
                    transaction: self.converter.to_protocol().tx(bytes, None)?,
                });
            }
        }
        Err(GatewayError::NotFound(format!(
            "transaction {} is not in the mempool",
            tx.hash
        )))
    }
}
