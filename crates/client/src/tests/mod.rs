// Path: crates/client/src/tests/mod.rs
use crate::config::GatewayConfig;
use crate::facade::GatewayClient;
use async_trait::async_trait;
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::SigningKey;
use mesh_api::{ConstructionApi, DataApi, NodeQuery, TranslateContext, TypeCatalog};
use mesh_converter::translators::default_profile;
use mesh_converter::Converter;
use mesh_proto::bank::{event, MSG_SEND_TYPE_URL};
use mesh_proto::tx::{AuthInfo, TxRaw};
use mesh_types::coin::Coin;
use mesh_types::construction::PreprocessOptions;
use mesh_types::native::{
    BaseAccount, BlockHeader, BlockId, BlockResults, BroadcastResult, Event, EventAttribute,
    NativeBlock, NodeInfo, NodeStatus, Page, PeerInfo, SyncInfo, TxExecutionResult,
};
use mesh_types::protocol::{
    AccountIdentifier, Amount, CurveKind, Metadata, Operation, OperationIdentifier,
    PartialBlockIdentifier, PublicKey, Signature, SignatureKind, TransactionIdentifier,
};
use mesh_types::{AddressCodec, GatewayError, STATUS_SUCCESS};
use prost::Message;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// -----------------------------------------------------------------------------
// Mock node
// -----------------------------------------------------------------------------

#[derive(Default)]
struct MockNode {
    status: Option<NodeStatus>,
    blocks: Vec<NativeBlock>,
    results: Vec<BlockResults>,
    accounts: HashMap<String, BaseAccount>,
    supply_pages: Vec<Vec<Coin>>,
    balances: HashMap<String, Vec<Coin>>,
    unconfirmed: Vec<Vec<u8>>,
    confirmed: Vec<(Vec<u8>, TxExecutionResult)>,
    broadcast_response: Option<BroadcastResult>,
    genesis_chunk: Option<String>,
    recorded_balance_heights: Mutex<Vec<Option<u64>>>,
    recorded_broadcasts: Mutex<Vec<Vec<u8>>>,
}

impl MockNode {
    fn status(&self) -> mesh_types::Result<NodeStatus> {
        self.status
            .clone()
            .ok_or_else(|| GatewayError::OnlineClient("status unavailable".into()))
    }

    fn resolve(&self, height: Option<u64>) -> mesh_types::Result<u64> {
        match height {
            Some(h) => Ok(h),
            None => Ok(self.status()?.sync_info.latest_block_height),
        }
    }
}

#[async_trait]
impl NodeQuery for MockNode {
    async fn account(&self, address: &str, _height: Option<u64>) -> mesh_types::Result<BaseAccount> {
        self.accounts
            .get(address)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("account {address}")))
    }

    async fn balances(
        &self,
        address: &str,
        height: Option<u64>,
        _page_key: Option<Vec<u8>>,
    ) -> mesh_types::Result<Page<Coin>> {
        self.recorded_balance_heights.lock().unwrap().push(height);
        Ok(Page {
            items: self.balances.get(address).cloned().unwrap_or_default(),
            next_key: None,
        })
    }

    async fn total_supply(&self, page_key: Option<Vec<u8>>) -> mesh_types::Result<Page<Coin>> {
        let index = page_key.map(|k| k[0] as usize).unwrap_or(0);
        let items = self.supply_pages.get(index).cloned().unwrap_or_default();
        let next_key = (index + 1 < self.supply_pages.len()).then(|| vec![(index + 1) as u8]);
        Ok(Page { items, next_key })
    }

    async fn block_by_height(&self, height: Option<u64>) -> mesh_types::Result<NativeBlock> {
        let height = self.resolve(height)?;
        self.blocks
            .iter()
            .find(|b| b.header.height == height)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("block at height {height}")))
    }

    async fn block_by_hash(&self, hash: &[u8]) -> mesh_types::Result<NativeBlock> {
        self.blocks
            .iter()
            .find(|b| b.block_id.hash == hash)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound("block by hash".into()))
    }

    async fn block_results(&self, height: Option<u64>) -> mesh_types::Result<BlockResults> {
        let height = self.resolve(height)?;
        self.results
            .iter()
            .find(|r| r.height == height)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("results at height {height}")))
    }

    async fn tx_by_hash(&self, hash: &[u8]) -> mesh_types::Result<(Vec<u8>, TxExecutionResult)> {
        self.confirmed
            .iter()
            .find(|(bytes, _)| Sha256::digest(bytes).as_slice() == hash)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound("transaction".into()))
    }

    async fn health(&self) -> mesh_types::Result<()> {
        Ok(())
    }

    async fn status(&self) -> mesh_types::Result<NodeStatus> {
        MockNode::status(self)
    }

    async fn genesis_chunk(&self, _chunk: u64) -> mesh_types::Result<String> {
        self.genesis_chunk
            .clone()
            .ok_or_else(|| GatewayError::OnlineClient("genesis unavailable".into()))
    }

    async fn unconfirmed_txs(&self) -> mesh_types::Result<Vec<Vec<u8>>> {
        Ok(self.unconfirmed.clone())
    }

    async fn peers(&self) -> mesh_types::Result<Vec<PeerInfo>> {
        Ok(vec![PeerInfo { node_id: "peer-0".into(), moniker: "relay".into() }])
    }

    async fn broadcast_sync(&self, tx_bytes: Vec<u8>) -> mesh_types::Result<BroadcastResult> {
        self.recorded_broadcasts.lock().unwrap().push(tx_bytes.clone());
        Ok(self.broadcast_response.clone().unwrap_or(BroadcastResult {
            code: 0,
            log: String::new(),
            hash: Sha256::digest(&tx_bytes).to_vec(),
        }))
    }
}

// -----------------------------------------------------------------------------
// Fixtures
// -----------------------------------------------------------------------------

fn converter() -> Arc<Converter> {
    let catalog = Arc::new(TypeCatalog::new());
    default_profile(&catalog);
    let ctx = TranslateContext::new(
        AddressCodec::new("lat"),
        HashMap::from([("ulat".to_string(), 6u32)]),
    );
    Arc::new(Converter::new(catalog, ctx))
}

fn config() -> GatewayConfig {
    GatewayConfig {
        blockchain: "lattice".into(),
        network: "lattice-1".into(),
        grpc_endpoint: "localhost:9090".into(),
        rpc_endpoint: "localhost:26657".into(),
        offline: false,
        enable_fee_suggestion: false,
        suggest_gas: 200_000,
        suggest_denom: "ulat".into(),
        suggest_prices: "1ulat,1stake".into(),
        address_prefix: "lat".into(),
        currency_exponents: HashMap::from([("ulat".to_string(), 6u32)]),
    }
}

fn node_status(latest: u64, earliest: u64) -> NodeStatus {
    NodeStatus {
        node_info: NodeInfo {
            network: "lattice-1".into(),
            moniker: "test-node".into(),
            version: "v1.0.0".into(),
        },
        sync_info: SyncInfo {
            latest_block_height: latest,
            latest_block_hash: vec![0xcc; 32],
            earliest_block_height: earliest,
            catching_up: false,
        },
    }
}

fn block_at(height: u64, txs: Vec<Vec<u8>>) -> NativeBlock {
    NativeBlock {
        block_id: BlockId { hash: vec![height as u8; 32] },
        header: BlockHeader {
            chain_id: "lattice-1".into(),
            height,
            time_unix_nano: 1_700_000_000_000_000_000 + height as i64,
            parent_id: BlockId { hash: vec![height.saturating_sub(1) as u8; 32] },
        },
        txs,
    }
}

fn success_result() -> TxExecutionResult {
    TxExecutionResult { code: 0, log: String::new(), gas_wanted: 0, gas_used: 0, events: Vec::new() }
}

fn fee_event() -> Event {
    Event {
        kind: event::COIN_SPENT.into(),
        attributes: vec![
            EventAttribute { key: event::ATTR_SPENDER.into(), value: "lat1payer".into() },
            EventAttribute { key: event::ATTR_AMOUNT.into(), value: "50ulat".into() },
        ],
    }
}

fn transfer_ops(conv: &Converter, from: &str, to: &str, value: &str) -> Vec<Operation> {
    let currency = conv.translate_context().currency("ulat");
    vec![
        Operation {
            operation_identifier: OperationIdentifier { index: 0 },
            related_operations: None,
            kind: MSG_SEND_TYPE_URL.into(),
            status: None,
            account: Some(AccountIdentifier::new(from)),
            amount: Some(Amount::new(value, true, currency.clone())),
            metadata: None,
        },
        Operation {
            operation_identifier: OperationIdentifier { index: 1 },
            related_operations: Some(vec![OperationIdentifier { index: 0 }]),
            kind: MSG_SEND_TYPE_URL.into(),
            status: None,
            account: Some(AccountIdentifier::new(to)),
            amount: Some(Amount::new(value, false, currency)),
            metadata: None,
        },
    ]
}

fn encoded_transfer(conv: &Converter, from: &str, to: &str, value: &str) -> Vec<u8> {
    let body = conv.to_native().unsigned_tx(&transfer_ops(conv, from, to, value)).unwrap();
    TxRaw {
        body_bytes: body.encode_to_vec(),
        auth_info_bytes: AuthInfo::default().encode_to_vec(),
        signatures: Vec::new(),
    }
    .encode_to_vec()
}

fn client_with(node: MockNode) -> GatewayClient {
    GatewayClient::online(config(), converter(), Arc::new(node)).unwrap()
}

fn fee_meta(gas_limit: u64, gas_price: &str) -> Metadata {
    let mut meta = Metadata::new();
    meta.insert("gas_limit".into(), serde_json::json!(gas_limit));
    meta.insert("gas_price".into(), serde_json::json!(gas_price));
    meta
}

// -----------------------------------------------------------------------------
// Block assembly
// -----------------------------------------------------------------------------

#[tokio::test]
async fn assembles_blocks_with_the_synthetic_transaction_last() {
    let conv = converter();
    let tx_a = encoded_transfer(&conv, "lat1a", "lat1b", "10");
    let tx_b = encoded_transfer(&conv, "lat1c", "lat1d", "20");
    let block = block_at(7, vec![tx_a.clone(), tx_b]);
    let block_hash = block.block_id.hash.clone();

    let node = MockNode {
        status: Some(node_status(7, 1)),
        blocks: vec![block],
        results: vec![BlockResults {
            height: 7,
            tx_results: vec![success_result(), success_result()],
            block_events: vec![fee_event()],
        }],
        ..Default::default()
    };
    let client = client_with(node);

    let response = client
        .block(&PartialBlockIdentifier { index: Some(7), hash: None })
        .await
        .unwrap();
    let block = response.block;

    assert_eq!(block.block_identifier.index, 7);
    assert_eq!(block.transactions.len(), 3);

    // user transactions first, in block order, fully confirmed
    assert_eq!(
        block.transactions[0].transaction_identifier.hash,
        hex::encode_upper(Sha256::digest(&tx_a))
    );
    assert!(block.transactions[0]
        .operations
        .iter()
        .all(|op| op.status.as_deref() == Some(STATUS_SUCCESS)));

    // the synthetic transaction is last, under its own identifier space
    let synthetic = &block.transactions[2];
    assert_eq!(
        synthetic.transaction_identifier.hash,
        conv.to_protocol().finalize_block_tx_hash(&block_hash)
    );
    let indices: Vec<u64> = synthetic
        .operations
        .iter()
        .map(|op| op.operation_identifier.index)
        .collect();
    assert_eq!(indices, vec![0]);
    assert_eq!(synthetic.operations[0].kind, event::COIN_SPENT);
}

#[tokio::test]
async fn result_count_mismatch_is_a_hard_error() {
    let conv = converter();
    let block = block_at(3, vec![encoded_transfer(&conv, "lat1a", "lat1b", "1")]);
    let node = MockNode {
        status: Some(node_status(3, 1)),
        blocks: vec![block],
        results: vec![BlockResults { height: 3, tx_results: vec![], block_events: vec![] }],
        ..Default::default()
    };
    let client = client_with(node);

    assert!(matches!(
        client.block(&PartialBlockIdentifier { index: Some(3), hash: None }).await,
        Err(GatewayError::OnlineClient(_))
    ));
}

#[tokio::test]
async fn synthetic_hash_lookup_returns_the_final_transaction() {
    let conv = converter();
    let block = block_at(9, vec![encoded_transfer(&conv, "lat1a", "lat1b", "4")]);
    let block_hash = block.block_id.hash.clone();
    let node = MockNode {
        status: Some(node_status(9, 1)),
        blocks: vec![block],
        results: vec![BlockResults {
            height: 9,
            tx_results: vec![success_result()],
            block_events: vec![fee_event()],
        }],
        ..Default::default()
    };
    let client = client_with(node);

    let synthetic_hash = conv.to_protocol().finalize_block_tx_hash(&block_hash);
    let tx = client
        .block_transaction(
            &mesh_types::protocol::BlockIdentifier { index: 9, hash: hex::encode_upper(&block_hash) },
            &TransactionIdentifier { hash: synthetic_hash.clone() },
        )
        .await
        .unwrap()
        .transaction;
    assert_eq!(tx.transaction_identifier.hash, synthetic_hash);
    assert_eq!(tx.operations[0].kind, event::COIN_SPENT);
}

// -----------------------------------------------------------------------------
// Balances
// -----------------------------------------------------------------------------

#[tokio::test]
async fn account_balance_pins_the_requested_height_and_filters_currencies() {
    let node = MockNode {
        status: Some(node_status(20, 1)),
        blocks: vec![block_at(15, vec![]), block_at(20, vec![])],
        balances: HashMap::from([(
            "lat1holder".to_string(),
            vec![Coin::new(500u64, "ulat"), Coin::new(9u64, "weirdtoken")],
        )]),
        supply_pages: vec![vec![Coin::new(1u64, "ulat")], vec![Coin::new(1u64, "stake")]],
        ..Default::default()
    };
    let client = client_with(node);
    let holder = AccountIdentifier::new("lat1holder");

    let at_height = client
        .account_balance(&holder, Some(&PartialBlockIdentifier { index: Some(15), hash: None }))
        .await
        .unwrap();
    assert_eq!(at_height.block_identifier.index, 15);
    // only supply-known currencies survive the filter
    assert_eq!(at_height.balances.len(), 1);
    assert_eq!(at_height.balances[0].value, "500");
    assert_eq!(at_height.balances[0].currency.decimals, 6);

    // nothing changed between height 15 and the tip, so the snapshot agrees
    let current = client.account_balance(&holder, None).await.unwrap();
    assert_eq!(current.balances, at_height.balances);
    assert_eq!(current.block_identifier.index, 20);
}

// -----------------------------------------------------------------------------
// Mempool
// -----------------------------------------------------------------------------

#[tokio::test]
async fn mempool_transactions_carry_no_status_and_synthetic_hashes_are_rejected() {
    let conv = converter();
    let pending = encoded_transfer(&conv, "lat1a", "lat1b", "2");
    let pending_hash = hex::encode_upper(Sha256::digest(&pending));
    let node = MockNode {
        status: Some(node_status(5, 1)),
        unconfirmed: vec![pending],
        ..Default::default()
    };
    let client = client_with(node);

    let listed = client.mempool().await.unwrap();
    assert_eq!(
        listed.transaction_identifiers,
        vec![TransactionIdentifier { hash: pending_hash.clone() }]
    );

    let tx = client
        .mempool_transaction(&TransactionIdentifier { hash: pending_hash })
        .await
        .unwrap()
        .transaction;
    assert!(tx.operations.iter().all(|op| op.status.is_none()));

    let synthetic = conv.to_protocol().finalize_block_tx_hash(&[1u8; 32]);
    assert!(matches!(
        client.mempool_transaction(&TransactionIdentifier { hash: synthetic }).await,
        Err(GatewayError::BadArgument(_))
    ));

    let absent = "11".repeat(32);
    assert!(matches!(
        client.mempool_transaction(&TransactionIdentifier { hash: absent }).await,
        Err(GatewayError::NotFound(_))
    ));
}

// -----------------------------------------------------------------------------
// Construction workflow
// -----------------------------------------------------------------------------

fn secp_key(seed: u8) -> (SigningKey, PublicKey) {
    let sk = SigningKey::from_slice(&[seed; 32]).unwrap();
    let compressed = sk.verifying_key().to_encoded_point(true).as_bytes().to_vec();
    let pk = PublicKey { hex_bytes: hex::encode(compressed), curve_type: CurveKind::Secp256k1 };
    (sk, pk)
}

#[tokio::test]
async fn the_full_workflow_produces_a_broadcastable_transaction() {
    let conv = converter();
    let (sk, pk) = secp_key(21);
    let alice = {
        let native = conv.to_native().pub_key(&pk).unwrap();
        conv.translate_context().address_codec.address_of(native.raw())
    };
    let bob = "lat1receiver".to_string();

    let node = MockNode {
        status: Some(node_status(30, 1)),
        accounts: HashMap::from([(
            alice.clone(),
            BaseAccount { address: alice.clone(), account_number: 12, sequence: 3, pub_key: None },
        )]),
        ..Default::default()
    };
    let client = client_with(node);

    // derive
    let derived = client.derive(&pk).await.unwrap();
    assert_eq!(derived.account_identifier.address, alice);

    // preprocess
    let ops = transfer_ops(&conv, &alice, &bob, "100");
    let preprocessed = client
        .preprocess(&ops, &fee_meta(200_000, "0.025ulat"))
        .await
        .unwrap();
    assert_eq!(
        preprocessed.required_public_keys,
        vec![AccountIdentifier::new(&alice)]
    );

    // metadata
    let metadata = client.metadata(&preprocessed.options).await.unwrap().metadata;
    assert_eq!(metadata["chain_id"], "lattice-1");
    assert_eq!(metadata["signers_data"][0]["sequence"], 3);

    // payloads
    let payloads = client
        .payloads(&ops, &metadata, std::slice::from_ref(&pk))
        .await
        .unwrap();
    assert_eq!(payloads.payloads.len(), 1);
    assert_eq!(payloads.payloads[0].account_identifier.address, alice);

    // the client signs offline
    let digest = hex::decode(&payloads.payloads[0].hex_bytes).unwrap();
    let signature: k256::ecdsa::Signature = sk.sign_prehash(&digest).unwrap();
    let combined = client
        .combine(
            &payloads.unsigned_transaction,
            &[Signature {
                signing_payload: payloads.payloads[0].clone(),
                public_key: pk.clone(),
                signature_type: SignatureKind::Ecdsa,
                hex_bytes: hex::encode(signature.to_bytes()),
            }],
        )
        .await
        .unwrap();

    // parse recovers the original intent and signer
    let parsed = client.parse(&combined.signed_transaction, true).await.unwrap();
    assert_eq!(parsed.account_identifier_signers, vec![AccountIdentifier::new(&alice)]);
    assert_eq!(parsed.operations.len(), ops.len());
    assert_eq!(parsed.operations[1].amount, ops[1].amount);

    // hash matches what submission reports
    let hashed = client.hash(&combined.signed_transaction).await.unwrap();
    let submitted = client.submit(&combined.signed_transaction).await.unwrap();
    assert_eq!(submitted.transaction_identifier, hashed.transaction_identifier);
}

#[tokio::test]
async fn preprocess_requires_fee_facts_when_suggestion_is_disabled() {
    let conv = converter();
    let client = client_with(MockNode { status: Some(node_status(1, 1)), ..Default::default() });
    let ops = transfer_ops(&conv, "lat1a", "lat1b", "1");

    assert!(matches!(
        client.preprocess(&[], &Metadata::new()).await,
        Err(GatewayError::BadArgument(_))
    ));
    assert!(matches!(
        client.preprocess(&ops, &Metadata::new()).await,
        Err(GatewayError::BadArgument(_))
    ));
    assert!(matches!(
        client.preprocess(&ops, &fee_meta(0, "0.025ulat")).await,
        Err(GatewayError::BadArgument(_))
    ));
    assert!(client.preprocess(&ops, &fee_meta(100_000, "0.025ulat")).await.is_ok());
}

#[tokio::test]
async fn metadata_rejects_a_non_positive_gas_price() {
    let node = MockNode {
        status: Some(node_status(2, 1)),
        accounts: HashMap::from([(
            "lat1signer".to_string(),
            BaseAccount {
                address: "lat1signer".into(),
                account_number: 1,
                sequence: 0,
                pub_key: None,
            },
        )]),
        ..Default::default()
    };
    let client = client_with(node);

    let options = mesh_types::construction::to_metadata(&PreprocessOptions {
        expected_signers: vec!["lat1signer".into()],
        memo: String::new(),
        gas_limit: 200_000,
        gas_price: "0ulat".into(),
    })
    .unwrap();

    assert!(matches!(
        client.metadata(&options).await,
        Err(GatewayError::BadArgument(_))
    ));
}

#[tokio::test]
async fn metadata_fills_defaults_when_fee_suggestion_is_enabled() {
    let mut cfg = config();
    cfg.enable_fee_suggestion = true;
    let node = MockNode {
        status: Some(node_status(2, 1)),
        accounts: HashMap::from([(
            "lat1signer".to_string(),
            BaseAccount {
                address: "lat1signer".into(),
                account_number: 4,
                sequence: 9,
                pub_key: None,
            },
        )]),
        ..Default::default()
    };
    let client = GatewayClient::online(cfg, converter(), Arc::new(node)).unwrap();

    let options = mesh_types::construction::to_metadata(&PreprocessOptions {
        expected_signers: vec!["lat1signer".into()],
        memo: "note".into(),
        gas_limit: 0,
        gas_price: String::new(),
    })
    .unwrap();

    let metadata = client.metadata(&options).await.unwrap().metadata;
    assert_eq!(metadata["gas_limit"], 200_000);
    assert_eq!(metadata["gas_price"], "1ulat");
    assert_eq!(metadata["memo"], "note");
    assert_eq!(metadata["signers_data"][0]["account_number"], 4);
}

#[tokio::test]
async fn submit_surfaces_node_rejections_with_code_and_log() {
    let node = MockNode {
        status: Some(node_status(2, 1)),
        broadcast_response: Some(BroadcastResult {
            code: 13,
            log: "insufficient fee".into(),
            hash: vec![0; 32],
        }),
        ..Default::default()
    };
    let client = client_with(node);

    let result = client.submit(&hex::encode(b"some signed tx")).await;
    match result {
        Err(GatewayError::Broadcast { code, log }) => {
            assert_eq!(code, 13);
            assert_eq!(log, "insufficient fee");
        }
        other => panic!("expected a broadcast failure, got {other:?}"),
    }
}

// -----------------------------------------------------------------------------
// Network status and offline mode
// -----------------------------------------------------------------------------

#[tokio::test]
async fn network_status_falls_back_to_the_declared_initial_height() {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;

    // a pruned node: height 1 is gone, the chain declared initial height 5
    let node = MockNode {
        status: Some(node_status(8, 5)),
        blocks: vec![block_at(5, vec![]), block_at(8, vec![])],
        results: vec![],
        genesis_chunk: Some(BASE64.encode(r#"{"initial_height":"5","app_state":{}}"#)),
        ..Default::default()
    };
    let client = client_with(node);

    let status = client.network_status().await.unwrap();
    assert_eq!(status.current_block_identifier.index, 8);
    assert_eq!(status.genesis_block_identifier.index, 5);
    assert_eq!(status.oldest_block_identifier.index, 5);
    assert!(status.sync_status.synced);
    assert_eq!(status.peers.len(), 1);
}

#[tokio::test]
async fn offline_mode_gates_every_online_endpoint() {
    let client = GatewayClient::offline(config(), converter()).unwrap();
    let (_, pk) = secp_key(33);

    // offline steps work
    assert!(client.derive(&pk).await.is_ok());
    let conv = converter();
    let ops = transfer_ops(&conv, "lat1a", "lat1b", "1");
    assert!(client.preprocess(&ops, &fee_meta(1000, "1ulat")).await.is_ok());
    assert!(client.network_options().await.is_ok());

    // online steps are gated
    assert!(matches!(
        client.metadata(&Metadata::new()).await,
        Err(GatewayError::UnavailableOffline(_))
    ));
    assert!(matches!(
        client.submit("00").await,
        Err(GatewayError::UnavailableOffline(_))
    ));
    assert!(matches!(
        client.account_balance(&AccountIdentifier::new("lat1x"), None).await,
        Err(GatewayError::UnavailableOffline(_))
    ));
    assert!(matches!(
        client.mempool().await,
        Err(GatewayError::UnavailableOffline(_))
    ));
}

#[tokio::test]
async fn network_options_advertise_catalog_types_and_the_error_table() {
    let client = GatewayClient::offline(config(), converter()).unwrap();
    let options = client.network_options().await.unwrap();
    assert!(options
        .allow
        .operation_types
        .iter()
        .any(|t| t == MSG_SEND_TYPE_URL));
    assert!(options.allow.operation_types.iter().any(|t| t == event::COIN_SPENT));
    assert_eq!(options.allow.errors.len(), GatewayError::catalog().len());
    assert!(options.allow.historical_balance_lookup);
}

#[tokio::test]
async fn ready_probes_the_node() {
    let client = client_with(MockNode {
        status: Some(node_status(1, 1)),
        supply_pages: vec![vec![Coin::new(1u64, "ulat")]],
        ..Default::default()
    });
    client.ready().await.unwrap();

    let offline = GatewayClient::offline(config(), converter()).unwrap();
    assert!(matches!(
        offline.ready().await,
        Err(GatewayError::UnavailableOffline(_))
    ));
}
