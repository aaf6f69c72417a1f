// Path: crates/client/src/config.rs
//! Gateway configuration.
//!
//! Deserializable from a config file or assembled by the embedding process;
//! `validate()` runs once at startup and a failure prevents the gateway from
//! serving at all.

use mesh_types::coin::{parse_dec_coin_list, DecCoin};
use mesh_types::protocol::NetworkIdentifier;
use mesh_types::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default blockchain identifier name.
pub const DEFAULT_BLOCKCHAIN: &str = "lattice";
/// Default address prefix rendered by the address codec.
pub const DEFAULT_ADDRESS_PREFIX: &str = "lat";
/// Default gas limit offered by fee suggestion.
pub const DEFAULT_SUGGEST_GAS: u64 = 200_000;
/// Default denomination used by fee suggestion.
pub const DEFAULT_SUGGEST_DENOM: &str = "ulat";
/// Default fee-suggestion price table.
pub const DEFAULT_SUGGEST_PRICES: &str = "1ulat,1stake";

fn default_blockchain() -> String {
    DEFAULT_BLOCKCHAIN.to_string()
}
fn default_address_prefix() -> String {
    DEFAULT_ADDRESS_PREFIX.to_string()
}
fn default_suggest_gas() -> u64 {
    DEFAULT_SUGGEST_GAS
}
fn default_suggest_denom() -> String {
    DEFAULT_SUGGEST_DENOM.to_string()
}
fn default_suggest_prices() -> String {
    DEFAULT_SUGGEST_PRICES.to_string()
}

/// Configuration of one gateway deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Blockchain family name advertised on the protocol surface.
    #[serde(default = "default_blockchain")]
    pub blockchain: String,
    /// Network (chain) name advertised on the protocol surface. Required.
    pub network: String,
    /// The node's state-query gRPC endpoint.
    #[serde(default)]
    pub grpc_endpoint: String,
    /// The node's consensus-engine RPC endpoint.
    #[serde(default)]
    pub rpc_endpoint: String,
    /// Run with the construction-only (offline) surface.
    #[serde(default)]
    pub offline: bool,
    /// Fill unset gas limit/price at the metadata step from the values
    /// below.
    #[serde(default)]
    pub enable_fee_suggestion: bool,
    /// Gas limit offered by fee suggestion.
    #[serde(default = "default_suggest_gas")]
    pub suggest_gas: u64,
    /// Denomination fee suggestion prices in.
    #[serde(default = "default_suggest_denom")]
    pub suggest_denom: String,
    /// Price table for fee suggestion, `"0.025ulat,1stake"` form.
    #[serde(default = "default_suggest_prices")]
    pub suggest_prices: String,
    /// Address prefix for the address codec.
    #[serde(default = "default_address_prefix")]
    pub address_prefix: String,
    /// Registered currency exponents: denomination → decimal places.
    #[serde(default)]
    pub currency_exponents: HashMap<String, u32>,
}

impl GatewayConfig {
    /// The network identifier this deployment serves.
    pub fn network_identifier(&self) -> NetworkIdentifier {
        NetworkIdentifier {
            blockchain: self.blockchain.clone(),
            network: self.network.clone(),
        }
    }

    /// The parsed fee-suggestion price table.
    pub fn suggest_price_table(&self) -> Result<Vec<DecCoin>> {
        parse_dec_coin_list(&self.suggest_prices)
            .map_err(|e| GatewayError::Config(format!("parsing suggested prices: {e}")))
    }

    /// Validates the configuration and normalizes endpoints; returns a
    /// config error describing the first problem found.
    pub fn validate(&mut self) -> Result<()> {
        if self.blockchain.is_empty() {
            self.blockchain = default_blockchain();
        }
        if self.network.is_empty() {
            return Err(GatewayError::Config("network not provided".into()));
        }
        if self.address_prefix.is_empty() {
            return Err(GatewayError::Config("address prefix not provided".into()));
        }
        if self.suggest_gas == 0 {
            return Err(GatewayError::Config("suggested gas must be positive".into()));
        }
        if self.enable_fee_suggestion {
            let prices = self.suggest_price_table()?;
            let found = prices.iter().any(|p| p.denom == self.suggest_denom);
            if !found {
                return Err(GatewayError::Config(format!(
                    "suggested denom {:?} is not in the suggested price table",
                    self.suggest_denom
                )));
            }
        }
        if !self.offline {
            if self.grpc_endpoint.is_empty() {
                return Err(GatewayError::Config("grpc endpoint not provided".into()));
            }
            if self.rpc_endpoint.is_empty() {
                return Err(GatewayError::Config("rpc endpoint not provided".into()));
            }
            self.rpc_endpoint = normalize_endpoint(&self.rpc_endpoint);
            self.grpc_endpoint = normalize_endpoint(&self.grpc_endpoint);
        }
        Ok(())
    }
}

/// Prepends a scheme when the endpoint has none; `https` is implied by port
/// 443.
fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.contains("://") {
        return endpoint.to_string();
    }
    if endpoint.ends_with(":443") {
        format!("https://{endpoint}")
    } else {
        format!("http://{endpoint}")
    }
}
