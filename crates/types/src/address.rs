// Path: crates/types/src/address.rs
//! Address rendering and parsing.
//!
//! The codec is an explicit value, fixed at construction time and threaded
//! into every component that touches addresses; there is no process-global
//! prefix configuration. Account ids are the HASH160 (RIPEMD160 ∘ SHA256) of
//! the canonical public-key bytes, rendered as a human-readable prefix
//! followed by the base58check encoding of the id.

use crate::{GatewayError, Result};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Length of an account id in bytes.
pub const ACCOUNT_ID_LEN: usize = 20;

/// Renders and parses account addresses for one chain deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressCodec {
    prefix: String,
}

impl AddressCodec {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// The human-readable prefix this codec renders.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Renders a 20-byte account id as an address string.
    pub fn encode(&self, account_id: &[u8; ACCOUNT_ID_LEN]) -> String {
        format!(
            "{}{}",
            self.prefix,
            bs58::encode(account_id).with_check().into_string()
        )
    }

    /// Parses an address string back into its account id. Fails on a foreign
    /// prefix, a bad checksum or a wrong payload length.
    pub fn decode(&self, address: &str) -> Result<[u8; ACCOUNT_ID_LEN]> {
        let body = address.strip_prefix(self.prefix.as_str()).ok_or_else(|| {
            GatewayError::BadArgument(format!(
                "address {address:?} does not carry prefix {:?}",
                self.prefix
            ))
        })?;
        let raw = bs58::decode(body)
            .with_check(None)
            .into_vec()
            .map_err(|e| GatewayError::BadArgument(format!("decoding address {address:?}: {e}")))?;
        raw.as_slice().try_into().map_err(|_| {
            GatewayError::BadArgument(format!(
                "address {address:?} payload is {} bytes, want {ACCOUNT_ID_LEN}",
                raw.len()
            ))
        })
    }

    /// Derives the address of a public key directly.
    pub fn address_of(&self, public_key_bytes: &[u8]) -> String {
        self.encode(&account_id(public_key_bytes))
    }
}

/// HASH160 of the canonical public-key bytes.
pub fn account_id(public_key_bytes: &[u8]) -> [u8; ACCOUNT_ID_LEN] {
    let sha = Sha256::digest(public_key_bytes);
    let rip = Ripemd160::digest(sha);
    rip.into()
}
