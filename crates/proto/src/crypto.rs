// Path: crates/proto/src/crypto.rs
//! Public-key wrappers: `lattice.crypto.*`.

use prost::Message;
use prost_types::Any;

/// Fully-qualified type URL of [`Secp256k1PubKey`].
pub const SECP256K1_PUB_KEY_TYPE_URL: &str = "/lattice.crypto.secp256k1.PubKey";
/// Fully-qualified type URL of [`Ed25519PubKey`].
pub const ED25519_PUB_KEY_TYPE_URL: &str = "/lattice.crypto.ed25519.PubKey";

/// A compressed (33-byte SEC1) secp256k1 public key.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Secp256k1PubKey {
    #[prost(bytes = "vec", tag = "1")]
    pub key: Vec<u8>,
}

impl Secp256k1PubKey {
    pub fn to_any(&self) -> Any {
        Any {
            type_url: SECP256K1_PUB_KEY_TYPE_URL.to_string(),
            value: self.encode_to_vec(),
        }
    }
}

/// A raw 32-byte ed25519 public key.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Ed25519PubKey {
    #[prost(bytes = "vec", tag = "1")]
    pub key: Vec<u8>,
}

impl Ed25519PubKey {
    pub fn to_any(&self) -> Any {
        Any {
            type_url: ED25519_PUB_KEY_TYPE_URL.to_string(),
            value: self.encode_to_vec(),
        }
    }
}
