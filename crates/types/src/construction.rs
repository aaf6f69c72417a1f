// Path: crates/types/src/construction.rs
//! The metadata bags threaded between construction-workflow steps.
//!
//! The workflow is stateless on the server side; the only state carried
//! between steps is one of these bags, rendered as the protocol's generic
//! string-keyed map and returned verbatim by the client at the next step.
//! Their wire shape must therefore marshal and unmarshal losslessly through
//! `serde_json`.

use crate::protocol::Metadata;
use crate::{GatewayError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Per-account signing prerequisites, resolved at metadata-build time and
/// carried unchanged through the remaining steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerData {
    pub address: String,
    pub account_number: u64,
    pub sequence: u64,
    /// Chain identifier the signature will commit to.
    pub chain_id: String,
    /// Hex encoding of the account's known public key, when the account has
    /// one on record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_hex: Option<String>,
}

/// Output of the preprocess step: everything the metadata step needs to
/// resolve live signing data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessOptions {
    /// Signer addresses in the order the native transaction expects them.
    pub expected_signers: Vec<String>,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub gas_limit: u64,
    /// Gas price in `"<decimal-amount><denom>"` form; empty when deferred to
    /// fee suggestion.
    #[serde(default)]
    pub gas_price: String,
}

/// Output of the metadata step: everything the payloads step needs to build
/// signing payloads offline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionMetadata {
    pub chain_id: String,
    /// Ordered signing data, one entry per expected signer.
    pub signers_data: Vec<SignerData>,
    pub gas_limit: u64,
    pub gas_price: String,
    #[serde(default)]
    pub memo: String,
}

/// Marshals a bag into the protocol's generic metadata map.
pub fn to_metadata<T: Serialize>(value: &T) -> Result<Metadata> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(GatewayError::Codec(format!(
            "metadata bag marshaled to non-object json: {other}"
        ))),
        Err(e) => Err(GatewayError::Codec(format!("marshaling metadata bag: {e}"))),
    }
}

/// Unmarshals a bag from the protocol's generic metadata map.
pub fn from_metadata<T: DeserializeOwned>(meta: &Metadata) -> Result<T> {
    serde_json::from_value(serde_json::Value::Object(meta.clone()))
        .map_err(|e| GatewayError::BadArgument(format!("unmarshaling metadata bag: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_metadata() -> ConstructionMetadata {
        ConstructionMetadata {
            chain_id: "lattice-1".into(),
            signers_data: vec![SignerData {
                address: "lat1signer".into(),
                account_number: 7,
                sequence: 42,
                chain_id: "lattice-1".into(),
                public_key_hex: Some("02aa".into()),
            }],
            gas_limit: 200_000,
            gas_price: "0.025ulat".into(),
            memo: "note".into(),
        }
    }

    #[test]
    fn metadata_round_trip_is_lossless() {
        let meta = sample_metadata();
        let map = to_metadata(&meta).unwrap();
        let back: ConstructionMetadata = from_metadata(&map).unwrap();
        assert_eq!(meta, back);
        // and the map itself is stable under a second marshal
        assert_eq!(map, to_metadata(&back).unwrap());
    }

    #[test]
    fn options_round_trip_is_lossless() {
        let opts = PreprocessOptions {
            expected_signers: vec!["lat1a".into(), "lat1b".into()],
            memo: String::new(),
            gas_limit: 100_000,
            gas_price: "1ulat".into(),
        };
        let map = to_metadata(&opts).unwrap();
        assert_eq!(opts, from_metadata::<PreprocessOptions>(&map).unwrap());
    }

    #[test]
    fn unknown_bag_shape_is_a_bad_argument() {
        let mut map = Metadata::new();
        map.insert("gas_limit".into(), serde_json::json!("not a number"));
        assert!(matches!(
            from_metadata::<PreprocessOptions>(&map),
            Err(GatewayError::BadArgument(_))
        ));
    }

    proptest! {
        #[test]
        fn options_survive_any_representable_value(
            signers in proptest::collection::vec("[a-z0-9]{1,24}", 0..4),
            memo in "[ -~]{0,48}",
            gas_limit in any::<u64>(),
        ) {
            let opts = PreprocessOptions {
                expected_signers: signers,
                memo,
                gas_limit,
                gas_price: "0.1ulat".into(),
            };
            let map = to_metadata(&opts).unwrap();
            prop_assert_eq!(from_metadata::<PreprocessOptions>(&map).unwrap(), opts);
        }
    }
}
