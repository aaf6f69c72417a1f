// Path: crates/api/src/dynamic.rs
//! The dynamic passthrough translator.
//!
//! Runtime discovery registers one of these for every node-declared message
//! type the compiled-in profile does not cover. The message is not
//! decomposed; its raw bytes travel through operation metadata, so parsing
//! and reconstruction stay lossless for types that only exist at runtime.

use crate::catalog::{MessageTranslator, TranslateContext};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use mesh_proto::Any;
use mesh_types::protocol::{Metadata, Operation, OperationIdentifier};
use mesh_types::{GatewayError, Result};

/// Metadata key under which a dynamic operation carries its message bytes.
pub const META_VALUE_B64: &str = "value_base64";
/// Optional metadata key naming the signer of a dynamic operation, for
/// clients constructing transactions with types the gateway cannot decode.
pub const META_SIGNER: &str = "signer";

/// Translator for a type discovered at runtime.
pub struct DynamicTranslator {
    type_url: String,
}

impl DynamicTranslator {
    pub fn new(type_url: impl Into<String>) -> Self {
        Self { type_url: type_url.into() }
    }
}

impl MessageTranslator for DynamicTranslator {
    fn type_url(&self) -> &str {
        &self.type_url
    }

    fn to_operations(
        &self,
        _ctx: &TranslateContext,
        msg: &Any,
        status: Option<&str>,
    ) -> Result<Vec<Operation>> {
        let mut metadata = Metadata::new();
        metadata.insert(
            META_VALUE_B64.to_string(),
            serde_json::Value::String(BASE64.encode(&msg.value)),
        );
        Ok(vec![Operation {
            operation_identifier: OperationIdentifier { index: 0 },
            related_operations: None,
            kind: self.type_url.clone(),
            status: status.map(str::to_string),
            account: None,
            amount: None,
            metadata: Some(metadata),
        }])
    }

    fn to_message(&self, _ctx: &TranslateContext, ops: &[Operation]) -> Result<Any> {
        let [op] = ops else {
            return Err(GatewayError::InvalidOperation(format!(
                "dynamic type {} expects exactly one operation per message, got {}",
                self.type_url,
                ops.len()
            )));
        };
        let encoded = op
            .metadata
            .as_ref()
            .and_then(|m| m.get(META_VALUE_B64))
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                GatewayError::InvalidOperation(format!(
                    "dynamic operation for {} is missing {META_VALUE_B64:?} metadata",
                    self.type_url
                ))
            })?;
        let value = BASE64.decode(encoded).map_err(|e| {
            GatewayError::InvalidOperation(format!("decoding {META_VALUE_B64:?} metadata: {e}"))
        })?;
        Ok(Any { type_url: self.type_url.clone(), value })
    }

    fn signer_addresses(&self, _ctx: &TranslateContext, _msg: &Any) -> Result<Vec<String>> {
        // Opaque bytes carry no recoverable signer; the construction
        // workflow falls back to the operation-level `signer` metadata key.
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::AddressCodec;
    use std::collections::HashMap;

    fn ctx() -> TranslateContext {
        TranslateContext::new(AddressCodec::new("lat"), HashMap::new())
    }

    #[test]
    fn round_trips_opaque_bytes() {
        let t = DynamicTranslator::new("/lattice.gov.v1.MsgVote");
        let any = Any { type_url: "/lattice.gov.v1.MsgVote".into(), value: vec![1, 2, 3] };
        let ops = t.to_operations(&ctx(), &any, None).unwrap();
        assert_eq!(ops.len(), 1);
        assert!(ops[0].status.is_none());
        assert_eq!(t.to_message(&ctx(), &ops).unwrap(), any);
    }

    #[test]
    fn missing_payload_metadata_is_rejected() {
        let t = DynamicTranslator::new("/lattice.gov.v1.MsgVote");
        let any = Any { type_url: "/lattice.gov.v1.MsgVote".into(), value: vec![] };
        let mut ops = t.to_operations(&ctx(), &any, None).unwrap();
        ops[0].metadata = None;
        assert!(matches!(
            t.to_message(&ctx(), &ops),
            Err(GatewayError::InvalidOperation(_))
        ));
    }
}
