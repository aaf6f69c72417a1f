// Path: crates/types/src/error.rs
//! Error taxonomy for the mesh gateway.
//!
//! Every distinguishable failure cause has its own variant; components wrap
//! the failing operation plus the underlying cause into the message and
//! return the error up unchanged. Nothing in the gateway retries internally
//! and nothing swallows an error.

use crate::protocol::ProtocolError;
use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors produced by the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed or missing client input. Never retried, returned as-is.
    #[error("bad argument: {0}")]
    BadArgument(String),
    /// An operation list could not be turned into a native transaction.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    /// Encode/decode mismatch against the expected wire shape. Indicates a
    /// client/node version skew.
    #[error("codec error: {0}")]
    Codec(String),
    /// Semantic translation failure between the native and protocol models.
    #[error("converter error: {0}")]
    Converter(String),
    /// The requested entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// Startup misconfiguration. Fatal; prevents the gateway from starting.
    #[error("configuration error: {0}")]
    Config(String),
    /// Type-catalog population failure. Fatal only when no usable catalog
    /// results at all.
    #[error("type discovery error: {0}")]
    Discovery(String),
    /// A remote node call failed; carries the underlying transport message.
    #[error("online client error: {0}")]
    OnlineClient(String),
    /// The node rejected a broadcast transaction with a non-OK result code.
    #[error("transaction broadcast failure: ({code}) {log}")]
    Broadcast {
        /// The native result code returned by the node.
        code: u32,
        /// The node's log message for the rejection.
        log: String,
    },
    /// The requested endpoint is not available while running offline.
    #[error("unavailable in offline mode: {0}")]
    UnavailableOffline(String),
}

impl ErrorCode for GatewayError {
    fn code(&self) -> &'static str {
        match self {
            Self::BadArgument(_) => "GATEWAY_BAD_ARGUMENT",
            Self::InvalidOperation(_) => "GATEWAY_INVALID_OPERATION",
            Self::Codec(_) => "GATEWAY_CODEC_ERROR",
            Self::Converter(_) => "GATEWAY_CONVERTER_ERROR",
            Self::NotFound(_) => "GATEWAY_NOT_FOUND",
            Self::Config(_) => "GATEWAY_CONFIG_ERROR",
            Self::Discovery(_) => "GATEWAY_DISCOVERY_ERROR",
            Self::OnlineClient(_) => "GATEWAY_ONLINE_CLIENT_ERROR",
            Self::Broadcast { .. } => "GATEWAY_BROADCAST_FAILURE",
            Self::UnavailableOffline(_) => "GATEWAY_OFFLINE",
        }
    }
}

impl GatewayError {
    /// Numeric code used on the protocol surface. Stable across releases.
    pub fn protocol_code(&self) -> u32 {
        match self {
            Self::BadArgument(_) => 1,
            Self::InvalidOperation(_) => 2,
            Self::Codec(_) => 3,
            Self::Converter(_) => 4,
            Self::NotFound(_) => 5,
            Self::Config(_) => 6,
            Self::Discovery(_) => 7,
            Self::OnlineClient(_) => 8,
            Self::Broadcast { .. } => 9,
            Self::UnavailableOffline(_) => 10,
        }
    }

    /// Whether the external gateway layer may retry the whole request.
    /// Only remote-call failures qualify; everything else is deterministic.
    pub fn retriable(&self) -> bool {
        matches!(self, Self::OnlineClient(_))
    }

    /// Renders this error as a single structured protocol error object.
    pub fn to_protocol(&self) -> ProtocolError {
        ProtocolError {
            code: self.protocol_code(),
            message: self.code().to_string(),
            description: Some(self.to_string()),
            retriable: self.retriable(),
        }
    }

    /// The full error table advertised through the network-options endpoint.
    /// One entry per distinguishable cause, detail-free.
    pub fn catalog() -> Vec<ProtocolError> {
        let blanks: Vec<GatewayError> = vec![
            Self::BadArgument(String::new()),
            Self::InvalidOperation(String::new()),
            Self::Codec(String::new()),
            Self::Converter(String::new()),
            Self::NotFound(String::new()),
            Self::Config(String::new()),
            Self::Discovery(String::new()),
            Self::OnlineClient(String::new()),
            Self::Broadcast {
                code: 0,
                log: String::new(),
            },
            Self::UnavailableOffline(String::new()),
        ];
        blanks
            .iter()
            .map(|e| ProtocolError {
                code: e.protocol_code(),
                message: e.code().to_string(),
                description: None,
                retriable: e.retriable(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_codes_are_unique() {
        let catalog = GatewayError::catalog();
        let mut codes: Vec<u32> = catalog.iter().map(|e| e.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), catalog.len());
    }

    #[test]
    fn only_remote_failures_are_retriable() {
        assert!(GatewayError::OnlineClient("dial".into()).retriable());
        assert!(!GatewayError::BadArgument("x".into()).retriable());
        assert!(!GatewayError::Broadcast { code: 5, log: "oog".into() }.retriable());
    }
}
