// Path: crates/proto/src/lib.rs
#![forbid(unsafe_code)]

//! Hand-maintained protobuf definitions for the native wire.
//!
//! These mirror the node's `.proto` files field-for-field so the encodings
//! are byte-compatible; keep tags and field order in sync with the node when
//! either side evolves. Client stubs follow the shape `tonic` codegen would
//! emit, specialized to a plain transport channel.

pub mod bank;
pub mod crypto;
pub mod reflection;
pub mod server_reflection;
pub mod tx;

pub use prost_types::Any;
