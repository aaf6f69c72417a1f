// Path: crates/api/src/lib.rs
#![forbid(unsafe_code)]

//! Capability traits for the mesh gateway.
//!
//! The gateway is wired together through three seams: [`NodeQuery`] (what
//! the underlying node can answer), the protocol surface ([`DataApi`] +
//! [`ConstructionApi`], consumed by the external transport layer), and the
//! [`catalog`] of native message types populated at startup.

pub mod catalog;
pub mod dynamic;
pub mod node_query;
pub mod surface;

pub use catalog::{MessageTranslator, TranslateContext, TypeCatalog};
pub use dynamic::DynamicTranslator;
pub use node_query::NodeQuery;
pub use surface::{ConstructionApi, DataApi};
