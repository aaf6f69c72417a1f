// Path: crates/converter/src/lib.rs
#![forbid(unsafe_code)]

//! Bidirectional conversion between the native transaction/account/block
//! model and the protocol operation model.
//!
//! The converter is deterministic and side-effect-free: it never talks to
//! the node and never caches. Its only collaborators are the
//! [`TypeCatalog`] populated at startup and the [`TranslateContext`] fixed
//! at construction time, so concurrent requests share one instance freely.

pub mod ops;
pub mod to_native;
pub mod to_protocol;
pub mod translators;


use mesh_api::{TranslateContext, TypeCatalog};
use std::sync::Arc;

pub use to_native::{NativePubKey, ToNative, TxKind};
pub use to_protocol::ToProtocol;

/// The conversion engine, shared across requests.
pub struct Converter {
    catalog: Arc<TypeCatalog>,
    ctx: TranslateContext,
}

impl Converter {
    pub fn new(catalog: Arc<TypeCatalog>, ctx: TranslateContext) -> Self {
        Self { catalog, ctx }
    }

    /// The type catalog this converter resolves message types against.
    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    /// The address codec and currency table threaded through translations.
    pub fn translate_context(&self) -> &TranslateContext {
        &self.ctx
    }

    /// The protocol → native capability group.
    pub fn to_native(&self) -> ToNative<'_> {
        ToNative { conv: self }
    }

    /// The native → protocol capability group.
    pub fn to_protocol(&self) -> ToProtocol<'_> {
        ToProtocol { conv: self }
    }
}
