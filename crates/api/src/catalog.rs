// Path: crates/api/src/catalog.rs
//! The runtime type catalog.
//!
//! The set of native message types is open-ended: a compiled-in chain
//! profile seeds the catalog at startup and runtime discovery adds every
//! type the node actually registers. The catalog maps a fully-qualified
//! type URL to a [`MessageTranslator`] — the strategy object that knows how
//! to turn that message into protocol operations and back.
//!
//! Population runs under a single-writer discipline before any conversion
//! request is served; afterwards the catalog is read-only.

use dashmap::DashMap;
use mesh_proto::Any;
use mesh_types::protocol::{Currency, Operation};
use mesh_types::{AddressCodec, GatewayError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Everything a translator needs besides the message itself: the address
/// codec of this deployment and the registered currency exponents. Fixed at
/// construction time, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct TranslateContext {
    pub address_codec: AddressCodec,
    /// Denomination → decimal places. Denominations absent from the table
    /// render with zero decimals.
    pub currency_exponents: HashMap<String, u32>,
}

impl TranslateContext {
    pub fn new(address_codec: AddressCodec, currency_exponents: HashMap<String, u32>) -> Self {
        Self { address_codec, currency_exponents }
    }

    /// The protocol currency for a native denomination.
    pub fn currency(&self, denom: &str) -> Currency {
        Currency {
            symbol: denom.to_string(),
            decimals: self.currency_exponents.get(denom).copied().unwrap_or(0),
        }
    }
}

/// Translates one native message type between the two models.
///
/// Translators emit operations indexed by their position *within the
/// returned group* (starting at 0). Every operation after the group's first
/// must reference an earlier operation of the same group through
/// `related_operations` (directly or transitively), which is what lets the
/// reverse direction reassemble groups without guessing from position.
pub trait MessageTranslator: Send + Sync {
    /// The fully-qualified type URL this translator handles.
    fn type_url(&self) -> &str;

    /// Decomposes a packed message into its operations. `status` is attached
    /// to each operation when the message comes from a confirmed
    /// transaction, and left absent for unsigned/mempool ones.
    fn to_operations(
        &self,
        ctx: &TranslateContext,
        msg: &Any,
        status: Option<&str>,
    ) -> Result<Vec<Operation>>;

    /// Reconstructs the packed message from one operation group.
    fn to_message(&self, ctx: &TranslateContext, ops: &[Operation]) -> Result<Any>;

    /// The addresses that must sign a transaction carrying this message, in
    /// the order the native transaction expects them.
    fn signer_addresses(&self, ctx: &TranslateContext, msg: &Any) -> Result<Vec<String>>;
}

/// Registry mapping fully-qualified type URLs to decodable prototypes,
/// grouped by the interface each type implements.
#[derive(Default)]
pub struct TypeCatalog {
    translators: DashMap<String, Arc<dyn MessageTranslator>>,
    interfaces: DashMap<String, Vec<String>>,
}

impl std::fmt::Debug for TypeCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeCatalog")
            .field("message_urls", &self.list_message_urls())
            .finish()
    }
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a translator under its type URL, replacing any previous
    /// entry for the same URL.
    pub fn register(&self, translator: Arc<dyn MessageTranslator>) {
        let url = translator.type_url().to_string();
        tracing::debug!(target: "mesh-catalog", type_url = %url, "registering message translator");
        self.translators.insert(url, translator);
    }

    /// Registers a translator only when its type URL is still unknown.
    /// Returns whether the translator was installed. Discovery uses this so
    /// compiled-in profile entries always win over dynamic ones.
    pub fn register_if_absent(&self, translator: Arc<dyn MessageTranslator>) -> bool {
        let url = translator.type_url().to_string();
        let mut installed = false;
        self.translators.entry(url.clone()).or_insert_with(|| {
            installed = true;
            translator
        });
        if installed {
            tracing::debug!(target: "mesh-catalog", type_url = %url, "registering discovered message translator");
        }
        installed
    }

    /// Records that `type_url` implements the named interface.
    pub fn register_interface_impl(&self, interface: &str, type_url: &str) {
        let mut impls = self.interfaces.entry(interface.to_string()).or_default();
        if !impls.iter().any(|u| u == type_url) {
            impls.push(type_url.to_string());
        }
    }

    /// Resolves the translator for a type URL.
    pub fn resolve(&self, type_url: &str) -> Result<Arc<dyn MessageTranslator>> {
        self.translators
            .get(type_url)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                GatewayError::Converter(format!(
                    "message type {type_url:?} is not registered in the type catalog"
                ))
            })
    }

    /// Whether a type URL is registered.
    pub fn has(&self, type_url: &str) -> bool {
        self.translators.contains_key(type_url)
    }

    /// Every registered message type URL, sorted.
    pub fn list_message_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.translators.iter().map(|e| e.key().clone()).collect();
        urls.sort();
        urls
    }

    /// The implementations recorded for an interface name.
    pub fn interface_impls(&self, interface: &str) -> Vec<String> {
        self.interfaces
            .get(interface)
            .map(|e| e.value().clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop(String);

    impl MessageTranslator for Noop {
        fn type_url(&self) -> &str {
            &self.0
        }
        fn to_operations(
            &self,
            _ctx: &TranslateContext,
            _msg: &Any,
            _status: Option<&str>,
        ) -> Result<Vec<Operation>> {
            Ok(Vec::new())
        }
        fn to_message(&self, _ctx: &TranslateContext, _ops: &[Operation]) -> Result<Any> {
            Ok(Any::default())
        }
        fn signer_addresses(&self, _ctx: &TranslateContext, _msg: &Any) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn resolves_registered_types_and_reports_unknown_ones() {
        let catalog = TypeCatalog::new();
        catalog.register(Arc::new(Noop("/lattice.bank.v1.MsgSend".into())));
        assert!(catalog.resolve("/lattice.bank.v1.MsgSend").is_ok());
        assert!(matches!(
            catalog.resolve("/lattice.gov.v1.MsgVote"),
            Err(GatewayError::Converter(_))
        ));
    }

    #[test]
    fn compiled_in_entries_win_over_discovered_ones() {
        let catalog = TypeCatalog::new();
        catalog.register(Arc::new(Noop("/a.b.Msg".into())));
        assert!(!catalog.register_if_absent(Arc::new(Noop("/a.b.Msg".into()))));
        assert!(catalog.register_if_absent(Arc::new(Noop("/a.b.Other".into()))));
    }

    #[test]
    fn lists_sorted_urls_and_interface_impls() {
        let catalog = TypeCatalog::new();
        catalog.register(Arc::new(Noop("/z.Msg".into())));
        catalog.register(Arc::new(Noop("/a.Msg".into())));
        catalog.register_interface_impl("lattice.base.v1.Msg", "/z.Msg");
        catalog.register_interface_impl("lattice.base.v1.Msg", "/z.Msg");
        assert_eq!(catalog.list_message_urls(), vec!["/a.Msg", "/z.Msg"]);
        assert_eq!(catalog.interface_impls("lattice.base.v1.Msg"), vec!["/z.Msg"]);
    }
}
