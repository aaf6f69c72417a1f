// Path: crates/reflect/src/lib.rs
#![forbid(unsafe_code)]

//! Runtime type discovery.
//!
//! Populates the [`TypeCatalog`] without compile-time knowledge of the
//! chain's message set by combining two node capabilities: the
//! interface-listing query (which interfaces exist and which type names
//! implement them) and the generic server-reflection protocol (which
//! resolves those names into file descriptors).
//!
//! The reflection stream is bidirectional. The engine drives the send side
//! while exactly one background task drains the receive side into a table
//! keyed by file name; both sides are joined before discovery is considered
//! complete. Discovery is best-effort past the two fatal points: the
//! initial interface listing and the session itself. Individual symbol
//! lookups that fail are logged and skipped, because interfaces evolve
//! independently of the subset exercised at registration time.

pub mod session;

use mesh_api::{DynamicTranslator, TypeCatalog};
use mesh_types::{GatewayError, Result};
use prost::Message;
use prost_types::{DescriptorProto, FileDescriptorProto};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::oneshot;

pub use session::{TonicInterfaceLister, TonicReflectionSession};

use async_trait::async_trait;

/// A symbol-lookup request on the reflection stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReflectRequest {
    /// Ask for every service the server exposes.
    ListServices,
    /// Ask for the file declaring the given fully-qualified symbol.
    FileContainingSymbol(String),
}

/// A response drained from the reflection stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReflectResponse {
    /// The server's service list.
    Services(Vec<String>),
    /// Serialized `FileDescriptorProto`s answering a file request.
    FileDescriptors(Vec<Vec<u8>>),
    /// A per-request error from the server.
    Error { code: i32, message: String },
}

/// The interface-listing capability of the node.
#[async_trait]
pub trait InterfaceLister: Send {
    async fn list_interfaces(&mut self) -> Result<Vec<String>>;
    async fn list_implementations(&mut self, interface: &str) -> Result<Vec<String>>;
}

/// The send half of one reflection session.
#[async_trait]
pub trait ReflectSender: Send {
    async fn send(&mut self, request: ReflectRequest) -> Result<()>;
    /// Closes the send direction so the server can end the stream.
    async fn close(&mut self) -> Result<()>;
}

/// The receive half of one reflection session.
#[async_trait]
pub trait ReflectReceiver: Send + 'static {
    /// The next response, or `None` once the server has closed the stream.
    async fn recv(&mut self) -> Result<Option<ReflectResponse>>;
}

/// What a discovery run found and registered.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiscoveryReport {
    /// Interfaces the node listed.
    pub interfaces: Vec<String>,
    /// Files successfully drained from the reflection stream.
    pub files: usize,
    /// Type URLs registered into the catalog by this run.
    pub registered: Vec<String>,
    /// Implementation names the stream never resolved to a descriptor.
    pub unresolved: Vec<String>,
}

/// Discovers the node's registered message types and populates the catalog.
///
/// Fatal only when the interface listing itself fails or the session cannot
/// produce anything; everything else degrades gracefully and is reported.
/// Callers bound the whole run with their own timeout — the protocol has no
/// built-in idle timeout, so a server that never closes the stream must be
/// cut off from outside.
pub async fn discover_and_register<L, S, R>(
    catalog: &TypeCatalog,
    lister: &mut L,
    mut sender: S,
    receiver: R,
) -> Result<DiscoveryReport>
where
    L: InterfaceLister,
    S: ReflectSender,
    R: ReflectReceiver,
{
    // 1. Which type names exist, per interface. The listing call is the
    //    first fatal point.
    let interfaces = lister.list_interfaces().await?;
    let mut impls_by_interface: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for interface in &interfaces {
        match lister.list_implementations(interface).await {
            Ok(impls) => {
                impls_by_interface.insert(interface.clone(), impls);
            }
            Err(e) => {
                tracing::warn!(
                    target: "mesh-reflect",
                    interface = %interface,
                    error = %e,
                    "listing implementations failed; skipping interface"
                );
            }
        }
    }

    // 2. One background reader drains the stream; the service list is
    //    forwarded to the send side as soon as it arrives.
    let (services_tx, services_rx) = oneshot::channel();
    let reader = tokio::spawn(drain(receiver, services_tx));

    // 3. Drive the send side. Send failures are logged, not fatal: the
    //    receive side may still deliver everything already in flight.
    send_logged(&mut sender, ReflectRequest::ListServices).await;

    let services = match services_rx.await {
        Ok(services) => services,
        Err(_) => {
            tracing::warn!(
                target: "mesh-reflect",
                "reflection stream closed before a service list arrived"
            );
            Vec::new()
        }
    };
    for service in &services {
        send_logged(&mut sender, ReflectRequest::FileContainingSymbol(service.clone())).await;
    }
    for impls in impls_by_interface.values() {
        for name in impls {
            let symbol = name.trim_start_matches('/').to_string();
            send_logged(&mut sender, ReflectRequest::FileContainingSymbol(symbol)).await;
        }
    }

    // 4. Close the send direction and wait for the reader to observe
    //    end-of-stream before touching its table.
    if let Err(e) = sender.close().await {
        tracing::warn!(target: "mesh-reflect", error = %e, "closing reflection send side failed");
    }
    let files = reader
        .await
        .map_err(|e| GatewayError::Discovery(format!("joining reflection reader: {e}")))?;

    // 5. Register every listed implementation whose declaring file arrived.
    let mut declared: HashSet<String> = HashSet::new();
    for fd in files.values() {
        collect_declared_urls(fd, &mut declared);
    }

    let mut report = DiscoveryReport {
        interfaces,
        files: files.len(),
        ..DiscoveryReport::default()
    };
    for (interface, impls) in &impls_by_interface {
        for type_url in impls {
            if !declared.contains(type_url) {
                report.unresolved.push(type_url.clone());
                continue;
            }
            catalog.register_interface_impl(interface, type_url);
            if catalog.register_if_absent(Arc::new(DynamicTranslator::new(type_url.clone()))) {
                report.registered.push(type_url.clone());
            }
        }
    }
    report.registered.sort();
    report.unresolved.sort();

    if !report.unresolved.is_empty() {
        tracing::warn!(
            target: "mesh-reflect",
            unresolved = report.unresolved.len(),
            "some implementation names were not resolved by reflection"
        );
    }
    tracing::info!(
        target: "mesh-reflect",
        interfaces = report.interfaces.len(),
        files = report.files,
        registered = report.registered.len(),
        "type discovery complete"
    );
    Ok(report)
}

async fn send_logged<S: ReflectSender>(sender: &mut S, request: ReflectRequest) {
    if let Err(e) = sender.send(request).await {
        tracing::warn!(target: "mesh-reflect", error = %e, "reflection send failed");
    }
}

/// Drains the receive side into a file table. Runs as the one background
/// task of a discovery; terminates when the server closes the stream or the
/// transport fails.
async fn drain<R: ReflectReceiver>(
    mut receiver: R,
    services_tx: oneshot::Sender<Vec<String>>,
) -> HashMap<String, FileDescriptorProto> {
    let mut services_tx = Some(services_tx);
    let mut files: HashMap<String, FileDescriptorProto> = HashMap::new();
    loop {
        match receiver.recv().await {
            Ok(Some(ReflectResponse::Services(services))) => {
                if let Some(tx) = services_tx.take() {
                    let _ = tx.send(services);
                }
            }
            Ok(Some(ReflectResponse::FileDescriptors(blobs))) => {
                for blob in blobs {
                    match FileDescriptorProto::decode(blob.as_slice()) {
                        Ok(fd) => {
                            files.entry(fd.name().to_string()).or_insert(fd);
                        }
                        Err(e) => {
                            tracing::warn!(
                                target: "mesh-reflect",
                                error = %e,
                                "undecodable file descriptor skipped"
                            );
                        }
                    }
                }
            }
            Ok(Some(ReflectResponse::Error { code, message })) => {
                tracing::warn!(
                    target: "mesh-reflect",
                    code,
                    message = %message,
                    "reflection lookup failed"
                );
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(
                    target: "mesh-reflect",
                    error = %e,
                    "reflection stream ended with an error"
                );
                break;
            }
        }
    }
    files
}

/// Collects the type URL of every message a file declares, including nested
/// declarations.
fn collect_declared_urls(fd: &FileDescriptorProto, out: &mut HashSet<String>) {
    fn visit(prefix: &str, message: &DescriptorProto, out: &mut HashSet<String>) {
        let name = format!("{prefix}.{}", message.name());
        out.insert(format!("/{name}"));
        for nested in &message.nested_type {
            visit(&name, nested, out);
        }
    }
    for message in &fd.message_type {
        visit(fd.package(), message, out);
    }
}
