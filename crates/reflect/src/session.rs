// Path: crates/reflect/src/session.rs
//! Live session implementations backed by the node's gRPC endpoints.
//!
//! The bidirectional stream is represented as two cooperating halves over an
//! explicit channel: dropping the send half closes the outbound direction,
//! which is what lets the server terminate the stream and the drain task
//! observe end-of-stream.

use crate::{InterfaceLister, ReflectReceiver, ReflectRequest, ReflectResponse, ReflectSender};
use async_trait::async_trait;
use mesh_proto::reflection::{
    InterfaceReflectionClient, ListAllInterfacesRequest, ListImplementationsRequest,
};
use mesh_proto::server_reflection::{
    server_reflection_request::MessageRequest, server_reflection_response::MessageResponse,
    ServerReflectionClient, ServerReflectionRequest, ServerReflectionResponse,
};
use mesh_types::{GatewayError, Result};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::transport::Channel;

/// [`InterfaceLister`] over the node's interface-listing gRPC service.
pub struct TonicInterfaceLister {
    client: InterfaceReflectionClient,
}

impl TonicInterfaceLister {
    pub fn new(channel: Channel) -> Self {
        Self { client: InterfaceReflectionClient::new(channel) }
    }
}

#[async_trait]
impl InterfaceLister for TonicInterfaceLister {
    async fn list_interfaces(&mut self) -> Result<Vec<String>> {
        let response = self
            .client
            .list_all_interfaces(ListAllInterfacesRequest {})
            .await
            .map_err(|s| GatewayError::Discovery(format!("listing interfaces: {s}")))?;
        Ok(response.into_inner().interface_names)
    }

    async fn list_implementations(&mut self, interface: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .list_implementations(ListImplementationsRequest {
                interface_name: interface.to_string(),
            })
            .await
            .map_err(|s| {
                GatewayError::Discovery(format!("listing implementations of {interface}: {s}"))
            })?;
        Ok(response.into_inner().implementation_message_names)
    }
}

/// Opens one reflection session and splits it into its two halves.
pub struct TonicReflectionSession;

impl TonicReflectionSession {
    /// Fatal when the stream cannot be opened at all; every later failure
    /// is surfaced through the halves and handled by the discovery engine.
    pub async fn open(channel: Channel) -> Result<(TonicReflectSender, TonicReflectReceiver)> {
        let (tx, rx) = mpsc::channel::<ServerReflectionRequest>(64);
        let mut client = ServerReflectionClient::new(channel);
        let response = client
            .server_reflection_info(ReceiverStream::new(rx))
            .await
            .map_err(|s| GatewayError::Discovery(format!("opening reflection session: {s}")))?;
        Ok((
            TonicReflectSender { tx: Some(tx) },
            TonicReflectReceiver { stream: response.into_inner() },
        ))
    }
}

/// The send half of a live reflection session.
pub struct TonicReflectSender {
    tx: Option<mpsc::Sender<ServerReflectionRequest>>,
}

#[async_trait]
impl ReflectSender for TonicReflectSender {
    async fn send(&mut self, request: ReflectRequest) -> Result<()> {
        let tx = self.tx.as_ref().ok_or_else(|| {
            GatewayError::Discovery("reflection send side is already closed".into())
        })?;
        let message_request = match request {
            ReflectRequest::ListServices => MessageRequest::ListServices(String::new()),
            ReflectRequest::FileContainingSymbol(symbol) => {
                MessageRequest::FileContainingSymbol(symbol)
            }
        };
        tx.send(ServerReflectionRequest {
            host: String::new(),
            message_request: Some(message_request),
        })
        .await
        .map_err(|_| GatewayError::Discovery("reflection stream rejected a request".into()))
    }

    async fn close(&mut self) -> Result<()> {
        // dropping the channel sender half-closes the gRPC stream
        self.tx = None;
        Ok(())
    }
}

/// The receive half of a live reflection session.
pub struct TonicReflectReceiver {
    stream: tonic::codec::Streaming<ServerReflectionResponse>,
}

#[async_trait]
impl ReflectReceiver for TonicReflectReceiver {
    async fn recv(&mut self) -> Result<Option<ReflectResponse>> {
        let message = self
            .stream
            .message()
            .await
            .map_err(|s| GatewayError::Discovery(format!("reflection stream: {s}")))?;
        Ok(message.map(|response| match response.message_response {
            Some(MessageResponse::ListServicesResponse(list)) => {
                ReflectResponse::Services(list.service.into_iter().map(|s| s.name).collect())
            }
            Some(MessageResponse::FileDescriptorResponse(files)) => {
                ReflectResponse::FileDescriptors(files.file_descriptor_proto)
            }
            Some(MessageResponse::ErrorResponse(err)) => ReflectResponse::Error {
                code: err.error_code,
                message: err.error_message,
            },
            other => ReflectResponse::Error {
                code: 0,
                message: format!("unexpected reflection response: {other:?}"),
            },
        }))
    }
}
