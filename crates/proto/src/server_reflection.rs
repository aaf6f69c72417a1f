// Path: crates/proto/src/server_reflection.rs
//! The generic gRPC server-reflection protocol (`grpc.reflection.v1alpha`).
//!
//! A single bidirectional stream: the client streams symbol-lookup requests
//! and the server streams back serialized `FileDescriptorProto`s. Tags and
//! shapes follow the upstream `reflection.proto` exactly.

use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServerReflectionRequest {
    #[prost(string, tag = "1")]
    pub host: String,
    #[prost(oneof = "server_reflection_request::MessageRequest", tags = "3, 4, 5, 6, 7")]
    pub message_request: Option<server_reflection_request::MessageRequest>,
}

pub mod server_reflection_request {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum MessageRequest {
        /// Find a file by name.
        #[prost(string, tag = "3")]
        FileByFilename(String),
        /// Find the file that declares the given fully-qualified symbol.
        #[prost(string, tag = "4")]
        FileContainingSymbol(String),
        /// Find the file declaring an extension of the given message.
        #[prost(message, tag = "5")]
        FileContainingExtension(super::ExtensionRequest),
        /// List extension numbers of the given message type.
        #[prost(string, tag = "6")]
        AllExtensionNumbersOfType(String),
        /// List all services exposed by the server.
        #[prost(string, tag = "7")]
        ListServices(String),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExtensionRequest {
    #[prost(string, tag = "1")]
    pub containing_type: String,
    #[prost(int32, tag = "2")]
    pub extension_number: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServerReflectionResponse {
    #[prost(string, tag = "1")]
    pub valid_host: String,
    #[prost(message, optional, tag = "2")]
    pub original_request: Option<ServerReflectionRequest>,
    #[prost(oneof = "server_reflection_response::MessageResponse", tags = "4, 5, 6, 7")]
    pub message_response: Option<server_reflection_response::MessageResponse>,
}

pub mod server_reflection_response {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum MessageResponse {
        #[prost(message, tag = "4")]
        FileDescriptorResponse(super::FileDescriptorResponse),
        #[prost(message, tag = "5")]
        AllExtensionNumbersResponse(super::ExtensionNumberResponse),
        #[prost(message, tag = "6")]
        ListServicesResponse(super::ListServiceResponse),
        #[prost(message, tag = "7")]
        ErrorResponse(super::ErrorResponse),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileDescriptorResponse {
    /// Serialized `google.protobuf.FileDescriptorProto` messages.
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub file_descriptor_proto: Vec<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExtensionNumberResponse {
    #[prost(string, tag = "1")]
    pub base_type_name: String,
    #[prost(int32, repeated, tag = "2")]
    pub extension_number: Vec<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListServiceResponse {
    #[prost(message, repeated, tag = "1")]
    pub service: Vec<ServiceResponse>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServiceResponse {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ErrorResponse {
    #[prost(int32, tag = "1")]
    pub error_code: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
}

/// Client for `grpc.reflection.v1alpha.ServerReflection`.
#[derive(Debug, Clone)]
pub struct ServerReflectionClient {
    inner: tonic::client::Grpc<Channel>,
}

impl ServerReflectionClient {
    pub fn new(channel: Channel) -> Self {
        Self { inner: tonic::client::Grpc::new(channel) }
    }

    /// Opens the bidirectional reflection stream.
    pub async fn server_reflection_info(
        &mut self,
        request: impl tonic::IntoStreamingRequest<Message = ServerReflectionRequest>,
    ) -> Result<tonic::Response<tonic::codec::Streaming<ServerReflectionResponse>>, tonic::Status>
    {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("service was not ready: {e}")))?;
        let codec = tonic::codec::ProstCodec::default();
        let path = PathAndQuery::from_static(
            "/grpc.reflection.v1alpha.ServerReflection/ServerReflectionInfo",
        );
        self.inner.streaming(request.into_streaming_request(), path, codec).await
    }
}
