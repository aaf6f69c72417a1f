// Path: crates/proto/src/reflection.rs
//! The node's interface-listing query: `lattice.base.reflection.v1`.
//!
//! Lists the registered message interfaces (one native message "kind" per
//! interface) and the fully-qualified names of their implementations. This
//! is the first half of runtime type discovery; resolving the named types
//! into decodable descriptors happens over the generic server-reflection
//! protocol in [`crate::server_reflection`].

use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListAllInterfacesRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListAllInterfacesResponse {
    #[prost(string, repeated, tag = "1")]
    pub interface_names: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListImplementationsRequest {
    #[prost(string, tag = "1")]
    pub interface_name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListImplementationsResponse {
    /// Implementation names as registered, each carrying a leading `/`.
    #[prost(string, repeated, tag = "1")]
    pub implementation_message_names: Vec<String>,
}

/// Client for `lattice.base.reflection.v1.ReflectionService`.
#[derive(Debug, Clone)]
pub struct InterfaceReflectionClient {
    inner: tonic::client::Grpc<Channel>,
}

impl InterfaceReflectionClient {
    pub fn new(channel: Channel) -> Self {
        Self { inner: tonic::client::Grpc::new(channel) }
    }

    pub async fn list_all_interfaces(
        &mut self,
        request: ListAllInterfacesRequest,
    ) -> Result<tonic::Response<ListAllInterfacesResponse>, tonic::Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("service was not ready: {e}")))?;
        let codec = tonic::codec::ProstCodec::default();
        let path = PathAndQuery::from_static(
            "/lattice.base.reflection.v1.ReflectionService/ListAllInterfaces",
        );
        self.inner.unary(tonic::Request::new(request), path, codec).await
    }

    pub async fn list_implementations(
        &mut self,
        request: ListImplementationsRequest,
    ) -> Result<tonic::Response<ListImplementationsResponse>, tonic::Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("service was not ready: {e}")))?;
        let codec = tonic::codec::ProstCodec::default();
        let path = PathAndQuery::from_static(
            "/lattice.base.reflection.v1.ReflectionService/ListImplementations",
        );
        self.inner.unary(tonic::Request::new(request), path, codec).await
    }
}
