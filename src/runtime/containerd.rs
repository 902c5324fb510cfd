// ABOUTME: containerd container lister using the containerd gRPC API.
// ABOUTME: Dials through the resolver's unix dialer and scopes queries to a namespace.

use super::lister::{ContainerLister, ListError};
use super::types::RuntimeKind;
use crate::endpoint::ResolvedEndpoint;
use async_trait::async_trait;
use containerd_client::services::v1::ListContainersRequest;
use containerd_client::services::v1::containers_client::ContainersClient;
use containerd_client::tonic::Request;
use containerd_client::tonic::metadata::{Ascii, MetadataValue};
use containerd_client::tonic::transport::{Endpoint, Uri};
use hyper_util::rt::TokioIo;
use std::time::Duration;
use tower::service_fn;

/// gRPC metadata key containerd reads the namespace from.
const NAMESPACE_HEADER: &str = "containerd-namespace";

/// tonic needs a URI to build a channel; the connector ignores it and dials
/// the unix socket instead.
const PLACEHOLDER_URI: &str = "http://[::]:50051";

fn client_error(message: impl ToString) -> ListError {
    ListError::Client {
        runtime: RuntimeKind::Containerd,
        message: message.to_string(),
    }
}

/// Lists containers in one containerd namespace.
#[derive(Debug, Clone)]
pub struct ContainerdLister {
    namespace: String,
}

impl ContainerdLister {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

#[async_trait]
impl ContainerLister for ContainerdLister {
    async fn count_containers(
        &self,
        endpoint: &ResolvedEndpoint,
        timeout: Duration,
    ) -> Result<usize, ListError> {
        let namespace: MetadataValue<Ascii> = self
            .namespace
            .as_str()
            .try_into()
            .map_err(|_| client_error(format!("invalid namespace {:?}", self.namespace)))?;

        let dialer = endpoint.dialer();
        let address = endpoint.address().to_string();
        let channel = Endpoint::from_static(PLACEHOLDER_URI)
            .connect_timeout(timeout)
            .connect_with_connector(service_fn(move |_: Uri| {
                let address = address.clone();
                async move { dialer.dial(&address).await.map(TokioIo::new) }
            }))
            .await
            .map_err(client_error)?;

        let mut request = Request::new(ListContainersRequest::default());
        request.metadata_mut().insert(NAMESPACE_HEADER, namespace);

        let response = ContainersClient::new(channel)
            .list(request)
            .await
            .map_err(|status| ListError::Query {
                runtime: RuntimeKind::Containerd,
                message: status.message().to_string(),
            })?;

        let count = response.into_inner().containers.len();
        tracing::debug!(
            endpoint = endpoint.endpoint(),
            namespace = %self.namespace,
            count,
            "listed containerd containers"
        );

        Ok(count)
    }
}
