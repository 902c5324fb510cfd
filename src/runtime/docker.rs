// ABOUTME: Docker-compatible container lister using bollard.
// ABOUTME: Works for Docker Engine and Podman's Docker-compatible socket.

use super::lister::{ContainerLister, ListError};
use super::types::RuntimeKind;
use crate::endpoint::ResolvedEndpoint;
use async_trait::async_trait;
use bollard::Docker;
use bollard::query_parameters::ListContainersOptions;
use std::time::Duration;

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn map_client_error(e: bollard::errors::Error) -> ListError {
    ListError::Client {
        runtime: RuntimeKind::Docker,
        message: e.to_string(),
    }
}

fn map_query_error(e: bollard::errors::Error) -> ListError {
    ListError::Query {
        runtime: RuntimeKind::Docker,
        message: e.to_string(),
    }
}

// =============================================================================
// DockerLister
// =============================================================================

/// Lists containers through the Docker Engine API.
///
/// A fresh client is built per call and dropped when the call returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct DockerLister;

#[async_trait]
impl ContainerLister for DockerLister {
    async fn count_containers(
        &self,
        endpoint: &ResolvedEndpoint,
        timeout: Duration,
    ) -> Result<usize, ListError> {
        // bollard takes whole seconds; never hand it a zero timeout.
        let timeout_secs = timeout.as_secs().max(1);

        let client =
            Docker::connect_with_unix(endpoint.address(), timeout_secs, bollard::API_DEFAULT_VERSION)
                .map_err(map_client_error)?;
        let client = client.negotiate_version().await.map_err(map_client_error)?;

        let opts = ListContainersOptions {
            all: true,
            size: false,
            ..Default::default()
        };

        let containers = client
            .list_containers(Some(opts))
            .await
            .map_err(map_query_error)?;

        tracing::debug!(
            endpoint = endpoint.endpoint(),
            count = containers.len(),
            "listed docker containers"
        );

        Ok(containers.len())
    }
}
