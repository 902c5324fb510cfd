// ABOUTME: Container listing seam between the probe and runtime client SDKs.
// ABOUTME: Each runtime kind supplies a lister that counts containers.

use super::types::RuntimeKind;
use crate::endpoint::ResolvedEndpoint;
use async_trait::async_trait;
use std::time::Duration;

/// Counts containers on a runtime endpoint.
///
/// Implementations own their client handle for the duration of one call and
/// release it before returning, whatever the outcome.
#[async_trait]
pub trait ContainerLister: Send + Sync {
    /// Count all containers at `endpoint`, stopped ones included.
    async fn count_containers(
        &self,
        endpoint: &ResolvedEndpoint,
        timeout: Duration,
    ) -> Result<usize, ListError>;
}

/// Errors from container enumeration.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("error creating {runtime} client: {message}")]
    Client {
        runtime: RuntimeKind,
        message: String,
    },

    #[error("error listing {runtime} containers: {message}")]
    Query {
        runtime: RuntimeKind,
        message: String,
    },

    #[error("listing containers timed out after {0:?}")]
    TimedOut(Duration),
}
