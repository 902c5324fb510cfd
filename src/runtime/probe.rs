// ABOUTME: Probes one endpoint for a running container runtime.
// ABOUTME: Resolves, dials with a bounded timeout, then counts containers.

use super::containerd::ContainerdLister;
use super::docker::DockerLister;
use super::error::{ConnectSnafu, EnumerationSnafu, ProbeError, ResolveSnafu};
use super::lister::{ContainerLister, ListError};
use super::types::{DEFAULT_CONTAINERD_NAMESPACE, DEFAULT_DETECTION_TIMEOUT, RuntimeKind};
use crate::endpoint::resolve;
use snafu::ResultExt;
use std::sync::Arc;
use std::time::Duration;

/// Knobs shared by every probe in a detection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSettings {
    /// Bound applied to the dial and, separately, to the container listing.
    pub timeout: Duration,
    /// Namespace containerd queries are scoped to.
    pub containerd_namespace: String,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_DETECTION_TIMEOUT,
            containerd_namespace: DEFAULT_CONTAINERD_NAMESPACE.to_string(),
        }
    }
}

/// State of a reachable endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The runtime reports at least one container.
    Running { containers: usize },
    /// Reachable, but the runtime has no containers.
    Idle,
}

impl ProbeStatus {
    fn from_count(containers: usize) -> Self {
        if containers > 0 {
            ProbeStatus::Running { containers }
        } else {
            ProbeStatus::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, ProbeStatus::Running { .. })
    }
}

/// Checks single endpoints against the lister registered for their kind.
pub struct Probe {
    timeout: Duration,
    docker: Arc<dyn ContainerLister>,
    containerd: Arc<dyn ContainerLister>,
}

impl Probe {
    /// Create a probe backed by the bollard and containerd clients.
    pub fn new(settings: &ProbeSettings) -> Self {
        Self {
            timeout: settings.timeout,
            docker: Arc::new(DockerLister),
            containerd: Arc::new(ContainerdLister::new(&settings.containerd_namespace)),
        }
    }

    /// Replace the lister used for `kind`.
    pub fn with_lister(mut self, kind: RuntimeKind, lister: Arc<dyn ContainerLister>) -> Self {
        match kind {
            RuntimeKind::Docker => self.docker = lister,
            RuntimeKind::Containerd => self.containerd = lister,
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn lister(&self, kind: RuntimeKind) -> &dyn ContainerLister {
        match kind {
            RuntimeKind::Docker => self.docker.as_ref(),
            RuntimeKind::Containerd => self.containerd.as_ref(),
        }
    }

    /// Probe `endpoint`, expecting a runtime of `kind` behind it.
    ///
    /// `Ok` means the endpoint answered: [`ProbeStatus::Running`] when it has
    /// containers, [`ProbeStatus::Idle`] when it has none. Every way the
    /// endpoint can be unusable is reported as a [`ProbeError`].
    pub async fn probe(&self, endpoint: &str, kind: RuntimeKind) -> Result<ProbeStatus, ProbeError> {
        let resolved = resolve(endpoint).context(ResolveSnafu { endpoint })?;

        // Reachability only; the stream is closed before the client connects.
        let stream = resolved
            .connect(self.timeout)
            .await
            .context(ConnectSnafu { endpoint })?;
        drop(stream);

        let listing = self
            .lister(kind)
            .count_containers(&resolved, self.timeout);
        let containers = match tokio::time::timeout(self.timeout, listing).await {
            Ok(result) => result,
            Err(_) => Err(ListError::TimedOut(self.timeout)),
        }
        .context(EnumerationSnafu { endpoint })?;

        tracing::debug!(endpoint, runtime = %kind, containers, "probe finished");
        Ok(ProbeStatus::from_count(containers))
    }
}
