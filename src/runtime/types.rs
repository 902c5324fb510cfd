// ABOUTME: Runtime kind, candidate and detection result types.
// ABOUTME: Also holds the default candidate table of well-known sockets.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DOCKER_SOCKET: &str = "unix:///var/run/docker.sock";
pub const CONTAINERD_SOCKET: &str = "unix:///run/containerd/containerd.sock";
pub const K3S_CONTAINERD_SOCKET: &str = "unix:///run/k3s/containerd/containerd.sock";

/// Namespace Kubernetes uses for its containerd containers.
pub const DEFAULT_CONTAINERD_NAMESPACE: &str = "k8s.io";

/// Shared bound for every network step of a probe.
pub const DEFAULT_DETECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// The family of container engine an endpoint is expected to speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeKind {
    /// Docker Engine API (Docker, Podman's compat socket).
    Docker,
    /// containerd gRPC API.
    Containerd,
}

impl std::fmt::Display for RuntimeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeKind::Docker => write!(f, "docker"),
            RuntimeKind::Containerd => write!(f, "containerd"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown runtime kind: {0} (expected docker or containerd)")]
pub struct UnknownRuntimeKind(String);

impl FromStr for RuntimeKind {
    type Err = UnknownRuntimeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "docker" => Ok(RuntimeKind::Docker),
            "containerd" => Ok(RuntimeKind::Containerd),
            _ => Err(UnknownRuntimeKind(s.to_string())),
        }
    }
}

/// One entry of the candidate table: where to look and what to expect there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub endpoint: String,
    pub runtime: RuntimeKind,
}

impl Candidate {
    pub fn new(endpoint: impl Into<String>, runtime: RuntimeKind) -> Self {
        Self {
            endpoint: endpoint.into(),
            runtime,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCandidateError {
    #[error("expected ENDPOINT=RUNTIME, got {0:?}")]
    MissingSeparator(String),

    #[error("endpoint cannot be empty")]
    EmptyEndpoint,

    #[error(transparent)]
    Runtime(#[from] UnknownRuntimeKind),
}

/// Parses `ENDPOINT=RUNTIME`, splitting on the last `=`.
impl FromStr for Candidate {
    type Err = ParseCandidateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (endpoint, runtime) = s
            .rsplit_once('=')
            .ok_or_else(|| ParseCandidateError::MissingSeparator(s.to_string()))?;
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(ParseCandidateError::EmptyEndpoint);
        }
        Ok(Candidate::new(endpoint, runtime.parse()?))
    }
}

/// Result of a successful detection pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub runtime: RuntimeKind,
    /// The endpoint as configured, not the resolved socket path.
    pub endpoint: String,
    pub containers: usize,
}

/// Well-known sockets, in the order they are tried.
pub fn default_candidates() -> Vec<Candidate> {
    vec![
        Candidate::new(DOCKER_SOCKET, RuntimeKind::Docker),
        Candidate::new(CONTAINERD_SOCKET, RuntimeKind::Containerd),
        Candidate::new(K3S_CONTAINERD_SOCKET, RuntimeKind::Containerd),
    ]
}
