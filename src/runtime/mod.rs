// ABOUTME: Container runtime detection for Docker and containerd.
// ABOUTME: Probes candidate sockets and reports the first active runtime.

mod containerd;
mod detection;
mod docker;
mod error;
mod lister;
mod probe;
mod types;

pub use containerd::ContainerdLister;
pub use detection::{DetectionError, Detector, auto_detect};
pub use docker::DockerLister;
pub use error::{ProbeError, ProbeErrorKind};
pub use lister::{ContainerLister, ListError};
pub use probe::{Probe, ProbeSettings, ProbeStatus};
pub use types::{
    CONTAINERD_SOCKET, Candidate, DEFAULT_CONTAINERD_NAMESPACE, DEFAULT_DETECTION_TIMEOUT,
    DOCKER_SOCKET, Detection, K3S_CONTAINERD_SOCKET, ParseCandidateError, RuntimeKind,
    UnknownRuntimeKind, default_candidates,
};
