// ABOUTME: Probe error types with SNAFU pattern.
// ABOUTME: Unifies resolve, connect and enumeration failures for one candidate.

use snafu::Snafu;

use super::lister::ListError;
use crate::endpoint::{ConnectError, ResolveError};

/// Why a single candidate endpoint could not be used.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ProbeError {
    #[snafu(display("endpoint '{endpoint}' is unusable: {source}"))]
    Resolve {
        endpoint: String,
        source: ResolveError,
    },

    #[snafu(display("could not connect to endpoint '{endpoint}': {source}"))]
    Connect {
        endpoint: String,
        source: ConnectError,
    },

    #[snafu(display("could not list containers on endpoint '{endpoint}': {source}"))]
    Enumeration { endpoint: String, source: ListError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeErrorKind {
    /// Endpoint string could not be parsed.
    Parse,
    /// Endpoint parsed to a transport other than unix sockets.
    Transport,
    /// Dial failed or timed out.
    Connect,
    /// Runtime client could not be built or the listing failed.
    Enumeration,
}

impl ProbeError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ProbeErrorKind {
        match self {
            ProbeError::Resolve { source, .. } => match source {
                ResolveError::Parse(_) => ProbeErrorKind::Parse,
                ResolveError::UnsupportedTransport { .. } => ProbeErrorKind::Transport,
            },
            ProbeError::Connect { .. } => ProbeErrorKind::Connect,
            ProbeError::Enumeration { .. } => ProbeErrorKind::Enumeration,
        }
    }

    /// The endpoint the failed probe was aimed at.
    pub fn endpoint(&self) -> &str {
        match self {
            ProbeError::Resolve { endpoint, .. }
            | ProbeError::Connect { endpoint, .. }
            | ProbeError::Enumeration { endpoint, .. } => endpoint,
        }
    }
}
