// ABOUTME: Resolves endpoints to a dialable unix socket address.
// ABOUTME: Rejects every transport other than local unix sockets.

use super::{ParseError, Protocol, parse_with_fallback};
use std::io;
use std::time::Duration;
use thiserror::Error;
use tokio::net::UnixStream;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("only unix socket endpoints are supported, got a {protocol} endpoint")]
    UnsupportedTransport { protocol: Protocol },
}

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("could not connect to {address}: {source}")]
    Io {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("timed out connecting to {address} after {timeout:?}")]
    TimedOut { address: String, timeout: Duration },
}

/// Opens connections to local unix sockets.
///
/// Cancellation is left to the caller: drop the future, or bound it with
/// `tokio::time::timeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixDialer;

impl UnixDialer {
    pub async fn dial(&self, address: &str) -> io::Result<UnixStream> {
        UnixStream::connect(address).await
    }
}

/// An endpoint that passed resolution and can be dialed.
#[derive(Debug, Clone)]
pub struct ResolvedEndpoint {
    endpoint: String,
    address: String,
    dialer: UnixDialer,
}

impl ResolvedEndpoint {
    /// The endpoint string as configured.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Socket path to dial.
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn dialer(&self) -> UnixDialer {
        self.dialer
    }

    /// Dial the socket, giving up after `timeout`.
    pub async fn connect(&self, timeout: Duration) -> Result<UnixStream, ConnectError> {
        match tokio::time::timeout(timeout, self.dialer.dial(&self.address)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(source)) => Err(ConnectError::Io {
                address: self.address.clone(),
                source,
            }),
            Err(_) => Err(ConnectError::TimedOut {
                address: self.address.clone(),
                timeout,
            }),
        }
    }
}

/// Resolve an endpoint to a unix socket address and dialer.
///
/// Bare paths are accepted as unix sockets (with a deprecation warning).
/// Endpoints that parse to any other protocol, such as `tcp://`, fail with
/// [`ResolveError::UnsupportedTransport`].
pub fn resolve(endpoint: &str) -> Result<ResolvedEndpoint, ResolveError> {
    let parsed = parse_with_fallback(endpoint, Protocol::Unix)?;
    if parsed.protocol != Protocol::Unix {
        return Err(ResolveError::UnsupportedTransport {
            protocol: parsed.protocol,
        });
    }

    Ok(ResolvedEndpoint {
        endpoint: endpoint.to_string(),
        address: parsed.address,
        dialer: UnixDialer,
    })
}
