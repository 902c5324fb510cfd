// ABOUTME: Endpoint URI parsing for container runtime sockets.
// ABOUTME: Handles unix:// and tcp:// schemes plus the legacy bare-path form.

mod resolve;

pub use resolve::{ConnectError, ResolveError, ResolvedEndpoint, UnixDialer, resolve};

use std::fmt;
use thiserror::Error;

/// Transport protocol named by an endpoint's scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Unix,
    Tcp,
}

impl Protocol {
    /// URI scheme for this protocol.
    pub fn scheme(self) -> &'static str {
        match self {
            Protocol::Unix => "unix",
            Protocol::Tcp => "tcp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

/// An endpoint split into protocol and address.
///
/// For unix endpoints the address is the socket path, for tcp endpoints it
/// is `host:port`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEndpoint {
    pub protocol: Protocol,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No `scheme://` prefix. Recoverable by retrying with a fallback scheme.
    #[error("using {endpoint:?} as endpoint is deprecated, please consider using full url format")]
    DeprecatedFormat { endpoint: String },

    #[error("protocol {scheme:?} not supported")]
    UnsupportedProtocol { scheme: String },

    #[error("malformed endpoint {endpoint:?}: {reason}")]
    Malformed { endpoint: String, reason: String },
}

impl ParseError {
    /// True when the endpoint lacked a scheme and a fallback may apply.
    pub fn is_deprecated_format(&self) -> bool {
        matches!(self, ParseError::DeprecatedFormat { .. })
    }
}

/// Parse an endpoint URI into its protocol and address.
///
/// Accepted forms:
/// - `unix:///path/to/socket` yields `(Unix, "/path/to/socket")`
/// - `tcp://host:port` yields `(Tcp, "host:port")`
///
/// A string without a scheme fails with [`ParseError::DeprecatedFormat`];
/// use [`parse_with_fallback`] to accept it.
pub fn parse(endpoint: &str) -> Result<ParsedEndpoint, ParseError> {
    let (scheme, rest) = match split_scheme(endpoint) {
        Scheme::Present(scheme, rest) => (scheme.to_ascii_lowercase(), rest),
        Scheme::Absent => {
            return Err(ParseError::DeprecatedFormat {
                endpoint: endpoint.to_string(),
            });
        }
        Scheme::Empty => {
            return Err(ParseError::Malformed {
                endpoint: endpoint.to_string(),
                reason: "missing protocol scheme".to_string(),
            });
        }
    };

    let (authority, path) = split_authority(strip_query_and_fragment(rest));

    match scheme.as_str() {
        "tcp" => Ok(ParsedEndpoint {
            protocol: Protocol::Tcp,
            address: host_of(authority).to_string(),
        }),
        "unix" => {
            let path = urlencoding::decode(path).map_err(|e| ParseError::Malformed {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;
            if path.is_empty() {
                return Err(ParseError::Malformed {
                    endpoint: endpoint.to_string(),
                    reason: "empty socket path".to_string(),
                });
            }
            Ok(ParsedEndpoint {
                protocol: Protocol::Unix,
                address: path.into_owned(),
            })
        }
        _ => Err(ParseError::UnsupportedProtocol { scheme }),
    }
}

/// Parse an endpoint, retrying bare paths with `fallback` as the scheme.
///
/// Only [`ParseError::DeprecatedFormat`] triggers the retry. When the retry
/// succeeds a deprecation warning is logged; when it fails the retry's error
/// is returned.
pub fn parse_with_fallback(
    endpoint: &str,
    fallback: Protocol,
) -> Result<ParsedEndpoint, ParseError> {
    match parse(endpoint) {
        Err(e) if e.is_deprecated_format() => {
            let fallback_endpoint = format!("{}://{}", fallback.scheme(), endpoint);
            let parsed = parse(&fallback_endpoint)?;
            tracing::warn!(
                "Using {:?} as endpoint is deprecated, please consider using full url format {:?}.",
                endpoint,
                fallback_endpoint
            );
            Ok(parsed)
        }
        other => other,
    }
}

enum Scheme<'a> {
    Present(&'a str, &'a str),
    Absent,
    /// A `:` with nothing before it.
    Empty,
}

/// Split `scheme:rest` following RFC 3986 scheme syntax.
fn split_scheme(input: &str) -> Scheme<'_> {
    for (i, c) in input.char_indices() {
        match c {
            'a'..='z' | 'A'..='Z' => {}
            '0'..='9' | '+' | '-' | '.' if i > 0 => {}
            ':' if i == 0 => return Scheme::Empty,
            ':' => return Scheme::Present(&input[..i], &input[i + 1..]),
            _ => return Scheme::Absent,
        }
    }
    Scheme::Absent
}

fn strip_query_and_fragment(rest: &str) -> &str {
    let rest = rest.split_once('#').map_or(rest, |(before, _)| before);
    rest.split_once('?').map_or(rest, |(before, _)| before)
}

/// Split `//authority/path` into authority and path.
///
/// Without a leading `//` there is no authority. Opaque forms such as
/// `unix:relative` have no path either.
fn split_authority(rest: &str) -> (&str, &str) {
    if let Some(after) = rest.strip_prefix("//") {
        match after.find('/') {
            Some(slash) => (&after[..slash], &after[slash..]),
            None => (after, ""),
        }
    } else if rest.starts_with('/') {
        ("", rest)
    } else {
        ("", "")
    }
}

/// Drop any `user@` prefix from an authority.
fn host_of(authority: &str) -> &str {
    authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host)
}
