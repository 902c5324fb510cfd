// ABOUTME: Application-wide error types for rtprobe.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::endpoint::ResolveError;
use crate::runtime::{DetectionError, ProbeError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Endpoint(#[from] ResolveError),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Detection(#[from] DetectionError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
