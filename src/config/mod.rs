// ABOUTME: Configuration types and parsing for rtprobe.yml.
// ABOUTME: Holds the ordered candidate table, detection timeout and containerd namespace.

mod init;

pub use init::init_config;

use crate::error::{Error, Result};
use crate::runtime::{
    Candidate, DEFAULT_CONTAINERD_NAMESPACE, DEFAULT_DETECTION_TIMEOUT, ProbeSettings,
    default_candidates,
};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "rtprobe.yml";
pub const CONFIG_FILENAME_ALT: &str = "rtprobe.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DetectionConfig {
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    #[serde(default = "default_namespace")]
    pub containerd_namespace: String,

    /// Tried in order; the first runtime with containers wins.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<Candidate>,
}

fn default_timeout() -> Duration {
    DEFAULT_DETECTION_TIMEOUT
}

fn default_namespace() -> String {
    DEFAULT_CONTAINERD_NAMESPACE.to_string()
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            containerd_namespace: default_namespace(),
            candidates: default_candidates(),
        }
    }
}

impl DetectionConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [dir.join(CONFIG_FILENAME), dir.join(CONFIG_FILENAME_ALT)];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Load a config file from `dir`, or fall back to the built-in defaults.
    pub fn discover_or_default(dir: &Path) -> Result<Self> {
        match Self::discover(dir) {
            Err(Error::ConfigNotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        if self.containerd_namespace.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "containerd_namespace cannot be empty".to_string(),
            ));
        }
        if let Some(candidate) = self
            .candidates
            .iter()
            .find(|c| c.endpoint.trim().is_empty())
        {
            return Err(Error::InvalidConfig(format!(
                "candidate endpoint for {} cannot be empty",
                candidate.runtime
            )));
        }
        Ok(())
    }

    pub fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            timeout: self.timeout,
            containerd_namespace: self.containerd_namespace.clone(),
        }
    }
}
