// ABOUTME: Config scaffolding for new hosts.
// ABOUTME: Creates rtprobe.yml template files listing the default candidates.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::{CONFIG_FILENAME, DetectionConfig};

/// Write a template config into `dir`, returning its path.
pub fn init_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let yaml = generate_template_yaml(&DetectionConfig::default());
    std::fs::write(&config_path, yaml)?;

    Ok(config_path)
}

fn generate_template_yaml(config: &DetectionConfig) -> String {
    let mut yaml = format!(
        r#"# Bound for each connection attempt and each container listing.
timeout: {}
# Namespace used when listing containerd containers.
containerd_namespace: {}
# Tried top to bottom; the first runtime reporting containers wins.
candidates:
"#,
        humantime_serde::re::humantime::format_duration(config.timeout),
        config.containerd_namespace,
    );
    for candidate in &config.candidates {
        let _ = write!(
            yaml,
            "  - endpoint: {}\n    runtime: {}\n",
            candidate.endpoint, candidate.runtime
        );
    }
    yaml
}
