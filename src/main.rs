// ABOUTME: Entry point for the rtprobe CLI application.
// ABOUTME: Parses arguments, sets up logging and dispatches to command handlers.

mod cli;

use clap::Parser;
use cli::{Cli, Commands, ProbeOverrides};
use rtprobe::config::{self, DetectionConfig};
use rtprobe::endpoint::{self, Protocol};
use rtprobe::error::{Error, Result};
use rtprobe::output::Output;
use rtprobe::runtime::{self, Candidate, Probe, RuntimeKind};
use std::env;
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    rtprobe::logging::init(cli.verbose);

    let mut output = Output::new(cli.output_mode());
    let result = run(cli, &mut output).await;

    if let Err(e) = result {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &mut Output) -> Result<()> {
    match cli.command {
        Commands::Detect {
            config,
            endpoints,
            overrides,
        } => {
            let config = load_config(config, endpoints, &overrides)?;
            detect(&config, output).await
        }
        Commands::Probe {
            endpoint,
            runtime,
            overrides,
        } => {
            let config = apply_overrides(DetectionConfig::default(), &overrides)?;
            probe(&config, &endpoint, runtime, output).await
        }
        Commands::Parse { endpoint } => parse(&endpoint, output),
        Commands::Init { force } => {
            let path = config::init_config(&current_dir()?, force)?;
            output.progress(&format!("Wrote {}", path.display()));
            Ok(())
        }
    }
}

fn current_dir() -> Result<PathBuf> {
    env::current_dir().map_err(Error::from)
}

/// Explicit file, else ./rtprobe.yml, else defaults; then CLI overrides.
fn load_config(
    path: Option<PathBuf>,
    endpoints: Vec<Candidate>,
    overrides: &ProbeOverrides,
) -> Result<DetectionConfig> {
    let mut config = match path {
        Some(path) => DetectionConfig::load(&path)?,
        None => DetectionConfig::discover_or_default(&current_dir()?)?,
    };
    if !endpoints.is_empty() {
        config.candidates = endpoints;
    }
    apply_overrides(config, overrides)
}

fn apply_overrides(
    mut config: DetectionConfig,
    overrides: &ProbeOverrides,
) -> Result<DetectionConfig> {
    if let Some(timeout) = overrides.timeout {
        config.timeout = timeout;
    }
    if let Some(ref namespace) = overrides.namespace {
        config.containerd_namespace = namespace.clone();
    }
    config.validate()?;
    Ok(config)
}

async fn detect(config: &DetectionConfig, output: &mut Output) -> Result<()> {
    output.progress(&format!(
        "Probing {} candidate endpoint(s)...",
        config.candidates.len()
    ));
    output.start_timer();

    let detection = runtime::auto_detect(config).await?;

    output.detection(&detection);
    Ok(())
}

async fn probe(
    config: &DetectionConfig,
    endpoint: &str,
    runtime: RuntimeKind,
    output: &Output,
) -> Result<()> {
    let probe = Probe::new(&config.probe_settings());
    let status = probe.probe(endpoint, runtime).await?;
    output.probe(endpoint, runtime, &status);
    Ok(())
}

fn parse(endpoint: &str, output: &Output) -> Result<()> {
    let parsed = endpoint::parse_with_fallback(endpoint, Protocol::Unix)
        .map_err(endpoint::ResolveError::from)?;
    let dialable = parsed.protocol == Protocol::Unix;
    output.endpoint(endpoint, &parsed, dialable);
    Ok(())
}
