// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use rtprobe::output::OutputMode;
use rtprobe::runtime::{Candidate, RuntimeKind};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "rtprobe")]
#[command(about = "Detect the active container runtime (Docker or containerd) on this host")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit JSON lines instead of human-readable output
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub json: bool,

    /// Print bare values only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}

/// Overrides applied on top of the loaded configuration.
#[derive(Args)]
pub struct ProbeOverrides {
    /// Bound for each connection attempt and container listing (e.g. 500ms, 5s)
    #[arg(long, value_parser = humantime_serde::re::humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// containerd namespace to list containers in
    #[arg(long)]
    pub namespace: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe candidate endpoints in order and report the first active runtime
    Detect {
        /// Configuration file (defaults to ./rtprobe.yml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Candidate as ENDPOINT=RUNTIME; repeat to build an ordered table
        #[arg(short, long = "endpoint", value_name = "ENDPOINT=RUNTIME")]
        endpoints: Vec<Candidate>,

        #[command(flatten)]
        overrides: ProbeOverrides,
    },

    /// Probe a single endpoint
    Probe {
        /// Endpoint URI, e.g. unix:///var/run/docker.sock
        endpoint: String,

        /// Runtime expected behind the endpoint (docker or containerd)
        #[arg(short, long)]
        runtime: RuntimeKind,

        #[command(flatten)]
        overrides: ProbeOverrides,
    },

    /// Show how an endpoint is parsed and whether it can be dialed
    Parse {
        /// Endpoint URI or bare socket path
        endpoint: String,
    },

    /// Initialize a new rtprobe.yml configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
