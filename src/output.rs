// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (scripts), and JSON output modes.

use crate::endpoint::ParsedEndpoint;
use crate::runtime::{Detection, ProbeStatus, RuntimeKind};
use serde::Serialize;
use std::time::Instant;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Bare values only, for shell scripts
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration_secs(&self) -> Option<f64> {
        self.start_time.map(|_| self.elapsed_secs())
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Report the outcome of a detection pass.
    pub fn detection(&self, detection: &Detection) {
        match self.mode {
            OutputMode::Normal => {
                println!(
                    "Detected {} at {} ({} containers) ({:.1}s)",
                    detection.runtime,
                    detection.endpoint,
                    detection.containers,
                    self.elapsed_secs()
                );
            }
            OutputMode::Quiet => {
                println!("{} {}", detection.runtime, detection.endpoint);
            }
            OutputMode::Json => self.json("detected", detection),
        }
    }

    /// Report the status of a single probed endpoint.
    pub fn probe(&self, endpoint: &str, runtime: RuntimeKind, status: &ProbeStatus) {
        let (state, containers) = match *status {
            ProbeStatus::Running { containers } => ("running", containers),
            ProbeStatus::Idle => ("idle", 0),
        };
        match self.mode {
            OutputMode::Normal => {
                if status.is_running() {
                    println!("{runtime} at {endpoint}: running ({containers} containers)");
                } else {
                    println!("{runtime} at {endpoint}: idle (no containers)");
                }
            }
            OutputMode::Quiet => println!("{state}"),
            OutputMode::Json => self.json(
                "probed",
                &ProbeEvent {
                    endpoint,
                    runtime,
                    state,
                    containers,
                },
            ),
        }
    }

    /// Report how an endpoint parses and whether it can be dialed.
    pub fn endpoint(&self, endpoint: &str, parsed: &ParsedEndpoint, dialable: bool) {
        let protocol = parsed.protocol.scheme();
        match self.mode {
            OutputMode::Normal => {
                println!("endpoint: {endpoint}");
                println!("protocol: {protocol}");
                println!("address:  {}", parsed.address);
                println!("dialable: {}", if dialable { "yes" } else { "no" });
            }
            OutputMode::Quiet => println!("{protocol} {}", parsed.address),
            OutputMode::Json => self.json(
                "parsed",
                &EndpointEvent {
                    endpoint,
                    protocol,
                    address: &parsed.address,
                    dialable,
                },
            ),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                if let Some(json) = self.encode("error", &MessageEvent { message }) {
                    eprintln!("{json}");
                }
            }
        }
    }

    fn json<T: Serialize>(&self, event: &str, payload: &T) {
        if let Some(json) = self.encode(event, payload) {
            println!("{json}");
        }
    }

    fn encode<T: Serialize>(&self, event: &str, payload: &T) -> Option<String> {
        let event = JsonEvent {
            event,
            payload,
            duration_secs: self.duration_secs(),
        };
        serde_json::to_string(&event).ok()
    }
}

#[derive(Serialize)]
struct JsonEvent<'a, T: Serialize> {
    event: &'a str,
    #[serde(flatten)]
    payload: &'a T,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

#[derive(Serialize)]
struct MessageEvent<'a> {
    message: &'a str,
}

#[derive(Serialize)]
struct ProbeEvent<'a> {
    endpoint: &'a str,
    runtime: RuntimeKind,
    state: &'a str,
    containers: usize,
}

#[derive(Serialize)]
struct EndpointEvent<'a> {
    endpoint: &'a str,
    protocol: &'a str,
    address: &'a str,
    dialable: bool,
}
