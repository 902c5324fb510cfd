// ABOUTME: Runtime detection over an ordered candidate table.
// ABOUTME: Probes candidates in order and returns the first with containers.

use super::probe::{Probe, ProbeSettings, ProbeStatus};
use super::types::{Candidate, Detection};
use crate::config::DetectionConfig;
use crate::diagnostics::{Attempt, AttemptOutcome, Diagnostics};

/// Error during runtime detection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectionError {
    #[error("no candidate endpoints configured")]
    NoCandidates,

    #[error("could not detect container runtime (tried {attempted} endpoint(s))")]
    RuntimeNotDetected { attempted: usize },
}

/// Walks a candidate table with a [`Probe`].
pub struct Detector {
    probe: Probe,
}

impl Detector {
    pub fn new(probe: Probe) -> Self {
        Self { probe }
    }

    pub fn from_settings(settings: &ProbeSettings) -> Self {
        Self::new(Probe::new(settings))
    }

    /// Detect the active runtime.
    ///
    /// Candidates are tried in slice order, one at a time. The first whose
    /// runtime reports containers wins. Unusable and idle candidates are
    /// logged and skipped.
    pub async fn detect(&self, candidates: &[Candidate]) -> Result<Detection, DetectionError> {
        let mut diagnostics = Diagnostics::default();
        self.detect_with_diagnostics(candidates, &mut diagnostics)
            .await
    }

    /// Same as [`Detector::detect`], recording every attempt in `diagnostics`.
    pub async fn detect_with_diagnostics(
        &self,
        candidates: &[Candidate],
        diagnostics: &mut Diagnostics,
    ) -> Result<Detection, DetectionError> {
        if candidates.is_empty() {
            return Err(DetectionError::NoCandidates);
        }

        for candidate in candidates {
            tracing::info!(
                "trying to connect to endpoint '{}' with timeout '{:?}'",
                candidate.endpoint,
                self.probe.timeout()
            );

            let outcome = match self
                .probe
                .probe(&candidate.endpoint, candidate.runtime)
                .await
            {
                Ok(ProbeStatus::Running { containers }) => AttemptOutcome::Running { containers },
                Ok(ProbeStatus::Idle) => AttemptOutcome::Idle,
                Err(e) => AttemptOutcome::Unusable {
                    kind: e.kind(),
                    message: e.to_string(),
                },
            };

            diagnostics.record(Attempt {
                candidate: candidate.clone(),
                outcome: outcome.clone(),
            });

            if let AttemptOutcome::Running { containers } = outcome {
                tracing::info!("container runtime detected: {}", candidate.runtime);
                return Ok(Detection {
                    runtime: candidate.runtime,
                    endpoint: candidate.endpoint.clone(),
                    containers,
                });
            }
        }

        Err(DetectionError::RuntimeNotDetected {
            attempted: candidates.len(),
        })
    }
}

/// Detect the container runtime using the configured candidate table.
pub async fn auto_detect(config: &DetectionConfig) -> Result<Detection, DetectionError> {
    Detector::from_settings(&config.probe_settings())
        .detect(&config.candidates)
        .await
}
