// ABOUTME: Diagnostics accumulator for per-candidate probe attempts.
// ABOUTME: Records what each candidate did so callers can report skipped endpoints.

use crate::runtime::{Candidate, ProbeErrorKind};

/// Collects the outcome of every probe in a detection pass.
#[derive(Debug, Default)]
pub struct Diagnostics {
    attempts: Vec<Attempt>,
}

impl Diagnostics {
    /// Record an attempt, auto-logging it via tracing.
    pub fn record(&mut self, attempt: Attempt) {
        let endpoint = &attempt.candidate.endpoint;
        match &attempt.outcome {
            AttemptOutcome::Running { containers } => {
                tracing::info!(
                    containers,
                    "connected successfully using endpoint: {}",
                    endpoint
                );
            }
            AttemptOutcome::Idle => {
                tracing::warn!("no running containers found with endpoint {}", endpoint);
            }
            AttemptOutcome::Unusable { message, .. } => {
                tracing::warn!("{}", message);
            }
        }
        self.attempts.push(attempt);
    }

    /// Get all recorded attempts, in probe order.
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    /// Attempts whose endpoint could not be used at all.
    pub fn unusable(&self) -> impl Iterator<Item = &Attempt> {
        self.attempts
            .iter()
            .filter(|a| matches!(a.outcome, AttemptOutcome::Unusable { .. }))
    }

    /// Check if any candidate was skipped as unusable.
    pub fn has_unusable(&self) -> bool {
        self.unusable().next().is_some()
    }
}

/// One probed candidate and what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub candidate: Candidate,
    pub outcome: AttemptOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Running { containers: usize },
    /// Reachable with zero containers.
    Idle,
    Unusable {
        kind: ProbeErrorKind,
        message: String,
    },
}
