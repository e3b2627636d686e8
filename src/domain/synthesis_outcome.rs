use std::fmt;

use super::Completion;

pub const PRO_MODE: &str = "pro";
pub const FALLBACK_MODE: &str = "basic (fallback)";

/// Result of a pro-mode request. A degraded outcome carries the answer of
/// the single basic call that replaced the synthesis.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisOutcome {
    Success {
        completion: Completion,
        perspectives_analyzed: usize,
    },
    Degraded {
        reason: DegradeReason,
        completion: Completion,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradeReason {
    /// Every perspective call failed.
    PerspectivesExhausted,
    /// Perspectives answered but the merge call failed.
    SynthesisFailed(String),
}

impl SynthesisOutcome {
    pub fn mode(&self) -> &'static str {
        match self {
            SynthesisOutcome::Success { .. } => PRO_MODE,
            SynthesisOutcome::Degraded { .. } => FALLBACK_MODE,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SynthesisOutcome::Degraded { .. })
    }

    /// Flattens the outcome into a completion tagged with its mode.
    pub fn into_completion(self) -> Completion {
        match self {
            SynthesisOutcome::Success {
                completion,
                perspectives_analyzed,
            } => Completion {
                mode: Some(PRO_MODE.to_string()),
                perspectives_analyzed: Some(perspectives_analyzed),
                ..completion
            },
            SynthesisOutcome::Degraded { completion, .. } => completion.with_mode(FALLBACK_MODE),
        }
    }
}

impl fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradeReason::PerspectivesExhausted => write!(f, "all perspective queries failed"),
            DegradeReason::SynthesisFailed(cause) => write!(f, "synthesis query failed: {cause}"),
        }
    }
}
