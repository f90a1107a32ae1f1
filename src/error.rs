use std::fmt;

use thiserror::Error;

use crate::kmp::Phase;

/// The state machine that rejected a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    LpsBuilder,
    PatternMatcher,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::LpsBuilder => f.write_str("LPS builder"),
            Component::PatternMatcher => f.write_str("pattern matcher"),
        }
    }
}

/// Why a step was refused.
///
/// Every variant is a contract violation by the caller. None of them are
/// transient; recover by resetting the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// `advance()` was called on a machine that has already finished, or
    /// search was requested before the failure function was complete.
    #[error("{component} cannot advance while {phase}")]
    InvalidState { component: Component, phase: Phase },

    /// A matcher was seeded with a failure function that does not fit the pattern.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
