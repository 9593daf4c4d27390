//! Submission bookkeeping.
//!
//! A submission is tagged with the tab it was sent from when it starts
//! ([`Session::begin_submission`](crate::Session::begin_submission)). The
//! response may arrive after the user switched tabs, so completion takes the
//! ticket back and an [`AttributionPolicy`](crate::AttributionPolicy) decides
//! which tab receives the verdict.

use serde::{Deserialize, Serialize};

use crate::buffer::{BorderState, TabId};

/// Shown in the output panel while a request is in flight.
pub const PENDING_MESSAGE: &str = "Compiling and simulating...";

/// Shown in the output panel when the request itself failed.
pub const FAILURE_MESSAGE: &str = "Error occurred while compiling.";

/// Outcome of a compile/simulate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Success,
    Failure,
}

impl Verdict {
    /// Classifies backend output: any mention of "error", in any case, fails.
    pub fn from_output(output: &str) -> Self {
        if output.to_lowercase().contains("error") {
            Verdict::Failure
        } else {
            Verdict::Success
        }
    }

    pub fn border_state(self) -> BorderState {
        match self {
            Verdict::Success => BorderState::Success,
            Verdict::Failure => BorderState::Failure,
        }
    }
}

/// Handle for one in-flight submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket {
    /// Tab the code was taken from
    pub origin: TabId,
    /// Per-session submission counter
    pub serial: u64,
}

/// The request failed before producing backend output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SubmissionFailure {
    pub message: String,
}

impl SubmissionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Backend output, or why there is none.
pub type SubmissionResult = Result<String, SubmissionFailure>;

/// What applying a result did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Tab that received the verdict; `None` if no tab could take it
    pub target: Option<TabId>,
    pub verdict: Verdict,
    /// Text for the output panel
    pub display: String,
}

impl Completion {
    pub(crate) fn from_result(target: Option<TabId>, result: &SubmissionResult) -> Self {
        match result {
            Ok(output) => Self {
                target,
                verdict: Verdict::from_output(output),
                display: output.clone(),
            },
            Err(_) => Self {
                target,
                verdict: Verdict::Failure,
                display: FAILURE_MESSAGE.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_from_output() {
        assert_eq!(Verdict::from_output("Simulation complete"), Verdict::Success);
        assert_eq!(Verdict::from_output("Error: unexpected token"), Verdict::Failure);
        assert_eq!(Verdict::from_output("input.v:3: syntax ERROR"), Verdict::Failure);
        assert_eq!(Verdict::from_output(""), Verdict::Success);
    }

    #[test]
    fn test_completion_on_transport_failure() {
        let origin = TabId::from_sequence(1);
        let result: SubmissionResult = Err(SubmissionFailure::new("connection refused"));
        let completion = Completion::from_result(Some(origin), &result);
        assert_eq!(completion.verdict, Verdict::Failure);
        assert_eq!(completion.display, FAILURE_MESSAGE);
    }
}
