use serde::{Deserialize, Serialize};

use crate::domain::form::FormFields;

/// Result of posting the contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionOutcome {
    /// The endpoint answered with this HTTP status
    Responded(u16),
    /// No response was obtained
    Failed(String),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Responded(status) if (200..300).contains(status))
    }
}

/// Contact form messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormMsg {
    /// Submission attempt with the field values at the time of the attempt
    Submit(FormFields),
    SubmissionFinished(SubmissionOutcome),
}
