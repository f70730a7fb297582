use chrono::{DateTime, Utc};

/// result of a [`super::CallGate`]-managed call. a value is present exactly when the
/// call succeeded, a retry time exactly when it did not.
#[derive(Debug, PartialEq)]
pub enum GateOutcome<T, E> {
    /// the operation ran and returned a value
    Succeeded(T),
    /// the operation ran and failed. the next call is allowed at `retry_at`.
    Failed { error: E, retry_at: DateTime<Utc> },
    /// the gate is open, so the operation was not run
    Rejected { retry_at: DateTime<Utc> },
}

impl<T, E> GateOutcome<T, E> {
    pub fn succeeded(&self) -> bool {
        matches!(self, GateOutcome::Succeeded(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            GateOutcome::Succeeded(value) => Some(value),
            GateOutcome::Failed { .. } | GateOutcome::Rejected { .. } => None,
        }
    }

    pub fn retry_at(&self) -> Option<DateTime<Utc>> {
        match self {
            GateOutcome::Succeeded(_) => None,
            GateOutcome::Failed { retry_at, .. } | GateOutcome::Rejected { retry_at } => {
                Some(*retry_at)
            }
        }
    }
}
