use chrono::{DateTime, TimeDelta, Utc};

/// mutable bookkeeping of a single [`super::CallGate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateState {
    pub consecutive_failures: u32,
    pub failure_threshold: u32,
    pub cooldown: TimeDelta,
    pub blocked_until: Option<DateTime<Utc>>,
}

impl GateState {
    pub fn new(failure_threshold: u32, cooldown: TimeDelta) -> Self {
        Self {
            consecutive_failures: 0,
            failure_threshold,
            cooldown,
            blocked_until: None,
        }
    }

    /// true while `blocked_until` lies in the future.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.blocked_until.is_some_and(|t| now < t)
    }
}
