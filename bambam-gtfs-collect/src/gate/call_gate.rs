use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{GateConfig, GateError, GateOutcome, GateState};
use crate::util::time_source::SystemTimeSource;

/// function wrapper preventing quick series of failed executions.
///
/// after `failure_threshold` consecutive failures the gate opens for the configured
/// cooldown and rejects calls without running them. the first call at or after the
/// end of the cooldown runs directly. the failure count is only reset by a success,
/// so a single failure on that first call opens the gate again.
pub struct CallGate {
    state: GateState,
    time_source: Arc<dyn SystemTimeSource>,
}

impl CallGate {
    pub fn new(
        config: &GateConfig,
        time_source: Arc<dyn SystemTimeSource>,
    ) -> Result<Self, GateError> {
        config.validate()?;
        let state = GateState::new(config.failure_threshold, config.cooldown()?);
        Ok(Self { state, time_source })
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// call `operation` if the gate policy allows it.
    pub fn invoke<T, E, F>(&mut self, operation: F) -> GateOutcome<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let now = self.time_source.now();
        if let Some(blocked_until) = self.state.blocked_until {
            if now < blocked_until {
                return GateOutcome::Rejected {
                    retry_at: blocked_until,
                };
            }
            self.state.blocked_until = None;
        }

        match operation() {
            Ok(value) => {
                self.state.consecutive_failures = 0;
                self.state.blocked_until = None;
                GateOutcome::Succeeded(value)
            }
            Err(error) => {
                let retry_at = self.record_failure();
                GateOutcome::Failed { error, retry_at }
            }
        }
    }

    fn record_failure(&mut self) -> DateTime<Utc> {
        let now = self.time_source.now();
        self.state.consecutive_failures = self.state.consecutive_failures.saturating_add(1);
        if self.state.consecutive_failures >= self.state.failure_threshold {
            let blocked_until = now
                .checked_add_signed(self.state.cooldown)
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            log::warn!(
                "{} consecutive failures, gate open until {}",
                self.state.consecutive_failures,
                blocked_until.to_rfc3339()
            );
            self.state.blocked_until = Some(blocked_until);
            blocked_until
        } else {
            now
        }
    }
}

#[cfg(test)]
mod test {
    use super::CallGate;
    use crate::gate::{GateConfig, GateOutcome};
    use crate::util::time_source::{FakeSystemTimeSource, SystemTimeSource};
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use std::cell::Cell;
    use std::sync::Arc;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, 1, 12, 21, 25).unwrap()
    }

    fn gate(threshold: u32, cooldown_seconds: f64) -> (CallGate, Arc<FakeSystemTimeSource>) {
        let clock = Arc::new(FakeSystemTimeSource::new_set(t0()));
        let gate = CallGate::new(&GateConfig::new(threshold, cooldown_seconds), clock.clone())
            .expect("valid gate config");
        (gate, clock)
    }

    fn fail() -> Result<u32, String> {
        Err(String::from("boom"))
    }

    fn assert_well_formed<T, E>(outcome: &GateOutcome<T, E>) {
        assert_ne!(outcome.value().is_some(), outcome.retry_at().is_some());
        assert_eq!(outcome.succeeded(), outcome.value().is_some());
    }

    #[test]
    fn test_success_passes_value_through() {
        let (mut gate, _) = gate(3, 10.0);
        let outcome = gate.invoke(|| Ok::<_, String>(42));
        assert_well_formed(&outcome);
        assert_eq!(outcome, GateOutcome::Succeeded(42));
        assert_eq!(gate.state().consecutive_failures, 0);
    }

    #[test]
    fn test_failure_below_threshold_allows_immediate_retry() {
        let (mut gate, clock) = gate(3, 10.0);
        let outcome = gate.invoke(fail);
        assert_well_formed(&outcome);
        assert_eq!(outcome.retry_at(), Some(clock.now()));
        assert_eq!(gate.state().consecutive_failures, 1);
        assert!(gate.state().blocked_until.is_none());
    }

    #[test]
    fn test_threshold_opens_gate_for_cooldown() {
        let (mut gate, clock) = gate(3, 120.0);
        for _ in 0..2 {
            assert_eq!(gate.invoke(fail).retry_at(), Some(t0()));
        }
        let outcome = gate.invoke(fail);
        assert_well_formed(&outcome);
        assert_eq!(outcome.retry_at(), Some(t0() + TimeDelta::seconds(120)));
        assert!(gate.state().is_open(clock.now()));
    }

    #[test]
    fn test_open_gate_does_not_run_operation() {
        let (mut gate, clock) = gate(1, 60.0);
        gate.invoke(fail);
        let calls = Cell::new(0);
        clock.advance(TimeDelta::seconds(59));
        let outcome = gate.invoke(|| {
            calls.set(calls.get() + 1);
            Ok::<_, String>(1)
        });
        assert_well_formed(&outcome);
        assert_eq!(calls.get(), 0);
        assert_eq!(
            outcome,
            GateOutcome::Rejected {
                retry_at: t0() + TimeDelta::seconds(60)
            }
        );
    }

    #[test]
    fn test_call_after_cooldown_runs_and_resets_on_success() {
        let (mut gate, clock) = gate(2, 60.0);
        gate.invoke(fail);
        gate.invoke(fail);
        clock.advance(TimeDelta::seconds(60));
        let outcome = gate.invoke(|| Ok::<_, String>(7));
        assert_eq!(outcome, GateOutcome::Succeeded(7));
        assert_eq!(gate.state().consecutive_failures, 0);
        assert!(gate.state().blocked_until.is_none());
    }

    #[test]
    fn test_failure_after_cooldown_reopens_gate() {
        let (mut gate, clock) = gate(2, 60.0);
        gate.invoke(fail);
        gate.invoke(fail);
        clock.advance(TimeDelta::seconds(61));
        let outcome = gate.invoke(fail);
        assert_eq!(
            outcome.retry_at(),
            Some(clock.now() + TimeDelta::seconds(60))
        );
    }

    #[test]
    fn test_success_resets_failure_count() {
        let (mut gate, _) = gate(2, 60.0);
        gate.invoke(fail);
        gate.invoke(|| Ok::<_, String>(0));
        let outcome = gate.invoke(fail);
        assert_eq!(outcome.retry_at(), Some(t0()));
        assert!(gate.state().blocked_until.is_none());
    }

    #[test]
    fn test_cooldown_past_last_date_saturates() {
        let (mut gate, clock) = gate(1, 9.0e12);
        let outcome = gate.invoke(fail);
        assert_eq!(outcome.retry_at(), Some(DateTime::<Utc>::MAX_UTC));
        assert!(gate.state().is_open(clock.now()));
    }

    #[test]
    fn test_failed_outcome_carries_error() {
        let (mut gate, _) = gate(1, 1.0);
        match gate.invoke(fail) {
            GateOutcome::Failed { error, .. } => assert_eq!(error, "boom"),
            other => panic!("expected Failed, found {other:?}"),
        }
    }
}
