use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, TimeDelta, Utc};

/// Abstracts the system time source so that retry waits and ISO-week bucketing
/// can be driven by a fake clock in tests.
pub trait SystemTimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// blocks the calling thread for `duration`. negative durations return immediately.
    fn sleep(&self, duration: TimeDelta);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSourceDefault;

impl SystemTimeSource for SystemTimeSourceDefault {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep(&self, duration: TimeDelta) {
        if let Ok(std_duration) = duration.to_std() {
            std::thread::sleep(std_duration);
        }
    }
}

#[derive(Debug)]
struct FakeTimeState {
    t: DateTime<Utc>,
    sleeps: Vec<TimeDelta>,
}

/// manually-driven time source. `sleep` does not block: it records the requested
/// duration and advances the clock by it.
#[derive(Debug, Clone)]
pub struct FakeSystemTimeSource {
    state: Arc<Mutex<FakeTimeState>>,
}

impl FakeSystemTimeSource {
    pub fn new_set(t: DateTime<Utc>) -> Self {
        let state = FakeTimeState { t, sleeps: vec![] };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn advance(&self, time_quantum: TimeDelta) {
        let mut state = self.lock();
        state.t += time_quantum;
    }

    /// every duration passed to `sleep` so far, in call order.
    pub fn sleeps(&self) -> Vec<TimeDelta> {
        self.lock().sleeps.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FakeTimeState> {
        // a poisoned lock only means another test thread panicked mid-update
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SystemTimeSource for FakeSystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.lock().t
    }

    fn sleep(&self, duration: TimeDelta) {
        let mut state = self.lock();
        state.sleeps.push(duration);
        if duration > TimeDelta::zero() {
            state.t += duration;
        }
    }
}
