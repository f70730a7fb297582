use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use super::GateError;

pub const DEFAULT_FAILURE_THRESHOLD: u32 = 5;
pub const DEFAULT_COOLDOWN_SECONDS: f64 = 120.0;

/// configures a [`super::CallGate`] and the retry loop around it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GateConfig {
    /// consecutive failures that open the gate
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
    /// how long an open gate rejects calls
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: f64,
    /// bound on gate invocations per category per collection cycle. when absent,
    /// a category is retried until it resolves.
    #[serde(default)]
    pub max_attempts: Option<u32>,
}

fn default_failure_threshold() -> u32 {
    DEFAULT_FAILURE_THRESHOLD
}

fn default_cooldown_seconds() -> f64 {
    DEFAULT_COOLDOWN_SECONDS
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            cooldown_seconds: DEFAULT_COOLDOWN_SECONDS,
            max_attempts: None,
        }
    }
}

impl GateConfig {
    pub fn new(failure_threshold: u32, cooldown_seconds: f64) -> Self {
        Self {
            failure_threshold,
            cooldown_seconds,
            max_attempts: None,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn validate(&self) -> Result<(), GateError> {
        if self.failure_threshold == 0 {
            return Err(GateError::InvalidThreshold(self.failure_threshold));
        }
        if self.max_attempts == Some(0) {
            return Err(GateError::InvalidMaxAttempts);
        }
        self.cooldown().map(|_| ())
    }

    /// the cooldown as a time delta, at microsecond resolution.
    pub fn cooldown(&self) -> Result<TimeDelta, GateError> {
        let secs = self.cooldown_seconds;
        let micros = (secs * 1_000_000.0).round();
        if !micros.is_finite() || micros < 0.0 || micros >= i64::MAX as f64 {
            return Err(GateError::InvalidCooldown(secs));
        }
        Ok(TimeDelta::microseconds(micros as i64))
    }
}
