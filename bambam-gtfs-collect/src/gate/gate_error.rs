#[derive(thiserror::Error, Debug)]
pub enum GateError {
    #[error("gate failure threshold must be at least 1, found {0}")]
    InvalidThreshold(u32),
    #[error("gate cooldown must be a finite, non-negative number of seconds, found {0}")]
    InvalidCooldown(f64),
    #[error("gate max_attempts must be at least 1 when provided")]
    InvalidMaxAttempts,
}
