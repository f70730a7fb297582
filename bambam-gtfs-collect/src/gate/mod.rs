//! call gating policy (circuit breaker) protecting the downloader from hammering an
//! unreachable source.
mod call_gate;
mod gate_config;
mod gate_error;
mod gate_outcome;
mod gate_state;

pub use call_gate::CallGate;
pub use gate_config::GateConfig;
pub use gate_error::GateError;
pub use gate_outcome::GateOutcome;
pub use gate_state::GateState;
