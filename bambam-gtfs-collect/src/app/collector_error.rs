use crate::{collection::CollectionError, gate::GateError};

#[derive(thiserror::Error, Debug)]
pub enum CollectorError {
    #[error("failure reading collector configuration: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error("invalid gate configuration: {0}")]
    GateError(#[from] GateError),
    #[error(transparent)]
    CollectionError(#[from] CollectionError),
    #[error("{0}")]
    InvalidUserInput(String),
}
