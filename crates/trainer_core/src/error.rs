use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrainerError {
    #[error("no device type registered under '{0}'")]
    UnknownDevice(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
