use crate::locator::Condition;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Timed out after {timeout_ms} ms waiting for {locator} to be {condition}")]
    Timeout {
        locator: String,
        condition: Condition,
        timeout_ms: u128,
    },

    #[error("No element matches {0}")]
    ElementNotFound(String),

    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("Driver error: {0}")]
    Driver(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),
}

pub type Result<T> = std::result::Result<T, Error>;
