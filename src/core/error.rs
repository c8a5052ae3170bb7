//! Error types for BSM Options

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BsmError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Strategy has no legs")]
    EmptyStrategy,

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Legs reference different underlyings: {first} and {other}")]
    MixedUnderlying { first: String, other: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type BsmResult<T> = Result<T, BsmError>;

impl BsmError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Self::InvalidRange(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

impl From<serde_json::Error> for BsmError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for BsmError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
