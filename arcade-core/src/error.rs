use thiserror::Error;

pub type Result<T> = std::result::Result<T, ArcadeError>;

#[derive(Error, Debug)]
pub enum ArcadeError {
    #[error("Account error: {0}")]
    Account(String),

    #[error("Account not found: {name}")]
    AccountNotFound { name: String },

    #[error("Account '{name}' already exists")]
    AccountExists { name: String },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Claim failed: {0}")]
    Claim(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ArcadeError {
    pub fn account(msg: impl Into<String>) -> Self {
        Self::Account(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn claim(msg: impl Into<String>) -> Self {
        Self::Claim(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
