use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required env keys: {}", .0.join(", "))]
    MissingEnv(Vec<String>),

    #[error("Basis points must be between 0 and 10000, got {0}")]
    InvalidBps(i64),

    #[error("Amount must be non-negative")]
    NegativeAmount,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}
