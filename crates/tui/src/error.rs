use advisor::AdvisorError;
use engine::EngineError;
use sea_orm::DbErr;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("store error: {0}")]
    Store(#[from] EngineError),
    #[error("chat error: {0}")]
    Service(#[from] AdvisorError),
    #[error("{0}")]
    Validation(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("terminal error: {0}")]
    Terminal(String),
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        Self::Store(EngineError::Database(err))
    }
}

/// Shorthand for configuration problems found after deserialization.
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::Config(config::ConfigError::Message(message.into()))
}
