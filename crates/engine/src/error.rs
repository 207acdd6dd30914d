//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`MissingDatabase`] thrown when a [`Store`] is built without a connection.
//! - [`InvalidDate`] thrown when a stored `entry_date` is not `YYYY-MM-DD`.
//! - [`InvalidAmount`] thrown when a stored `entered_amount` is not finite.
//! - [`Database`] wraps any failure coming from the relational store.
//!
//!  [`MissingDatabase`]: EngineError::MissingDatabase
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`Database`]: EngineError::Database
//!  [`Store`]: super::Store
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Store built without a database connection")]
    MissingDatabase,
    #[error("Invalid date \"{value}\" for entry \"{code_scale}\"")]
    InvalidDate { code_scale: String, value: String },
    #[error("Invalid amount for entry \"{0}\"")]
    InvalidAmount(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MissingDatabase, Self::MissingDatabase) => true,
            (
                Self::InvalidDate {
                    code_scale: a,
                    value: va,
                },
                Self::InvalidDate {
                    code_scale: b,
                    value: vb,
                },
            ) => a == b && va == vb,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
