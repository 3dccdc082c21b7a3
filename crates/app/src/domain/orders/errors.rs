//! Order ledger errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrdersLedgerError {
    #[error("order is missing required data")]
    MissingRequiredData,

    #[error("order data is invalid")]
    InvalidData,

    #[error("order storage error")]
    Persistence(#[source] Error),
}

impl From<Error> for OrdersLedgerError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Persistence(error),
        }
    }
}
