use thiserror::Error;

/// Failures raised while reading tariff data
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Tariff query failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Tariff record not found: {0}")]
    NotFound(String),

    // Stored row that cannot be mapped onto the tariff model
    #[error("Invalid tariff data: {0}")]
    InvalidData(String),
}

impl DatabaseError {
    /// Check if this error is transient and the request may succeed later
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ConnectionError(_) => true,
            Self::QueryError(e) => matches!(
                e,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
