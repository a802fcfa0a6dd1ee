use thiserror::Error;

/// Errors a domain service may surface across the contract boundary.
///
/// `Conflict` carries a user-facing uniqueness message ("... already
/// exists"); `Backend` is anything unexpected and maps to 500 at the REST
/// layer.
#[derive(Error, Debug, Clone)]
pub enum ServiceError {
    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    Backend { message: String },
}

impl ServiceError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
