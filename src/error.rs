use async_graphql::ErrorExtensions;
use axum::http::StatusCode;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    DomainViolation(String),
    #[error("{0}")]
    AuthInvalid(String),
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Internal server error")]
    Internal,
    #[error("Internal server error: {0}")]
    InternalWithMsg(String),
}

impl AppError {
    fn is_unique_violation(&self) -> bool {
        match self {
            AppError::Database(e) => e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation()),
            _ => false,
        }
    }

    /// Stable machine-readable code exposed in the GraphQL error extensions.
    pub fn code(&self) -> &'static str {
        if self.is_unique_violation() {
            return "CONFLICT";
        }
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::DomainViolation(_) => "DOMAIN_VIOLATION",
            AppError::AuthInvalid(_) => "AUTH_INVALID",
            AppError::Unauthenticated => "UNAUTHENTICATED",
            AppError::Validation(_) => "BAD_USER_INPUT",
            AppError::Database(_) | AppError::Internal | AppError::InternalWithMsg(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        if self.is_unique_violation() {
            return StatusCode::CONFLICT;
        }
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::DomainViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::AuthInvalid(_) | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal | AppError::InternalWithMsg(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        let message = match self {
            AppError::Database(e) => {
                if self.is_unique_violation() {
                    "Resource already exists (duplicate entry)".to_string()
                } else {
                    error!("Database error: {:?}", e);
                    "Internal server error".to_string()
                }
            }
            AppError::InternalWithMsg(msg) => {
                error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let code = self.code();
        let status = self.status().as_u16() as i32;

        async_graphql::Error::new(message).extend_with(|_, ext| {
            ext.set("code", code);
            ext.set("status", status);
        })
    }
}
