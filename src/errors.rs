use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::cart::MAX_LINE_AMOUNT;
use crate::domain::errors::{DomainError, FieldError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Missing or invalid user identity")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error body returned for every non-2xx response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(fields) => AppError::Validation(fields),
            DomainError::InvalidAmount(_) => AppError::Validation(vec![FieldError::new(
                "amount",
                format!("must be between 1 and {MAX_LINE_AMOUNT} in total per line"),
            )]),
            DomainError::UnknownUser => AppError::Unauthorized,
            DomainError::NotFound(_) => AppError::NotFound(e.to_string()),
            DomainError::EmptyCart | DomainError::ConcurrencyConflict => {
                AppError::Conflict(e.to_string())
            }
            DomainError::InvalidCartState(_) => AppError::Unprocessable(e.to_string()),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(fields) => ErrorBody {
                error: self.to_string(),
                fields: fields.clone(),
            },
            AppError::Internal(detail) => {
                log::error!("Request failed: {}", detail);
                ErrorBody {
                    error: "Internal server error".to_string(),
                    fields: vec![],
                }
            }
            _ => ErrorBody {
                error: self.to_string(),
                fields: vec![],
            },
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
