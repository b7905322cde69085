use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::converter::ConversionError;
use crate::generator::GeneratorError;
use crate::storage::StorageError;
use crate::ErrorResponse;

/// Error returned by every handler; rendered as an [`ErrorResponse`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error("PDF conversion failed: {0}")]
    Conversion(#[from] ConversionError),
    #[error("background task failed: {0}")]
    Blocking(#[from] BlockingError),
}

impl AppError {
    /// Value of the `error` field in the response body.
    pub fn kind(&self) -> &'static str {
        if matches!(self, AppError::Conversion(_)) {
            return "ConversionFailed";
        }
        let status = self.status_code();
        if status == StatusCode::BAD_REQUEST {
            "BadRequest"
        } else if status == StatusCode::NOT_FOUND {
            "NotFound"
        } else if status == StatusCode::UNPROCESSABLE_ENTITY {
            "UnprocessableEntity"
        } else {
            "InternalServerError"
        }
    }
}

fn storage_status(err: &StorageError) -> StatusCode {
    match err {
        StorageError::InvalidName(_) => StatusCode::BAD_REQUEST,
        StorageError::NotFound(_) => StatusCode::NOT_FOUND,
        StorageError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Storage(e) => storage_status(e),
            AppError::Generator(e) => match e {
                GeneratorError::TemplateNotFound(_) => StatusCode::NOT_FOUND,
                GeneratorError::UnknownPlaceholder(_)
                | GeneratorError::Archive(_)
                | GeneratorError::NotUtf8(_)
                | GeneratorError::MissingPart(_) => StatusCode::UNPROCESSABLE_ENTITY,
                GeneratorError::Storage(e) => storage_status(e),
                GeneratorError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Conversion(_) | AppError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(status).json(ErrorResponse::new(self.kind(), &self.to_string()))
    }
}
