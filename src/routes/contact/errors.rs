use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{HttpResponse, ResponseError};

use super::super::helpers::error_chain_fmt;
use super::types::{ErrorBody, ValidationErrorBody};
use crate::domain::FieldErrors;
use crate::email_client::MailerError;

/// Every non-success outcome of the contact endpoint. Each external-call
/// failure is converted to its variant at the call site; the response body
/// stays generic while the cause chain goes to the log.
#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("Method not allowed. Use POST.")]
    MethodNotAllowed,
    #[error("Invalid request body.")]
    MalformedInput(#[source] serde_json::Error),
    #[error("Validation failed")]
    ValidationFailed(FieldErrors),
    #[error("Server misconfigured")]
    ServerMisconfigured(#[source] MailerError),
    #[error("Failed to send email. Please try again later.")]
    TransportError(#[source] MailerError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ContactError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            ContactError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ContactError::ServerMisconfigured(_)
            | ContactError::TransportError(_)
            | ContactError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        match self {
            ContactError::MethodNotAllowed => HttpResponse::MethodNotAllowed()
                .insert_header((header::ALLOW, "POST"))
                .json(ErrorBody {
                    error: "Method not allowed. Use POST.".to_owned(),
                }),
            ContactError::MalformedInput(_) => HttpResponse::BadRequest().json(ErrorBody {
                error: "Invalid request body.".to_owned(),
            }),
            ContactError::ValidationFailed(details) => {
                HttpResponse::UnprocessableEntity().json(ValidationErrorBody {
                    error: "Validation failed".to_owned(),
                    details: details.clone(),
                })
            }
            ContactError::ServerMisconfigured(source) => {
                let error = match source {
                    MailerError::MissingCredentials => "Server misconfigured. Contact admin.",
                    _ => "Failed to initialize mailer.",
                };
                HttpResponse::InternalServerError().json(ErrorBody {
                    error: error.to_owned(),
                })
            }
            ContactError::TransportError(_) => HttpResponse::InternalServerError().json(ErrorBody {
                error: "Failed to send email. Please try again later.".to_owned(),
            }),
            ContactError::UnexpectedError(_) => HttpResponse::InternalServerError().json(ErrorBody {
                error: "Unexpected server error.".to_owned(),
            }),
        }
    }
}
