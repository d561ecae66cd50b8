//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error HTTP-agnostic while letting handlers return it
//! directly. Failures render as the standard envelope with `success: false`
//! and the error details in `data`.

use actix_web::error::{JsonPayloadError, PathError, UrlencodedError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::Value;
use tracing::{error, warn};

use super::envelope::ApiResponse;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message returned for undecodable request bodies.
pub const INVALID_BODY_MESSAGE: &str = "Request body is not valid JSON for this endpoint.";
/// Message returned for undecodable form submissions.
pub const INVALID_FORM_MESSAGE: &str = "Request body is not a valid form for this endpoint.";
/// Message returned for malformed path parameters.
pub const INVALID_PATH_MESSAGE: &str = "Path parameter is invalid.";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(
            self.code(),
            ErrorCode::InternalError | ErrorCode::ServiceUnavailable
        ) {
            error!(
                code = ?self.code(),
                message = self.message(),
                trace_id = self.trace_id(),
                "request failed"
            );
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        let visible = redact_if_internal(self);
        builder.json(ApiResponse::<Value>::failure(
            visible.message(),
            visible.details().cloned(),
        ))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Self::internal("Internal server error")
    }
}

/// `JsonConfig` error handler answering with a 400 envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected request body");
    Error::invalid_request(INVALID_BODY_MESSAGE).into()
}

/// `FormConfig` error handler answering with a 400 envelope.
pub fn form_error_handler(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected form body");
    Error::invalid_request(INVALID_FORM_MESSAGE).into()
}

/// `PathConfig` error handler answering with a 400 envelope.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected path parameter");
    Error::invalid_request(INVALID_PATH_MESSAGE).into()
}
