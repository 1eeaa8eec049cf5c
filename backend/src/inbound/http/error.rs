//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes. Access denials carry a `redirectTo` detail; it is echoed as a
//! `Location` header so browser clients can follow it.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header, web};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
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

fn redirect_target(error: &Error) -> Option<&str> {
    if !matches!(error.code(), ErrorCode::Unauthorized | ErrorCode::Forbidden) {
        return None;
    }
    error.details()?.get("redirectTo")?.as_str()
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        if let Some(target) = redirect_target(self) {
            builder.insert_header((header::LOCATION, target.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Self::internal("Internal server error")
    }
}

/// Message for request bodies or query strings that do not deserialise.
pub const MALFORMED_REQUEST: &str = "Request could not be parsed";

fn malformed(source: &'static str, reason: &dyn fmt::Display) -> Error {
    debug!(source, %reason, "rejecting malformed request");
    Error::invalid_request(MALFORMED_REQUEST).with_details(json!({
        "source": source,
        "reason": reason.to_string(),
    }))
}

/// JSON body extractor settings that answer with the error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| malformed("body", &err).into())
}

/// Query string extractor settings that answer with the error envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| malformed("query", &err).into())
}

#[cfg(test)]
mod tests;
