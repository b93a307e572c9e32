//! HTTP adapter mapping for domain errors.
//!
//! JSON endpoints render the error envelope with a status derived from the
//! code. Form-driven endpoints instead send the browser to the error page.

use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;
use url::form_urlencoded::byte_serialize;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal(INTERNAL_MESSAGE);
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
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_MESSAGE)
    }
}

/// `Location` of the error page carrying `message` in its query string.
pub fn error_page_location(message: &str) -> String {
    let encoded: String = byte_serialize(message.as_bytes()).collect();
    format!("/error?error={encoded}")
}

/// `303 See Other` to `location`.
pub fn see_other(location: &str) -> HttpResponse {
    let mut response = HttpResponse::SeeOther();
    match HeaderValue::from_str(location) {
        Ok(value) => {
            response.insert_header((header::LOCATION, value));
        }
        Err(err) => {
            error!(%err, location, "redirect target is not a valid header value");
            response.insert_header((header::LOCATION, HeaderValue::from_static("/error")));
        }
    }
    response.finish()
}

/// Redirect to the error page describing `error`.
///
/// Internal messages are redacted as they are for JSON responses.
pub fn redirect_to_error_page(error: &Error) -> HttpResponse {
    let shown = redact_if_internal(error);
    let mut response = see_other(&error_page_location(shown.message()));
    if let Some(id) = error.trace_id()
        && let Ok(value) = HeaderValue::from_str(id)
    {
        response.headers_mut().insert(
            header::HeaderName::from_static(TRACE_ID_HEADER),
            value,
        );
    }
    response
}

#[cfg(test)]
mod tests;
