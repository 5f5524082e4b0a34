//! Mapping from [`Error`] to the HTTP responses returned by the Pokedex API.
//!
//! | Error                                         | Status                      | `details`         |
//! |-----------------------------------------------|-----------------------------|-------------------|
//! | [`Input`](Error::Input)                       | `400 Bad Request`           | decoding error    |
//! | [`IdMismatch`](Error::IdMismatch)             | `400 Bad Request`           | both ids          |
//! | [`Query`](Error::Query), unique violation     | `400 Bad Request`           | none              |
//! | [`NotFound`](Error::NotFound)                 | `404 Not Found`             | none              |
//! | anything else                                 | `500 Internal Server Error` | none              |
//!
//! In development, the body also describes the internal error (see [`ErrorResponse`]).

use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TryFromInto};
use utoipa::{ToResponse, ToSchema};

use crate::helpers::error::recursive_error_message;
use crate::service_env::ServiceEnv;
use crate::Error;

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Input { .. } | Error::IdMismatch { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Query { source, .. } => query_status_code(source),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let body = ErrorResponse::from(self);
        HttpResponse::build(body.status_code).json(body)
    }
}

/// Status of a failed query: the client is blamed when its data broke a table constraint.
fn query_status_code(source: &DieselError) -> StatusCode {
    match source {
        DieselError::NotFound => StatusCode::NOT_FOUND,
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::CheckViolation,
            _,
        ) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON body of every error response.
///
/// `internal_error` is only filled when running in the
/// [`Development`](ServiceEnv::Development) environment, so that production responses never
/// leak database or configuration details.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, ToResponse)]
#[response(
    description = "Server error",
    example = json!({
        "status_code": 500,
        "error": "Internal Server Error"
    }),
)]
pub struct ErrorResponse {
    /// HTTP status code
    #[serde_as(as = "TryFromInto<u16>")]
    #[schema(value_type = u16, minimum = 100, maximum = 999)]
    pub status_code: StatusCode,

    /// Canonical reason phrase of the status code
    pub error: String,

    /// What was wrong with the request, for client errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Description of the internal error (development only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_error: Option<String>,
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        let status_code = error.status_code();
        let details = match error {
            Error::Input { source, .. } => Some(source.to_string()),
            Error::IdMismatch { .. } => Some(error.to_string()),
            _ => None,
        };
        let internal_error = ServiceEnv::current()
            .is_development()
            .then(|| recursive_error_message(error));

        Self {
            status_code,
            error: status_code.canonical_reason().unwrap_or("Unknown Error").into(),
            details,
            internal_error,
        }
    }
}

/// Error handler for [`JsonConfig`](actix_web_validator::JsonConfig).
///
/// Bodies rejected by the `Json` extractor are reported like any other [`Input`](Error::Input)
/// error.
pub fn input_error_handler(
    err: actix_web_validator::Error,
    _req: &HttpRequest,
) -> actix_web::error::Error {
    Error::from(err).into()
}

/// Error handler for [`PathConfig`](actix_web_validator::PathConfig) on `/pokemon/{id}` routes.
///
/// An id that does not parse, or is not positive, cannot name a pokemon: the request fails
/// with `404 Not Found` instead of `400 Bad Request`.
pub fn not_found_path_error_handler(
    _err: actix_web_validator::Error,
    req: &HttpRequest,
) -> actix_web::error::Error {
    Error::not_found(req.match_info().get("id").unwrap_or_default()).into()
}
