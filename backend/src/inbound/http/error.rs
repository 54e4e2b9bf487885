//! HTTP adapter mapping for domain errors.
//!
//! Every handler returns [`ApiResult`], so this is the one place that decides
//! what a failure looks like on the wire: the status comes from
//! [`status_for`], the body is the client-facing message as plain text, and
//! the full rendering (cause included) goes to the log only.

use actix_web::error::PathError;
use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use tracing::{debug, error};

pub use crate::domain::ApiResult;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn log_error_response(error: &Error) {
    let code = error.code().as_str();
    let trace_id = error.trace_id();
    match error.code() {
        ErrorCode::InternalError => error!(code, trace_id, error = %error, "request failed"),
        _ => debug!(code, trace_id, error = %error, "request rejected"),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        log_error_response(self);

        let mut builder = HttpResponse::build(self.status_code());
        builder.insert_header((
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        ));
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.body(self.message().to_owned())
    }
}

/// Anything that is not already a domain error becomes an internal error
/// carrying the original rendering as its message.
impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        Error::internal(err.to_string())
    }
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    Error::from(actix_web::Error::from(err)).into()
}

/// Path extractor configuration routing extraction failures through
/// [`Error`], so they are rendered and logged like every other failure.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_service::inbound::http::error::path_config;
///
/// let app = App::new().app_data(path_config());
/// # let _ = app;
/// ```
#[must_use]
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}
