//! Request body decoding.
//!
//! Actix answers malformed JSON with its own error response by default. The
//! config here routes every decode failure through the domain error instead,
//! so clients get the same plain-text shape as every other failure.

use actix_web::{HttpRequest, error::JsonPayloadError, web};

use crate::domain::Error;

/// Message returned to clients for any body that fails to decode.
pub const DECODE_FAILURE_MESSAGE: &str = "failed to decode json";

/// Decode failure kept as the error cause for logs.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct DecodeFailure(String);

fn decode_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(DECODE_FAILURE_MESSAGE)
        .with_cause(DecodeFailure(err.to_string()))
        .into()
}

/// JSON extractor configuration for the user routes.
///
/// The `Content-Type` header is not checked: any body that parses as the
/// expected JSON shape is accepted, and only a body that fails to parse is a
/// 400.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_service::inbound::http::json::json_config;
///
/// let app = App::new().app_data(json_config());
/// # let _ = app;
/// ```
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .content_type(|_| true)
        .error_handler(decode_error)
}
