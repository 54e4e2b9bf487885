//! Domain primitives, ports and services.
//!
//! Purpose: define the user entity, the structured error every operation
//! reports, and the service that translates store outcomes into that error.
//! Nothing in here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: structured failure and its classification.
//! - User / UserId / UserDraft: the stored entity and its write payload.
//! - UserService: the persistence operations behind every route.
//! - TraceId: request correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
mod user_service;

pub use self::error::{Error, ErrorCause, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserDraft, UserId};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use user_service::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("No user with id abc"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
