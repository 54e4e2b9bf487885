//! User service library: a REST resource over a PostgreSQL `users` table.
//!
//! Layout follows ports and adapters:
//!
//! - [`domain`]: entities, the structured error and the user service.
//! - [`inbound`]: actix-web handlers and the error-response mapping.
//! - [`outbound`]: the Diesel persistence adapter and migrations.
//! - [`middleware`]: request correlation.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::{TRACE_ID_HEADER, TraceId};
pub use middleware::Trace;
