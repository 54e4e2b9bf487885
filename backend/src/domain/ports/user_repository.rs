//! Driven port for the user table and the raw store outcomes it reports.
//!
//! Adapters report what the store did (`None` for "no row", a
//! [`UserPersistenceError`] for failures). Turning those outcomes into
//! client-facing errors is the job of [`crate::domain::UserService`], so every
//! adapter gets the same translation for free.

use async_trait::async_trait;

use crate::domain::{User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by user repository adapters.
    pub enum UserPersistenceError {
        /// The store could not be reached or the connection dropped.
        Connection { message: String } => "user repository connection failed: {message}",
        /// A statement failed for a reason other than a unique violation.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique constraint rejected the write.
        UniqueViolation { constraint: String } =>
            "unique constraint `{constraint}` violated",
    }
}

/// Store operations backing the user resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Read every row, in store iteration order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Read one row by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a row and return it with its generated identifier.
    ///
    /// Absent aliases are stored as an empty list.
    async fn create(&self, draft: &UserDraft) -> Result<User, UserPersistenceError>;

    /// Overwrite a row and return the stored result, or `None` when no row
    /// has this identifier.
    ///
    /// Absent aliases leave the stored aliases untouched.
    async fn update(
        &self,
        id: &UserId,
        draft: &UserDraft,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove a row. Returns whether a row was removed.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}
