//! Driving port for user reads.
//!
//! HTTP handlers depend on this port rather than on a repository so that the
//! only errors they ever see are structured [`Error`] values.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Read-side user use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// All users; empty when the table is empty.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// A single user, or a not-found error naming `id`.
    async fn get_user(&self, id: &UserId) -> Result<User, Error>;
}
