//! Driving port for user writes.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft, UserId};

/// Write-side user use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Insert a user; conflicts on a duplicate email.
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error>;

    /// Replace a user's fields; not found when `id` does not exist.
    async fn update_user(&self, id: &UserId, draft: UserDraft) -> Result<User, Error>;

    /// Remove a user. Removing an unknown identifier succeeds.
    async fn delete_user(&self, id: &UserId) -> Result<(), Error>;
}
