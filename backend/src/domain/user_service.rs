//! User persistence operations.
//!
//! [`UserService`] is the only place where repository outcomes become
//! structured [`Error`] values. Every failure is classified here and never
//! reclassified downstream, so all five routes report the same status for the
//! same store outcome.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, User, UserDraft, UserId};

/// User service implementing the driving ports over a [`UserRepository`].
pub struct UserService<R> {
    repository: Arc<R>,
}

// Manual impl: a derive would demand `R: Clone`.
impl<R> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> UserService<R> {
    /// Create a service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn not_found(id: &UserId) -> Error {
    Error::not_found(format!("No user with id {id}"))
}

/// Conflicts carry the constraint name and nothing else; other failures are
/// internal with the repository error kept as cause.
fn map_write_error(error: UserPersistenceError, internal_message: &str) -> Error {
    match error {
        UserPersistenceError::UniqueViolation { constraint } => Error::conflict(format!(
            "Duplicate key violation for constraint `{constraint}`"
        )),
        other => Error::internal(internal_message).with_cause(other),
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository
            .list()
            .await
            .map_err(|err| Error::internal("Failed to retrieve users").with_cause(err))
    }

    async fn get_user(&self, id: &UserId) -> Result<User, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|err| Error::internal("Failed to retrieve user").with_cause(err))?
            .ok_or_else(|| not_found(id))
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error> {
        self.repository
            .create(&draft)
            .await
            .map_err(|err| map_write_error(err, "Failed to save user to db"))
    }

    async fn update_user(&self, id: &UserId, draft: UserDraft) -> Result<User, Error> {
        self.repository
            .update(id, &draft)
            .await
            .map_err(|err| map_write_error(err, "Could not update user"))?
            .ok_or_else(|| not_found(id))
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), Error> {
        // Removing an absent row is not an error.
        self.repository
            .delete(id)
            .await
            .map(|_removed| ())
            .map_err(|err| Error::internal(format!("Could not delete user {id}")).with_cause(err))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
