//! Test utilities for the user service crate.
//!
//! Compiled for unit tests and, through the `test-support` feature, for the
//! integration suites under `tests/`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserDraft, UserId};

/// Constraint name reported for duplicate emails, matching the migration.
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// In-process [`UserRepository`] with the same observable contract as the
/// PostgreSQL adapter: generated UUID identifiers, a unique email
/// constraint, insertion-ordered listing and alias preservation on update.
///
/// # Examples
/// ```
/// use user_service::domain::ports::UserRepository;
/// use user_service::domain::UserDraft;
/// use user_service::test_support::InMemoryUserRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = InMemoryUserRepository::new();
/// let draft = UserDraft {
///     email: "a@x.com".into(),
///     first_name: "A".into(),
///     last_name: "B".into(),
///     age: 30,
///     aliases: None,
/// };
/// let user = repo.create(&draft).await.expect("insert");
/// assert!(user.aliases().is_empty());
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    fn rows(&self) -> MutexGuard<'_, Vec<User>> {
        // A panicking test must not poison the store for the next one.
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn email_taken(rows: &[User], email: &str, except: Option<&UserId>) -> bool {
    rows.iter()
        .any(|row| row.email() == email && Some(row.id()) != except)
}

fn duplicate_email() -> UserPersistenceError {
    UserPersistenceError::unique_violation(EMAIL_UNIQUE_CONSTRAINT)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.rows().clone())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.rows().iter().find(|row| row.id() == id).cloned())
    }

    async fn create(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut rows = self.rows();
        if email_taken(&rows, &draft.email, None) {
            return Err(duplicate_email());
        }
        let user = User::new(
            UserId::new(Uuid::new_v4().to_string()),
            draft.email.clone(),
            draft.first_name.clone(),
            draft.last_name.clone(),
            draft.age,
            draft.aliases_for_insert().to_vec(),
        );
        rows.push(user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: &UserId,
        draft: &UserDraft,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut rows = self.rows();
        if !rows.iter().any(|row| row.id() == id) {
            return Ok(None);
        }
        if email_taken(&rows, &draft.email, Some(id)) {
            return Err(duplicate_email());
        }
        let Some(slot) = rows.iter_mut().find(|row| row.id() == id) else {
            return Ok(None);
        };
        let aliases = draft
            .aliases
            .clone()
            .unwrap_or_else(|| slot.aliases().to_vec());
        *slot = User::new(
            id.clone(),
            draft.email.clone(),
            draft.first_name.clone(),
            draft.last_name.clone(),
            draft.age,
            aliases,
        );
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut rows = self.rows();
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        Ok(rows.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new()
    }

    fn draft(email: &str, aliases: Option<Vec<String>>) -> UserDraft {
        UserDraft {
            email: email.to_owned(),
            first_name: "A".to_owned(),
            last_name: "B".to_owned(),
            age: 30,
            aliases,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected_without_insert(repo: InMemoryUserRepository) {
        repo.create(&draft("a@x.com", None)).await.expect("first insert");

        let error = repo
            .create(&draft("a@x.com", None))
            .await
            .expect_err("duplicate email");
        assert_eq!(error, UserPersistenceError::unique_violation("users_email_key"));
        assert_eq!(repo.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_aliases_when_absent(repo: InMemoryUserRepository) {
        let created = repo
            .create(&draft("a@x.com", Some(vec!["Ace".to_owned()])))
            .await
            .expect("insert");

        let updated = repo
            .update(created.id(), &draft("a@x.com", None))
            .await
            .expect("update")
            .expect("row exists");
        assert_eq!(updated.aliases(), ["Ace"]);
    }

    #[rstest]
    #[tokio::test]
    async fn update_may_keep_own_email(repo: InMemoryUserRepository) {
        let created = repo.create(&draft("a@x.com", None)).await.expect("insert");
        let other = repo.create(&draft("b@x.com", None)).await.expect("insert");

        assert!(repo.update(created.id(), &draft("a@x.com", None)).await.is_ok());
        assert_eq!(
            repo.update(other.id(), &draft("a@x.com", None)).await,
            Err(duplicate_email())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed(repo: InMemoryUserRepository) {
        let created = repo.create(&draft("a@x.com", None)).await.expect("insert");

        assert_eq!(repo.delete(created.id()).await, Ok(true));
        assert_eq!(repo.delete(created.id()).await, Ok(false));
        assert!(repo.is_empty());
    }
}
