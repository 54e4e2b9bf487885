//! User entity and write payload.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-generated user identifier.
///
/// Identifiers are opaque strings: the store assigns them on insert and the
/// domain never parses them. Any path segment is therefore a valid lookup key;
/// an identifier that was never issued is simply not found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// A stored user.
///
/// The identifier is fixed at construction; there is no setter for it.
/// Email uniqueness is enforced by the store, not here.
///
/// # Examples
/// ```
/// use user_service::domain::{User, UserId};
///
/// let user = User::new(
///     UserId::new("4c1f"),
///     "ada@example.com",
///     "Ada",
///     "Lovelace",
///     36,
///     vec!["Countess".to_owned()],
/// );
/// assert_eq!(user.id().as_str(), "4c1f");
/// assert_eq!(user.aliases(), ["Countess"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: String,
    first_name: String,
    last_name: String,
    age: i32,
    aliases: Vec<String>,
}

impl User {
    /// Assemble a user from stored column values.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: i32,
        aliases: Vec<String>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            aliases,
        }
    }

    /// Store-generated identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub fn age(&self) -> i32 {
        self.age
    }

    /// Aliases in stored order; empty when none were ever set.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }
}

/// Field values for creating or replacing a user.
///
/// `aliases` is tri-state:
///
/// - `None`: the caller did not send the field. Create stores an empty list;
///   update keeps whatever is stored.
/// - `Some(vec![])`: clear the aliases.
/// - `Some(values)`: replace the aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub aliases: Option<Vec<String>>,
}

impl UserDraft {
    /// Aliases to write when no prior row exists.
    #[must_use]
    pub fn aliases_for_insert(&self) -> &[String] {
        self.aliases.as_deref().unwrap_or_default()
    }
}
