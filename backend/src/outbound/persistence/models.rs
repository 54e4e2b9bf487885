//! Internal Diesel row structs for the users table.
//!
//! These types never leave the persistence adapter.

use diesel::prelude::*;

use crate::domain::{User, UserDraft, UserId};

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub aliases: Vec<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(
            UserId::new(row.user_id),
            row.email,
            row.first_name,
            row.last_name,
            row.age,
            row.aliases,
        )
    }
}

/// Insertable struct for new users. The identifier comes from the column
/// default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub age: i32,
    pub aliases: &'a [String],
}

impl<'a> From<&'a UserDraft> for NewUserRow<'a> {
    fn from(draft: &'a UserDraft) -> Self {
        Self {
            email: &draft.email,
            first_name: &draft.first_name,
            last_name: &draft.last_name,
            age: draft.age,
            aliases: draft.aliases_for_insert(),
        }
    }
}

/// Changeset struct for replacing a user's fields.
///
/// `aliases: None` leaves the column out of the `SET` clause, so the stored
/// value survives the update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub age: i32,
    pub aliases: Option<&'a [String]>,
}

impl<'a> From<&'a UserDraft> for UserChangeset<'a> {
    fn from(draft: &'a UserDraft) -> Self {
        Self {
            email: &draft.email,
            first_name: &draft.first_name,
            last_name: &draft.last_name,
            age: draft.age,
            aliases: draft.aliases.as_deref(),
        }
    }
}
