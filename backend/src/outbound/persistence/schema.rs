//! Diesel table definitions for the PostgreSQL schema.
//!
//! Kept in step with `backend/migrations` by hand; `diesel print-schema`
//! against a migrated database prints the same definition.

diesel::table! {
    /// Registered users.
    ///
    /// `user_id` is generated by the database on insert. The
    /// `users_email_key` unique constraint guards `email`.
    users (user_id) {
        /// Primary key, `gen_random_uuid()` rendered as text.
        user_id -> Text,
        email -> Text,
        first_name -> Text,
        last_name -> Text,
        age -> Int4,
        /// Ordered aliases; `'{}'` when none were supplied.
        aliases -> Array<Text>,
    }
}
