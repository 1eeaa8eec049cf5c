//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    ///
    /// `email` is stored lowercased and carries the `users_email_key` unique
    /// constraint.
    users (id) {
        id -> Uuid,
        email -> Varchar,
        /// Argon2id PHC string.
        password_digest -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks. `title` is unique across all owners (`tasks_title_key`).
    tasks (id) {
        id -> Uuid,
        /// Owner; foreign key to `users.id`.
        user_id -> Uuid,
        title -> Varchar,
        content -> Nullable<Text>,
        /// One of `todo`, `doing`, `done`.
        status -> Varchar,
        deadline -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(tasks, users);
