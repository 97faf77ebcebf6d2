//! Diesel table definitions matching `backend/migrations`.
//!
//! Keep in sync with the migrations; `diesel print-schema` regenerates them
//! from a live database.

diesel::table! {
    /// User accounts with their single authority tier.
    users (id) {
        id -> Uuid,
        /// Unique sign-in name (max 50 characters).
        login -> Varchar,
        /// Authority string, e.g. `ROLE_AITESTER`.
        role -> Varchar,
        /// Argon2id PHC string.
        password_digest -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Projects, each owned by one user.
    projects (id) {
        id -> Uuid,
        /// Unique human-readable key (max 64 characters).
        key -> Varchar,
        /// Unique display name (max 128 characters).
        name -> Varchar,
        description -> Nullable<Text>,
        owner_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(projects -> users (owner_id));
diesel::allow_tables_to_appear_in_same_query!(projects, users);
