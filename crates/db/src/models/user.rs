//! Directory operator accounts.

use clubdir_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash; never serialize this to API responses.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user. The password must already be hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
}
