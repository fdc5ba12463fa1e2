//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, created_at, updated_at";

/// Provides lookup and creation of operator accounts.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Insert a user unless the username is taken.
    ///
    /// Returns `None` when a user with that name already exists; the existing
    /// password is left untouched.
    pub async fn create_if_absent(
        pool: &PgPool,
        input: &CreateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash)
             VALUES ($1, $2)
             ON CONFLICT (username) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }
}
