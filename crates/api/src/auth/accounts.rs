//! Credential checks and operator-account bootstrap.

use clubdir_db::models::user::CreateUser;
use clubdir_db::repositories::UserRepo;
use clubdir_db::DbPool;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};

/// Check a username/password pair against the `users` table.
///
/// Unknown users and wrong passwords both return `Ok(false)`.
pub async fn verify_credentials(pool: &DbPool, username: &str, password: &str) -> AppResult<bool> {
    let Some(user) = UserRepo::find_by_username(pool, username).await? else {
        return Ok(false);
    };

    verify_password(password, &user.password_hash).map_err(|e| {
        AppError::InternalError(format!("Stored hash for '{username}' is unusable: {e}"))
    })
}

/// Create an operator account unless one with that name already exists.
///
/// Returns `true` if a new account was created. An existing account keeps
/// its current password.
pub async fn create_user_if_absent(pool: &DbPool, username: &str, password: &str) -> AppResult<bool> {
    if UserRepo::find_by_username(pool, username).await?.is_some() {
        return Ok(false);
    }

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {e}")))?;
    let input = CreateUser {
        username: username.to_string(),
        password_hash,
    };

    let created = UserRepo::create_if_absent(pool, &input).await?;
    Ok(created.is_some())
}

/// Run [`create_user_if_absent`] for every `(username, password)` pair.
///
/// A failure on one account does not stop the rest; results come back in
/// input order.
pub async fn create_users_if_absent(
    pool: &DbPool,
    accounts: &[(String, String)],
) -> Vec<AppResult<bool>> {
    let mut results = Vec::with_capacity(accounts.len());
    for (username, password) in accounts {
        results.push(create_user_if_absent(pool, username, password).await);
    }
    results
}
