//! Create operator accounts from the command line.
//!
//! ```text
//! clubdir-add-users alice:s3cret bob:hunter2
//! ```
//!
//! Existing usernames are skipped and keep their password. Accounts that
//! fail are logged and the rest are still created; the exit status is
//! non-zero if any failed.

use anyhow::{bail, Context};
use clubdir_api::auth::accounts::create_users_if_absent;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clubdir_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let accounts = std::env::args()
        .skip(1)
        .map(|arg| parse_account(&arg))
        .collect::<anyhow::Result<Vec<_>>>()?;
    if accounts.is_empty() {
        bail!("usage: clubdir-add-users <username:password>...");
    }

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = clubdir_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    clubdir_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let results = create_users_if_absent(&pool, &accounts).await;
    let mut failures = 0usize;
    for ((username, _), result) in accounts.iter().zip(results) {
        match result {
            Ok(true) => tracing::info!(%username, "User created"),
            Ok(false) => tracing::warn!(%username, "User already exists, skipped"),
            Err(e) => {
                failures += 1;
                tracing::error!(%username, error = %e, "Failed to create user");
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} users could not be created", accounts.len());
    }

    Ok(())
}

/// Split `username:password` on the first colon.
fn parse_account(arg: &str) -> anyhow::Result<(String, String)> {
    match arg.split_once(':') {
        Some((user, pass)) if !user.is_empty() && !pass.is_empty() => {
            Ok((user.to_string(), pass.to_string()))
        }
        _ => bail!("expected <username:password>, got '{arg}'"),
    }
}
