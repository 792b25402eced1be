//! Creates the admin account, or resets its password when it already exists.
//!
//! Usage: `create_admin <email> <password>`, or set `ADMIN_EMAIL` and
//! `ADMIN_PASSWORD`.

use std::env;

use anyhow::{bail, Context};
use club_backend::{
    db::postgres::{create_pool, run_migrations},
    entities::user::NewAdmin,
    settings::AppConfig,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let mut args = env::args().skip(1);
    let email = args
        .next()
        .or_else(|| env::var("ADMIN_EMAIL").ok())
        .context("admin email missing: pass it as the first argument or set ADMIN_EMAIL")?;
    let password = args
        .next()
        .or_else(|| env::var("ADMIN_PASSWORD").ok())
        .context("admin password missing: pass it as the second argument or set ADMIN_PASSWORD")?;

    let config = AppConfig::new().context("failed to load configuration")?;
    let pool = create_pool(&config.database_url)
        .await
        .context("failed to connect to the database")?;
    run_migrations(&pool).await.context("failed to run migrations")?;

    let state = AppState::new(&config, pool).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    match state.auth_handler.ensure_admin(NewAdmin { email: email.clone(), password }).await {
        Ok(id) => {
            println!("Admin account ready: {} ({})", email.trim().to_lowercase(), id);
            Ok(())
        }
        Err(e) => bail!("could not create admin: {}", e),
    }
}
