//! Operator tool for managing API tokens.
//!
//! ```text
//! issue-token alice           # prints alice's key, creating it if needed
//! issue-token alice --revoke  # deletes alice's key
//! ```

use anyhow::Context;
use clap::Parser;
use drones_storage::{Database, error::StorageError, repository::auth_token::AuthTokenRepository};

#[derive(Debug, Parser)]
#[command(name = "issue-token", about = "Issue or revoke an API token for a user")]
struct Args {
    /// User the token belongs to
    username: String,

    /// Delete the user's token instead of issuing one
    #[arg(long)]
    revoke: bool,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let db = Database::new(&args.database_url, 1)
        .await
        .context("Failed to initialize database")?;
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;

    let tokens = AuthTokenRepository::new(db.pool());

    if args.revoke {
        match tokens.revoke(&args.username).await {
            Ok(()) => println!("Revoked token for {}", args.username),
            Err(StorageError::NotFound) => {
                anyhow::bail!("No token found for {}", args.username)
            }
            Err(e) => return Err(e).context("Failed to revoke token"),
        }
    } else {
        let token = tokens
            .issue(&args.username)
            .await
            .context("Failed to issue token")?;
        println!("{}", token.key);
    }

    Ok(())
}
