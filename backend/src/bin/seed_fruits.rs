//! Replace the fruit catalogue with the starter fruits.
//!
//! ```sh
//! cargo run --bin seed-fruits -- --database-url postgres://localhost/orchard
//! ```
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use tokio::runtime::Builder;

use orchard::domain::{seed_starter_fruits, starter_fruits};
use orchard::outbound::persistence::{DbPool, DieselFruitRepository, PoolConfig, run_migrations};

/// `seed-fruits` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed-fruits",
    about = "Replace every fruit with the ownerless starter catalogue",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `ORCHARD_DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Print the fruits that would be written and exit.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();

    if args.dry_run {
        for fruit in starter_fruits(chrono::Utc::now()).map_err(|err| eyre!("{err}"))? {
            println!("{} ({})", fruit.name, fruit.color);
        }
        return Ok(());
    }

    let database_url = args
        .database_url
        .or_else(|| env::var("ORCHARD_DATABASE_URL").ok())
        .ok_or_else(|| eyre!("pass --database-url or set ORCHARD_DATABASE_URL"))?;

    run_migrations(&database_url).wrap_err("apply migrations")?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    let written = runtime.block_on(async {
        let pool = DbPool::new(PoolConfig::new(&database_url))
            .await
            .map_err(|err| eyre!("create database pool: {}", err.into_message()))?;
        let repo = DieselFruitRepository::new(pool);
        seed_starter_fruits(&repo, &DefaultClock)
            .await
            .map_err(|err| eyre!("seed fruits: {err}"))
    })?;

    println!("seeded {written} fruits");
    Ok(())
}
