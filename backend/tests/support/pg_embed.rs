//! Embedded PostgreSQL for the Diesel adapter suites.
//!
//! `pg-embed-setup-unpriv` installs and initialises under `/var/tmp` unless
//! `PG_RUNTIME_DIR` and `PG_DATA_DIR` say otherwise. Sandboxed runs cannot
//! write there, so a missing pair is pointed at a per-bootstrap directory under
//! the cargo target dir while the cluster starts.
//!
//! Every suite gets its own freshly migrated database on the cluster.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use orchard::outbound::persistence::run_migrations;
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use uuid::Uuid;

static BOOTSTRAP: OnceLock<Mutex<()>> = OnceLock::new();

const BOOTSTRAP_ATTEMPTS: u32 = 4;
const FIRST_BACKOFF: Duration = Duration::from_millis(500);

/// Message fragments of download and socket failures worth another attempt.
const TRANSIENT: &[&str] = &[
    "connection reset",
    "connection refused",
    "timed out",
    "timeout",
    "temporarily unavailable",
    "dns error",
    "error decoding response body",
];

fn scratch_dirs() -> std::io::Result<(PathBuf, PathBuf)> {
    let target = std::env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../target"));
    let base = target
        .join("pg-embed")
        .join(format!("orchard-{}-{}", std::process::id(), Uuid::new_v4()));
    let (install, data) = (base.join("install"), base.join("data"));
    std::fs::create_dir_all(&install)?;
    std::fs::create_dir_all(&data)?;
    Ok((install, data))
}

fn is_transient(message: &str) -> bool {
    let lowered = message.to_lowercase();
    TRANSIENT.iter().any(|fragment| lowered.contains(fragment))
}

/// Start a private cluster, retrying flaky binary downloads with backoff.
pub fn test_cluster() -> Result<TestCluster, String> {
    let _serial = BOOTSTRAP
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let has_dirs =
        std::env::var_os("PG_RUNTIME_DIR").is_some() && std::env::var_os("PG_DATA_DIR").is_some();
    let _env = if has_dirs {
        None
    } else {
        let (install, data) = scratch_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(install.to_string_lossy().into_owned())),
            ("PG_DATA_DIR", Some(data.to_string_lossy().into_owned())),
        ]))
    };

    let mut backoff = FIRST_BACKOFF;
    let mut attempt = 1;
    loop {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                let message = format!("{err:?}");
                if attempt == BOOTSTRAP_ATTEMPTS || !is_transient(&message) {
                    return Err(message);
                }
                eprintln!("pg-embed: attempt {attempt} failed, retrying in {backoff:?}: {message}");
                std::thread::sleep(backoff);
                backoff *= 2;
                attempt += 1;
            }
        }
    }
}

/// Surface SQLSTATE and detail, which `postgres::Error`'s `Display` hides.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    match error.as_db_error() {
        Some(db) => {
            let mut rendered = format!("postgres error {:?}: {}", db.code(), db.message());
            if let Some(detail) = db.detail() {
                rendered.push_str("; detail: ");
                rendered.push_str(detail);
            }
            rendered
        }
        None => error.to_string(),
    }
}

/// Create an empty database named after `suite`, migrate it and return its URL.
pub fn migrated_database(cluster: &TestCluster, suite: &str) -> Result<String, String> {
    let name = format!("{suite}_{}", Uuid::new_v4().simple());
    let connection = cluster.connection();
    let mut admin = Client::connect(&connection.database_url("postgres"), NoTls)
        .map_err(|err| format_postgres_error(&err))?;
    // One statement per call: CREATE DATABASE refuses to run in a batch.
    admin
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;

    let url = connection.database_url(&name);
    run_migrations(&url).map_err(|err| err.to_string())?;
    Ok(url)
}
