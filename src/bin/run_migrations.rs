//! Applies (or reverts) the Pokedex database migrations.
//!
//! Similar to running `diesel migration run`, but without the need to install the diesel CLI.
//! Migrations are applied to the main database and to the test database, if it can be reached.
//!
//! Pass `--revert` to revert all migrations instead, dropping the `Pokemon` table.

use std::env;
use std::sync::OnceLock;
use std::time::Instant;

use anyhow::Context;
use diesel::{Connection, ConnectionError};
use log::{info, warn};
use pokedex_api::db::{get_db_url, get_test_db_url, SyncConnection};
use pokedex_api::helpers::env::load_optional_dotenv;
use pokedex_api::migrations::{revert_all_migrations, run_pending_migrations};
use regex::Regex;
use simple_logger::SimpleLogger;

/// Direction in which to run migrations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .init()
        .with_context(|| "failed to initialize logging facility")?;

    let direction = parse_args(env::args().skip(1))?;

    info!("Loading environment variables");
    load_optional_dotenv()
        .with_context(|| "failed to load `.env` file containing environment variables")?;

    info!("Starting Pokedex migration run ({:?})", direction);
    let start_time = Instant::now();

    let db_url = get_db_url().with_context(|| "failed to get DB URL")?;
    let test_db_url = get_test_db_url(&db_url);
    for target in [db_url, test_db_url] {
        migrate(&target, direction)?;
    }

    info!("Migrations completed in {:.4?}s.", start_time.elapsed().as_secs_f64());

    Ok(())
}

/// Parses command-line arguments (excluding the program name).
fn parse_args<I>(args: I) -> anyhow::Result<Direction>
where
    I: IntoIterator<Item = String>,
{
    let mut direction = Direction::Up;
    for arg in args {
        match arg.as_str() {
            "--revert" => direction = Direction::Down,
            other => anyhow::bail!("unknown argument: {} (usage: run_migrations [--revert])", other),
        }
    }
    Ok(direction)
}

/// Filters the user/password from a DB URL so we can log it.
fn filter_db_url(db_url: &str) -> anyhow::Result<String> {
    static FILTER: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

    let filter = FILTER
        .get_or_init(|| Regex::new("postgres(?:ql)?://(?:[^:@/]+(?::[^@/]*)?@)?(?<rest>.*)"))
        .as_ref()
        .map_err(|err| err.clone())
        .with_context(|| "failed to compile DB URL filter")?;
    Ok(filter.replace(db_url, "postgres://$rest").into_owned())
}

/// Applies or reverts migrations on the given database.
///
/// A database that cannot be reached is skipped, so that the test database is optional.
fn migrate(db_url: &str, direction: Direction) -> anyhow::Result<()> {
    let filtered_url = filter_db_url(db_url)?;

    info!("Connecting to Postgres database `{}`", filtered_url);
    let mut connection = match SyncConnection::establish(db_url) {
        Ok(connection) => connection,
        Err(ConnectionError::BadConnection(err)) => {
            warn!("Could not connect to `{}` ({}); skipping", filtered_url, err);
            return Ok(());
        },
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to connect to database `{}`", filtered_url))
        },
    };

    match direction {
        Direction::Up => run_pending_migrations(&mut connection),
        Direction::Down => revert_all_migrations(&mut connection),
    }
    .with_context(|| format!("failed to migrate database `{}`", filtered_url))?;

    Ok(())
}
