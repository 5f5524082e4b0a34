//! Database migrations for the Pokedex, embedded in the crate.
//!
//! The single migration creates the `Pokemon` table and seeds it with the 151 first-generation
//! pokemons. Diesel applies each migration in a transaction, so a failed seed leaves the
//! database untouched.

use std::env;

use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{debug, info};

use crate::db::SyncConnection;
use crate::Error;

/// Container of migrations to apply, embedded in our executables.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Name of the environment variable that can be set to `true` to skip migrations at startup.
pub const SKIP_MIGRATIONS_ENV_VAR: &str = "POKEDEX_SKIP_MIGRATIONS";

/// Applies all pending migrations to the database reachable through `connection`.
///
/// Returns the number of migrations applied (`0` if the schema was already up-to-date).
pub fn run_pending_migrations(connection: &mut SyncConnection) -> crate::Result<usize> {
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| Error::migration("failed to apply pending migrations", err))?;

    for version in &applied {
        debug!("Applied migration {}", version);
    }
    info!("{} pending migration(s) applied", applied.len());

    Ok(applied.len())
}

/// Reverts every migration applied to the database reachable through `connection`.
///
/// This drops the `Pokemon` table along with all its data. Returns the number of migrations
/// reverted.
pub fn revert_all_migrations(connection: &mut SyncConnection) -> crate::Result<usize> {
    let reverted = connection
        .revert_all_migrations(MIGRATIONS)
        .map_err(|err| Error::migration("failed to revert migrations", err))?;

    for version in &reverted {
        debug!("Reverted migration {}", version);
    }
    info!("{} migration(s) reverted", reverted.len());

    Ok(reverted.len())
}

/// Returns `true` if migrations should not be applied when the server starts.
///
/// Controlled by the [`POKEDEX_SKIP_MIGRATIONS`](SKIP_MIGRATIONS_ENV_VAR) environment variable;
/// any value other than `true` (case-insensitive) means migrations are applied.
pub fn skip_startup_migrations() -> bool {
    env::var(SKIP_MIGRATIONS_ENV_VAR)
        .map(|value| value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
