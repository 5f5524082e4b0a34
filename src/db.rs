//! Helpers to connect to the Pokedex database. Currently supports Postgres as backend only.

use std::env;

use diesel::pg::Pg;
use diesel::PgConnection;
use diesel_async::pooled_connection::deadpool::Object;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{EnvVarContext, EnvVarError};
use crate::helpers::env::{env_var_or, int_env_var, int_env_var_or};

/// Type of DB backend supported by our crate; currently Postgres.
pub type Backend = Pg;

/// A synchronous connection to the Pokedex database.
///
/// Not used by the REST API, which is `async`; only used to apply [migrations](crate::migrations).
pub type SyncConnection = PgConnection;

/// An asynchronous connection to the Pokedex database.
///
/// This is provided by the [`diesel_async`] crate.
pub type Connection = AsyncPgConnection;

/// A pool of [`Connection`]s to the database.
///
/// Shared among the web application's worker threads. The pooling is handled by the
/// [`deadpool`] crate.
pub type Pool = diesel_async::pooled_connection::deadpool::Pool<Connection>;

/// A [`Connection`] stored in the connection [`Pool`].
///
/// This type is what is actually returned when [`Pool::get`] is called; its [`Deref`](std::ops::Deref)
/// implementation then allows it to be used as a standard asynchronous connection in calls like
/// [`execute`](diesel_async::RunQueryDsl::execute) through [`Deref` coercion](std::ops::Deref#more-on-deref-coercion).
pub type PooledConnection = Object<Connection>;

/// Default database host, used when `DATABASE_HOST` is not set.
pub const DEFAULT_DB_HOST: &str = "localhost";

/// Default database port, used when `DATABASE_PORT` is not set.
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Default database user, used when `DATABASE_USERNAME` is not set.
pub const DEFAULT_DB_USERNAME: &str = "pokedex_db_user";

/// Default database password, used when `DATABASE_PASSWORD` is not set.
pub const DEFAULT_DB_PASSWORD: &str = "Pokedex";

/// Default database name, used when `DATABASE_NAME` is not set.
pub const DEFAULT_DB_NAME: &str = "pokedex_db";

/// Characters left as-is when inserting a value in a database URL (RFC 3986 "unreserved").
const URL_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Returns the Pokedex database connection URL.
///
/// If the `DATABASE_URL` environment variable is set, its value is used as-is. Otherwise, the
/// URL is assembled from the following environment variables:
///
/// | Environment variable | Default value               |
/// |----------------------|-----------------------------|
/// | `DATABASE_HOST`      | [`DEFAULT_DB_HOST`]         |
/// | `DATABASE_PORT`      | [`DEFAULT_DB_PORT`]         |
/// | `DATABASE_USERNAME`  | [`DEFAULT_DB_USERNAME`]     |
/// | `DATABASE_PASSWORD`  | [`DEFAULT_DB_PASSWORD`]     |
/// | `DATABASE_NAME`      | [`DEFAULT_DB_NAME`]         |
///
/// The username, password and database name are percent-encoded, so they may contain characters
/// like `@`, `:` or `/`. A `DATABASE_URL` must already be encoded.
///
/// No TLS connector is configured for connections, so certificates are never verified.
pub fn get_db_url() -> crate::Result<String> {
    match env::var("DATABASE_URL") {
        Ok(url) => Ok(url),
        Err(env::VarError::NotPresent) => build_db_url(),
        Err(err) => {
            Err(err.with_env_var_context(|| "failed to parse environment variable DATABASE_URL"))
        },
    }
}

/// Assembles a database URL from the individual `DATABASE_*` environment variables.
///
/// See [`get_db_url`] for details.
fn build_db_url() -> crate::Result<String> {
    let host = env_var_or("DATABASE_HOST", DEFAULT_DB_HOST)
        .with_env_var_context(|| "failed to parse environment variable DATABASE_HOST")?;
    let port = int_env_var_or("DATABASE_PORT", DEFAULT_DB_PORT)
        .with_env_var_context(|| "failed to parse environment variable DATABASE_PORT")?;
    let username = env_var_or("DATABASE_USERNAME", DEFAULT_DB_USERNAME)
        .with_env_var_context(|| "failed to parse environment variable DATABASE_USERNAME")?;
    let password = env_var_or("DATABASE_PASSWORD", DEFAULT_DB_PASSWORD)
        .with_env_var_context(|| "failed to parse environment variable DATABASE_PASSWORD")?;
    let name = env_var_or("DATABASE_NAME", DEFAULT_DB_NAME)
        .with_env_var_context(|| "failed to parse environment variable DATABASE_NAME")?;

    Ok(format!(
        "postgres://{}:{}@{}:{}/{}",
        utf8_percent_encode(&username, URL_COMPONENT),
        utf8_percent_encode(&password, URL_COMPONENT),
        host,
        port,
        utf8_percent_encode(&name, URL_COMPONENT),
    ))
}

/// Returns the URL of the test database matching the given main database URL.
///
/// The test database runs on the same host as the main database but on port `5433` (when the
/// main database uses the default port), with a `_test` suffix added to the database name.
/// Used by the `run_migrations` tool and by integration tests.
pub fn get_test_db_url(db_url: &str) -> String {
    let db_url = db_url.replacen(&format!(":{}/", DEFAULT_DB_PORT), ":5433/", 1);
    match db_url.rsplit_once('/') {
        Some((server, db_name)) => format!("{}/{}_test", server, db_name),
        None => db_url,
    }
}

/// Returns the maximum number of connections to store in the database connection [`Pool`].
///
/// This can be specified through the `MAX_POOL_SIZE` environment variable, but is optional.
/// If not specified, the default value depends on the number of physical CPUs on the machine
/// (see [`PoolConfig::default`](deadpool::managed::PoolConfig::default)).
pub fn get_max_pool_size() -> crate::Result<Option<usize>> {
    match int_env_var("MAX_POOL_SIZE") {
        Ok(value) => Ok(Some(value)),
        Err(EnvVarError::NotFound) => Ok(None),
        Err(err @ EnvVarError::NotUnicode(_) | err @ EnvVarError::IntExpected { .. }) => {
            Err(err.with_env_var_context(|| "failed to parse environment variable MAX_POOL_SIZE"))
        },
    }
}

/// Creates and returns a Pokedex database connection [`Pool`].
///
/// Connections are created lazily, so this does not fail if the database is unreachable;
/// the error will surface on the first query instead.
pub fn get_pool() -> crate::Result<Pool> {
    let manager = AsyncDieselConnectionManager::new(get_db_url()?);
    let mut pool_builder = Pool::builder(manager);

    if let Some(max_size) = get_max_pool_size()? {
        pool_builder = pool_builder.max_size(max_size);
    }

    Ok(pool_builder.build()?)
}
