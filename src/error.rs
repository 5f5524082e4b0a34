//! Crate-wide [`Error`] type, plus the traits used to attach context to lower-level errors.
//!
//! Every variant carries a `backtrace` field when the crate is built with the
//! `backtrace_support` config (Nightly toolchains only, see `build.rs`). It is captured when
//! the error is created and shows up in development error responses.

use std::env;
use std::ffi::OsString;
use std::num::ParseIntError;

use diesel::result::Error as DieselError;
use diesel_async::pooled_connection::deadpool::PoolError;

/// Shortcut for a [`Result`](core::result::Result) using our [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Anything that can go wrong while serving the Pokedex.
///
/// How each variant is reported to API clients is decided in
/// [`api::errors`](crate::api::errors).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration value could not be read from the environment.
    #[error("error related to environment variable: {context}")]
    EnvVar {
        /// Which variable was being read, and for what.
        context: String,
        source: EnvVarError,
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// A request body, path or query string was rejected while decoding or validating it.
    #[error("input parsing error")]
    Input {
        #[from]
        source: actix_web_validator::error::Error,
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// No pokemon has the requested id.
    ///
    /// The id is kept as received, since ids that do not even parse end up here too.
    #[error("pokemon not found (id: {id})")]
    NotFound {
        id: String,
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// A `PUT` or `PATCH` body names a different pokemon than the request path.
    #[error("id in request body ({body_id}) does not match id in path ({path_id})")]
    IdMismatch {
        path_id: i32,
        body_id: i32,
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// No connection could be obtained from the [pool](crate::db::Pool).
    #[error("database connection error")]
    Pool {
        #[from]
        source: PoolError,
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// The synchronous connection used for migrations could not be established.
    #[error("failed to connect to database")]
    Connection {
        #[from]
        source: diesel::ConnectionError,
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// The [`diesel_migrations`] harness failed to apply or revert the embedded migrations.
    #[error("migration error: {context}")]
    Migration {
        context: String,
        source: Box<dyn std::error::Error + Send + Sync>,
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// A [`diesel`] query failed.
    ///
    /// Most of these are server errors, but constraint violations (like creating a pokemon
    /// with an id that is already taken) are caused by the data sent by the client.
    #[error("query error: {context}")]
    Query {
        /// The operation that was attempted, e.g. `failed to insert new pokemon`.
        context: String,
        source: DieselError,
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },
}

impl Error {
    /// Reports that no pokemon exists with the given id.
    pub fn not_found<I>(id: I) -> Self
    where
        I: ToString,
    {
        Self::NotFound {
            id: id.to_string(),
            #[cfg(backtrace_support)]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Reports that the `id` of a request body differs from the id in the request path.
    pub fn id_mismatch(path_id: i32, body_id: i32) -> Self {
        Self::IdMismatch {
            path_id,
            body_id,
            #[cfg(backtrace_support)]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Wraps an error returned by [`MigrationHarness`](diesel_migrations::MigrationHarness).
    pub fn migration<C>(context: C, source: Box<dyn std::error::Error + Send + Sync>) -> Self
    where
        C: Into<String>,
    {
        Self::Migration {
            context: context.into(),
            source,
            #[cfg(backtrace_support)]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

/// Why an environment variable could not be used.
///
/// Mirrors [`env::VarError`], with an extra case for integer values.
#[derive(Debug, thiserror::Error)]
pub enum EnvVarError {
    #[error("variable not found in environment")]
    NotFound,

    #[error("variable contained invalid, non-Unicode characters")]
    NotUnicode(OsString),

    #[error("expected int value, found {value}")]
    IntExpected {
        value: String,
        source: ParseIntError,
    },
}

impl From<env::VarError> for EnvVarError {
    fn from(value: env::VarError) -> Self {
        match value {
            env::VarError::NotPresent => Self::NotFound,
            env::VarError::NotUnicode(value) => Self::NotUnicode(value),
        }
    }
}

impl From<deadpool::managed::BuildError> for Error {
    /// Lets `?` be used on [`PoolBuilder::build`](deadpool::managed::PoolBuilder::build).
    ///
    /// Building only fails when timeouts are configured without an async runtime, which
    /// deadpool also reports as a [`PoolError`] when getting a connection.
    fn from(value: deadpool::managed::BuildError) -> Self {
        match value {
            deadpool::managed::BuildError::NoRuntimeSpecified => PoolError::NoRuntimeSpecified.into(),
        }
    }
}

/// Turns an environment error into an [`EnvVar`](Error::EnvVar) error.
pub trait EnvVarContext {
    type Output;

    /// Attaches `context` (usually the variable name) to the error.
    fn with_env_var_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<E> EnvVarContext for E
where
    E: Into<EnvVarError>,
{
    type Output = Error;

    fn with_env_var_context<C, F>(self, context: F) -> Error
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        Error::EnvVar {
            context: context().into(),
            source: self.into(),
            #[cfg(backtrace_support)]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

impl<T, E> EnvVarContext for core::result::Result<T, E>
where
    E: EnvVarContext<Output = Error>,
{
    type Output = Result<T>;

    fn with_env_var_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| err.with_env_var_context(context))
    }
}

/// Turns a [`diesel`] error into a [`Query`](Error::Query) error.
///
/// The [repository](crate::repositories::pokemon) calls this on every query result, naming
/// the operation that failed:
///
/// ```ignore
/// pokemon.find(pokemon_id)
///     .first(&mut connection)
///     .await
///     .with_query_context(|| format!("failed to fetch pokemon with id {}", pokemon_id))
/// ```
pub trait QueryContext {
    type Output;

    fn with_query_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl QueryContext for DieselError {
    type Output = Error;

    fn with_query_context<C, F>(self, context: F) -> Error
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        Error::Query {
            context: context().into(),
            source: self,
            #[cfg(backtrace_support)]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

impl<T> QueryContext for core::result::Result<T, DieselError> {
    type Output = Result<T>;

    fn with_query_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| err.with_query_context(context))
    }
}
