//! Pokedex API server.
//!
//! Loads configuration from the environment, applies pending database migrations, then serves
//! the Pokedex REST API over HTTP. All the actual implementation is in the
//! [lib crate](pokedex_api).
//!
//! For more information, see `README.md`.

use actix_web::HttpServer;
use anyhow::Context;
use diesel::Connection;
use env_logger::Env;
use log::{info, trace};
use pokedex_api::db::{get_db_url, get_pool, SyncConnection};
use pokedex_api::helpers::env::{env_var_or, int_env_var_or, load_optional_dotenv};
use pokedex_api::migrations::{run_pending_migrations, skip_startup_migrations};
use pokedex_api::pokedex_app;
use pokedex_api::service_env::ServiceEnv;
use rustc_version_runtime::version;

/// Default address the HTTP server binds to (see [`get_server_address`]).
const DEFAULT_HTTP_ADDR: &str = "127.0.0.1";

/// Default HTTP port used for the Pokedex API (see [`get_http_port`]).
const DEFAULT_HTTP_PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let env_file_loaded = load_optional_dotenv()?;

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if !env_file_loaded {
        info!(".env file not found; skipped");
    }

    if skip_startup_migrations() {
        info!("Skipping database migrations");
    } else {
        apply_migrations()?;
    }

    info!("Creating DB connection pool");
    let pool = get_pool().with_context(|| "failed to create DB connection pool")?;

    let server_address = get_server_address()?;
    let http_port = get_http_port()?;

    info!("Starting Pokedex HTTP server");
    let server = HttpServer::new(move || pokedex_app!(pool))
        .bind((server_address.as_str(), http_port))
        .with_context(|| format!("failed to bind to {}:{}", server_address, http_port))?
        .run();

    info!(
        "Pokedex server started in {}! Listening on {}:{}.",
        ServiceEnv::current(),
        server_address,
        http_port
    );
    info!("Rust version used: {}", version());
    if ServiceEnv::current().is_development() {
        info!("Backtrace support: {}", get_backtrace_support());
    }
    Ok(server.await?)
}

/// Connects to the database synchronously and applies any pending migration.
///
/// The first run creates the `Pokemon` table and seeds it.
fn apply_migrations() -> anyhow::Result<()> {
    trace!("Connecting to database to apply migrations");
    let db_url = get_db_url()?;
    let mut connection = SyncConnection::establish(&db_url)
        .map_err(pokedex_api::Error::from)
        .with_context(|| "failed to connect to database to apply migrations")?;

    info!("Applying pending database migrations");
    run_pending_migrations(&mut connection)?;

    Ok(())
}

/// Returns the address to bind to for the Pokedex API.
///
/// By default, the server binds to `127.0.0.1`, which works locally. When deploying in production
/// (or in a Docker container), set the `HTTP_ADDR` environment variable to `0.0.0.0`.
fn get_server_address() -> anyhow::Result<String> {
    env_var_or("HTTP_ADDR", DEFAULT_HTTP_ADDR)
        .with_context(|| "failed to parse content of HTTP_ADDR environment variable")
}

/// Returns the HTTP port to use for the Pokedex API.
///
/// Defaults to 8080; set the `HTTP_PORT` environment variable to override.
fn get_http_port() -> anyhow::Result<u16> {
    int_env_var_or("HTTP_PORT", DEFAULT_HTTP_PORT)
        .with_context(|| "failed to parse content of HTTP_PORT environment variable")
}

/// Returns a string representing the status of [`Backtrace`](std::backtrace::Backtrace) support on this platform.
fn get_backtrace_support() -> &'static str {
    #[cfg(backtrace_support)]
    match std::backtrace::Backtrace::capture().status() {
        std::backtrace::BacktraceStatus::Captured => "supported",
        std::backtrace::BacktraceStatus::Disabled => "disabled",
        std::backtrace::BacktraceStatus::Unsupported => "unsupported",
        _ => "unknown (unrecognized enum value)",
    }

    #[cfg(not(backtrace_support))]
    "unsupported (not Nightly toolchain)"
}
