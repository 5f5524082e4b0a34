//! Library crate for the Pokedex REST API.
//!
//! The API exposes CRUD operations over a Postgres `Pokemon` table, seeded with the first
//! 151 pokemons by an embedded migration (see [`migrations`]). Requests flow through the
//! [API endpoints](api::pokemon), the [pokemon service](services::pokemon::Service) and a
//! [repository](repositories::pokemon::PokemonRepository).
//!
//! For more information, see `README.md`.

#![cfg_attr(backtrace_support, feature(error_generic_member_access))]

pub mod api;
pub mod db;
pub mod error;
pub mod helpers;
pub mod migrations;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod service_env;
pub mod services;

use actix_web::web::ServiceConfig;
use actix_web_validator::JsonConfig;
pub use error::Error;
pub use error::Result;
use log::trace;

use crate::api::errors::input_error_handler;
use crate::services::pokemon::Service;

/// Configures the Pokedex API in an `actix_web` app.
///
/// Registers the error handler used for request bodies, the API endpoints
/// (see [`api::configure`]) and the OpenAPI documentation endpoints (see [`api::doc::configure`]).
/// Pokemons are loaded and saved through the given [`Service`].
///
/// Usually called through [`pokedex_app`].
pub fn configure_api(service: Service) -> impl FnOnce(&mut ServiceConfig) {
    move |config| {
        trace!("Registering request body error handler");
        config.app_data(JsonConfig::default().error_handler(input_error_handler));

        config
            .configure(api::configure(service))
            .configure(api::doc::configure);
    }
}

/// Creates the Pokedex `actix_web` [`App`](actix_web::App), using the given database connection
/// [`Pool`](db::Pool).
///
/// Requests are logged through the [`Logger`](actix_web::middleware::Logger) middleware.
///
/// # Examples
///
/// ```no_run
/// use actix_web::HttpServer;
/// use pokedex_api::db::get_pool;
/// use pokedex_api::pokedex_app;
///
/// # async fn serve() -> anyhow::Result<()> {
/// let pool = get_pool()?;
/// HttpServer::new(move || pokedex_app!(pool))
///     .bind(("127.0.0.1", 8080))?
///     .run()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! pokedex_app {
    ($pool:expr) => {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .configure($crate::configure_api(
                $crate::services::pokemon::Service::with_pool(($pool).clone()),
            ))
    };
}
