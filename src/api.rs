//! Types and functions used to implement the Pokedex REST API.

pub mod doc;
pub mod errors;
pub mod pokemon;

use actix_web::web::ServiceConfig;
use actix_web::{get, web, HttpResponse, Responder};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::services::pokemon::Service;

/// Allows registration of the Pokedex API: the `/` hello endpoint and the `/pokemon` scope.
///
/// Called automatically from [`configure_api`](crate::configure_api).
pub fn configure(service: Service) -> impl FnOnce(&mut ServiceConfig) {
    move |config| {
        trace!("Adding API endpoints");
        config
            .service(hello)
            .service(web::scope("/pokemon").configure(pokemon::configure(service)));
    }
}

/// Data returned by the [`hello`](struct@hello) endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hello {
    /// Greeting message
    pub message: String,
}

impl Default for Hello {
    fn default() -> Self {
        Self { message: "Hello from the Pokedex API!".into() }
    }
}

/// Handler for the `/` endpoint. Simply returns a hello message.
///
/// Can be used as a health check.
#[get("/")]
pub async fn hello() -> impl Responder {
    HttpResponse::Ok().json(Hello::default())
}
