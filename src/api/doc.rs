//! OpenAPI documentation support.

use actix_web::web::ServiceConfig;
use log::trace;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::api::errors::ErrorResponse;
use crate::models::pokemon::{CreatePokemon, PatchPokemon, Pokemon, ReplacePokemon};

/// Path where the OpenAPI document is served in JSON format.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Registers the various OpenAPI-related endpoints: swagger UI, Redoc and RapiDoc.
///
/// Called automatically from [`configure_api`](crate::configure_api).
pub fn configure(config: &mut ServiceConfig) {
    trace!("Adding OpenAPI doc endpoints");

    let openapi = ApiDoc::openapi();
    config
        .service(SwaggerUi::new("/swagger-ui/{_:.*}").url(OPENAPI_JSON_PATH, openapi.clone()))
        .service(Redoc::with_url("/redoc", openapi))
        .service(RapiDoc::new(OPENAPI_JSON_PATH).path("/rapidoc"));
}

/// API documentation in OpenAPI format.
///
/// Generated by the [`utoipa`] crate from the endpoint annotations in [`api::pokemon`].
#[derive(OpenApi)]
#[openapi(
    info(title = "Pokedex API", description = "CRUD REST API over the Pokedex"),
    paths(
        api::pokemon::list,
        api::pokemon::get,
        api::pokemon::create,
        api::pokemon::replace,
        api::pokemon::patch,
        api::pokemon::delete,
    ),
    components(
        schemas(Pokemon, CreatePokemon, ReplacePokemon, PatchPokemon, ErrorResponse),
        responses(Pokemon, ErrorResponse),
    )
)]
pub struct ApiDoc;
