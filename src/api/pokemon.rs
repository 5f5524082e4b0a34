//! Implementation of the Pokedex REST API endpoints for pokemons.
//!
//! # Endpoints
//!
//! | HTTP method | Endpoint        | Usage                                              | See                       |
//! |-------------|-----------------|----------------------------------------------------|---------------------------|
//! | `GET`       | `/pokemon`      | Lists pokemons, optionally filtered by name/type   | [`list`]                  |
//! | `GET`       | `/pokemon/{id}` | Returns one pokemon, using its ID                  | [`get`](struct@get)       |
//! | `POST`      | `/pokemon`      | Adds a new pokemon                                 | [`create`]                |
//! | `PUT`       | `/pokemon/{id}` | Replaces all fields of the pokemon with the given ID | [`replace`]             |
//! | `PATCH`     | `/pokemon/{id}` | Updates some fields of the pokemon with the given ID | [`patch`](struct@patch) |
//! | `DELETE`    | `/pokemon/{id}` | Deletes the pokemon with the given ID              | [`delete`](struct@delete) |

pub mod doc;

use actix_web::web::{Bytes, Data, Query, ServiceConfig};
use actix_web::{delete, get, patch, post, put, HttpResponse};
use actix_web_validator::{Json, Path, PathConfig};
use log::trace;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::Validate;

use crate::api::errors::not_found_path_error_handler;
use crate::api::pokemon::doc::{
    IdNotFoundResponse, InvalidOrMismatchedPokemonBodyResponse, InvalidPokemonBodyResponse,
    ServerErrorResponse,
};
use crate::models::pokemon::{CreatePokemon, PatchPokemon, Pokemon, PokemonFilter, ReplacePokemon};
use crate::services::pokemon;

/// Allows registration of all pokemon REST API endpoints.
///
/// See [module documentation](self) for the entire list of supported endpoints.
/// Called automatically from [`api::configure`](crate::api::configure).
pub fn configure(service: pokemon::Service) -> impl FnOnce(&mut ServiceConfig) {
    move |config| {
        trace!("Registering Pokemon service app data");
        config
            .app_data(Data::new(service))
            .app_data(PathConfig::default().error_handler(not_found_path_error_handler));

        trace!("Adding API CRUD endpoints for /pokemon");
        config
            .service(list)
            .service(get)
            .service(create)
            .service(replace)
            .service(patch)
            .service(delete);
    }
}

/// [`Result`](crate::Result) definition used to return [`HttpResponse`]s from API endpoints.
///
/// If an [`Error`](crate::Error) is returned, it is converted to an appropriate [`HttpResponse`]
/// by the error handling code (see [`ErrorResponse::from`](crate::api::errors::ErrorResponse::from) for details).
pub type HttpResult = crate::Result<HttpResponse>;

/// Path parameter used for endpoints with a Pokemon id ([`get`](struct@get), [`replace`],
/// [`patch`](struct@patch) and [`delete`](struct@delete)).
///
/// An id that cannot be parsed (or is not positive) results in a `404 Not Found` response.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct Id {
    /// id of Pokemon in database
    #[validate(range(min = 1))]
    #[param(minimum = 1)]
    pub id: i32,
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to list pokemons.

        Registered as `GET /pokemon`.

        # Input

        | Query parameter | Usage                                      |
        |-----------------|--------------------------------------------|
        | `nombre`        | Only return pokemons with this exact name  |
        | `tipo`          | Only return pokemons with this exact type  |

        Both filters are optional; when both are specified, pokemons must match both. Each
        parameter is read on its own: a parameter given more than once is ignored, and a
        query string that cannot be decoded at all returns every pokemon.

        # Output

        A JSON array of [`Pokemon`]s, ordered by id.
    "
)]
#[cfg_attr(not(doc), doc = "Lists Pokemons in the Pokedex")]
#[utoipa::path(
    context_path = "/pokemon",
    params(PokemonFilter),
    responses(
        (status = OK, description = "Pokemons matching the filters", body = [Pokemon]),
        ServerErrorResponse,
    ),
)]
#[get("", name = "/")]
pub async fn list(
    query: Option<Query<Vec<(String, String)>>>,
    service: Data<pokemon::Service>,
) -> HttpResult {
    let filter = query
        .map(|query| PokemonFilter::from_query_pairs(query.into_inner()))
        .unwrap_or_default();
    let pokemons = service.get_ref().get_pokemons(&filter).await?;

    Ok(HttpResponse::Ok().json(pokemons))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to fetch one pokemon.

        Registered as `GET /pokemon/{id}`.

        # Input

        - `{id}`: ID of pokemon to fetch.

        # Output

        A [`Pokemon`], serialized as JSON.
    "
)]
#[cfg_attr(not(doc), doc = "Returns information about a Pokemon")]
#[utoipa::path(
    context_path = "/pokemon",
    params(Id),
    responses(
        (status = OK, response = Pokemon),
        IdNotFoundResponse,
        ServerErrorResponse,
    ),
)]
#[get("/{id}", name = "/{id}")]
pub async fn get(id: Path<Id>, service: Data<pokemon::Service>) -> HttpResult {
    let pokemon = service.get_ref().get_pokemon(id.into_inner().id).await?;

    Ok(HttpResponse::Ok().json(pokemon))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to add a new pokemon.

        Registered as `POST /pokemon`.

        # Input

        - Request body: the pokemon data, as a JSON-serialized [`CreatePokemon`]. All fields
                        except `id` are required.

        # Output

        `201 Created`, with the newly-inserted [`Pokemon`] serialized as JSON.
    "
)]
#[cfg_attr(not(doc), doc = "Creates a new Pokemon")]
#[utoipa::path(
    context_path = "/pokemon",
    request_body(
        content = inline(CreatePokemon),
        description = "New Pokemon information",
    ),
    responses(
        (status = CREATED, response = Pokemon),
        InvalidPokemonBodyResponse,
        ServerErrorResponse,
    ),
)]
#[post("", name = "/")]
pub async fn create(
    new_pokemon: Json<CreatePokemon>,
    service: Data<pokemon::Service>,
) -> HttpResult {
    let pokemon = service.get_ref().create_pokemon(&new_pokemon).await?;

    Ok(HttpResponse::Created().json(pokemon))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to replace a pokemon.

        Overwrites all fields of the pokemon in one go. Registered as `PUT /pokemon/{id}`.

        # Input

        - `{id}`: ID of pokemon to replace.
        - Request body: the new pokemon data, as a JSON-serialized [`ReplacePokemon`]. Must
                        include all fields except `id`, or the request will be rejected.
                        The body is only decoded once the pokemon is found, so an unknown
                        id results in `404 Not Found` whatever the body contains.

        # Output

        The updated [`Pokemon`], serialized as JSON.
    "
)]
#[cfg_attr(not(doc), doc = "Replaces a Pokemon")]
#[utoipa::path(
    context_path = "/pokemon",
    params(Id),
    request_body(
        content = inline(ReplacePokemon),
        description = "Replacement Pokemon information",
    ),
    responses(
        (status = OK, response = Pokemon),
        InvalidOrMismatchedPokemonBodyResponse,
        IdNotFoundResponse,
        ServerErrorResponse,
    ),
)]
#[put("/{id}", name = "/{id}")]
pub async fn replace(id: Path<Id>, body: Bytes, service: Data<pokemon::Service>) -> HttpResult {
    let pokemon = service
        .get_ref()
        .replace_pokemon(id.into_inner().id, || decode_body(&body))
        .await?;

    Ok(HttpResponse::Ok().json(pokemon))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to update some fields of a pokemon.

        Any field not specified is left unchanged. Registered as `PATCH /pokemon/{id}`.

        # Input

        - `{id}`: ID of pokemon to update.
        - Request body: the fields to update, as a JSON-serialized [`PatchPokemon`]. Like
                        for [`replace`], it is only decoded once the pokemon is found.

        # Output

        The updated [`Pokemon`], serialized as JSON.
    "
)]
#[cfg_attr(not(doc), doc = "Updates specific fields of a Pokemon")]
#[utoipa::path(
    context_path = "/pokemon",
    params(Id),
    request_body(
        content = inline(PatchPokemon),
        description = "Specific Pokemon fields to update",
    ),
    responses(
        (status = OK, response = Pokemon),
        InvalidOrMismatchedPokemonBodyResponse,
        IdNotFoundResponse,
        ServerErrorResponse,
    ),
)]
#[patch("/{id}", name = "/{id}")]
pub async fn patch(id: Path<Id>, body: Bytes, service: Data<pokemon::Service>) -> HttpResult {
    let pokemon = service
        .get_ref()
        .patch_pokemon(id.into_inner().id, || decode_body(&body))
        .await?;

    Ok(HttpResponse::Ok().json(pokemon))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to delete a pokemon.

        Registered as `DELETE /pokemon/{id}`.

        # Input

        - `{id}`: ID of pokemon to delete.

        # Output

        This endpoint simply returns `HTTP 204 No Content` upon success.
    "
)]
#[cfg_attr(not(doc), doc = "Deletes a Pokemon")]
#[utoipa::path(
    context_path = "/pokemon",
    params(Id),
    responses(
        (status = NO_CONTENT, description = "Pokemon deleted from Pokedex"),
        IdNotFoundResponse,
        ServerErrorResponse,
    ),
)]
#[delete("/{id}", name = "/{id}")]
pub async fn delete(id: Path<Id>, service: Data<pokemon::Service>) -> HttpResult {
    service.get_ref().delete_pokemon(id.into_inner().id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Decodes and validates a JSON request body.
///
/// Failures are reported as [`Input`](crate::Error::Input) errors, like those of the [`Json`]
/// extractor.
fn decode_body<T>(body: &[u8]) -> crate::Result<T>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_slice(body).map_err(actix_web_validator::Error::from)?;
    value.validate().map_err(actix_web_validator::Error::from)?;

    Ok(value)
}
