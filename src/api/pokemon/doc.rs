//! [`IntoResponses`] wrappers for the pokemon REST API endpoints.
//!
//! These helper types are used to document the possible API responses using [`utoipa::path`].

use utoipa::IntoResponses;

use crate::api::errors::ErrorResponse;

/// [`IntoResponses`] wrapper for bad Pokemon request bodies.
///
/// Can be used to document 400 API error responses using [`utoipa::path`].
#[derive(Debug, IntoResponses)]
#[response(
    status = BAD_REQUEST,
    description = "Invalid Pokemon information in request body, or id already in use",
)]
pub struct InvalidPokemonBodyResponse(#[to_response] ErrorResponse);

/// [`IntoResponses`] wrapper for bad Pokemon request bodies, including a body `id` that
/// does not match the `id` path parameter.
///
/// Can be used to document 400 API error responses using [`utoipa::path`].
#[derive(Debug, IntoResponses)]
#[response(
    status = BAD_REQUEST,
    description = "Invalid Pokemon information in request body, or id in body does not match id in path",
)]
pub struct InvalidOrMismatchedPokemonBodyResponse(#[to_response] ErrorResponse);

/// [`IntoResponses`] wrapper for `Pokemon not found` errors.
///
/// Also returned when the `id` path parameter is not a valid pokemon id.
#[derive(Debug, IntoResponses)]
#[response(status = NOT_FOUND, description = "Requested Pokemon not found in database")]
pub struct IdNotFoundResponse(#[to_response] ErrorResponse);

/// [`IntoResponses`] wrapper for internal server errors.
///
/// Can be used to document 5XX API error responses using [`utoipa::path`].
#[derive(Debug, IntoResponses)]
#[response(status = "5XX")]
pub struct ServerErrorResponse(#[to_response] ErrorResponse);
