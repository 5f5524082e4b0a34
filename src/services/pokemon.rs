//! Service used to load and save pokemons. Used by the Pokedex REST API.

use std::sync::Arc;

use crate::db::Pool;
use crate::models::pokemon::{CreatePokemon, PatchPokemon, Pokemon, PokemonFilter, ReplacePokemon};
use crate::repositories::pokemon::{PgPokemonRepository, PokemonRepository};
use crate::Error;

/// Service implementation for [`Pokemon`] entities.
///
/// This type contains the business logic to fetch/save pokemons. It will be used by the
/// [pokemon REST API endpoint implementations](crate::api::pokemon) to handle operations
/// regarding [`Pokemon`] entities. Storage itself is delegated to a [`PokemonRepository`].
#[derive(Clone)]
pub struct Service {
    repository: Arc<dyn PokemonRepository>,
}

impl Service {
    /// Creates a new pokemon service storing pokemons in the given repository.
    pub fn new(repository: Arc<dyn PokemonRepository>) -> Self {
        Self { repository }
    }

    /// Creates a new pokemon service storing pokemons in the Postgres database reachable
    /// through the provided connection [`Pool`].
    pub fn with_pool(pool: Pool) -> Self {
        Self::new(Arc::new(PgPokemonRepository::new(pool)))
    }

    /// Returns all [`Pokemon`]s matching the given filter.
    pub async fn get_pokemons(&self, filter: &PokemonFilter) -> crate::Result<Vec<Pokemon>> {
        self.repository.find_all(filter).await
    }

    /// Returns the [`Pokemon`] with the given ID.
    ///
    /// Returns a [`NotFound`](Error::NotFound) error if it does not exist.
    pub async fn get_pokemon(&self, pokemon_id: i32) -> crate::Result<Pokemon> {
        self.repository
            .find(pokemon_id)
            .await?
            .ok_or_else(|| Error::not_found(pokemon_id))
    }

    /// Creates a new [`Pokemon`] and adds it to the database.
    pub async fn create_pokemon(&self, new_pokemon: &CreatePokemon) -> crate::Result<Pokemon> {
        self.repository.insert(new_pokemon).await
    }

    /// Replaces all fields of the [`Pokemon`] with the given ID.
    ///
    /// `replacement` is only called once the pokemon has been found, so a missing pokemon is
    /// reported as [`NotFound`](Error::NotFound) even if the replacement cannot be decoded.
    ///
    /// To update certain fields only, use [`patch_pokemon`](Service::patch_pokemon) instead.
    pub async fn replace_pokemon<F>(&self, pokemon_id: i32, replacement: F) -> crate::Result<Pokemon>
    where
        F: FnOnce() -> crate::Result<ReplacePokemon>,
    {
        let mut pokemon = self.get_pokemon(pokemon_id).await?;
        let replacement = replacement()?;
        check_body_id(pokemon_id, replacement.id)?;

        pokemon.replace_with(replacement);
        self.repository.update(&pokemon).await
    }

    /// Updates the fields of the [`Pokemon`] with the given ID that are specified in the patch
    /// returned by `patch`.
    ///
    /// As for [`replace_pokemon`](Service::replace_pokemon), `patch` is only called once the
    /// pokemon has been found. The pokemon is saved even if the patch is empty.
    pub async fn patch_pokemon<F>(&self, pokemon_id: i32, patch: F) -> crate::Result<Pokemon>
    where
        F: FnOnce() -> crate::Result<PatchPokemon>,
    {
        let mut pokemon = self.get_pokemon(pokemon_id).await?;
        let patch = patch()?;
        check_body_id(pokemon_id, patch.id)?;

        pokemon.apply_patch(patch);
        self.repository.update(&pokemon).await
    }

    /// Deletes the pokemon with the given ID.
    ///
    /// Returns a [`NotFound`](Error::NotFound) error if it does not exist.
    pub async fn delete_pokemon(&self, pokemon_id: i32) -> crate::Result<()> {
        if self.repository.delete(pokemon_id).await? {
            Ok(())
        } else {
            Err(Error::not_found(pokemon_id))
        }
    }
}

/// Ensures that an `id` specified in a request body, if any, matches the id in the request path.
fn check_body_id(path_id: i32, body_id: Option<i32>) -> crate::Result<()> {
    match body_id {
        Some(body_id) if body_id != path_id => Err(Error::id_mismatch(path_id, body_id)),
        _ => Ok(()),
    }
}
