//! Repository used to load and save [`Pokemon`] records.

use async_trait::async_trait;
use diesel::{insert_into, ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;

use crate::db::{Pool, PooledConnection};
use crate::error::QueryContext;
use crate::models::pokemon::{CreatePokemon, Pokemon, PokemonFilter};

/// Data access interface for [`Pokemon`] records.
///
/// Implementations only deal with storage; business rules (like what to do when a pokemon
/// is not found) live in the [pokemon service](crate::services::pokemon::Service).
#[async_trait]
pub trait PokemonRepository: Send + Sync {
    /// Returns the pokemon with the given id, or `None` if it does not exist.
    async fn find(&self, id: i32) -> crate::Result<Option<Pokemon>>;

    /// Returns all pokemons matching the given filter, ordered by id.
    async fn find_all(&self, filter: &PokemonFilter) -> crate::Result<Vec<Pokemon>>;

    /// Inserts a new pokemon and returns it as stored.
    async fn insert(&self, new_pokemon: &CreatePokemon) -> crate::Result<Pokemon>;

    /// Saves all fields of an existing pokemon and returns it as stored.
    ///
    /// Fails with a [`NotFound`](diesel::result::Error::NotFound) query error if no pokemon
    /// with the same [`id`](Pokemon::id) exists.
    async fn update(&self, pokemon: &Pokemon) -> crate::Result<Pokemon>;

    /// Deletes the pokemon with the given id. Returns `false` if it did not exist.
    async fn delete(&self, id: i32) -> crate::Result<bool>;
}

/// [`PokemonRepository`] storing pokemons in the Postgres `Pokemon` table.
#[derive(Clone)]
pub struct PgPokemonRepository {
    pool: Pool,
}

impl PgPokemonRepository {
    /// Creates a new repository using the provided database connection [`Pool`].
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Returns a [`PooledConnection`] from our internal database connection pool.
    async fn get_pooled_connection(&self) -> crate::Result<PooledConnection> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait]
impl PokemonRepository for PgPokemonRepository {
    async fn find(&self, pokemon_id: i32) -> crate::Result<Option<Pokemon>> {
        use crate::schema::pokemon::dsl::*;

        let mut connection = self.get_pooled_connection().await?;

        pokemon
            .find(pokemon_id)
            .select(Pokemon::as_select())
            .first(&mut connection)
            .await
            .optional()
            .with_query_context(|| format!("failed to fetch pokemon with id {}", pokemon_id))
    }

    async fn find_all(&self, filter: &PokemonFilter) -> crate::Result<Vec<Pokemon>> {
        use crate::schema::pokemon::dsl::*;

        let mut connection = self.get_pooled_connection().await?;

        let mut query = pokemon
            .select(Pokemon::as_select())
            .order(id)
            .into_boxed();
        if let Some(name_filter) = &filter.nombre {
            query = query.filter(nombre.eq(name_filter.as_str()));
        }
        if let Some(type_filter) = &filter.tipo {
            query = query.filter(tipo.eq(type_filter.as_str()));
        }

        query
            .load(&mut connection)
            .await
            .with_query_context(|| format!("failed to load pokemons (filter: {:?})", filter))
    }

    async fn insert(&self, new_pokemon: &CreatePokemon) -> crate::Result<Pokemon> {
        use crate::schema::pokemon::dsl::*;

        let mut connection = self.get_pooled_connection().await?;

        insert_into(pokemon)
            .values(new_pokemon)
            .returning(Pokemon::as_returning())
            .get_result(&mut connection)
            .await
            .with_query_context(|| "failed to insert new pokemon")
    }

    async fn update(&self, record: &Pokemon) -> crate::Result<Pokemon> {
        use crate::schema::pokemon::dsl::*;

        let mut connection = self.get_pooled_connection().await?;

        diesel::update(pokemon.find(record.id))
            .set(record)
            .returning(Pokemon::as_returning())
            .get_result(&mut connection)
            .await
            .with_query_context(|| format!("failed to update pokemon {}", record.id))
    }

    async fn delete(&self, pokemon_id: i32) -> crate::Result<bool> {
        use crate::schema::pokemon::dsl::*;

        let mut connection = self.get_pooled_connection().await?;

        diesel::delete(pokemon.find(pokemon_id))
            .execute(&mut connection)
            .await
            .map(|deleted_count| deleted_count > 0)
            .with_query_context(|| format!("failed to delete pokemon {}", pokemon_id))
    }
}
