//! Models used to load pokemons from the database and to receive pokemon data from API clients.
//!
//! [`Pokemon`] is the record as stored in the database. API clients never send a full
//! [`Pokemon`]; instead, each write operation has its own request model:
//!
//! | Model              | Used by              | Required fields                         |
//! |--------------------|----------------------|-----------------------------------------|
//! | [`CreatePokemon`]  | `POST /pokemon`      | `nombre`, `tipo`, `descripcion`, `imagen` |
//! | [`ReplacePokemon`] | `PUT /pokemon/{id}`  | `nombre`, `tipo`, `descripcion`, `imagen` |
//! | [`PatchPokemon`]   | `PATCH /pokemon/{id}`| none                                    |
//!
//! All request models also accept an optional `id`, so that a client can send back a pokemon
//! exactly as it received it. Keys that are not part of a model are ignored.

use diesel_derives::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToResponse, ToSchema};
use validator::Validate;

use crate::schema::pokemon;

#[cfg_attr(
    doc,
    doc = r"
        Pokemon entity model.

        Used to load pokemons from the database and to return them to API clients. Also
        used as the changeset when updating a pokemon; the [`id`](Pokemon::id) is never
        part of the changeset since it is the primary key.
    "
)]
#[cfg_attr(not(doc), doc = "Information about a Pokemon in the Pokedex")]
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Queryable,
    Selectable,
    AsChangeset,
    Serialize,
    Deserialize,
    ToSchema,
    ToResponse,
)]
#[diesel(table_name = pokemon, check_for_backend(diesel::pg::Pg))]
#[response(
    description = "Pokemon information",
    example = json!({
        "id": 152,
        "nombre": "Chikorita",
        "tipo": "Planta",
        "descripcion": "Le encanta tomar el sol.",
        "imagen": "https://images.wikidexcdn.net/mwuploads/wikidex/4/4e/latest/20230523204350/Chikorita.png"
    }),
)]
pub struct Pokemon {
    /// Unique id of this Pokemon in the Pokedex database
    pub id: i32,

    /// Pokemon name
    #[schema(example = "Chikorita")]
    pub nombre: String,

    /// Pokemon type(s); two types are separated by a slash
    #[schema(example = "Planta/Veneno")]
    pub tipo: String,

    /// Short description of the Pokemon
    pub descripcion: String,

    /// URL of an image of the Pokemon
    pub imagen: String,
}

impl Pokemon {
    /// Overwrites all fields of this pokemon (except its [`id`](Pokemon::id)) with the
    /// values in `replacement`.
    pub fn replace_with(&mut self, replacement: ReplacePokemon) {
        self.nombre = replacement.nombre;
        self.tipo = replacement.tipo;
        self.descripcion = replacement.descripcion;
        self.imagen = replacement.imagen;
    }

    /// Overwrites the fields of this pokemon that are specified in `patch`.
    ///
    /// Fields that are `None` in the patch are left untouched.
    pub fn apply_patch(&mut self, patch: PatchPokemon) {
        if let Some(nombre) = patch.nombre {
            self.nombre = nombre;
        }
        if let Some(tipo) = patch.tipo {
            self.tipo = tipo;
        }
        if let Some(descripcion) = patch.descripcion {
            self.descripcion = descripcion;
        }
        if let Some(imagen) = patch.imagen {
            self.imagen = imagen;
        }
    }
}

#[cfg_attr(
    doc,
    doc = r"
        Model used to insert a new pokemon in the database.

        All fields must be specified except for [`id`](CreatePokemon::id). When `id` is
        omitted (or `null`), the database assigns one. A client-specified `id` is inserted
        as-is; if it is already in use, the insert fails with a unique violation.
    "
)]
#[cfg_attr(not(doc), doc = "Information to create a new Pokemon in the Pokedex")]
#[derive(
    Debug, Clone, PartialEq, Eq, Insertable, Serialize, Deserialize, Validate, ToSchema,
)]
#[diesel(table_name = pokemon)]
pub struct CreatePokemon {
    /// Id to use for the new Pokemon; assigned by the database if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(nullable)]
    pub id: Option<i32>,

    /// Pokemon name
    #[schema(example = "Chikorita")]
    pub nombre: String,

    /// Pokemon type(s); two types are separated by a slash
    #[schema(example = "Planta")]
    pub tipo: String,

    /// Short description of the Pokemon
    #[schema(example = "Le encanta tomar el sol.")]
    pub descripcion: String,

    /// URL of an image of the Pokemon
    #[schema(
        example = "https://images.wikidexcdn.net/mwuploads/wikidex/4/4e/latest/20230523204350/Chikorita.png"
    )]
    pub imagen: String,
}

impl From<Pokemon> for CreatePokemon {
    /// Converts a [`Pokemon`] into a [`CreatePokemon`], dropping its [`id`](Pokemon::id).
    fn from(value: Pokemon) -> Self {
        Self {
            id: None,
            nombre: value.nombre,
            tipo: value.tipo,
            descripcion: value.descripcion,
            imagen: value.imagen,
        }
    }
}

/// Information to replace all fields of a Pokemon in the Pokedex
///
/// Every field except `id` is required; if `id` is specified, it must match the id in
/// the request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReplacePokemon {
    /// Id of the Pokemon; must match the id in the request path if specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(nullable)]
    pub id: Option<i32>,

    /// Pokemon name
    #[schema(example = "Chikorita")]
    pub nombre: String,

    /// Pokemon type(s); two types are separated by a slash
    #[schema(example = "Planta")]
    pub tipo: String,

    /// Short description of the Pokemon
    #[schema(example = "Le encanta tomar el sol.")]
    pub descripcion: String,

    /// URL of an image of the Pokemon
    pub imagen: String,
}

impl From<CreatePokemon> for ReplacePokemon {
    fn from(value: CreatePokemon) -> Self {
        Self {
            id: value.id,
            nombre: value.nombre,
            tipo: value.tipo,
            descripcion: value.descripcion,
            imagen: value.imagen,
        }
    }
}

#[cfg_attr(
    doc,
    doc = r#"
        Model used to "patch" a pokemon, e.g. update some fields only.

        All fields are optional; fields that are not specified (or `null`) are not updated.
        If `id` is specified, it must match the id in the request path.
    "#
)]
#[cfg_attr(not(doc), doc = "Information to update specific fields of a Pokemon in the Pokedex")]
#[derive(
    Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema,
)]
#[schema(example = json!({
    "tipo": "Planta/Tierra"
}))]
pub struct PatchPokemon {
    /// Id of the Pokemon; must match the id in the request path if specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    /// Pokemon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,

    /// Pokemon type(s); two types are separated by a slash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,

    /// Short description of the Pokemon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,

    /// URL of an image of the Pokemon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagen: Option<String>,
}

/// Filters used when listing pokemons.
///
/// Each filter that is specified must match exactly (case-sensitive); filters that are
/// not specified do not constrain the results.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PokemonFilter {
    /// Only return Pokemons with this exact name
    #[param(example = "Pikachu")]
    pub nombre: Option<String>,

    /// Only return Pokemons with this exact type
    #[param(example = "Eléctrico")]
    pub tipo: Option<String>,
}

impl PokemonFilter {
    /// Builds a filter from decoded query string pairs.
    ///
    /// Each filter is read independently. A parameter that appears more than once is
    /// ambiguous, so that filter is left unset; the other filter still applies. Unknown
    /// parameters are ignored.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut nombre = QueryValue::Absent;
        let mut tipo = QueryValue::Absent;
        for (key, value) in pairs {
            match key.as_ref() {
                "nombre" => nombre.push(value.into()),
                "tipo" => tipo.push(value.into()),
                _ => {},
            }
        }

        Self { nombre: nombre.into_single(), tipo: tipo.into_single() }
    }

    /// Returns `true` if the given pokemon satisfies all filters.
    pub fn matches(&self, pokemon: &Pokemon) -> bool {
        self.nombre.as_ref().map_or(true, |nombre| *nombre == pokemon.nombre)
            && self.tipo.as_ref().map_or(true, |tipo| *tipo == pokemon.tipo)
    }
}

/// Value(s) seen for one query parameter.
enum QueryValue {
    Absent,
    Single(String),
    Repeated,
}

impl QueryValue {
    fn push(&mut self, value: String) {
        *self = match self {
            QueryValue::Absent => QueryValue::Single(value),
            _ => QueryValue::Repeated,
        };
    }

    fn into_single(self) -> Option<String> {
        match self {
            QueryValue::Single(value) => Some(value),
            _ => None,
        }
    }
}
