//! Data access layer for the entities stored in the Pokedex database.

pub mod pokemon;
