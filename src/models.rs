//! Models of the entities stored in the Pokedex database.

pub mod pokemon;
