//! Services implementing the Pokedex business logic.

pub mod pokemon;
