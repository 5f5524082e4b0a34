use pokedex_api::models::pokemon::{CreatePokemon, PatchPokemon, ReplacePokemon};

pub fn build_create_pokemon(nombre: &str, tipo: &str) -> CreatePokemon {
    CreatePokemon {
        id: None,
        nombre: nombre.into(),
        tipo: tipo.into(),
        descripcion: format!("{} es un Pokémon de tipo {}.", nombre, tipo),
        imagen: format!("https://images.example.com/{}.png", nombre.to_lowercase()),
    }
}

pub fn build_chikorita() -> CreatePokemon {
    CreatePokemon {
        descripcion: "Le encanta tomar el sol. Usa la hoja de su cabeza para localizar sitios cálidos."
            .into(),
        imagen: "https://images.wikidexcdn.net/mwuploads/wikidex/4/4e/latest/20230523204350/Chikorita.png"
            .into(),
        ..build_create_pokemon("Chikorita", "Planta")
    }
}

pub fn build_replace_pokemon(orig_pokemon: &CreatePokemon) -> ReplacePokemon {
    let mut replacement: ReplacePokemon = orig_pokemon.clone().into();
    replacement.nombre.push_str("_reemplazado");
    replacement
}

pub fn build_patch_pokemon(tipo: &str) -> PatchPokemon {
    PatchPokemon { tipo: Some(tipo.into()), ..Default::default() }
}
