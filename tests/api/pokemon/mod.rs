mod list {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use diesel::insert_into;
    use diesel_async::RunQueryDsl;
    use pokedex_api::models::pokemon::Pokemon;
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::app::TestApp;
    use crate::integration_helpers::factories::pokemon::build_create_pokemon;

    async fn insert_pokemons(app: &TestApp) {
        use pokedex_api::schema::pokemon::dsl::*;

        let new_pokemons = vec![
            build_create_pokemon("Pikachu", "Eléctrico"),
            build_create_pokemon("Raichu", "Eléctrico"),
            build_create_pokemon("Pikachu", "Normal"),
            build_create_pokemon("Bulbasaur", "Planta/Veneno"),
        ];
        let mut connection = app.get_pooled_connection().await;
        let inserted_count = insert_into(pokemon)
            .values(&new_pokemons)
            .execute(&mut connection)
            .await
            .unwrap();
        assert_eq!(4, inserted_count);
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_empty_list() {
        init_test_service!(app, service);

        let req = test::TestRequest::with_uri("/pokemon").to_request();
        let pokemons: Vec<Pokemon> = test::call_and_read_body_json(&service, req).await;

        assert!(pokemons.is_empty());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_all() {
        init_test_service!(app, service);
        insert_pokemons(&app).await;

        let req = test::TestRequest::with_uri("/pokemon").to_request();
        let pokemons: Vec<Pokemon> = test::call_and_read_body_json(&service, req).await;

        let names: Vec<_> = pokemons.iter().map(|p| p.nombre.as_str()).collect();
        assert_eq!(vec!["Pikachu", "Raichu", "Pikachu", "Bulbasaur"], names);
        assert!(pokemons.windows(2).all(|pair| pair[0].id < pair[1].id));
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_name_filter() {
        init_test_service!(app, service);
        insert_pokemons(&app).await;

        let req = test::TestRequest::with_uri("/pokemon?nombre=Pikachu").to_request();
        let pokemons: Vec<Pokemon> = test::call_and_read_body_json(&service, req).await;

        assert_eq!(2, pokemons.len());
        assert!(pokemons.iter().all(|p| p.nombre == "Pikachu"));
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_name_and_type_filter() {
        init_test_service!(app, service);
        insert_pokemons(&app).await;

        let req = test::TestRequest::with_uri("/pokemon?nombre=Pikachu&tipo=El%C3%A9ctrico")
            .to_request();
        let pokemons: Vec<Pokemon> = test::call_and_read_body_json(&service, req).await;

        assert_eq!(1, pokemons.len());
        assert_eq!("Pikachu", pokemons[0].nombre);
        assert_eq!("Eléctrico", pokemons[0].tipo);
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_type_filter() {
        init_test_service!(app, service);
        insert_pokemons(&app).await;

        let req = test::TestRequest::with_uri("/pokemon?tipo=Planta%2FVeneno").to_request();
        let pokemons: Vec<Pokemon> = test::call_and_read_body_json(&service, req).await;

        assert_eq!(1, pokemons.len());
        assert_eq!("Bulbasaur", pokemons[0].nombre);
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_unknown_query_param_is_ignored() {
        init_test_service!(app, service);
        insert_pokemons(&app).await;

        let req = test::TestRequest::with_uri("/pokemon?generacion=1").to_request();
        let resp = test::call_service(&service, req).await;

        assert_eq!(StatusCode::OK, resp.status());
        let pokemons: Vec<Pokemon> = test::read_body_json(resp).await;
        assert_eq!(4, pokemons.len());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_repeated_type_filter_keeps_name_filter() {
        init_test_service!(app, service);
        insert_pokemons(&app).await;

        let req = test::TestRequest::with_uri("/pokemon?nombre=Pikachu&tipo=A&tipo=B").to_request();
        let pokemons: Vec<Pokemon> = test::call_and_read_body_json(&service, req).await;

        assert_eq!(2, pokemons.len());
        assert!(pokemons.iter().all(|p| p.nombre == "Pikachu"));
    }
}

mod crud {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use pokedex_api::api::errors::ErrorResponse;
    use pokedex_api::models::pokemon::{CreatePokemon, Pokemon};
    use serde_json::json;
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::pokemon::{
        build_chikorita, build_create_pokemon, build_patch_pokemon, build_replace_pokemon,
    };

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_chikorita_lifecycle() {
        init_test_service!(app, service);

        let new_pokemon = build_chikorita();
        let req = test::TestRequest::post()
            .uri("/pokemon")
            .set_json(&new_pokemon)
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(StatusCode::CREATED, resp.status());
        let created: Pokemon = test::read_body_json(resp).await;
        assert_eq!(new_pokemon, CreatePokemon::from(created.clone()));

        let req = test::TestRequest::get()
            .uri(&format!("/pokemon/{}", created.id))
            .to_request();
        let fetched: Pokemon = test::call_and_read_body_json(&service, req).await;
        assert_eq!(created, fetched);

        let req = test::TestRequest::patch()
            .uri(&format!("/pokemon/{}", created.id))
            .set_json(build_patch_pokemon("Planta/Tierra"))
            .to_request();
        let patched: Pokemon = test::call_and_read_body_json(&service, req).await;
        assert_eq!(Pokemon { tipo: "Planta/Tierra".into(), ..created.clone() }, patched);

        let req = test::TestRequest::delete()
            .uri(&format!("/pokemon/{}", created.id))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(StatusCode::NO_CONTENT, resp.status());

        let req = test::TestRequest::get()
            .uri(&format!("/pokemon/{}", created.id))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(StatusCode::NOT_FOUND, resp.status());
        let error_response: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(StatusCode::NOT_FOUND, error_response.status_code);
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_replace() {
        init_test_service!(app, service);

        let new_pokemon = build_create_pokemon("Eevee", "Normal");
        let req = test::TestRequest::post()
            .uri("/pokemon")
            .set_json(&new_pokemon)
            .to_request();
        let created: Pokemon = test::call_and_read_body_json(&service, req).await;

        let replacement = build_replace_pokemon(&new_pokemon);
        let req = test::TestRequest::put()
            .uri(&format!("/pokemon/{}", created.id))
            .set_json(&replacement)
            .to_request();
        let replaced: Pokemon = test::call_and_read_body_json(&service, req).await;

        assert_eq!(created.id, replaced.id);
        assert_eq!(replacement.nombre, replaced.nombre);
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_replace_missing_field() {
        init_test_service!(app, service);

        let req = test::TestRequest::post()
            .uri("/pokemon")
            .set_json(build_create_pokemon("Eevee", "Normal"))
            .to_request();
        let created: Pokemon = test::call_and_read_body_json(&service, req).await;

        let req = test::TestRequest::put()
            .uri(&format!("/pokemon/{}", created.id))
            .set_json(json!({ "nombre": "Vaporeon", "tipo": "Agua", "descripcion": "Evolución de Eevee." }))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, resp.status());

        let req = test::TestRequest::get()
            .uri(&format!("/pokemon/{}", created.id))
            .to_request();
        let fetched: Pokemon = test::call_and_read_body_json(&service, req).await;
        assert_eq!(created, fetched);
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_create_with_colliding_id() {
        init_test_service!(app, service);

        let req = test::TestRequest::post()
            .uri("/pokemon")
            .set_json(build_create_pokemon("Eevee", "Normal"))
            .to_request();
        let created: Pokemon = test::call_and_read_body_json(&service, req).await;

        let colliding = CreatePokemon {
            id: Some(created.id),
            ..build_create_pokemon("Flareon", "Fuego")
        };
        let req = test::TestRequest::post()
            .uri("/pokemon")
            .set_json(&colliding)
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, resp.status());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_update_nonexistent_with_invalid_body() {
        init_test_service!(app, service);

        let req = test::TestRequest::put()
            .uri("/pokemon/424242")
            .set_json(json!({ "nombre": "X" }))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(StatusCode::NOT_FOUND, resp.status());

        let req = test::TestRequest::patch()
            .uri("/pokemon/424242")
            .set_json(json!({ "tipo": 12 }))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(StatusCode::NOT_FOUND, resp.status());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_unknown_fields_ignored() {
        init_test_service!(app, service);

        let req = test::TestRequest::post()
            .uri("/pokemon")
            .set_json(json!({
                "nombre": "Eevee",
                "tipo": "Normal",
                "descripcion": "Su código genético es inestable.",
                "imagen": "https://images.example.com/eevee.png",
                "generacion": 1,
            }))
            .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(StatusCode::CREATED, resp.status());
        let created: Pokemon = test::read_body_json(resp).await;

        let req = test::TestRequest::patch()
            .uri(&format!("/pokemon/{}", created.id))
            .set_json(json!({ "tipo": "Acero", "extra": 1 }))
            .to_request();
        let patched: Pokemon = test::call_and_read_body_json(&service, req).await;
        assert_eq!("Acero", patched.tipo);
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(pokedex_db)]
    async fn test_delete_nonexistent() {
        init_test_service!(app, service);

        let req = test::TestRequest::delete().uri("/pokemon/424242").to_request();
        let resp = test::call_service(&service, req).await;

        assert_eq!(StatusCode::NOT_FOUND, resp.status());
    }
}
