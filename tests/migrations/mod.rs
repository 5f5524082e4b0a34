use assert_matches::assert_matches;
use diesel::sql_types::BigInt;
use diesel::{sql_query, QueryDsl, QueryableByName, RunQueryDsl};
use pokedex_api::db::SyncConnection;
use pokedex_api::migrations::{revert_all_migrations, run_pending_migrations};
use pokedex_api::models::pokemon::Pokemon;
use serial_test::file_serial;

use crate::integration_helpers::app::establish_test_connection;

#[derive(QueryableByName)]
struct TableCount {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

fn pokemon_table_exists(connection: &mut SyncConnection) -> bool {
    let table_count: TableCount = sql_query(
        "SELECT COUNT(*) AS count FROM information_schema.tables WHERE table_name = 'Pokemon'",
    )
    .get_result(connection)
    .unwrap();

    table_count.count > 0
}

#[test_log::test]
#[file_serial(pokedex_db)]
fn test_seed_and_teardown() {
    use pokedex_api::schema::pokemon::dsl::*;

    let mut connection = establish_test_connection();

    revert_all_migrations(&mut connection).unwrap();
    assert!(!pokemon_table_exists(&mut connection));
    assert_matches!(pokemon.count().get_result::<i64>(&mut connection), Err(_));

    assert_eq!(1, run_pending_migrations(&mut connection).unwrap());
    assert!(pokemon_table_exists(&mut connection));
    assert_eq!(151, pokemon.count().get_result::<i64>(&mut connection).unwrap());

    let pikachu: Pokemon = pokemon.find(25).get_result(&mut connection).unwrap();
    assert_eq!("Pikachu", pikachu.nombre);
    assert_eq!("Eléctrico", pikachu.tipo);

    assert_eq!(0, run_pending_migrations(&mut connection).unwrap());
    assert_eq!(151, pokemon.count().get_result::<i64>(&mut connection).unwrap());

    assert_eq!(1, revert_all_migrations(&mut connection).unwrap());
    assert!(!pokemon_table_exists(&mut connection));

    run_pending_migrations(&mut connection).unwrap();
}
