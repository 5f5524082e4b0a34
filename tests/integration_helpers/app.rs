use std::env;
use std::sync::Once;

use diesel::{delete, Connection, RunQueryDsl};
use log::{debug, trace};
use pokedex_api::db::{get_db_url, get_pool, get_test_db_url, Pool, PooledConnection, SyncConnection};
use pokedex_api::helpers::env::load_optional_dotenv;
use pokedex_api::migrations::run_pending_migrations;

#[macro_export]
macro_rules! init_test_service {
    ($app_var:ident, $service_var:ident) => {
        let $app_var = $crate::integration_helpers::app::TestApp::new();
        let $service_var =
            actix_web::test::init_service(pokedex_api::pokedex_app!($app_var.get_pool())).await;
    };
}

/// Points `DATABASE_URL` to the test database. Only done once per test run.
pub fn init_test_db_env() {
    static INIT_TEST_DB_ENV_VAR: Once = Once::new();
    INIT_TEST_DB_ENV_VAR.call_once(|| {
        debug!("Loading environment variables");
        load_optional_dotenv().unwrap();

        debug!("Setting environment variable required to connect to test DB");
        let db_url = get_test_db_url(&get_db_url().unwrap());
        env::set_var("DATABASE_URL", db_url);
    });
}

pub fn establish_test_connection() -> SyncConnection {
    init_test_db_env();

    SyncConnection::establish(&get_db_url().unwrap()).unwrap()
}

pub struct TestApp {
    pool: Pool,
}

impl TestApp {
    /// Prepares an empty `Pokemon` table in the test DB, then creates a connection pool.
    pub fn new() -> Self {
        use pokedex_api::schema::pokemon::dsl::*;

        let mut connection = establish_test_connection();

        debug!("Applying pending migrations to test DB");
        run_pending_migrations(&mut connection).unwrap();

        debug!("Deleting all pokemons in test DB");
        let deleted_count = delete(pokemon).execute(&mut connection).unwrap();
        trace!("Cleaned up {} pokemons from test DB", deleted_count);

        debug!("Creating test database connection pool");
        let pool = get_pool().unwrap();

        Self { pool }
    }

    pub fn get_pool(&self) -> Pool {
        self.pool.clone()
    }

    pub async fn get_pooled_connection(&self) -> PooledConnection {
        self.pool.get().await.unwrap()
    }
}
