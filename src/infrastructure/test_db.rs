//! Throwaway Postgres for repository tests.

use diesel_migrations::MigrationHarness;
use testcontainers::{ContainerAsync, GenericImage};

use super::test_postgres::start_postgres;
use crate::db::{create_pool, DbPool};

pub async fn setup_db() -> (ContainerAsync<GenericImage>, DbPool) {
    let (container, url) = start_postgres().await;
    let pool = create_pool(&url, 4).expect("Failed to create pool");
    {
        let mut conn = pool.get().expect("Failed to get connection");
        conn.run_pending_migrations(crate::MIGRATIONS)
            .expect("Failed to run migrations");
    }
    (container, pool)
}
