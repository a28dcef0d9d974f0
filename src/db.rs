use std::time::Duration;

use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Create a SeaORM connection to SQLite.
///
/// An in-memory database only lives as long as its connection, so the pool is
/// pinned to a single long-lived connection in that case.
pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);
    if database_url.contains(":memory:") || database_url.contains("mode=memory") {
        let forever = Duration::from_secs(60 * 60 * 24 * 365);
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(forever)
            .max_lifetime(forever);
    }
    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Apply the SQL files in `migrations/` that have not run yet.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(conn.get_sqlite_connection_pool())
        .await?;
    Ok(())
}
