use crate::config::AppConfig;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

// Database connection manager
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    // Create a new database connection pool
    pub async fn new(config: &AppConfig) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.database_url)
            .await?;

        Ok(Database { pool })
    }

    // Single-connection in-memory store with the schema applied.
    // The connection must never be recycled, or the data goes with it.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let db = Database { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        log::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        log::info!("Migrations completed");
        Ok(())
    }

    // Get a reference to the connection pool
    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}
