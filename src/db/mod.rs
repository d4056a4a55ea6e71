//! Database connection pool, migrations, and health check.
//!
//! One shared Postgres pool; every store operation checks a connection out
//! for its own statements and returns it on every exit path. Schema lives
//! in the embedded sqlx migrations.

pub mod work;

use crate::dates::DateParsing;
use crate::error::Result;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Database handle. Owns the connection pool and the date-handling mode
/// applied to create/update input.
pub struct Db {
    pool: PgPool,
    date_parsing: DateParsing,
}

impl Db {
    /// Connect to Postgres and create a connection pool.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(url)
            .await?;
        Ok(Self {
            pool,
            date_parsing: DateParsing::default(),
        })
    }

    /// Switch between lenient date handling (unparseable text goes to the
    /// database and fails there) and strict (rejected before any SQL runs).
    pub fn with_date_parsing(mut self, mode: DateParsing) -> Self {
        self.date_parsing = mode;
        self
    }

    /// Run all pending migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| crate::error::Error::Other(format!("migration failed: {e}")))?;
        tracing::debug!("migrations applied");
        Ok(())
    }

    /// Simple health check — run a SELECT 1.
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
