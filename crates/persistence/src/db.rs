//! Database connection pool management and the query client.

use serde::Deserialize;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool};
use std::time::{Duration, Instant};

use crate::error::PersistenceError;
use crate::metrics::{record_query_error, QueryTimer};
use crate::statement::Statement;

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Whether the binary applies bundled migrations on startup.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    2
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_run_migrations() -> bool {
    true
}

/// Creates a PostgreSQL connection pool with the given configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
}

/// Client over the shared connection pool.
///
/// Constructed once at startup and cloned into every repository. Each call
/// is independent; the pool hands out connections to concurrent callers.
/// Every store failure is logged here exactly once before it is returned.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connects a new pool with the given configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        Ok(Self::from_pool(create_pool(config).await?))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Executes one statement and returns all resulting rows.
    pub async fn execute_query(&self, statement: &Statement) -> Result<Vec<PgRow>, PersistenceError> {
        let timer = QueryTimer::new(statement.name());
        let result = sqlx::query_with(statement.sql(), statement.arguments())
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result.map_err(|e| query_failed(statement, e))
    }

    /// Executes one statement and maps every row to `T`.
    pub async fn execute_query_as<T>(&self, statement: &Statement) -> Result<Vec<T>, PersistenceError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let timer = QueryTimer::new(statement.name());
        let result = sqlx::query_as_with::<_, T, _>(statement.sql(), statement.arguments())
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result.map_err(|e| query_failed(statement, e))
    }

    /// Executes one statement that must yield exactly one row.
    pub async fn fetch_one_as<T>(&self, statement: &Statement) -> Result<T, PersistenceError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let timer = QueryTimer::new(statement.name());
        let result = sqlx::query_as_with::<_, T, _>(statement.sql(), statement.arguments())
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result.map_err(|e| query_failed(statement, e))
    }

    /// Executes one statement that yields at most one row.
    pub async fn fetch_optional_as<T>(
        &self,
        statement: &Statement,
    ) -> Result<Option<T>, PersistenceError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let timer = QueryTimer::new(statement.name());
        let result = sqlx::query_as_with::<_, T, _>(statement.sql(), statement.arguments())
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result.map_err(|e| query_failed(statement, e))
    }

    /// Executes one statement and returns the number of affected rows.
    pub async fn execute(&self, statement: &Statement) -> Result<u64, PersistenceError> {
        let timer = QueryTimer::new(statement.name());
        let result = sqlx::query_with(statement.sql(), statement.arguments())
            .execute(&self.pool)
            .await;
        timer.record();
        result
            .map(|done| done.rows_affected())
            .map_err(|e| query_failed(statement, e))
    }

    /// Executes statements in order on one connection, without a
    /// transaction.
    ///
    /// Each statement commits on its own: when statement `n` fails,
    /// statements `0..n` keep their effects. Use [`Self::execute_transaction`]
    /// when the sequence must be all-or-nothing.
    pub async fn execute_batch(
        &self,
        statements: &[Statement],
    ) -> Result<Vec<Vec<PgRow>>, PersistenceError> {
        let mut conn = self.pool.acquire().await.map_err(begin_failed)?;
        let mut results = Vec::with_capacity(statements.len());

        for (index, statement) in statements.iter().enumerate() {
            let timer = QueryTimer::new(statement.name());
            let rows = sqlx::query_with(statement.sql(), statement.arguments())
                .fetch_all(&mut *conn)
                .await;
            timer.record();
            results.push(rows.map_err(|e| statement_failed(index, statement, e))?);
        }

        Ok(results)
    }

    /// Executes statements in order inside a single transaction.
    ///
    /// Commits only if every statement succeeds. On any failure the
    /// transaction is dropped, which rolls back every earlier statement.
    pub async fn execute_transaction(
        &self,
        statements: &[Statement],
    ) -> Result<Vec<Vec<PgRow>>, PersistenceError> {
        let mut tx = self.pool.begin().await.map_err(begin_failed)?;
        let mut results = Vec::with_capacity(statements.len());

        for (index, statement) in statements.iter().enumerate() {
            let timer = QueryTimer::new(statement.name());
            let rows = sqlx::query_with(statement.sql(), statement.arguments())
                .fetch_all(&mut *tx)
                .await;
            timer.record();
            results.push(rows.map_err(|e| statement_failed(index, statement, e))?);
        }

        tx.commit().await.map_err(|e| {
            tracing::error!(error = %e, "Transaction commit failed");
            PersistenceError::Transaction(e)
        })?;

        Ok(results)
    }

    /// Round-trips `SELECT 1` and returns the latency.
    pub async fn ping(&self) -> Result<Duration, PersistenceError> {
        let start = Instant::now();
        self.execute(&Statement::new("ping", "SELECT 1")).await?;
        Ok(start.elapsed())
    }
}

fn query_failed(statement: &Statement, source: sqlx::Error) -> PersistenceError {
    tracing::error!(query = statement.name(), error = %source, "Database query failed");
    record_query_error(statement.name());
    PersistenceError::Query {
        name: statement.name(),
        source,
    }
}

fn statement_failed(index: usize, statement: &Statement, source: sqlx::Error) -> PersistenceError {
    tracing::error!(
        query = statement.name(),
        statement_index = index,
        error = %source,
        "Database statement failed"
    );
    record_query_error(statement.name());
    PersistenceError::Statement {
        index,
        name: statement.name(),
        source,
    }
}

fn begin_failed(source: sqlx::Error) -> PersistenceError {
    tracing::error!(error = %source, "Failed to acquire connection for statement sequence");
    PersistenceError::Transaction(source)
}
