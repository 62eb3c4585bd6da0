//! PostGIS backend

pub mod config;
mod loader;
mod spatial;
mod statements;

pub use config::{PoolConfig, PostgresConfig};

use geobench_core::config::ConnectionPolicy;
use geobench_core::error::{GeobenchError, Result};
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgConnection, PgPool, Postgres};

use statements::Statements;

pub const BACKEND_NAME: &str = "PostGIS";

/// PostGIS backend under benchmark
pub struct PostgisBackend {
    config: PostgresConfig,
    statements: Statements,
    pool: Option<PgPool>,
}

impl PostgisBackend {
    /// Validate `config`, open the pool when pooling is enabled, and check the
    /// server answers.
    pub async fn connect(config: PostgresConfig) -> Result<Self> {
        config.validate()?;

        let pool = match config.connection_policy {
            ConnectionPolicy::Pooled => {
                let pool = PgPoolOptions::new()
                    .min_connections(config.pool.min_connections)
                    .max_connections(config.pool.max_connections)
                    .acquire_timeout(config.pool.acquire_timeout)
                    .connect_with(config.connect_options())
                    .await
                    .map_err(|e| GeobenchError::connection(BACKEND_NAME, e))?;
                Some(pool)
            }
            ConnectionPolicy::PerQuery => None,
        };

        let backend = Self {
            statements: Statements::new(&config.table),
            config,
            pool,
        };
        backend.health_check().await?;

        tracing::info!(
            host = %backend.config.host,
            database = %backend.config.database,
            policy = ?backend.config.connection_policy,
            "connected to PostGIS"
        );
        Ok(backend)
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &PostgresConfig {
        &self.config
    }

    /// Perform a health check on the database connection
    pub async fn health_check(&self) -> Result<()> {
        let mut session = self.session().await?;
        sqlx::query("SELECT 1")
            .execute(session.conn())
            .await
            .map_err(|e| GeobenchError::connection(BACKEND_NAME, format!("health check failed: {}", e)))?;
        session.close().await
    }

    /// Close the pool, if any
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }

    /// A connection following the configured policy
    async fn session(&self) -> Result<Session> {
        match &self.pool {
            Some(pool) => pool
                .acquire()
                .await
                .map(Session::Pooled)
                .map_err(|e| GeobenchError::connection(BACKEND_NAME, e)),
            None => PgConnection::connect_with(&self.config.connect_options())
                .await
                .map(Session::Fresh)
                .map_err(|e| GeobenchError::connection(BACKEND_NAME, e)),
        }
    }
}

/// A pooled connection or one opened just for this call
enum Session {
    Pooled(PoolConnection<Postgres>),
    Fresh(PgConnection),
}

impl Session {
    fn conn(&mut self) -> &mut PgConnection {
        match self {
            Session::Pooled(conn) => &mut **conn,
            Session::Fresh(conn) => conn,
        }
    }

    /// Return a pooled connection, or close a fresh one
    async fn close(self) -> Result<()> {
        match self {
            Session::Pooled(_) => Ok(()),
            Session::Fresh(conn) => conn
                .close()
                .await
                .map_err(|e| GeobenchError::connection(BACKEND_NAME, e)),
        }
    }
}
