//! PostgreSQL configuration

use std::time::Duration;

use geobench_core::config::ConnectionPolicy;
use geobench_core::error::{GeobenchError, Result};
use sqlx::postgres::PgConnectOptions;

/// Binds per inserted row: id, lat, lon and the two coordinates of the point
pub const BINDS_PER_ROW: usize = 5;

/// PostgreSQL caps a single statement at 65535 bind parameters
pub const MAX_BATCH_ROWS: usize = u16::MAX as usize / BINDS_PER_ROW;

/// PostgreSQL connection and loading configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    /// Table holding the benchmark points
    pub table: String,
    /// Rows per multi-row INSERT statement
    pub batch_size: usize,
    pub connection_policy: ConnectionPolicy,
    /// Pool settings, used with `ConnectionPolicy::Pooled`
    pub pool: PoolConfig,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "kagsdb".to_string(),
            user: "kags".to_string(),
            password: "kags".to_string(),
            table: "locations".to_string(),
            batch_size: 2000,
            connection_policy: ConnectionPolicy::default(),
            pool: PoolConfig::default(),
        }
    }
}

impl PostgresConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(GeobenchError::config_invalid("postgres.host", "cannot be empty"));
        }

        if self.database.trim().is_empty() {
            return Err(GeobenchError::config_invalid("postgres.database", "cannot be empty"));
        }

        if !is_sql_identifier(&self.table) {
            return Err(GeobenchError::config_invalid(
                "postgres.table",
                format!(
                    "'{}' must start with a letter or underscore and contain only ASCII letters, digits and underscores",
                    self.table
                ),
            ));
        }

        if self.batch_size == 0 || self.batch_size > MAX_BATCH_ROWS {
            return Err(GeobenchError::config_invalid(
                "postgres.batch_size",
                format!("must be between 1 and {}, got {}", MAX_BATCH_ROWS, self.batch_size),
            ));
        }

        self.pool.validate()?;

        Ok(())
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
            .application_name("geobench")
    }
}

/// Unquoted identifiers are interpolated into SQL, so only plain names pass
fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Connection pool configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PoolConfig {
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Maximum number of connections allowed
    pub max_connections: u32,
    /// Timeout for acquiring a connection from the pool
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        // Queries run one at a time, a single warm connection is enough
        Self {
            min_connections: 1,
            max_connections: 1,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

impl PoolConfig {
    /// Validate pool configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_connections > self.max_connections {
            return Err(GeobenchError::config_invalid(
                "postgres.pool.min_connections",
                format!(
                    "min_connections ({}) cannot be greater than max_connections ({})",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        if self.max_connections == 0 {
            return Err(GeobenchError::config_invalid(
                "postgres.pool.max_connections",
                "must be greater than 0",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PostgresConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.table, "locations");
        assert_eq!(config.connection_policy, ConnectionPolicy::PerQuery);
    }

    #[test]
    fn test_empty_host_rejected() {
        let config = PostgresConfig {
            host: "  ".to_string(),
            ..PostgresConfig::default()
        };
        match config.validate() {
            Err(GeobenchError::ConfigInvalid { key, .. }) => assert_eq!(key, "postgres.host"),
            other => panic!("Expected ConfigInvalid, got {:?}", other),
        }
    }

    #[test]
    fn test_table_name_must_be_plain_identifier() {
        for bad in ["", "1points", "locations; DROP TABLE x", "geo-points", "\"quoted\""] {
            let config = PostgresConfig {
                table: bad.to_string(),
                ..PostgresConfig::default()
            };
            assert!(config.validate().is_err(), "accepted table name {:?}", bad);
        }

        for good in ["locations", "_bench", "points_2024"] {
            let config = PostgresConfig {
                table: good.to_string(),
                ..PostgresConfig::default()
            };
            assert!(config.validate().is_ok(), "rejected table name {:?}", good);
        }
    }

    #[test]
    fn test_batch_size_bounds() {
        let mut config = PostgresConfig::default();
        config.batch_size = 0;
        assert!(config.validate().is_err());

        config.batch_size = MAX_BATCH_ROWS;
        assert!(config.validate().is_ok());

        config.batch_size = MAX_BATCH_ROWS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pool_config_default() {
        let pool = PoolConfig::default();
        assert_eq!(pool.min_connections, 1);
        assert_eq!(pool.max_connections, 1);
        assert!(pool.validate().is_ok());
    }

    #[test]
    fn test_pool_config_invalid_min_max() {
        let mut pool = PoolConfig::default();
        pool.min_connections = 20;
        pool.max_connections = 10;
        assert!(pool.validate().is_err());
    }

    #[test]
    fn test_pool_config_zero_max() {
        let mut pool = PoolConfig::default();
        pool.min_connections = 0;
        pool.max_connections = 0;
        assert!(pool.validate().is_err());
    }
}
