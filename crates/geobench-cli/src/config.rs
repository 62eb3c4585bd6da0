//! Application configuration
//!
//! Assembled once from compiled-in constants and passed by reference to the
//! benchmark. There is no config file and no environment override.

use geobench_core::config::{BenchConfig, ConnectionPolicy};
use geobench_core::{GeobenchError, Result};
use geobench_store::{MongoConfig, PostgresConfig};

/// Connection scope shared by both backends
pub const CONNECTION_POLICY: ConnectionPolicy = ConnectionPolicy::PerQuery;

/// Complete configuration for one benchmark session
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bench: BenchConfig,
    pub postgres: PostgresConfig,
    pub mongo: MongoConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bench: BenchConfig::default(),
            postgres: PostgresConfig {
                connection_policy: CONNECTION_POLICY,
                ..PostgresConfig::default()
            },
            mongo: MongoConfig {
                connection_policy: CONNECTION_POLICY,
                ..MongoConfig::default()
            },
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.bench.validate()?;
        self.postgres.validate()?;
        self.mongo.validate()?;

        if self.postgres.connection_policy != self.mongo.connection_policy {
            return Err(GeobenchError::config_invalid(
                "connection_policy",
                "PostGIS and MongoDB must use the same connection policy",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geobench_core::models::ResultMode;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bench.dataset.point_count, 20_000);
        assert_eq!(config.bench.runs.warmup_runs, 2);
        assert_eq!(config.bench.runs.timed_runs, 10);
        assert_eq!(config.bench.result_mode, ResultMode::FetchCapped { limit: 5000 });
    }

    #[test]
    fn test_backends_share_connection_policy() {
        let config = AppConfig::default();
        assert_eq!(config.postgres.connection_policy, CONNECTION_POLICY);
        assert_eq!(config.mongo.connection_policy, CONNECTION_POLICY);
    }

    #[test]
    fn test_mixed_connection_policies_rejected() {
        let mut config = AppConfig::default();
        config.mongo.connection_policy = ConnectionPolicy::Pooled;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backends_target_same_collection_name() {
        let config = AppConfig::default();
        assert_eq!(config.postgres.table, config.mongo.collection);
    }
}
