//! MongoDB configuration

use geobench_core::config::ConnectionPolicy;
use geobench_core::error::{GeobenchError, Result};

/// MongoDB connection and loading configuration
#[derive(Debug, Clone, PartialEq)]
pub struct MongoConfig {
    /// Connection string, `mongodb://` or `mongodb+srv://`
    pub uri: String,
    pub database: String,
    /// Collection holding the benchmark points
    pub collection: String,
    /// Documents per `insert_many` call
    pub batch_size: usize,
    pub connection_policy: ConnectionPolicy,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "kagsdb".to_string(),
            collection: "locations".to_string(),
            batch_size: 2000,
            connection_policy: ConnectionPolicy::default(),
        }
    }
}

impl MongoConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.uri.starts_with("mongodb://") || self.uri.starts_with("mongodb+srv://")) {
            return Err(GeobenchError::config_invalid(
                "mongo.uri",
                "must start with mongodb:// or mongodb+srv://",
            ));
        }

        if self.database.trim().is_empty() || self.database.contains(['/', '.', ' ', '$']) {
            return Err(GeobenchError::config_invalid(
                "mongo.database",
                format!("'{}' is not a valid database name", self.database),
            ));
        }

        if self.collection.trim().is_empty()
            || self.collection.contains('$')
            || self.collection.starts_with("system.")
        {
            return Err(GeobenchError::config_invalid(
                "mongo.collection",
                format!("'{}' is not a valid collection name", self.collection),
            ));
        }

        if self.batch_size == 0 {
            return Err(GeobenchError::config_invalid(
                "mongo.batch_size",
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
        let config = MongoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.collection, "locations");
    }

    #[test]
    fn test_uri_scheme_checked() {
        let config = MongoConfig {
            uri: "postgres://localhost".to_string(),
            ..MongoConfig::default()
        };
        match config.validate() {
            Err(GeobenchError::ConfigInvalid { key, .. }) => assert_eq!(key, "mongo.uri"),
            other => panic!("Expected ConfigInvalid, got {:?}", other),
        }

        let config = MongoConfig {
            uri: "mongodb+srv://cluster.example.net".to_string(),
            ..MongoConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_names_rejected() {
        for database in ["", "kags.db", "kags db"] {
            let config = MongoConfig {
                database: database.to_string(),
                ..MongoConfig::default()
            };
            assert!(config.validate().is_err(), "accepted database {:?}", database);
        }

        for collection in ["", "$cmd", "system.indexes"] {
            let config = MongoConfig {
                collection: collection.to_string(),
                ..MongoConfig::default()
            };
            assert!(config.validate().is_err(), "accepted collection {:?}", collection);
        }
    }

    #[test]
    fn test_zero_batch_rejected() {
        let config = MongoConfig {
            batch_size: 0,
            ..MongoConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
