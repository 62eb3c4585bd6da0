//! Error types for geobench

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeobenchError {
    // Backend errors
    #[error("Failed to connect to {backend}: {reason}")]
    Connection { backend: String, reason: String },

    #[error("Schema setup failed on {backend}: {reason}")]
    Schema { backend: String, reason: String },

    #[error("Loading dataset into {backend} failed: {reason}")]
    Load { backend: String, reason: String },

    #[error("Query on {backend} failed: {reason}")]
    Query { backend: String, reason: String },

    #[error("{backend} holds {actual} points after loading, expected {expected}")]
    LoadMismatch {
        backend: String,
        expected: u64,
        actual: u64,
    },

    // Geometry errors
    #[error("Invalid polygon: {reason}")]
    InvalidPolygon { reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },
}

impl GeobenchError {
    pub fn connection(backend: &str, reason: impl ToString) -> Self {
        Self::Connection {
            backend: backend.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn schema(backend: &str, reason: impl ToString) -> Self {
        Self::Schema {
            backend: backend.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn load(backend: &str, reason: impl ToString) -> Self {
        Self::Load {
            backend: backend.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn query(backend: &str, reason: impl ToString) -> Self {
        Self::Query {
            backend: backend.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn config_invalid(key: &str, reason: impl ToString) -> Self {
        Self::ConfigInvalid {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GeobenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_backend() {
        let err = GeobenchError::query("MongoDB", "cursor killed");
        assert_eq!(err.to_string(), "Query on MongoDB failed: cursor killed");

        let err = GeobenchError::LoadMismatch {
            backend: "PostGIS".to_string(),
            expected: 20000,
            actual: 19998,
        };
        assert_eq!(err.to_string(), "PostGIS holds 19998 points after loading, expected 20000");
    }
}
