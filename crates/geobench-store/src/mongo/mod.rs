//! MongoDB backend

pub mod config;
mod loader;
mod spatial;

pub use config::MongoConfig;

use geobench_core::config::ConnectionPolicy;
use geobench_core::error::{GeobenchError, Result};
use geobench_core::models::GeoPoint;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

pub const BACKEND_NAME: &str = "MongoDB";

/// Stored shape of one point: `{ id, location: GeoJSON Point }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDocument {
    pub id: i64,
    pub location: geojson::Geometry,
}

impl LocationDocument {
    pub fn new(id: i64, point: GeoPoint) -> Self {
        Self {
            id,
            location: point.to_geojson(),
        }
    }
}

/// MongoDB backend under benchmark
pub struct MongoBackend {
    config: MongoConfig,
    options: ClientOptions,
    client: Option<Client>,
}

impl MongoBackend {
    /// Validate `config`, parse the connection string, create the shared
    /// client when pooling is enabled, and ping the server.
    pub async fn connect(config: MongoConfig) -> Result<Self> {
        config.validate()?;

        let mut options = ClientOptions::parse(config.uri.as_str())
            .await
            .map_err(|e| GeobenchError::connection(BACKEND_NAME, e))?;
        options.app_name = Some("geobench".to_string());

        let client = match config.connection_policy {
            ConnectionPolicy::Pooled => Some(
                Client::with_options(options.clone())
                    .map_err(|e| GeobenchError::connection(BACKEND_NAME, e))?,
            ),
            ConnectionPolicy::PerQuery => None,
        };

        let backend = Self {
            config,
            options,
            client,
        };
        backend.health_check().await?;

        tracing::info!(
            database = %backend.config.database,
            collection = %backend.config.collection,
            policy = ?backend.config.connection_policy,
            "connected to MongoDB"
        );
        Ok(backend)
    }

    pub fn config(&self) -> &MongoConfig {
        &self.config
    }

    /// Ping the server
    pub async fn health_check(&self) -> Result<()> {
        let client = self.client()?;
        let ping = client
            .database(&self.config.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| GeobenchError::connection(BACKEND_NAME, format!("ping failed: {}", e)));
        self.release(client).await;
        ping.map(|_| ())
    }

    /// Shut down the shared client, if any
    pub async fn close(&self) {
        if let Some(client) = &self.client {
            client.clone().shutdown().await;
        }
    }

    /// The shared client, or a fresh one under `ConnectionPolicy::PerQuery`
    fn client(&self) -> Result<Client> {
        match &self.client {
            Some(client) => Ok(client.clone()),
            None => Client::with_options(self.options.clone())
                .map_err(|e| GeobenchError::connection(BACKEND_NAME, e)),
        }
    }

    /// Shut down a client obtained from `client()` unless it is the shared one
    async fn release(&self, client: Client) {
        if self.client.is_none() {
            client.shutdown().await;
        }
    }

    fn collection(&self, client: &Client) -> Collection<LocationDocument> {
        client
            .database(&self.config.database)
            .collection(&self.config.collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn test_location_document_shape() {
        let document = LocationDocument::new(7, GeoPoint::new(47.61, -122.2));
        let stored = bson::to_document(&document).unwrap();

        assert_eq!(stored.get_i64("id").unwrap(), 7);
        let location = stored.get_document("location").unwrap();
        assert_eq!(location.get_str("type").unwrap(), "Point");

        let coords = location.get_array("coordinates").unwrap();
        assert_eq!(coords.len(), 2);
        assert_eq!(coords[0].as_f64(), Some(-122.2));
        assert_eq!(coords[1].as_f64(), Some(47.61));
    }

    #[test]
    fn test_location_document_round_trips_through_bson() {
        let document = LocationDocument::new(3, GeoPoint::new(1.5, 2.5));
        let stored = bson::to_document(&document).unwrap();
        let back: LocationDocument = bson::from_document(stored).unwrap();
        assert_eq!(back, document);
    }
}
