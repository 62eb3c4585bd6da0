use geobench_core::error::{GeobenchError, Result};
use geobench_core::models::Dataset;
use mongodb::bson::doc;
use mongodb::{Client, IndexModel};

use super::{LocationDocument, MongoBackend, BACKEND_NAME};

impl MongoBackend {
    /// Drop the collection, insert `dataset` in batches and create the
    /// `2dsphere` index on `location`.
    pub(super) async fn replace_dataset(&self, dataset: &Dataset) -> Result<()> {
        let client = self.client()?;
        let result = self.replace_with(&client, dataset).await;
        self.release(client).await;
        result
    }

    async fn replace_with(&self, client: &Client, dataset: &Dataset) -> Result<()> {
        let collection = self.collection(client);

        collection.drop().await.map_err(|e| {
            GeobenchError::load(
                BACKEND_NAME,
                format!("drop collection {}: {}", self.config.collection, e),
            )
        })?;

        let documents: Vec<LocationDocument> = dataset
            .iter_with_ids()
            .map(|(id, point)| LocationDocument::new(id, point))
            .collect();

        for (batch_idx, batch) in documents.chunks(self.config.batch_size).enumerate() {
            collection.insert_many(batch).await.map_err(|e| {
                GeobenchError::load(BACKEND_NAME, format!("insert batch {}: {}", batch_idx, e))
            })?;

            tracing::debug!(
                collection = %self.config.collection,
                batch = batch_idx,
                documents = batch.len(),
                "inserted batch"
            );
        }

        let index = IndexModel::builder()
            .keys(doc! { "location": "2dsphere" })
            .build();
        collection.create_index(index).await.map_err(|e| {
            GeobenchError::schema(BACKEND_NAME, format!("2dsphere index on location: {}", e))
        })?;

        tracing::info!(
            collection = %self.config.collection,
            points = dataset.len(),
            "MongoDB dataset replaced"
        );
        Ok(())
    }
}
