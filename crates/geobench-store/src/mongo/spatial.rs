use async_trait::async_trait;
use futures::TryStreamExt;
use geobench_core::error::{GeobenchError, Result};
use geobench_core::models::{BoundingPolygon, Dataset, QueryOutcome, RadiusQuery, ResultMode};
use geobench_core::ports::{GeoBackend, QueryOperators};
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::Client;

use super::{LocationDocument, MongoBackend, BACKEND_NAME};

const COUNT_FIELD: &str = "matched";

fn to_bson_geometry(geometry: &geojson::Geometry) -> Result<Bson> {
    bson::to_bson(geometry).map_err(|e| {
        GeobenchError::query(BACKEND_NAME, format!("failed to encode GeoJSON: {}", e))
    })
}

/// `$nearSphere` filter: matches within `radius_meters`, sorted by distance
pub(crate) fn near_sphere_filter(query: &RadiusQuery) -> Result<Document> {
    let center = to_bson_geometry(&query.center.to_geojson())?;
    Ok(doc! {
        "location": {
            "$nearSphere": {
                "$geometry": center,
                "$maxDistance": query.radius_meters,
            }
        }
    })
}

/// Radius count pipeline. `countDocuments` rejects `$nearSphere`, so the
/// nearest-neighbor search runs as a `$geoNear` stage instead.
pub(crate) fn geo_near_count_pipeline(query: &RadiusQuery) -> Result<Vec<Document>> {
    let center = to_bson_geometry(&query.center.to_geojson())?;
    Ok(vec![
        doc! {
            "$geoNear": {
                "near": center,
                "distanceField": "distance",
                "maxDistance": query.radius_meters,
                "spherical": true,
                "key": "location",
            }
        },
        doc! { "$count": COUNT_FIELD },
    ])
}

/// Operators `radius_with` and `polygon_with` run under `mode`
pub(crate) fn operators_for(mode: ResultMode) -> QueryOperators {
    QueryOperators {
        radius: match mode {
            ResultMode::Count => "$geoNear",
            ResultMode::FetchCapped { .. } => "$nearSphere",
        },
        polygon: "$geoWithin",
    }
}

pub(crate) fn geo_within_filter(polygon: &BoundingPolygon) -> Result<Document> {
    let geometry = to_bson_geometry(&polygon.to_geojson())?;
    Ok(doc! {
        "location": {
            "$geoWithin": { "$geometry": geometry }
        }
    })
}

impl MongoBackend {
    async fn count_matching(&self, client: &Client, filter: Document) -> Result<QueryOutcome> {
        let count = self
            .collection(client)
            .count_documents(filter)
            .await
            .map_err(|e| GeobenchError::query(BACKEND_NAME, e))?;
        Ok(QueryOutcome::Counted(count))
    }

    /// Run a pipeline ending in `$count`. No output document means no match.
    async fn count_pipeline(
        &self,
        client: &Client,
        pipeline: Vec<Document>,
    ) -> Result<QueryOutcome> {
        let results: Vec<Document> = self
            .collection(client)
            .aggregate(pipeline)
            .await
            .map_err(|e| GeobenchError::query(BACKEND_NAME, e))?
            .try_collect()
            .await
            .map_err(|e| GeobenchError::query(BACKEND_NAME, e))?;

        let count = match results.first().and_then(|result| result.get(COUNT_FIELD)) {
            None => 0,
            Some(Bson::Int32(n)) => u64::try_from(*n).unwrap_or(0),
            Some(Bson::Int64(n)) => u64::try_from(*n).unwrap_or(0),
            Some(other) => {
                return Err(GeobenchError::query(
                    BACKEND_NAME,
                    format!("unexpected $count value: {}", other),
                ))
            }
        };
        Ok(QueryOutcome::Counted(count))
    }

    /// Run `filter` and drain the cursor, so the caller's timer covers every
    /// batch the server returns.
    async fn fetch_matching(
        &self,
        client: &Client,
        filter: Document,
        limit: u32,
    ) -> Result<QueryOutcome> {
        let cursor = self
            .collection(client)
            .find(filter)
            .projection(doc! { "_id": 0 })
            .limit(i64::from(limit))
            .await
            .map_err(|e| GeobenchError::query(BACKEND_NAME, e))?;

        let documents: Vec<LocationDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| GeobenchError::query(BACKEND_NAME, e))?;
        Ok(QueryOutcome::Fetched(documents.len()))
    }

    async fn radius_with(
        &self,
        client: &Client,
        query: &RadiusQuery,
        mode: ResultMode,
    ) -> Result<QueryOutcome> {
        match mode {
            ResultMode::Count => {
                self.count_pipeline(client, geo_near_count_pipeline(query)?).await
            }
            ResultMode::FetchCapped { limit } => {
                self.fetch_matching(client, near_sphere_filter(query)?, limit).await
            }
        }
    }

    async fn polygon_with(
        &self,
        client: &Client,
        polygon: &BoundingPolygon,
        mode: ResultMode,
    ) -> Result<QueryOutcome> {
        let filter = geo_within_filter(polygon)?;
        match mode {
            ResultMode::Count => self.count_matching(client, filter).await,
            ResultMode::FetchCapped { limit } => self.fetch_matching(client, filter, limit).await,
        }
    }
}

#[async_trait]
impl GeoBackend for MongoBackend {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    fn operators(&self, mode: ResultMode) -> QueryOperators {
        operators_for(mode)
    }

    async fn load_dataset(&self, dataset: &Dataset) -> Result<()> {
        self.replace_dataset(dataset).await
    }

    async fn count_points(&self) -> Result<u64> {
        let client = self.client()?;
        let count = self
            .collection(&client)
            .count_documents(doc! {})
            .await
            .map_err(|e| GeobenchError::query(BACKEND_NAME, format!("failed to count points: {}", e)));
        self.release(client).await;
        count
    }

    async fn query_radius(&self, query: &RadiusQuery, mode: ResultMode) -> Result<QueryOutcome> {
        let client = self.client()?;
        let outcome = self.radius_with(&client, query, mode).await;
        self.release(client).await;
        outcome
    }

    async fn query_polygon(
        &self,
        polygon: &BoundingPolygon,
        mode: ResultMode,
    ) -> Result<QueryOutcome> {
        let client = self.client()?;
        let outcome = self.polygon_with(&client, polygon, mode).await;
        self.release(client).await;
        outcome
    }
}
