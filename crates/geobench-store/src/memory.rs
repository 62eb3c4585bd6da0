//! In-memory reference backend for development and testing.
//!
//! Radius and polygon predicates are evaluated with the `geo` crate, which
//! makes this backend the oracle the database backends are checked against.
//! `RwLock::unwrap()` is used intentionally: poisoning only happens after a
//! panic while holding the lock, which is unrecoverable.

use async_trait::async_trait;
use geo::{Contains, Distance, Haversine};
use geobench_core::error::Result;
use geobench_core::models::{
    BoundingPolygon, Dataset, GeoPoint, QueryOutcome, RadiusQuery, ResultMode,
};
use geobench_core::ports::{GeoBackend, QueryOperators};
use std::sync::RwLock;

pub const BACKEND_NAME: &str = "Memory";

#[derive(Debug, Default)]
pub struct MemoryBackend {
    points: RwLock<Vec<GeoPoint>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn outcome<'a>(
        matches: impl Iterator<Item = &'a GeoPoint>,
        mode: ResultMode,
    ) -> QueryOutcome {
        match mode {
            ResultMode::Count => QueryOutcome::Counted(matches.count() as u64),
            ResultMode::FetchCapped { limit } => {
                let rows: Vec<GeoPoint> = matches.take(limit as usize).copied().collect();
                QueryOutcome::Fetched(rows.len())
            }
        }
    }
}

#[async_trait]
impl GeoBackend for MemoryBackend {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    fn operators(&self, _mode: ResultMode) -> QueryOperators {
        QueryOperators {
            radius: "haversine",
            polygon: "contains",
        }
    }

    async fn load_dataset(&self, dataset: &Dataset) -> Result<()> {
        let mut points = self.points.write().unwrap();
        points.clear();
        points.extend_from_slice(dataset.points());
        Ok(())
    }

    async fn count_points(&self) -> Result<u64> {
        Ok(self.points.read().unwrap().len() as u64)
    }

    async fn query_radius(&self, query: &RadiusQuery, mode: ResultMode) -> Result<QueryOutcome> {
        let center = query.center.to_geo();
        let points = self.points.read().unwrap();
        let matches = points
            .iter()
            .filter(|p| Haversine.distance(center, p.to_geo()) <= query.radius_meters);
        Ok(Self::outcome(matches, mode))
    }

    async fn query_polygon(
        &self,
        polygon: &BoundingPolygon,
        mode: ResultMode,
    ) -> Result<QueryOutcome> {
        let region = polygon.to_geo();
        let points = self.points.read().unwrap();
        let matches = points.iter().filter(|p| region.contains(&p.to_geo()));
        Ok(Self::outcome(matches, mode))
    }
}
