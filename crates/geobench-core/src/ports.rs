use async_trait::async_trait;

use crate::error::Result;
use crate::models::{BoundingPolygon, Dataset, QueryOutcome, RadiusQuery, ResultMode};

/// Native operator names a backend uses for each query shape, shown in
/// benchmark labels (e.g. `ST_DWithin`, `$nearSphere`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOperators {
    pub radius: &'static str,
    pub polygon: &'static str,
}

/// Port for a database under benchmark
#[async_trait]
pub trait GeoBackend: Send + Sync {
    /// Human-readable backend name used in labels and errors
    fn name(&self) -> &str;

    /// Operators the radius and polygon queries run under `mode`
    fn operators(&self, mode: ResultMode) -> QueryOperators;

    /// Replace everything stored for the benchmark with `dataset` and make
    /// sure a spatial index covers it.
    ///
    /// Prior data is always erased first; this is not an upsert.
    async fn load_dataset(&self, dataset: &Dataset) -> Result<()>;

    /// Number of points currently stored
    async fn count_points(&self) -> Result<u64>;

    /// Run one radius query and materialize its result
    async fn query_radius(&self, query: &RadiusQuery, mode: ResultMode) -> Result<QueryOutcome>;

    /// Run one polygon query and materialize its result
    async fn query_polygon(
        &self,
        polygon: &BoundingPolygon,
        mode: ResultMode,
    ) -> Result<QueryOutcome>;
}
