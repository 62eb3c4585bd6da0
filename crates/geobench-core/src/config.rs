//! Benchmark configuration.
//!
//! Every parameter is a constant assembled once at startup and passed by
//! reference into each component. Nothing here is mutated after construction.

use crate::error::{GeobenchError, Result};
use crate::models::{BoundingPolygon, GeoPoint, RadiusQuery, ResultMode};

pub const DEFAULT_POINT_COUNT: usize = 20_000;
pub const DEFAULT_TIMED_RUNS: usize = 10;
pub const DEFAULT_WARMUP_RUNS: usize = 2;
pub const DEFAULT_CENTER: GeoPoint = GeoPoint::new(47.6101, -122.2015);
pub const DEFAULT_MAX_OFFSET_DEG: f64 = 0.05;
pub const DEFAULT_RADIUS_METERS: f64 = 1000.0;
pub const DEFAULT_POLYGON_HALF_WIDTH_LON: f64 = 0.02;
pub const DEFAULT_POLYGON_HALF_HEIGHT_LAT: f64 = 0.01;

/// How executors obtain their database connection.
///
/// A single policy is shared by every backend so both pay the same
/// connection cost inside the timed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionPolicy {
    /// Open and close a fresh connection on every query
    #[default]
    PerQuery,
    /// Reuse one long-lived pool or client per backend
    Pooled,
}

/// Synthetic dataset parameters
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetConfig {
    /// Number of points to generate
    pub point_count: usize,
    /// Center the points are scattered around
    pub center: GeoPoint,
    /// Maximum offset from the center on each axis, in degrees
    pub max_offset_deg: f64,
    /// Fixed seed for reproducible datasets; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINT_COUNT,
            center: DEFAULT_CENTER,
            max_offset_deg: DEFAULT_MAX_OFFSET_DEG,
            seed: None,
        }
    }
}

impl DatasetConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.max_offset_deg.is_finite() && self.max_offset_deg >= 0.0) {
            return Err(GeobenchError::config_invalid(
                "dataset.max_offset_deg",
                format!("must be a finite, non-negative number, got {}", self.max_offset_deg),
            ));
        }

        validate_point("dataset.center", &self.center)?;

        // Every generated point must be a valid WGS 84 coordinate
        let offset = self.max_offset_deg;
        let corners = [
            GeoPoint::new(self.center.lat - offset, self.center.lon - offset),
            GeoPoint::new(self.center.lat + offset, self.center.lon + offset),
        ];
        for corner in &corners {
            validate_point("dataset.max_offset_deg", corner)?;
        }
        Ok(())
    }
}

/// Repetition counts for each benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Untimed executions before measuring
    pub warmup_runs: usize,
    /// Timed executions that feed the statistics
    pub timed_runs: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            warmup_runs: DEFAULT_WARMUP_RUNS,
            timed_runs: DEFAULT_TIMED_RUNS,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        if self.timed_runs == 0 {
            return Err(GeobenchError::config_invalid("runs.timed_runs", "must be greater than 0"));
        }
        Ok(())
    }
}

/// Everything the benchmark protocol needs, independent of any backend
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub dataset: DatasetConfig,
    pub runs: RunConfig,
    pub radius: RadiusQuery,
    pub polygon: BoundingPolygon,
    pub result_mode: ResultMode,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            runs: RunConfig::default(),
            radius: RadiusQuery::new(DEFAULT_CENTER, DEFAULT_RADIUS_METERS),
            polygon: BoundingPolygon::rectangle(
                DEFAULT_CENTER,
                DEFAULT_POLYGON_HALF_WIDTH_LON,
                DEFAULT_POLYGON_HALF_HEIGHT_LAT,
            ),
            result_mode: ResultMode::default(),
        }
    }
}

impl BenchConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.dataset.validate()?;
        self.runs.validate()?;

        validate_point("radius.center", &self.radius.center)?;
        if !(self.radius.radius_meters.is_finite() && self.radius.radius_meters > 0.0) {
            return Err(GeobenchError::config_invalid(
                "radius.radius_meters",
                format!("must be a positive number, got {}", self.radius.radius_meters),
            ));
        }

        if let ResultMode::FetchCapped { limit: 0 } = self.result_mode {
            return Err(GeobenchError::config_invalid(
                "result_mode.limit",
                "must be greater than 0",
            ));
        }

        Ok(())
    }
}

fn validate_point(key: &str, point: &GeoPoint) -> Result<()> {
    if !(-90.0..=90.0).contains(&point.lat) {
        return Err(GeobenchError::config_invalid(
            key,
            format!("latitude {} is outside [-90, 90]", point.lat),
        ));
    }
    if !(-180.0..=180.0).contains(&point.lon) {
        return Err(GeobenchError::config_invalid(
            key,
            format!("longitude {} is outside [-180, 180]", point.lon),
        ));
    }
    Ok(())
}
