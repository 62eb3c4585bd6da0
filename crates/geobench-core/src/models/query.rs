use std::fmt;

use super::geometry::GeoPoint;

/// Default cap on rows fetched by a single query
pub const DEFAULT_FETCH_LIMIT: u32 = 5000;

/// "All points within `radius_meters` of `center`"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusQuery {
    pub center: GeoPoint,
    pub radius_meters: f64,
}

impl RadiusQuery {
    pub const fn new(center: GeoPoint, radius_meters: f64) -> Self {
        Self { center, radius_meters }
    }
}

/// The two query shapes every backend is benchmarked on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryShape {
    Radius,
    Polygon,
}

impl fmt::Display for QueryShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryShape::Radius => write!(f, "radius"),
            QueryShape::Polygon => write!(f, "polygon"),
        }
    }
}

/// How much work a query does with its matches.
///
/// Every backend receives the same mode so the timings compare equal work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultMode {
    /// Count matches server-side
    Count,
    /// Fetch up to `limit` matching rows and drain them client-side
    FetchCapped { limit: u32 },
}

impl Default for ResultMode {
    fn default() -> Self {
        ResultMode::FetchCapped {
            limit: DEFAULT_FETCH_LIMIT,
        }
    }
}

impl fmt::Display for ResultMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultMode::Count => write!(f, "count"),
            ResultMode::FetchCapped { limit } => write!(f, "fetch (limit {})", limit),
        }
    }
}

/// Materialized result of one query execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Server-side match count
    Counted(u64),
    /// Number of rows drained from the result set
    Fetched(usize),
}

impl QueryOutcome {
    pub fn matched(&self) -> u64 {
        match *self {
            QueryOutcome::Counted(count) => count,
            QueryOutcome::Fetched(rows) => rows as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_fetches_capped() {
        assert_eq!(ResultMode::default(), ResultMode::FetchCapped { limit: 5000 });
    }

    #[test]
    fn test_outcome_matched() {
        assert_eq!(QueryOutcome::Counted(42).matched(), 42);
        assert_eq!(QueryOutcome::Fetched(7).matched(), 7);
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(QueryShape::Radius.to_string(), "radius");
        assert_eq!(QueryShape::Polygon.to_string(), "polygon");
    }
}
