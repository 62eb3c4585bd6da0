pub mod dataset;
pub mod geometry;
pub mod query;

pub use dataset::Dataset;
pub use geometry::{BoundingPolygon, GeoPoint};
pub use query::{QueryOutcome, QueryShape, RadiusQuery, ResultMode};
