//! Point and polygon types shared by the generator, the backends and the runner.
//!
//! Both types convert into the representations the backends speak:
//! `geo` types for in-process evaluation, WKT for PostGIS and GeoJSON for
//! MongoDB.

use geo::{Centroid, Coord, LineString, Point, Polygon};
use wkt::ToWkt;

use crate::error::{GeobenchError, Result};

/// A geographic coordinate in decimal degrees (WGS 84)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Convert to a `geo` point (x = longitude, y = latitude)
    pub fn to_geo(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// GeoJSON Point geometry, coordinates ordered `[lon, lat]`
    pub fn to_geojson(&self) -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::Point(vec![self.lon, self.lat]))
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        point.to_geo()
    }
}

/// A closed polygon ring used as the region for polygon queries.
///
/// Vertices are `[lon, lat]` pairs; the first and last vertex are identical.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingPolygon {
    vertices: Vec<[f64; 2]>,
}

impl BoundingPolygon {
    /// Build a polygon from a closed ring of `[lon, lat]` vertices
    pub fn new(vertices: Vec<[f64; 2]>) -> Result<Self> {
        if vertices.len() < 4 {
            return Err(GeobenchError::InvalidPolygon {
                reason: format!(
                    "a closed ring needs at least 4 vertices, got {}",
                    vertices.len()
                ),
            });
        }

        let first = vertices[0];
        let last = vertices[vertices.len() - 1];
        if first != last {
            return Err(GeobenchError::InvalidPolygon {
                reason: format!(
                    "ring is not closed: first vertex {:?} differs from last vertex {:?}",
                    first, last
                ),
            });
        }

        if vertices.iter().flatten().any(|c| !c.is_finite()) {
            return Err(GeobenchError::InvalidPolygon {
                reason: "vertex coordinates must be finite".to_string(),
            });
        }

        Ok(Self { vertices })
    }

    /// Axis-aligned rectangle around `center`, walked counter-clockwise from
    /// the south-west corner.
    pub fn rectangle(center: GeoPoint, half_width_lon: f64, half_height_lat: f64) -> Self {
        let west = center.lon - half_width_lon;
        let east = center.lon + half_width_lon;
        let south = center.lat - half_height_lat;
        let north = center.lat + half_height_lat;

        Self {
            vertices: vec![
                [west, south],
                [east, south],
                [east, north],
                [west, north],
                [west, south],
            ],
        }
    }

    pub fn vertices(&self) -> &[[f64; 2]] {
        &self.vertices
    }

    pub fn to_geo(&self) -> Polygon<f64> {
        let exterior: Vec<Coord<f64>> = self
            .vertices
            .iter()
            .map(|&[x, y]| Coord { x, y })
            .collect();
        Polygon::new(LineString::new(exterior), vec![])
    }

    /// WKT text, e.g. `POLYGON((lon lat,lon lat,...))`
    pub fn to_wkt(&self) -> String {
        self.to_geo().wkt_string()
    }

    /// GeoJSON Polygon geometry with a single exterior ring
    pub fn to_geojson(&self) -> geojson::Geometry {
        let ring: Vec<Vec<f64>> = self.vertices.iter().map(|v| v.to_vec()).collect();
        geojson::Geometry::new(geojson::Value::Polygon(vec![ring]))
    }

    pub fn centroid(&self) -> Option<GeoPoint> {
        self.to_geo().centroid().map(|p| GeoPoint::new(p.y(), p.x()))
    }
}
