use super::geometry::GeoPoint;

/// The generated points for one benchmark run.
///
/// A point's 1-based position in the dataset is its stable external id in every
/// backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    points: Vec<GeoPoint>,
}

impl Dataset {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate `(id, point)` pairs in insertion order. Ids are 1-based: the
    /// first point has id 1.
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (i64, GeoPoint)> + '_ {
        self.points.iter().enumerate().map(|(idx, point)| (idx as i64 + 1, *point))
    }
}

impl From<Vec<GeoPoint>> for Dataset {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<GeoPoint> for Dataset {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one() {
        let dataset: Dataset = vec![GeoPoint::new(1.0, 2.0), GeoPoint::new(3.0, 4.0)].into();
        let ids: Vec<i64> = dataset.iter_with_ids().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::default();
        assert!(dataset.is_empty());
        assert_eq!(dataset.iter_with_ids().count(), 0);
    }
}
