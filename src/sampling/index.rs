//! k-d tree over the distinct points of a cloud.

use std::collections::HashMap;

use kiddo::{KdTree, SquaredEuclidean};

use crate::core::Point3;

/// Nearest-point and radius queries over a point cloud.
///
/// Exact duplicates are indexed once and carry a multiplicity, so a cloud
/// may repeat a point any number of times. Radius counts include every
/// copy. Non-finite points are skipped.
pub struct PointIndex {
    tree: KdTree<f32, 3>,
    multiplicity: Vec<usize>,
    len: usize,
}

/// Bit key of a coordinate with both zeros folded together.
#[inline]
fn coordinate_key(v: f32) -> u32 {
    if v == 0.0 { 0 } else { v.to_bits() }
}

impl PointIndex {
    /// Index `points`.
    pub fn build(points: &[Point3]) -> Self {
        let mut tree: KdTree<f32, 3> = KdTree::new();
        let mut slots: HashMap<[u32; 3], usize> = HashMap::with_capacity(points.len());
        let mut multiplicity: Vec<usize> = Vec::new();
        let mut len = 0;

        for p in points.iter().filter(|p| p.is_finite()) {
            let coords = p.to_array();
            let slot = *slots.entry(coords.map(coordinate_key)).or_insert_with(|| {
                tree.add(&coords, multiplicity.len() as u64);
                multiplicity.push(0);
                multiplicity.len() - 1
            });
            multiplicity[slot] += 1;
            len += 1;
        }

        Self {
            tree,
            multiplicity,
            len,
        }
    }

    /// Indexed points, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing was indexed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Distinct positions in the tree.
    #[inline]
    pub fn distinct(&self) -> usize {
        self.multiplicity.len()
    }

    /// Euclidean distance to the nearest indexed point.
    pub fn nearest_distance(&self, query: &Point3) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        let nearest = self.tree.nearest_one::<SquaredEuclidean>(&query.to_array());
        Some(nearest.distance.sqrt())
    }

    /// Indexed points within `radius` of `query`, duplicates included.
    pub fn count_within(&self, query: &Point3, radius: f32) -> usize {
        self.tree
            .within_unsorted::<SquaredEuclidean>(&query.to_array(), radius * radius)
            .iter()
            .filter_map(|n| self.multiplicity.get(n.item as usize))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_point() {
        let p = Point3::new(1.0, 1.0, 0.3);
        let index = PointIndex::build(&vec![p; 100]);
        assert_eq!(index.len(), 100);
        assert_eq!(index.distinct(), 1);
        assert_eq!(index.count_within(&p, 0.1), 100);
        let d = index.nearest_distance(&Point3::new(1.0, 1.0, 1.3)).unwrap();
        assert!((d - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_mixed_multiplicities() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(0.2, 0.0, 0.0);
        let far = Point3::new(5.0, 0.0, 0.0);
        let mut pts = vec![a; 40];
        pts.extend(vec![b; 70]);
        pts.push(far);
        let index = PointIndex::build(&pts);
        assert_eq!(index.distinct(), 3);
        assert_eq!(index.count_within(&a, 0.3), 110);
        assert_eq!(index.count_within(&far, 0.3), 1);
    }

    #[test]
    fn test_signed_zero_merged() {
        let index = PointIndex::build(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(-0.0, 0.0, -0.0),
        ]);
        assert_eq!(index.distinct(), 1);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_empty_and_non_finite() {
        let empty = PointIndex::build(&[]);
        assert!(empty.is_empty());
        assert_eq!(empty.nearest_distance(&Point3::ZERO), None);
        assert_eq!(empty.count_within(&Point3::ZERO, 1.0), 0);

        let index = PointIndex::build(&[Point3::new(f32::NAN, 0.0, 0.0), Point3::ZERO]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.nearest_distance(&Point3::ZERO), Some(0.0));
    }
}
