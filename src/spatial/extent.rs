use crate::geometry::Point2;
use serde::{Deserialize, Serialize};

/// an axis-aligned bounding box. used both for geographic extents (lon/lat)
/// and projected world-coordinate boxes — the caller decides
/// which coordinate space it lives in by which points it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: Point2,
    pub max: Point2,
}

impl Extent {
    pub fn from_point(p: Point2) -> Self {
        Extent { min: p, max: p }
    }

    pub fn from_points(points: impl IntoIterator<Item = Point2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut extent = Extent::from_point(first);
        for p in iter {
            extent = extent.extend(p);
        }
        Some(extent)
    }

    pub fn extend(&self, p: Point2) -> Extent {
        Extent {
            min: (self.min.0.min(p.0), self.min.1.min(p.1)),
            max: (self.max.0.max(p.0), self.max.1.max(p.1)),
        }
    }

    pub fn union(&self, other: &Extent) -> Extent {
        Extent {
            min: (self.min.0.min(other.min.0), self.min.1.min(other.min.1)),
            max: (self.max.0.max(other.max.0), self.max.1.max(other.max.1)),
        }
    }

    pub fn union_all(extents: impl IntoIterator<Item = Extent>) -> Option<Extent> {
        extents.into_iter().reduce(|a, b| a.union(&b))
    }

    pub fn intersects(&self, other: &Extent) -> bool {
        self.min.0 <= other.max.0
            && self.max.0 >= other.min.0
            && self.min.1 <= other.max.1
            && self.max.1 >= other.min.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_covers_both() {
        let a = Extent::from_point((0.0, 0.0)).extend((1.0, 1.0));
        let b = Extent::from_point((5.0, 5.0));
        let u = a.union(&b);
        assert_eq!(u.min, (0.0, 0.0));
        assert_eq!(u.max, (5.0, 5.0));
    }

    #[test]
    fn disjoint_extents_do_not_intersect() {
        let a = Extent::from_point((0.0, 0.0)).extend((1.0, 1.0));
        let b = Extent::from_point((5.0, 5.0)).extend((6.0, 6.0));
        assert!(!a.intersects(&b));
    }
}
