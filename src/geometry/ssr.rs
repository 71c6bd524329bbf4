//! smallest surrounding rectangle (SSR): the minimum-area rectangle, at any
//! rotation, enclosing a set of 2D points. used by `reflect`, `straightenNodes`
//! and `straightenWay` to pick a long/short axis.

use super::vector::Point2;
use geo::{ConvexHull, MultiPoint};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ssr {
    pub center: Point2,
    /// rotation of the rectangle's "long" side, in radians.
    pub angle: f64,
    pub long_extent: f64,
    pub short_extent: f64,
}

impl Ssr {
    pub fn long_axis(&self) -> Point2 {
        (self.angle.cos(), self.angle.sin())
    }

    pub fn short_axis(&self) -> Point2 {
        (-self.angle.sin(), self.angle.cos())
    }

    /// the chosen axis direction vector, long or short per `use_long_axis`.
    pub fn axis(&self, use_long_axis: bool) -> Point2 {
        if use_long_axis {
            self.long_axis()
        } else {
            self.short_axis()
        }
    }

    /// maximum perpendicular distance of `points` from the long axis through
    /// the SSR's center, used by `straightenNodes`/`straightenWay`'s
    /// `disabled()` thresholds.
    pub fn max_off_axis_distance(&self, points: &[Point2]) -> f64 {
        let axis = self.long_axis();
        points
            .iter()
            .map(|p| super::vector::off_axis_distance(*p, self.center, axis))
            .fold(0.0, f64::max)
    }
}

/// computes the SSR of `points` using a brute-force rotating-calipers
/// variant: every convex-hull edge direction is tried as a candidate
/// rectangle orientation, and the minimum-area one wins. points with fewer
/// than 2 distinct locations have no well-defined axis and return `None`.
pub fn smallest_surrounding_rectangle(points: &[Point2]) -> Option<Ssr> {
    if points.len() < 2 {
        return None;
    }
    let hull = MultiPoint::from(points.iter().map(|p| geo::Coord { x: p.0, y: p.1 }).collect::<Vec<_>>())
        .convex_hull();
    let hull_coords: Vec<Point2> = hull.exterior().coords().map(|c| (c.x, c.y)).collect();

    if hull_coords.len() < 2 {
        return None;
    }

    let mut candidate_angles: Vec<f64> = hull_coords
        .windows(2)
        .map(|w| {
            let (dx, dy) = (w[1].0 - w[0].0, w[1].1 - w[0].1);
            dy.atan2(dx)
        })
        .collect();
    if candidate_angles.is_empty() {
        candidate_angles.push(0.0);
    }

    let mut best: Option<Ssr> = None;
    let mut best_area = f64::INFINITY;

    for angle in candidate_angles {
        let (sin, cos) = angle.sin_cos();
        // rotate every point into the candidate frame by -angle.
        let rotated: Vec<Point2> = points
            .iter()
            .map(|&(x, y)| (x * cos + y * sin, -x * sin + y * cos))
            .collect();
        let min_x = rotated.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let max_x = rotated.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        let min_y = rotated.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = rotated.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        let width = max_x - min_x;
        let height = max_y - min_y;
        let area = width * height;

        if area < best_area {
            best_area = area;
            // rotate the rectangle's center back into world coordinates.
            let center_rotated = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
            let center = (
                center_rotated.0 * cos - center_rotated.1 * sin,
                center_rotated.0 * sin + center_rotated.1 * cos,
            );
            let (long_extent, short_extent, long_angle) = if width >= height {
                (width / 2.0, height / 2.0, angle)
            } else {
                (height / 2.0, width / 2.0, angle + std::f64::consts::FRAC_PI_2)
            };
            best = Some(Ssr {
                center,
                angle: long_angle,
                long_extent,
                short_extent,
            });
        }
    }

    best
}
