//! plain 2D vector math used by the geometric actions. operates on
//! `(f64, f64)` projected-screen points; callers are responsible for the
//! `project -> compute -> unproject` sandwich via a [`super::viewport::Viewport`].

pub type Point2 = (f64, f64);

pub fn sub(a: Point2, b: Point2) -> Point2 {
    (a.0 - b.0, a.1 - b.1)
}

pub fn add(a: Point2, b: Point2) -> Point2 {
    (a.0 + b.0, a.1 + b.1)
}

pub fn scale(p: Point2, k: f64) -> Point2 {
    (p.0 * k, p.1 * k)
}

pub fn dot(a: Point2, b: Point2) -> f64 {
    a.0 * b.0 + a.1 * b.1
}

pub fn length(p: Point2) -> f64 {
    dot(p, p).sqrt()
}

pub fn distance(a: Point2, b: Point2) -> f64 {
    length(sub(a, b))
}

/// clamps `t` into `[0, 1]`; non-finite values are treated as `1` per the
/// action transition-parameter rule.
pub fn clamp_t(t: Option<f64>) -> f64 {
    match t {
        Some(v) if v.is_finite() => v.clamp(0.0, 1.0),
        _ => 1.0,
    }
}

/// linear interpolation between `from` and `to` at `t`.
pub fn lerp(from: Point2, to: Point2, t: f64) -> Point2 {
    add(from, scale(sub(to, from), t))
}

/// rotates `p` about `pivot` by `angle` radians.
pub fn rotate_about(p: Point2, pivot: Point2, angle: f64) -> Point2 {
    let (dx, dy) = sub(p, pivot);
    let (sin, cos) = angle.sin_cos();
    let rx = dx * cos - dy * sin;
    let ry = dx * sin + dy * cos;
    add(pivot, (rx, ry))
}

/// scales the radial offset of `p` from `pivot` by `factor`.
pub fn scale_about(p: Point2, pivot: Point2, factor: f64) -> Point2 {
    let offset = sub(p, pivot);
    add(pivot, scale(offset, factor))
}

/// reflects `c` across the axis through `p` with direction vector `(dx, dy)`,
/// per the formula:
/// `c' = p + (A*(c-p).x + B*(c-p).y, B*(c-p).x - A*(c-p).y)`
/// with `A = (dx^2 - dy^2) / (dx^2 + dy^2)`, `B = 2*dx*dy / (dx^2 + dy^2)`.
pub fn reflect_across(c: Point2, p: Point2, axis: Point2) -> Point2 {
    let (dx, dy) = axis;
    let denom = dx * dx + dy * dy;
    if denom.abs() < f64::EPSILON {
        return c;
    }
    let a = (dx * dx - dy * dy) / denom;
    let b = 2.0 * dx * dy / denom;
    let (cx, cy) = sub(c, p);
    let rx = a * cx + b * cy;
    let ry = b * cx - a * cy;
    add(p, (rx, ry))
}

/// scalar projection of `p` onto the line through `origin` with unit
/// direction `axis`, returned as a point on that line.
pub fn project_onto_axis(p: Point2, origin: Point2, axis: Point2) -> Point2 {
    let len = length(axis);
    if len < f64::EPSILON {
        return p;
    }
    let unit = scale(axis, 1.0 / len);
    let t = dot(sub(p, origin), unit);
    add(origin, scale(unit, t))
}

/// perpendicular (off-axis) distance of `p` from the line through `origin`
/// with direction `axis`.
pub fn off_axis_distance(p: Point2, origin: Point2, axis: Point2) -> f64 {
    distance(p, project_onto_axis(p, origin, axis))
}

/// interior angle in radians at `b` formed by `a-b-c`. used to detect a
/// near-straight (~180 degree) vertex when deciding whether to insert a
/// preserved-shape vertex during `move`.
pub fn angle_at(a: Point2, b: Point2, c: Point2) -> f64 {
    let v1 = sub(a, b);
    let v2 = sub(c, b);
    let l1 = length(v1);
    let l2 = length(v2);
    if l1 < f64::EPSILON || l2 < f64::EPSILON {
        return std::f64::consts::PI;
    }
    let cos_theta = (dot(v1, v2) / (l1 * l2)).clamp(-1.0, 1.0);
    cos_theta.acos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn rotate_quarter_turn() {
        let p = rotate_about((1.0, 0.0), (0.0, 0.0), PI / 2.0);
        assert!((p.0 - 0.0).abs() < 1e-9);
        assert!((p.1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn reflect_across_x_axis_flips_y() {
        let p = reflect_across((3.0, 4.0), (0.0, 0.0), (1.0, 0.0));
        assert!((p.0 - 3.0).abs() < 1e-9);
        assert!((p.1 + 4.0).abs() < 1e-9);
    }

    #[test]
    fn double_reflect_round_trips() {
        let p = (3.0, 4.0);
        let once = reflect_across(p, (1.0, 1.0), (2.0, -1.0));
        let twice = reflect_across(once, (1.0, 1.0), (2.0, -1.0));
        assert!(distance(p, twice) < 1e-9);
    }

    #[test]
    fn straight_angle_is_pi() {
        let theta = angle_at((0.0, 0.0), (1.0, 0.0), (2.0, 0.0));
        assert!((theta - PI).abs() < 1e-9);
    }

    #[test]
    fn clamp_t_treats_non_finite_as_one() {
        assert_eq!(clamp_t(None), 1.0);
        assert_eq!(clamp_t(Some(f64::NAN)), 1.0);
        assert_eq!(clamp_t(Some(1.5)), 1.0);
        assert_eq!(clamp_t(Some(-0.5)), 0.0);
        assert_eq!(clamp_t(Some(0.25)), 0.25);
    }
}
