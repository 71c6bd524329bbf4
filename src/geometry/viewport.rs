use crate::model::node::Loc;

/// a pure, reentrant pair of functions between geographic and screen
/// coordinates. geometric actions must `project -> compute ->
/// unproject` to remain numerically reversible; the viewport itself is
/// consumed, not owned, by the editing core.
pub trait Viewport {
    fn project(&self, loc: Loc) -> (f64, f64);
    fn unproject(&self, point: (f64, f64)) -> Loc;

    /// world-pixel bounding boxes for the spatial index; by default
    /// the same projection used for editing.
    fn wgs84_to_world(&self, loc: Loc) -> (f64, f64) {
        self.project(loc)
    }
}

/// a simple equirectangular projection scaled by a constant, useful for
/// tests and for headless (non-interactive) callers that have no real map
/// view. `lon`/`lat` map linearly onto `x`/`y` in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatViewport {
    pub scale: f64,
}

impl Default for FlatViewport {
    fn default() -> Self {
        FlatViewport { scale: 1.0 }
    }
}

impl Viewport for FlatViewport {
    fn project(&self, loc: Loc) -> (f64, f64) {
        (loc.lon * self.scale, loc.lat * self.scale)
    }

    fn unproject(&self, point: (f64, f64)) -> Loc {
        Loc::new(point.0 / self.scale, point.1 / self.scale)
    }
}
