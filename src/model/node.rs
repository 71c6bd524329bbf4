use super::tags::Tags;
use crate::id::EntityId;
use geo::Coord;
use serde::{Deserialize, Serialize};

/// a geographic location, stored as `(lon, lat)`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Loc {
    pub lon: f64,
    pub lat: f64,
}

impl Loc {
    pub fn new(lon: f64, lat: f64) -> Self {
        Loc { lon, lat }
    }
}

impl From<Loc> for Coord<f64> {
    fn from(loc: Loc) -> Self {
        Coord { x: loc.lon, y: loc.lat }
    }
}

impl From<Coord<f64>> for Loc {
    fn from(c: Coord<f64>) -> Self {
        Loc { lon: c.x, lat: c.y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: EntityId,
    pub version: u32,
    pub tags: Tags,
    pub visible: bool,
    pub loc: Loc,
}

impl Node {
    pub fn new(id: EntityId, loc: Loc) -> Self {
        Node {
            id,
            version: 0,
            tags: Tags::new(),
            visible: true,
            loc,
        }
    }
}
