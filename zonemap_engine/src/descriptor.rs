//! Serde types for the external zone description format.
//!
//! This is the only place the inclusive-corner external format appears; the
//! manager converts it to the half-open internal form on intake. Parsing the
//! bytes (JSON files etc.) is the caller's business; the engine only defines
//! the shape.

use crate::core::types::Coord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One zone as described by the input, with *inclusive*, order-independent
/// corner positions.
///
/// Any fields beyond the known ones (`equipmentDamage` and friends) are
/// carried verbatim in `extra` and end up as the zone's payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// One corner, inclusive
    pub pos1: Vec<Coord>,
    /// The opposite corner, inclusive; may be on any side of `pos1`
    pub pos2: Vec<Coord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ZoneDescriptor {
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        pos1: impl Into<Vec<Coord>>,
        pos2: impl Into<Vec<Coord>>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            pos1: pos1.into(),
            pos2: pos2.into(),
            extra: Map::new(),
        }
    }
}

/// A region file: a list of zone descriptors in priority order
/// (the on-disk shape is `{"locationBounds": [ ... ]}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionFile {
    #[serde(rename = "locationBounds")]
    pub location_bounds: Vec<ZoneDescriptor>,
}
