/// Numeric type used for all zone coordinates in the engine
///
/// Coordinates are exact integers; the whole engine works on a half-open
/// integer lattice and never touches floating point (the only exception being
/// tree statistics such as [average_depth](crate::tree::ZoneTree::average_depth)).
pub type Coord = i64;

/// Index of an axis within a [Point](crate::geom::point::Point) (`0..N`)
pub type Axis = usize;

/// Numeric identifier used to uniquely mark zones.
///
/// This is the zone's zero-based position in the input descriptor list, and
/// doubles as its priority rank: the lower id wins where zones overlap.
pub type ZoneId = usize;
