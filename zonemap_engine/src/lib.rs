//! # zonemap_engine
//!
//! An index over prioritized, axis-aligned, integer-coordinate zones: feed it
//! an ordered list of possibly-overlapping boxes with metadata, and it
//! answers `zone_of(point)` with the single zone that owns the point, in
//! logarithmic expected time.
//!
//! The pipeline, run once at construction:
//!
//! 1. **Overlap removal**: earlier zones win; later zones are carved down
//!    to the ground they exclusively claim ([zone::resolver]).
//! 2. **Defragmentation**: each zone's leftover pieces are merged into a
//!    minimum number of boxes ([zone::defrag]).
//! 3. **Tree build**: a three-way (less/mid/more) spatial tree over all
//!    surviving fragments ([tree::ZoneTree]).
//!
//! The entry point is [manager::ZoneManager]. The engine does no I/O; the
//! descriptor types in [descriptor] define the input shape and the frontend
//! decides where the bytes come from.

pub mod core;
pub mod descriptor;
pub mod geom;
pub mod manager;
pub mod tree;
pub mod zone;

pub use crate::core::error::BuildError;
pub use crate::manager::{ZoneManager, ZoneManagerOptions};
