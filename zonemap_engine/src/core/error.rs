use crate::core::types::Axis;
use thiserror::Error;

/// Errors that can occur while building a [ZoneManager](crate::manager::ZoneManager).
///
/// These all describe malformed input or broken geometry invariants; an empty
/// descriptor list is *not* an error (queries simply return [None]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A descriptor's corner positions don't all have the manager's dimensionality.
    ///
    /// The dimensionality of the whole manager is taken from the first
    /// descriptor; every other descriptor must match it exactly.
    #[error("zone {zone:?} has {found} coordinate(s), expected {expected}")]
    DimensionMismatch {
        zone: String,
        expected: usize,
        found: usize,
    },

    /// The given axis order is not a strict permutation of `0..dims`.
    #[error("axis order {axis_order:?} is not a permutation of 0..{dims}")]
    InvalidAxisOrder { axis_order: Vec<Axis>, dims: usize },

    /// No pivot candidate partitioned the fragments during tree construction.
    ///
    /// Surviving fragments are pairwise disjoint, which always leaves a usable
    /// pivot; hitting this means the fragment set contains duplicate or
    /// overlapping geometry.
    #[error("no usable split over {fragments} fragment(s); fragment geometry is not disjoint")]
    DegenerateSplit { fragments: usize },
}
