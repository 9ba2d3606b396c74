//! Zones and their surviving fragments.
//!
//! A [Zone] is a named, prioritized box straight from the input; its
//! [Fragment]s are the disjoint pieces of it left over once every
//! higher-priority zone has carved away its claim.

use crate::core::types::{Axis, ZoneId};
use crate::descriptor::ZoneDescriptor;
use crate::geom::aabb::Aabb;
use crate::geom::point::Point;
use getset::{CopyGetters, Getters};
use serde_json::{Map, Value};
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};

pub mod defrag;
pub mod fragment;
pub(crate) mod resolver;

pub use fragment::Fragment;

/// A named, typed, tagged axis-aligned box with priority.
///
/// The priority is the zone's zero-based position in the input list
/// (`original_id`); where two zones overlap, the lower id keeps the ground.
/// After overlap removal a zone may hold zero or more disjoint fragments,
/// all inside `base`; a zone left with zero fragments is totally eclipsed
/// and never answers a query, but it stays in the table.
#[derive(Clone, Debug, Getters, CopyGetters)]
pub struct Zone {
    #[getset(get = "pub")]
    name: String,
    /// The zone's type tag (`"type"` in descriptors)
    #[getset(get = "pub")]
    kind: String,
    #[getset(get_copy = "pub")]
    original_id: ZoneId,
    /// Descriptor fields carried verbatim (e.g. `equipmentDamage`)
    #[getset(get = "pub")]
    payload: Map<String, Value>,
    /// The zone's initial box, as given
    #[getset(get = "pub")]
    base: Aabb,
    #[getset(get = "pub")]
    fragments: Vec<Fragment>,
    #[getset(get = "pub")]
    axis_order: SmallVec<[Axis; 3]>,
}

impl Zone {
    /// Creates a zone claiming its whole base box (a single fragment)
    pub fn new(
        original_id: ZoneId,
        name: impl Into<String>,
        kind: impl Into<String>,
        base: Aabb,
        axis_order: impl IntoIterator<Item = Axis>,
    ) -> Self {
        let axis_order: SmallVec<[Axis; 3]> = axis_order.into_iter().collect();
        let fragments = vec![Fragment::new(original_id, base.clone(), axis_order.iter().copied())];
        Self {
            name: name.into(),
            kind: kind.into(),
            original_id,
            payload: Map::new(),
            base,
            fragments,
            axis_order,
        }
    }

    pub(crate) fn from_descriptor(
        descriptor: &ZoneDescriptor,
        original_id: ZoneId,
        axis_order: &[Axis],
    ) -> Self {
        let base = Aabb::from_corners(descriptor.pos1.as_slice(), descriptor.pos2.as_slice());
        let mut zone = Self::new(
            original_id,
            descriptor.name.clone(),
            descriptor.kind.clone(),
            base,
            axis_order.iter().copied(),
        );
        zone.payload = descriptor.extra.clone();
        zone
    }

    pub fn dims(&self) -> usize { self.base.dims() }

    /// The inclusive min corner of the base box (`pos1` in descriptor terms)
    pub fn pos1(&self) -> Point { self.base.min().clone() }

    /// The inclusive max corner of the base box (`pos2` in descriptor terms)
    pub fn pos2(&self) -> Point { self.base.max_incl() }

    /// Rewrites this zone's fragments to exclude `overlap`.
    ///
    /// Fragments untouched by the overlap survive as-is; the rest are carved
    /// by [Fragment::split_by_overlap]. Afterwards the fragment list may be
    /// empty (total eclipse); the caller decides how loudly to report that.
    pub fn split_by_overlap(&mut self, overlap: &Aabb) {
        let mut new_fragments = Vec::with_capacity(self.fragments.len());
        for fragment in std::mem::take(&mut self.fragments) {
            match fragment.aabb().intersect(overlap) {
                None => new_fragments.push(fragment),
                Some(sub_overlap) => new_fragments.extend(fragment.split_by_overlap(&sub_overlap)),
            }
        }
        self.fragments = new_fragments;
    }

    /// Rewrites the fragment list to a minimum-size cover of the same region.
    ///
    /// See [defrag::defragment]; `cap` bounds the exact search (fragment
    /// counts above it take a greedy pass instead).
    pub fn defragment(&mut self, cap: Option<usize>) {
        defrag::defragment(self, cap);
    }

    pub(crate) fn set_fragments(&mut self, fragments: Vec<Fragment>) { self.fragments = fragments; }
}

impl Display for Zone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Zone #{} {:?} ({}) {}", self.original_id, self.name, self.kind, self.base)
    }
}
