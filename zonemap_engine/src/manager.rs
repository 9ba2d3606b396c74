//! The facade tying the pipeline together: descriptors in, point queries out.

use crate::core::error::BuildError;
use crate::core::targets;
use crate::core::types::{Axis, ZoneId};
use crate::descriptor::ZoneDescriptor;
use crate::geom::aabb::Aabb;
use crate::geom::point::Point;
use crate::tree::ZoneTree;
use crate::zone::{resolver, Zone};
use getset::{CopyGetters, Getters};
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};
use tracing::debug;

/// Build-time knobs. The defaults match the plain [ZoneManager::new].
#[derive(Debug, Clone, Default)]
pub struct ZoneManagerOptions {
    /// Order axes are carved in during overlap removal; identity when absent.
    /// Must be a strict permutation of `0..dims`. Changes the shape of
    /// intermediate fragments, never the surviving region.
    pub axis_order: Option<Vec<Axis>>,
    /// Per-zone fragment count above which defragmentation falls back from
    /// the exact (exponential) search to a greedy merge pass
    pub defrag_cap: Option<usize>,
}

/// An immutable index over a prioritized list of zones.
///
/// Construction runs the full pipeline: descriptors become zones (one
/// fragment each), overlaps are removed so earlier zones win, each zone's
/// fragments are merged down to a minimum cover, and a search tree is built
/// over everything that survived.
///
/// After that the manager never changes: [zone_of](Self::zone_of) takes
/// `&self` and can be called from any number of reader threads at once.
#[derive(Debug, Clone)]
pub struct ZoneManager {
    zones: Vec<Zone>,
    tree: ZoneTree,
    dims: usize,
    axis_order: SmallVec<[Axis; 3]>,
}

// region Construction

impl ZoneManager {
    /// Builds a manager with the identity axis order
    pub fn new(descriptors: &[ZoneDescriptor]) -> Result<Self, BuildError> {
        Self::with_options(descriptors, ZoneManagerOptions::default())
    }

    /// Builds a manager carving axes in the given order
    pub fn with_axis_order(
        descriptors: &[ZoneDescriptor],
        axis_order: impl Into<Vec<Axis>>,
    ) -> Result<Self, BuildError> {
        Self::with_options(
            descriptors,
            ZoneManagerOptions {
                axis_order: Some(axis_order.into()),
                ..Default::default()
            },
        )
    }

    pub fn with_options(
        descriptors: &[ZoneDescriptor],
        options: ZoneManagerOptions,
    ) -> Result<Self, BuildError> {
        // Dimensionality comes from the first descriptor; everything else
        // must agree with it
        let dims = descriptors.first().map_or(0, |d| d.pos1.len());
        for descriptor in descriptors {
            for found in [descriptor.pos1.len(), descriptor.pos2.len()] {
                if found != dims {
                    return Err(BuildError::DimensionMismatch {
                        zone: descriptor.name.clone(),
                        expected: dims,
                        found,
                    });
                }
            }
        }

        let axis_order: SmallVec<[Axis; 3]> = match options.axis_order {
            Some(order) => {
                validate_axis_order(&order, dims)?;
                SmallVec::from_vec(order)
            }
            None => (0..dims).collect(),
        };

        let mut zones: Vec<Zone> = descriptors
            .iter()
            .enumerate()
            .map(|(id, descriptor)| Zone::from_descriptor(descriptor, id, &axis_order))
            .collect();

        debug!(target: targets::MANAGER, zones = zones.len(), dims, "removing overlaps");
        resolver::remove_overlaps(&mut zones);

        debug!(target: targets::MANAGER, "defragmenting");
        // The first zone is never carved, so there is nothing to merge there
        for zone in zones.iter_mut().skip(1) {
            zone.defragment(options.defrag_cap);
        }

        let fragments = zones.iter().flat_map(|zone| zone.fragments().iter().cloned()).collect();
        let tree = ZoneTree::build(fragments)?;

        Ok(Self {
            zones,
            tree,
            dims,
            axis_order,
        })
    }
}

/// `axis_order` must name every axis exactly once
fn validate_axis_order(axis_order: &[Axis], dims: usize) -> Result<(), BuildError> {
    let mut sorted: Vec<Axis> = axis_order.to_vec();
    sorted.sort_unstable();
    if sorted != (0..dims).collect::<Vec<_>>() {
        return Err(BuildError::InvalidAxisOrder {
            axis_order: axis_order.to_vec(),
            dims,
        });
    }
    Ok(())
}

// endregion Construction

// region Queries

impl ZoneManager {
    /// Number of zones, eclipsed ones included
    pub fn len(&self) -> usize { self.zones.len() }

    pub fn is_empty(&self) -> bool { self.zones.is_empty() }

    pub fn get(&self, id: ZoneId) -> Option<&Zone> { self.zones.get(id) }

    pub fn zones(&self) -> &[Zone] { &self.zones }

    pub fn dims(&self) -> usize { self.dims }

    pub fn axis_order(&self) -> &[Axis] { &self.axis_order }

    pub fn tree(&self) -> &ZoneTree { &self.tree }

    /// The zone owning `pos`, if any. At most one zone can match: overlap
    /// removal made all fragments disjoint, and priority already decided who
    /// keeps contested ground.
    pub fn zone_of(&self, pos: &Point) -> Option<&Zone> {
        self.tree.get_zone(pos).and_then(|id| self.zones.get(id))
    }

    /// The box surrounding every zone's base box; [None] when there are no zones
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::encompass_iter(self.zones.iter().map(Zone::base))
    }

    /// Pairwise intersections of the *input* boxes, before overlap removal:
    /// a diagnostic view of what the resolver had to carve. Lazy; pairs are
    /// visited in priority order.
    pub fn overlapping_zones(&self) -> impl Iterator<Item = ZoneOverlap> + '_ {
        self.zones.iter().enumerate().flat_map(move |(i, a)| {
            self.zones[i + 1..].iter().filter_map(move |b| {
                let aabb = a.base().intersect(b.base())?;
                Some(ZoneOverlap {
                    name: format!("{} X {}", a.name(), b.name()),
                    kind: a.kind().clone(),
                    zones: (a.original_id(), b.original_id()),
                    aabb,
                })
            })
        })
    }
}

// endregion Queries

/// A synthetic zone describing where two input zones intersect.
///
/// Carries the higher-priority zone's kind, and the intersection of the two
/// base boxes as its geometry.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct ZoneOverlap {
    /// `"<first> X <second>"`, after the names of the two zones
    #[getset(get = "pub")]
    name: String,
    #[getset(get = "pub")]
    kind: String,
    /// Original ids of the two intersecting zones, lower first
    #[getset(get_copy = "pub")]
    zones: (ZoneId, ZoneId),
    #[getset(get = "pub")]
    aabb: Aabb,
}

impl Display for ZoneOverlap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Overlap {:?} ({}) {}", self.name, self.kind, self.aabb)
    }
}

// region Tests


// endregion Tests
