use crate::core::types::{Axis, ZoneId};
use crate::geom::aabb::Aabb;
use crate::geom::point::Point;
use getset::{CopyGetters, Getters};
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};

/// A non-overlapping sub-box of a zone that survived overlap removal.
///
/// Fragments are the atoms the search tree is built from: each one maps every
/// point inside its box back to the owning zone. The back-reference is an
/// index into the manager's zone table (zones and fragments would otherwise
/// reference each other cyclically), so fragments stay plain values that can
/// be copied into the tree.
#[derive(Clone, Debug, PartialEq, Eq, Getters, CopyGetters)]
pub struct Fragment {
    /// The box this fragment covers
    #[getset(get = "pub")]
    aabb: Aabb,
    /// Index of the owning zone in the manager's zone table
    #[getset(get_copy = "pub")]
    zone: ZoneId,
    /// Order axes are carved in during overlap removal
    #[getset(get = "pub")]
    axis_order: SmallVec<[Axis; 3]>,
}

impl Fragment {
    pub fn new(zone: ZoneId, aabb: Aabb, axis_order: impl IntoIterator<Item = Axis>) -> Self {
        Self {
            aabb,
            zone,
            axis_order: axis_order.into_iter().collect(),
        }
    }

    pub fn contains(&self, pos: &Point) -> bool { self.aabb.contains(pos) }

    /// Carves `overlap` out of this fragment, returning the disjoint residual
    /// pieces that together cover exactly `self \ overlap`.
    ///
    /// `overlap` must actually intersect this fragment; the caller intersects
    /// first so the running centre piece ends up equal to the overlap and can
    /// be dropped. Axes are processed in this fragment's `axis_order`: at each
    /// axis, every piece produced so far is re-split at the overlap's two
    /// bounds (those pieces are already clear of the overlap on an earlier
    /// axis, so all three parts are kept), while the centre keeps only its
    /// below/above parts and continues shrinking toward the overlap.
    ///
    /// The cutting order changes the *shape* of the residuals, not their
    /// union; thin slivers left here are the defragmenter's job to merge.
    pub fn split_by_overlap(&self, overlap: &Aabb) -> Vec<Fragment> {
        let overlap_min = overlap.min();
        let overlap_max = overlap.max_excl();

        let mut center = self.aabb.clone();
        let mut result: Vec<Aabb> = Vec::new();

        for &axis in &self.axis_order {
            let work = std::mem::take(&mut result);
            for piece in work {
                let (below, rest) = piece.split_axis(overlap_min[axis], axis);
                let (between, above) = rest.split_axis(overlap_max[axis], axis);
                result.extend([below, between, above].into_iter().filter(|b| !b.is_empty()));
            }

            let (below, rest) = center.split_axis(overlap_min[axis], axis);
            let (middle, above) = rest.split_axis(overlap_max[axis], axis);
            center = middle;
            result.extend([below, above].into_iter().filter(|b| !b.is_empty()));
        }

        // `center` is now the overlap itself; it is the part being removed
        result
            .into_iter()
            .map(|aabb| Fragment {
                aabb,
                zone: self.zone,
                axis_order: self.axis_order.clone(),
            })
            .collect()
    }

    /// Joins two sibling fragments into one covering exactly their union,
    /// if their boxes can merge (see [Aabb::merge])
    pub fn merge(&self, other: &Self) -> Option<Self> {
        let aabb = self.aabb.merge(&other.aabb)?;
        Some(Self {
            aabb,
            zone: self.zone,
            axis_order: self.axis_order.clone(),
        })
    }
}

impl Display for Fragment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "zone #{} {}", self.zone, self.aabb)
    }
}
