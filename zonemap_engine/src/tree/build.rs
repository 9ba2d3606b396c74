//! Tree construction: pivot selection and recursive node building.

use crate::core::error::BuildError;
use crate::core::targets;
use crate::core::types::{Axis, Coord};
use crate::tree::{ParentNode, ZoneTree};
use crate::zone::Fragment;
use tracing::{debug, error};

/// One evaluated `(axis, pivot)` candidate: the three-way classification of
/// every fragment index, and the window of the `mid` bucket on the axis
struct SplitCandidate {
    /// Size of the largest of the three buckets; lower is better
    priority: usize,
    axis: Axis,
    pivot: Coord,
    mid_lo: Coord,
    mid_hi: Coord,
    less: Vec<usize>,
    mid: Vec<usize>,
    more: Vec<usize>,
}

impl ZoneTree {
    /// Builds a search tree over the given fragments, which must be pairwise
    /// disjoint.
    ///
    /// Fails with [BuildError::DegenerateSplit] if some recursion step cannot
    /// make progress (every candidate pivot lumps all fragments into a single
    /// bucket); that only happens when the disjointness precondition is
    /// broken, e.g. by duplicate geometry.
    pub fn build(fragments: Vec<Fragment>) -> Result<Self, BuildError> {
        let tree = Self::build_node(fragments)?;
        debug!(
            target: targets::TREE,
            leaves = tree.leaf_count(),
            max_depth = tree.max_depth(),
            "search tree built"
        );
        Ok(tree)
    }

    fn build_node(mut fragments: Vec<Fragment>) -> Result<Self, BuildError> {
        match fragments.len() {
            0 => Ok(Self::Empty),
            1 => Ok(Self::Leaf(fragments.remove(0))),
            len => {
                let Some(split) = best_split(&fragments) else {
                    error!(
                        target: targets::TREE,
                        fragments = len,
                        "no pivot separates these fragments; geometry is not disjoint"
                    );
                    return Err(BuildError::DegenerateSplit { fragments: len });
                };
                Ok(Self::Parent(Box::new(ParentNode::from_split(split, fragments)?)))
            }
        }
    }
}

impl ParentNode {
    fn from_split(split: SplitCandidate, fragments: Vec<Fragment>) -> Result<Self, BuildError> {
        // Deal the fragments out to their buckets; every index lands in
        // exactly one of them, so each fragment is moved exactly once
        let mut slots: Vec<Option<Fragment>> = fragments.into_iter().map(Some).collect();
        let mut take_all = |ids: &[usize]| -> Vec<Fragment> {
            ids.iter().filter_map(|&id| slots[id].take()).collect()
        };
        let less = take_all(&split.less);
        let mid = take_all(&split.mid);
        let more = take_all(&split.more);

        Ok(Self {
            axis: split.axis,
            pivot: split.pivot,
            mid_lo: split.mid_lo,
            mid_hi: split.mid_hi,
            less: ZoneTree::build_node(less)?,
            mid: ZoneTree::build_node(mid)?,
            more: ZoneTree::build_node(more)?,
        })
    }
}

/// Picks the `(axis, pivot)` pair that balances the tree best.
///
/// Candidate pivots are every fragment's min and exclusive-max bound on every
/// axis. Each candidate classifies every fragment as strictly below the pivot
/// (`less`), strictly above (`more`), or overlapping it (`mid`); the winner
/// minimizes the largest bucket, first seen winning ties.
///
/// A candidate whose largest bucket holds *all* the fragments splits nothing
/// and is never accepted; [None] means every candidate was like that.
fn best_split(fragments: &[Fragment]) -> Option<SplitCandidate> {
    let dims = fragments.first().map_or(0, |f| f.aabb().dims());
    let mut best: Option<SplitCandidate> = None;

    for pivot_fragment in fragments {
        for axis in 0..dims {
            let bounds = [
                pivot_fragment.aabb().min_on(axis),
                pivot_fragment.aabb().max_excl_on(axis),
            ];
            for pivot in bounds {
                let mut less = Vec::new();
                let mut mid = Vec::new();
                let mut more = Vec::new();
                let (mut mid_lo, mut mid_hi) = (pivot, pivot);

                for (id, fragment) in fragments.iter().enumerate() {
                    if pivot >= fragment.aabb().max_excl_on(axis) {
                        less.push(id);
                    } else if pivot >= fragment.aabb().min_on(axis) {
                        mid_lo = mid_lo.min(fragment.aabb().min_on(axis));
                        mid_hi = mid_hi.max(fragment.aabb().max_excl_on(axis));
                        mid.push(id);
                    } else {
                        more.push(id);
                    }
                }

                let priority = less.len().max(mid.len()).max(more.len());
                let best_so_far = best.as_ref().map_or(fragments.len(), |b| b.priority);
                if priority >= best_so_far {
                    continue;
                }

                best = Some(SplitCandidate {
                    priority,
                    axis,
                    pivot,
                    mid_lo,
                    mid_hi,
                    less,
                    mid,
                    more,
                });
            }
        }
    }

    best
}
