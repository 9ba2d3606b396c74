//! Per-zone minimum-cover defragmentation.
//!
//! Overlap removal leaves each zone covered by many thin boxes; any disjoint
//! cover of the same region is equally correct, but the search tree gets
//! shallower the fewer fragments it has to index. This module rewrites a
//! zone's fragment list to a minimum-cardinality cover reachable through
//! pairwise merges.
//!
//! The exact search is exponential in the fragment count. That is acceptable
//! because it runs per zone (counts stay small after overlap removal) and
//! only once, at build time; a cap can route oversized zones to a greedy
//! pass instead.

use crate::core::targets;
use crate::zone::{Fragment, Zone};
use fixedbitset::FixedBitSet;
use indexmap::IndexMap;
use tracing::debug;

/// Set of original-fragment indices a merged box covers
type IdSet = FixedBitSet;

/// Rewrites the zone's fragments to a minimum-size cover of the same region.
///
/// With `cap = Some(n)`, zones holding more than `n` fragments skip the
/// exact search for [greedy_merge] (still correct, not always minimal).
pub(crate) fn defragment(zone: &mut Zone, cap: Option<usize>) {
    let count = zone.fragments().len();
    if count < 2 {
        // Nothing to do
        return;
    }

    if cap.is_some_and(|cap| count > cap) {
        let merged = greedy_merge(zone.fragments().clone());
        debug!(
            target: targets::DEFRAG,
            zone = %zone.name(),
            before = count,
            after = merged.len(),
            "over the exact-search cap, merged greedily"
        );
        zone.set_fragments(merged);
        return;
    }

    let levels = merge_combinations(zone.fragments());

    let mut cover = Vec::new();
    let mut remaining = IdSet::with_capacity(count);
    remaining.insert_range(..);
    if optimal_cover(&levels, &mut cover, &remaining) {
        debug!(
            target: targets::DEFRAG,
            zone = %zone.name(),
            before = count,
            after = cover.len(),
            "defragmented"
        );
        zone.set_fragments(cover);
    }
}

/// Builds every way of merging the fragments into a single box, level by
/// level: level 1 holds the singletons, and a level `l` entry is a box equal
/// to the union of exactly `l` original fragments, reachable by merging a
/// level `a` and a level `b` entry with disjoint id sets (`a + b = l`).
/// Entries are keyed by id set, so the same union is recorded once.
fn merge_combinations(fragments: &[Fragment]) -> Vec<IndexMap<IdSet, Fragment>> {
    let count = fragments.len();
    let mut levels: Vec<IndexMap<IdSet, Fragment>> = vec![IndexMap::new(); count + 1];

    for (i, fragment) in fragments.iter().enumerate() {
        let mut ids = IdSet::with_capacity(count);
        ids.insert(i);
        levels[1].insert(ids, fragment.clone());
    }

    for level in 2..=count {
        let (built, rest) = levels.split_at_mut(level);
        let current = &mut rest[0];

        for lower in 1..=(level / 2) {
            let upper = level - lower;
            for (upper_ids, upper_fragment) in &built[upper] {
                for (lower_ids, lower_fragment) in &built[lower] {
                    let mut merged_ids = upper_ids.clone();
                    merged_ids.union_with(lower_ids);
                    if merged_ids.count_ones(..) != level {
                        // Shared ids; not a union of `level` distinct fragments
                        continue;
                    }
                    if current.contains_key(&merged_ids) {
                        continue;
                    }
                    let Some(merged) = upper_fragment.merge(lower_fragment) else {
                        continue;
                    };
                    current.insert(merged_ids, merged);
                }
            }
        }
    }

    levels
}

/// Depth-first search for the smallest list of merged boxes whose id sets
/// partition all the original fragments.
///
/// Highest levels are tried first at every depth, so the first complete
/// partition found uses the fewest pieces; in the worst case the original
/// singletons are returned.
fn optimal_cover(
    levels: &[IndexMap<IdSet, Fragment>],
    cover: &mut Vec<Fragment>,
    remaining: &IdSet,
) -> bool {
    let remaining_count = remaining.count_ones(..);
    for level in (1..=remaining_count).rev() {
        for (ids, fragment) in &levels[level] {
            if !ids.is_subset(remaining) {
                continue;
            }

            let mut rest = remaining.clone();
            rest.difference_with(ids);

            cover.push(fragment.clone());
            if rest.is_clear() || optimal_cover(levels, cover, &rest) {
                return true;
            }
            cover.pop();
        }
    }
    false
}

/// Fallback for oversized zones: repeatedly merge the first mergeable pair
/// until no pair merges. Never increases the count, but may miss the optimum.
fn greedy_merge(mut fragments: Vec<Fragment>) -> Vec<Fragment> {
    let mut merged_any = true;
    while merged_any {
        merged_any = false;
        'scan: for a in 0..fragments.len() {
            for b in (a + 1)..fragments.len() {
                if let Some(merged) = fragments[a].merge(&fragments[b]) {
                    fragments[a] = merged;
                    fragments.swap_remove(b);
                    merged_any = true;
                    break 'scan;
                }
            }
        }
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::aabb::Aabb;
    use crate::zone::Zone;

    fn zone_with_cells(cells: &[[i64; 2]]) -> Zone {
        let mut zone = Zone::new(1, "Patch", "Test", Aabb::from_corners(cells[0], cells[0]), [0, 1]);
        let fragments = cells
            .iter()
            .map(|&cell| Fragment::new(1, Aabb::from_corners(cell, cell), [0, 1]))
            .collect();
        zone.set_fragments(fragments);
        zone
    }

    #[test]
    fn square_of_cells_becomes_one_box() {
        let mut zone = zone_with_cells(&[[0, 0], [0, 1], [1, 0], [1, 1]]);
        zone.defragment(None);
        assert_eq!(zone.fragments().len(), 1);
        assert_eq!(*zone.fragments()[0].aabb(), Aabb::from_corners([0, 0], [1, 1]));
    }

    #[test]
    fn l_shape_needs_two_boxes() {
        let mut zone = zone_with_cells(&[[0, 0], [0, 1], [1, 0]]);
        zone.defragment(None);
        assert_eq!(zone.fragments().len(), 2);
        let total: i128 = zone.fragments().iter().map(|f| f.aabb().volume()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn unmergeable_fragments_are_kept() {
        let mut zone = zone_with_cells(&[[0, 0], [2, 2]]);
        zone.defragment(None);
        assert_eq!(zone.fragments().len(), 2);
    }

    /// A ring carved with a vertical-first axis order is full of slivers;
    /// the exact search finds the four-slab cover
    #[test]
    fn ring_reduces_to_four_slabs() {
        let mut zone = Zone::new(1, "Ring", "Test", Aabb::from_corners([1, 1], [5, 5]), [0, 1]);
        zone.split_by_overlap(&Aabb::from_corners([2, 2], [4, 4]));
        assert_eq!(zone.fragments().len(), 8);
        let before: i128 = zone.fragments().iter().map(|f| f.aabb().volume()).sum();

        zone.defragment(None);

        assert_eq!(zone.fragments().len(), 4);
        let after: i128 = zone.fragments().iter().map(|f| f.aabb().volume()).sum();
        assert_eq!(before, after);
        for (i, a) in zone.fragments().iter().enumerate() {
            for b in &zone.fragments()[i + 1..] {
                assert!(a.aabb().intersect(b.aabb()).is_none());
            }
        }
    }

    #[test]
    fn greedy_pass_still_merges() {
        let mut zone = zone_with_cells(&[[0, 0], [0, 1], [1, 0], [1, 1]]);
        // Cap below the fragment count forces the greedy path
        zone.defragment(Some(2));
        assert_eq!(zone.fragments().len(), 1);
    }
}
