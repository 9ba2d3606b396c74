//! Three-way spatial search tree over the surviving fragments.
//!
//! Each parent node picks an axis and an integer pivot and sorts its
//! fragments into `less` (entirely below the pivot), `more` (entirely above)
//! and `mid` (straddling or touching it). Boxes are not points, so the `mid`
//! bucket cannot be avoided; queries descend one side and fall back into
//! `mid` only when the point lies inside the bucket's recorded window.

use crate::core::types::{Axis, Coord, ZoneId};
use crate::geom::point::Point;
use crate::zone::Fragment;
use getset::{CopyGetters, Getters};
use std::fmt::{Display, Formatter};

mod build;

/// A node of the search tree.
///
/// A tagged variant rather than a trait hierarchy: the shape is fixed after
/// build, and queries just match on it.
#[derive(Clone, Debug)]
pub enum ZoneTree {
    /// No fragments below this point
    Empty,
    /// Exactly one fragment
    Leaf(Fragment),
    /// A three-way split over two or more fragments
    Parent(Box<ParentNode>),
}

#[derive(Clone, Debug, Getters, CopyGetters)]
pub struct ParentNode {
    /// Axis the pivot applies to
    #[getset(get_copy = "pub")]
    axis: Axis,
    #[getset(get_copy = "pub")]
    pivot: Coord,
    /// Smallest min bound among the `mid` fragments on `axis`
    #[getset(get_copy = "pub")]
    mid_lo: Coord,
    /// Largest exclusive max bound among the `mid` fragments on `axis`
    #[getset(get_copy = "pub")]
    mid_hi: Coord,
    #[getset(get = "pub")]
    less: ZoneTree,
    #[getset(get = "pub")]
    mid: ZoneTree,
    #[getset(get = "pub")]
    more: ZoneTree,
}

// region Query

impl ZoneTree {
    /// Looks up the zone owning the fragment that contains `pos`, if any.
    ///
    /// Fragments are disjoint, so at most one leaf anywhere in the tree can
    /// match a given point.
    pub fn get_zone(&self, pos: &Point) -> Option<ZoneId> {
        match self {
            Self::Empty => None,
            Self::Leaf(fragment) => fragment.contains(pos).then(|| fragment.zone()),
            Self::Parent(parent) => parent.get_zone(pos),
        }
    }
}

impl ParentNode {
    fn get_zone(&self, pos: &Point) -> Option<ZoneId> {
        let side = if pos[self.axis] > self.pivot { &self.more } else { &self.less };
        if let Some(zone) = side.get_zone(pos) {
            return Some(zone);
        }

        // Not on the chosen side; it can still be in a fragment straddling
        // the pivot, but only within the mid bucket's window
        if self.mid_lo <= pos[self.axis] && pos[self.axis] < self.mid_hi {
            return self.mid.get_zone(pos);
        }

        None
    }
}

// endregion Query

// region Statistics

/// Debug and statistics views; none of these are on the query path.
impl ZoneTree {
    /// Number of leaf nodes (= indexed fragments)
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Leaf(_) => 1,
            Self::Parent(p) => p.less.leaf_count() + p.mid.leaf_count() + p.more.leaf_count(),
        }
    }

    pub fn max_depth(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Leaf(_) => 1,
            Self::Parent(p) => {
                1 + p.less.max_depth().max(p.mid.max_depth()).max(p.more.max_depth())
            }
        }
    }

    pub fn all_leaf_depths(&self) -> Vec<usize> {
        match self {
            Self::Empty => vec![],
            Self::Leaf(_) => vec![1],
            Self::Parent(p) => [&p.less, &p.mid, &p.more]
                .into_iter()
                .flat_map(Self::all_leaf_depths)
                .map(|depth| depth + 1)
                .collect(),
        }
    }

    pub fn total_leaf_depth(&self) -> usize { self.all_leaf_depths().into_iter().sum() }

    /// Mean leaf depth; `0.0` for an empty tree
    pub fn average_depth(&self) -> f64 {
        match self.leaf_count() {
            0 => 0.0,
            leaves => self.total_leaf_depth() as f64 / leaves as f64,
        }
    }

    /// Renders the tree structure with box-drawing characters, one node per
    /// line, for debugging. The same text [Display] produces.
    pub fn show_tree(&self) -> String { self.to_string() }

    fn fmt_node(&self, f: &mut Formatter<'_>, prefix: &str) -> std::fmt::Result {
        match self {
            Self::Empty => writeln!(f, "{prefix}╴<tree is empty>"),
            Self::Leaf(fragment) => writeln!(f, "{prefix}╴{fragment}"),
            Self::Parent(p) => {
                writeln!(
                    f,
                    "{prefix}┬╴axis={}, pivot={}, mid_lo={}, mid_hi={}",
                    p.axis, p.pivot, p.mid_lo, p.mid_hi
                )?;
                let base: String = prefix
                    .chars()
                    .map(|c| match c {
                        '─' | '└' => ' ',
                        '├' => '│',
                        other => other,
                    })
                    .collect();
                p.less.fmt_node(f, &format!("{base}├─"))?;
                p.mid.fmt_node(f, &format!("{base}├─"))?;
                p.more.fmt_node(f, &format!("{base}└─"))
            }
        }
    }
}

impl Display for ZoneTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { self.fmt_node(f, "─") }
}

// endregion Statistics

// region Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::aabb::Aabb;

    fn fragment(zone: ZoneId, pos1: [i64; 2], pos2: [i64; 2]) -> Fragment {
        Fragment::new(zone, Aabb::from_corners(pos1, pos2), [0, 1])
    }

    #[test]
    fn empty_tree_finds_nothing() {
        let tree = ZoneTree::build(vec![]).unwrap();
        assert!(matches!(tree, ZoneTree::Empty));
        assert_eq!(tree.get_zone(&Point::from([0, 0])), None);
        assert_eq!(tree.leaf_count(), 0);
        assert_eq!(tree.max_depth(), 0);
        assert_eq!(tree.average_depth(), 0.0);
    }

    #[test]
    fn single_leaf() {
        let tree = ZoneTree::build(vec![fragment(7, [0, 0], [2, 2])]).unwrap();
        assert_eq!(tree.get_zone(&Point::from([1, 2])), Some(7));
        assert_eq!(tree.get_zone(&Point::from([3, 0])), None);
        assert_eq!(tree.max_depth(), 1);
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn two_disjoint_fragments() {
        let tree = ZoneTree::build(vec![
            fragment(0, [0, 0], [2, 2]),
            fragment(1, [5, 0], [7, 2]),
        ])
        .unwrap();
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.max_depth(), 2);
        assert_eq!(tree.get_zone(&Point::from([1, 1])), Some(0));
        assert_eq!(tree.get_zone(&Point::from([6, 1])), Some(1));
        assert_eq!(tree.get_zone(&Point::from([4, 1])), None);
        assert_eq!(tree.get_zone(&Point::from([1, 3])), None);
    }

    #[test]
    fn every_cell_of_a_grid_resolves() {
        // 4x4 patchwork of 2x2 fragments, one zone each
        let mut fragments = vec![];
        for gx in 0..4 {
            for gy in 0..4 {
                let min = [gx * 2, gy * 2];
                let max = [gx * 2 + 1, gy * 2 + 1];
                fragments.push(fragment((gx * 4 + gy) as ZoneId, min, max));
            }
        }
        let tree = ZoneTree::build(fragments).unwrap();
        assert_eq!(tree.leaf_count(), 16);

        for x in 0..8 {
            for y in 0..8 {
                let expected = ((x / 2) * 4 + (y / 2)) as ZoneId;
                assert_eq!(tree.get_zone(&Point::from([x, y])), Some(expected), "at ({x}, {y})");
            }
        }
        assert_eq!(tree.get_zone(&Point::from([8, 0])), None);
        assert_eq!(tree.get_zone(&Point::from([-1, 5])), None);
    }

    #[test]
    fn show_tree_renders_every_leaf() {
        let tree = ZoneTree::build(vec![
            fragment(0, [0, 0], [2, 2]),
            fragment(1, [5, 0], [7, 2]),
            fragment(2, [0, 5], [2, 7]),
        ])
        .unwrap();
        let rendered = tree.show_tree();
        assert_eq!(rendered.matches("zone #").count(), 3);
        assert!(rendered.contains("axis="));
    }
}

// endregion Tests
