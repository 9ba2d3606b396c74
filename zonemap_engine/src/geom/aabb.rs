use crate::core::types::{Axis, Coord};
use crate::geom::point::Point;
use getset::Getters;
use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

/// A half-open **Axis-Aligned Bounding Box** on the integer lattice.
///
/// The box spans the point set `{ p : min[i] <= p[i] < min[i] + size[i] }`.
/// Sizes are never negative; a box with *any* zero-size axis is **empty** and
/// contains nothing.
///
/// External data uses inclusive corner pairs; those are converted to this
/// half-open form exactly once, at [Aabb::from_corners]. The inclusive max
/// corner ([Aabb::max_incl]) is only meaningful for non-empty boxes, while
/// the exclusive one ([Aabb::max_excl]) is always defined.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Getters)]
#[getset(get = "pub")]
pub struct Aabb {
    /// The corner of the box with the smallest coordinates
    min: Point,
    /// Per-axis extent; `min + size` is one past the last cell on every axis
    size: Point,
}

// region Constructors

impl Aabb {
    /// Creates a box from its min corner and per-axis sizes.
    ///
    /// # Panics
    /// If `min` and `size` disagree on dimensionality, or any size is negative.
    pub fn new(min: impl Into<Point>, size: impl Into<Point>) -> Self {
        let (min, size) = (min.into(), size.into());
        assert_eq!(
            min.dims(),
            size.dims(),
            "box dimensionality mismatch: min {} vs size {}",
            min.dims(),
            size.dims()
        );
        assert!(size.iter().all(|&s| s >= 0), "box sizes must be non-negative, got {size}");
        Self { min, size }
    }

    /// Creates the box spanning two *inclusive* corners, in either order.
    ///
    /// This is the input-boundary constructor: descriptors give inclusive
    /// corner pairs, which resolve componentwise to
    /// `min = min(a, b)`, `size = max(a, b) - min + 1`.
    pub fn from_corners(a: impl Into<Point>, b: impl Into<Point>) -> Self {
        let (a, b) = (a.into(), b.into());
        let min = a.min_corner([&b]);
        let size = a.max_corner([&b]) + Point::splat(min.dims(), 1) - &min;
        Self { min, size }
    }

    /// Returns the box that surrounds both of the given boxes
    pub fn encompass(a: impl Borrow<Self>, b: impl Borrow<Self>) -> Self {
        let (a, b) = (a.borrow(), b.borrow());
        let min = a.min.min_corner([&b.min]);
        let max = a.max_excl().max_corner([&b.max_excl()]);
        let size = max - &min;
        Self { min, size }
    }

    /// [Self::encompass] but for an arbitrary number of boxes; [None] if there are none
    pub fn encompass_iter<B: Borrow<Self>>(iter: impl IntoIterator<Item = B>) -> Option<Self> {
        iter.into_iter()
            .fold(None, |hull: Option<Self>, b| match hull {
                Some(hull) => Some(Self::encompass(&hull, b.borrow())),
                None => Some(b.borrow().clone()),
            })
    }
}

// endregion Constructors

// region Accessors

impl Aabb {
    pub fn dims(&self) -> usize { self.min.dims() }

    /// The exclusive max corner, `min + size`
    pub fn max_excl(&self) -> Point { &self.min + &self.size }

    /// The inclusive max corner, `min + size - 1`.
    ///
    /// Only meaningful when the box is non-empty.
    pub fn max_incl(&self) -> Point { &self.min + &self.size - Point::splat(self.dims(), 1) }

    pub fn min_on(&self, axis: Axis) -> Coord { self.min[axis] }

    /// The exclusive max bound on one axis
    pub fn max_excl_on(&self, axis: Axis) -> Coord { self.min[axis] + self.size[axis] }

    pub fn volume(&self) -> i128 { self.size.iter().map(|&s| s as i128).product() }

    /// `true` iff any axis has zero size (the box covers no cells)
    pub fn is_empty(&self) -> bool { self.size.iter().any(|&s| s == 0) }
}

// endregion Accessors

// region Geometry

impl Aabb {
    /// Whether the point lies inside the box. Half-open: the upper bound is
    /// strict, so an empty box contains nothing.
    pub fn contains(&self, pos: &Point) -> bool {
        assert_eq!(
            self.dims(),
            pos.dims(),
            "point dimensionality mismatch: {} vs {}",
            self.dims(),
            pos.dims()
        );
        if self.is_empty() {
            return false;
        }
        (0..self.dims()).all(|axis| {
            let p = pos[axis];
            self.min[axis] <= p && p < self.max_excl_on(axis)
        })
    }

    /// The overlap of two boxes, or [None] when they share no cells.
    ///
    /// Boxes that only touch edge-to-edge do not overlap (zero size on the
    /// touching axis).
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let min = self.min.max_corner([&other.min]);
        let max = self.max_excl().min_corner([&other.max_excl()]);
        if min.iter().zip(max.iter()).any(|(lo, hi)| hi <= lo) {
            return None;
        }
        let size = max - &min;
        Some(Self { min, size })
    }

    /// Splits the box along `axis` at `pivot`, returning `(lower, upper)`.
    ///
    /// The lower half keeps the cells strictly below the pivot. Pivots outside
    /// the box are clamped, so either half may come back empty; together the
    /// halves always cover exactly the original box.
    pub fn split_axis(&self, pivot: Coord, axis: Axis) -> (Self, Self) {
        let lower_size = (pivot - self.min[axis]).clamp(0, self.size[axis]);

        let mut lower = self.clone();
        lower.size[axis] = lower_size;

        let mut upper = self.clone();
        upper.min[axis] += lower_size;
        upper.size[axis] -= lower_size;

        (lower, upper)
    }

    /// Joins two boxes into one covering exactly their union, if possible.
    ///
    /// Two boxes can merge iff they agree on every axis except one, and on
    /// that axis they are edge-adjacent (the exclusive max of one equals the
    /// min of the other). Two identical boxes merge to themselves. Returns
    /// [None] otherwise; in particular, boxes differing on two or more axes
    /// never merge, no matter how they touch.
    pub fn merge(&self, other: &Self) -> Option<Self> {
        assert_eq!(
            self.dims(),
            other.dims(),
            "box dimensionality mismatch: {} vs {}",
            self.dims(),
            other.dims()
        );

        let mut differing_axis = None;
        for axis in 0..self.dims() {
            if self.min[axis] == other.min[axis] && self.size[axis] == other.size[axis] {
                continue;
            }
            if differing_axis.replace(axis).is_some() {
                // Second differing axis; the union cannot be a box
                return None;
            }
        }

        let Some(axis) = differing_axis else {
            // Same box
            return Some(self.clone());
        };

        if self.max_excl_on(axis) != other.min[axis] && other.max_excl_on(axis) != self.min[axis] {
            // Not touching
            return None;
        }

        let mut merged = self.clone();
        merged.min[axis] = self.min[axis].min(other.min[axis]);
        merged.size[axis] = self.size[axis] + other.size[axis];
        Some(merged)
    }
}

// endregion Geometry

impl Display for Aabb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "{}+{}", self.min, self.size)
        } else {
            write!(f, "{}..={}", self.min, self.max_incl())
        }
    }
}

// region Tests


// endregion Tests
