use crate::core::types::{Axis, Coord};
use auto_ops::impl_op_ex;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut};
use std::str::FromStr;
use thiserror::Error;

/// An N-dimensional integer coordinate vector.
///
/// The dimensionality `N` is fixed when the point is created (it is derived
/// from the input data, typically 2 or 3), and every operation that combines
/// two points requires them to agree on it. Mixing dimensionalities is a
/// programmer error and panics immediately.
///
/// Arithmetic never mutates in place unless the `*=`-style operator is used;
/// `+`/`-`/negation all return new values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point(SmallVec<[Coord; 3]>);

// region Constructors

impl Point {
    pub fn new(coords: impl IntoIterator<Item = Coord>) -> Self { Self(coords.into_iter().collect()) }

    /// A point with `dims` axes, every coordinate equal to `value`
    pub fn splat(dims: usize, value: Coord) -> Self { Self(std::iter::repeat(value).take(dims).collect()) }
}

impl From<Vec<Coord>> for Point {
    fn from(coords: Vec<Coord>) -> Self { Self(SmallVec::from_vec(coords)) }
}

impl From<&[Coord]> for Point {
    fn from(coords: &[Coord]) -> Self { Self(SmallVec::from_slice(coords)) }
}

impl<const N: usize> From<[Coord; N]> for Point {
    fn from(coords: [Coord; N]) -> Self { Self(coords.into_iter().collect()) }
}

/// Failure to parse a [Point] from a whitespace-separated coordinate string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid coordinate {text:?} in point string")]
pub struct ParsePointError {
    text: String,
}

impl FromStr for Point {
    type Err = ParsePointError;

    /// Parses a whitespace-separated coordinate string, e.g. `"-1441 2 -1441"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(|text| {
                text.parse::<Coord>().map_err(|_| ParsePointError { text: text.to_owned() })
            })
            .collect::<Result<_, _>>()
            .map(Self)
    }
}

// endregion Constructors

// region Accessors

impl Point {
    /// The number of axes of this point
    pub fn dims(&self) -> usize { self.0.len() }

    pub fn iter(&self) -> impl Iterator<Item = &Coord> { self.0.iter() }
}

impl Index<Axis> for Point {
    type Output = Coord;

    fn index(&self, axis: Axis) -> &Coord { &self.0[axis] }
}

impl IndexMut<Axis> for Point {
    fn index_mut(&mut self, axis: Axis) -> &mut Coord { &mut self.0[axis] }
}

// endregion Accessors

// region Arithmetic

/// Panics unless both points have the same number of axes
fn check_dims(a: &Point, b: &Point) {
    assert_eq!(
        a.dims(),
        b.dims(),
        "point dimensionality mismatch: {} vs {}",
        a.dims(),
        b.dims()
    );
}

impl_op_ex!(+ |a: &Point, b: &Point| -> Point {
    check_dims(a, b);
    Point(a.0.iter().zip(b.0.iter()).map(|(x, y)| x + y).collect())
});

impl_op_ex!(- |a: &Point, b: &Point| -> Point {
    check_dims(a, b);
    Point(a.0.iter().zip(b.0.iter()).map(|(x, y)| x - y).collect())
});

impl_op_ex!(+= |a: &mut Point, b: &Point| {
    check_dims(a, b);
    a.0.iter_mut().zip(b.0.iter()).for_each(|(x, y)| *x += y);
});

impl_op_ex!(-= |a: &mut Point, b: &Point| {
    check_dims(a, b);
    a.0.iter_mut().zip(b.0.iter()).for_each(|(x, y)| *x -= y);
});

impl_op_ex!(- |a: &Point| -> Point { Point(a.0.iter().map(|x| -x).collect()) });

impl Point {
    /// Componentwise minimum across `self` and any number of other points
    pub fn min_corner<'a>(&self, others: impl IntoIterator<Item = &'a Point>) -> Point {
        let mut result = self.clone();
        for other in others {
            check_dims(&result, other);
            result.0.iter_mut().zip(other.0.iter()).for_each(|(r, o)| *r = (*r).min(*o));
        }
        result
    }

    /// Componentwise maximum across `self` and any number of other points
    pub fn max_corner<'a>(&self, others: impl IntoIterator<Item = &'a Point>) -> Point {
        let mut result = self.clone();
        for other in others {
            check_dims(&result, other);
            result.0.iter_mut().zip(other.0.iter()).for_each(|(r, o)| *r = (*r).max(*o));
        }
        result
    }
}

// endregion Arithmetic

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

// region Tests


// endregion Tests
