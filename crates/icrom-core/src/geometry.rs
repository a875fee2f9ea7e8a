//! Geometric primitives for board layout.
//!
//! This module provides the small set of geometric types the layout engine
//! needs to place traces, vias and labels.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in board space
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Board coordinates follow the Eagle convention:
//!
//! ```text
//!    +Y
//!     ▲
//!     │
//!     │
//!   (0,0) ────────► +X
//! ```
//!
//! - **Origin**: Bottom-left corner of the board at `(0, 0)`
//! - **Units**: Millimetres, stored as `f64`
//! - **Y-axis**: Increases upward

/// A 2D point in board coordinate space, in millimetres.
///
/// # Examples
///
/// ```
/// # use icrom_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Reflects the point across the horizontal line `y = axis`.
    ///
    /// Odd-numbered sense loops are laid out as the mirror image of the even
    /// ones, so the layout engine builds one shape and reflects it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use icrom_core::geometry::Point;
    /// let p = Point::new(3.0, 10.0);
    /// let mirrored = p.mirror_y(50.0);
    /// assert_eq!(mirrored.x(), 3.0);
    /// assert_eq!(mirrored.y(), 90.0);
    /// ```
    pub fn mirror_y(self, axis: f64) -> Self {
        Self {
            x: self.x,
            y: 2.0 * axis - self.y,
        }
    }

    /// Returns `true` if both coordinates are within `epsilon` of `other`.
    pub fn approx_eq(self, other: Point, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

/// An axis-aligned rectangle in board space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates bounds spanning the two corner points, in any order.
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Creates the smallest bounds containing every point.
    ///
    /// Returns `None` for an empty iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// # use icrom_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_points([
    ///     Point::new(1.0, 5.0),
    ///     Point::new(-2.0, 3.0),
    ///     Point::new(4.0, -1.0),
    /// ])
    /// .unwrap();
    /// assert_eq!(bounds.min_x(), -2.0);
    /// assert_eq!(bounds.max_y(), 5.0);
    /// assert_eq!(bounds.width(), 6.0);
    /// ```
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |acc, p| {
            acc.merge(&Self::new(p, p))
        }))
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f64 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f64 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f64 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Returns the bottom-left corner
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Returns the top-right corner
    pub fn max_point(self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns `true` if the point lies inside or on the edge of the bounds.
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Returns `true` if `other` lies entirely inside these bounds.
    pub fn contains_bounds(self, other: Bounds) -> bool {
        self.contains(other.min_point()) && self.contains(other.max_point())
    }

    /// Merges two bounds into the smallest bounds containing both.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the bounds by `margin` on every side.
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    /// Midpoint should always lie between both points.
    fn check_midpoint_is_between_points(p1: Point, p2: Point) -> Result<(), TestCaseError> {
        let mid = p1.midpoint(p2);
        prop_assert!(mid.x() >= p1.x().min(p2.x()) && mid.x() <= p1.x().max(p2.x()));
        prop_assert!(mid.y() >= p1.y().min(p2.y()) && mid.y() <= p1.y().max(p2.y()));
        Ok(())
    }

    /// Mirroring preserves the distance to the axis.
    fn check_mirror_preserves_axis_distance(p: Point, axis: f64) -> Result<(), TestCaseError> {
        let mirrored = p.mirror_y(axis);
        prop_assert!(approx_eq!(
            f64,
            (mirrored.y() - axis).abs(),
            (p.y() - axis).abs(),
            epsilon = 1e-9
        ));
        Ok(())
    }

    /// Bounds built from points contain every point.
    fn check_bounds_contain_their_points(points: Vec<Point>) -> Result<(), TestCaseError> {
        let bounds = Bounds::from_points(points.iter().copied()).unwrap();
        for p in points {
            prop_assert!(bounds.contains(p));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn midpoint_is_between_points(p1 in point_strategy(), p2 in point_strategy()) {
            check_midpoint_is_between_points(p1, p2)?;
        }

        #[test]
        fn mirror_preserves_axis_distance(p in point_strategy(), axis in -500.0f64..500.0) {
            check_mirror_preserves_axis_distance(p, axis)?;
        }

        #[test]
        fn bounds_contain_their_points(points in prop::collection::vec(point_strategy(), 1..20)) {
            check_bounds_contain_their_points(points)?;
        }
    }
}
