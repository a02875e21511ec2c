//! Core circle type and the predicates the packer is built on.
//!
//! A `Circle` is a plain value: center and radius, `Copy`, never mutated
//! after construction. Every predicate here is pure and works on the
//! rounded center distance (see [`crate::precision`]), so two circles
//! built by the tangent construction compare as touching rather than as
//! overlapping by a few ulps.

use crate::precision::{round_to, DISTANCE_DECIMALS, RADIUS_DECIMALS};

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unrounded distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A circle given by its center and radius.
///
/// `PartialEq` is exact field-wise equality, the same relation as
/// [`Circle::geometrically_equal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

/// How two circles relate to each other.
///
/// Replaces a raw intersection-point count. Note that internal tangency
/// (one circle touching the other from inside) is reported as
/// `Intersecting`; only external tangency is detected as `Tangent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intersection {
    /// No common point: apart, or one strictly inside the other.
    Disjoint,
    /// Touching from outside, one common point.
    Tangent,
    /// Two common points (also internal tangency, see above).
    Intersecting,
    /// Same center and same radius.
    Identical,
}

impl Intersection {
    /// True when the circles share interior area.
    #[inline]
    pub fn overlaps(self) -> bool {
        matches!(self, Intersection::Intersecting | Intersection::Identical)
    }
}

impl Circle {
    /// Create a circle. The radius is expected to be positive; callers
    /// that accept user input validate it first.
    #[inline]
    pub fn new(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self { center_x, center_y, radius }
    }

    /// Circle of the given radius centered on the origin.
    #[inline]
    pub fn at_origin(radius: f64) -> Self {
        Self::new(0.0, 0.0, radius)
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    #[inline]
    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    /// Same circle with the radius grown by `amount`.
    #[inline]
    pub fn inflated(&self, amount: f64) -> Self {
        Self::new(self.center_x, self.center_y, self.radius + amount)
    }

    /// Distance between the two centers, rounded to 3 decimal places.
    #[inline]
    pub fn distance_to(&self, other: &Circle) -> f64 {
        distance_of_centers(self, other)
    }

    /// Exact equality of all three fields.
    #[inline]
    pub fn geometrically_equal(&self, other: &Circle) -> bool {
        self.center_x == other.center_x
            && self.center_y == other.center_y
            && self.radius == other.radius
    }

    /// Classify how `self` and `other` meet.
    ///
    /// Radius sum and difference are rounded to 4 places and compared
    /// against the 3-place center distance, so a circle constructed to
    /// touch another lands exactly on `Tangent`.
    pub fn intersection(&self, other: &Circle) -> Intersection {
        if self.geometrically_equal(other) {
            return Intersection::Identical;
        }

        let radii_sum = round_to(self.radius + other.radius, RADIUS_DECIMALS);
        let radii_difference = round_to(other.radius - self.radius, RADIUS_DECIMALS).abs();
        let distance = self.distance_to(other);

        if distance > radii_sum || distance < radii_difference {
            Intersection::Disjoint
        } else if distance == radii_sum {
            Intersection::Tangent
        } else {
            Intersection::Intersecting
        }
    }

    /// True when `self` lies inside `outer`, touching its boundary allowed.
    ///
    /// Identical circles count as inside. Otherwise the circles must not
    /// cross (`Disjoint` or `Tangent`) and `self`'s center must lie
    /// strictly within `outer`'s radius, which rules out the case where
    /// the two are simply apart.
    pub fn is_inside(&self, outer: &Circle) -> bool {
        if outer.geometrically_equal(self) {
            return true;
        }
        let crossing = self.intersection(outer);
        matches!(crossing, Intersection::Disjoint | Intersection::Tangent)
            && outer.distance_to(self) - outer.radius < 0.0
    }
}

/// Euclidean distance between two centers, rounded to 3 decimal places.
///
/// The fixed precision stabilises the equality test for tangency in
/// [`Circle::intersection`].
#[inline]
pub fn distance_of_centers(a: &Circle, b: &Circle) -> f64 {
    round_to(a.center().distance(b.center()), DISTANCE_DECIMALS)
}
