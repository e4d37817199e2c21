//! Core types for spatial cluster scanning.

use bytemuck::{Pod, Zeroable};

/// A point in the 2D plane.
///
/// This type provides a small `#[repr(C)]` representation with a stable
/// layout. Coordinates are plain Euclidean; the crate does no geodesic math.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create from any type implementing `Point2Like`.
    #[inline]
    pub fn from_like<P: Point2Like>(p: &P) -> Self {
        Self::new(p.x(), p.y())
    }

    /// Squared Euclidean distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn to_glam(self) -> glam::DVec2 {
        glam::DVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn from_glam(v: glam::DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<[f64; 2]> for Point2 {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point2> for [f64; 2] {
    #[inline]
    fn from(p: Point2) -> Self {
        [p.x, p.y]
    }
}

impl From<glam::DVec2> for Point2 {
    #[inline]
    fn from(v: glam::DVec2) -> Self {
        Self::from_glam(v)
    }
}

impl From<Point2> for glam::DVec2 {
    #[inline]
    fn from(p: Point2) -> glam::DVec2 {
        p.to_glam()
    }
}

/// Trait for types that can be used as input points.
///
/// This allows zero-copy input from various math libraries.
pub trait Point2Like {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
}

impl Point2Like for Point2 {
    #[inline]
    fn x(&self) -> f64 {
        self.x
    }
    #[inline]
    fn y(&self) -> f64 {
        self.y
    }
}

impl Point2Like for [f64; 2] {
    #[inline]
    fn x(&self) -> f64 {
        self[0]
    }
    #[inline]
    fn y(&self) -> f64 {
        self[1]
    }
}

impl Point2Like for (f64, f64) {
    #[inline]
    fn x(&self) -> f64 {
        self.0
    }
    #[inline]
    fn y(&self) -> f64 {
        self.1
    }
}

impl Point2Like for glam::DVec2 {
    #[inline]
    fn x(&self) -> f64 {
        self.x
    }
    #[inline]
    fn y(&self) -> f64 {
        self.y
    }
}

/// Axis-aligned bounding box over one or more point sets.
///
/// Grid dimensions are derived from this box and the search radius, so all
/// point sets participating in one scan must share a single box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    /// An empty box that is the identity for `union`.
    pub const EMPTY: Self = Self {
        x_min: f64::INFINITY,
        y_min: f64::INFINITY,
        x_max: f64::NEG_INFINITY,
        y_max: f64::NEG_INFINITY,
    };

    /// Smallest box containing all points. Returns `EMPTY` for an empty slice.
    pub fn from_points<P: Point2Like>(points: &[P]) -> Self {
        let mut b = Self::EMPTY;
        for p in points {
            b.x_min = b.x_min.min(p.x());
            b.y_min = b.y_min.min(p.y());
            b.x_max = b.x_max.max(p.x());
            b.y_max = b.y_max.max(p.y());
        }
        b
    }

    /// Smallest box containing both boxes.
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// True if the box contains at least one point (min <= max on both axes).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.x_min <= self.x_max && self.y_min <= self.y_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point2_basics() {
        let a = Point2::new(1.0, 2.0);
        let b = Point2::new(4.0, 6.0);
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(a.distance_squared(a), 0.0);
    }

    #[test]
    fn test_point2_like_trait() {
        fn accepts_like<P: Point2Like>(p: &P) -> f64 {
            p.x() + p.y()
        }

        let p = Point2::new(1.0, 2.0);
        let arr = [1.0f64, 2.0];
        let tuple = (1.0f64, 2.0f64);
        let v = glam::DVec2::new(1.0, 2.0);

        assert_eq!(accepts_like(&p), 3.0);
        assert_eq!(accepts_like(&arr), 3.0);
        assert_eq!(accepts_like(&tuple), 3.0);
        assert_eq!(accepts_like(&v), 3.0);
    }

    #[test]
    fn test_bounding_box_union() {
        let a = BoundingBox::from_points(&[[0.0, 0.0], [2.0, 1.0]]);
        let b = BoundingBox::from_points(&[[-1.0, 3.0]]);
        let u = a.union(b);
        assert_eq!(u.x_min, -1.0);
        assert_eq!(u.y_min, 0.0);
        assert_eq!(u.x_max, 2.0);
        assert_eq!(u.y_max, 3.0);
        assert!(u.is_valid());
    }

    #[test]
    fn test_bounding_box_empty() {
        let e = BoundingBox::from_points::<Point2>(&[]);
        assert!(!e.is_valid());
        let a = BoundingBox::from_points(&[[1.0, 1.0]]);
        assert_eq!(e.union(a), a);
    }
}
