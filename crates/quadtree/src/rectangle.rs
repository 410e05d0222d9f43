//! Axis-aligned rectangles and the predicates the tree prunes with.

use crate::error::{QuadTreeError, Result};
use crate::Point;

/// Axis-aligned bounding box.
///
/// Assumes `bottom_left <= top_right` on both axes. Nothing enforces it; a
/// flipped rectangle makes every predicate below answer nonsense.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    pub bottom_left: Point,
    pub top_right: Point,
}

impl Rectangle {
    pub const fn new(bottom_left: Point, top_right: Point) -> Self {
        Self { bottom_left, top_right }
    }

    /// Create a rectangle from its four edges.
    #[inline]
    pub const fn from_edges(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self::new(Point::new(left, bottom), Point::new(right, top))
    }

    /// Tight bounding box of a non-empty point collection.
    pub fn bounding(points: &[Point]) -> Result<Self> {
        let (first, rest) = points.split_first().ok_or(QuadTreeError::EmptyInput)?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Ok(Self::new(min, max))
    }

    /// Overlap test, boundary-touching included.
    #[inline]
    pub fn intersects(&self, other: &Rectangle) -> bool {
        !(self.bottom_left.x > other.top_right.x
            || self.bottom_left.y > other.top_right.y
            || self.top_right.x < other.bottom_left.x
            || self.top_right.y < other.bottom_left.y)
    }

    /// True only when `self` lies strictly inside `outer` on all four sides.
    /// A rectangle is not strictly inside itself.
    #[inline]
    pub fn is_strictly_inside(&self, outer: &Rectangle) -> bool {
        self.bottom_left.x > outer.bottom_left.x
            && self.bottom_left.y > outer.bottom_left.y
            && self.top_right.x < outer.top_right.x
            && self.top_right.y < outer.top_right.y
    }

    /// Closed-interval point membership; edges and corners count as inside.
    #[inline]
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.bottom_left.x
            && point.x <= self.top_right.x
            && point.y >= self.bottom_left.y
            && point.y <= self.top_right.y
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.top_right.x - self.bottom_left.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.top_right.y - self.bottom_left.y
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    #[inline]
    pub fn center(&self) -> Point {
        (self.bottom_left + self.top_right) / 2.0
    }

    /// Split at the center into `[NW, NE, SW, SE]`.
    pub fn quadrants(&self) -> [Rectangle; 4] {
        let mid = self.center();
        let Self { bottom_left: bl, top_right: tr } = *self;
        [
            Rectangle::from_edges(bl.x, mid.y, mid.x, tr.y),
            Rectangle::new(mid, tr),
            Rectangle::new(bl, mid),
            Rectangle::from_edges(mid.x, bl.y, tr.x, mid.y),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(-1.0, -1.0),
            Point::new(2.0, 2.0),
        ];
        let rect = Rectangle::bounding(&points).unwrap();
        assert_eq!(rect, Rectangle::from_edges(-1.0, -1.0, 2.0, 2.0));
    }

    #[test]
    fn test_bounding_single_point() {
        let rect = Rectangle::bounding(&[Point::new(3.0, -4.0)]).unwrap();
        assert_eq!(rect.bottom_left, rect.top_right);
        assert_eq!(rect.area(), 0.0);
    }

    #[test]
    fn test_bounding_empty() {
        assert_eq!(Rectangle::bounding(&[]), Err(QuadTreeError::EmptyInput));
    }

    #[test]
    fn test_intersects() {
        let a = Rectangle::from_edges(0.0, 0.0, 10.0, 10.0);
        let b = Rectangle::from_edges(5.0, 5.0, 15.0, 15.0);
        let c = Rectangle::from_edges(20.0, 20.0, 30.0, 30.0);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(!c.intersects(&a));
    }

    #[test]
    fn test_touching_edges_intersect() {
        let a = Rectangle::from_edges(0.0, 0.0, 1.0, 1.0);
        let right = Rectangle::from_edges(1.0, 0.0, 2.0, 1.0);
        let corner = Rectangle::from_edges(1.0, 1.0, 2.0, 2.0);
        assert!(a.intersects(&right));
        assert!(a.intersects(&corner));
    }

    #[test]
    fn test_strictly_inside() {
        let outer = Rectangle::from_edges(0.0, 0.0, 10.0, 10.0);
        let inner = Rectangle::from_edges(1.0, 1.0, 9.0, 9.0);
        let flush = Rectangle::from_edges(0.0, 1.0, 9.0, 9.0);

        assert!(inner.is_strictly_inside(&outer));
        assert!(!outer.is_strictly_inside(&inner));
        assert!(!flush.is_strictly_inside(&outer));
        assert!(!outer.is_strictly_inside(&outer));
    }

    #[test]
    fn test_contains_is_closed() {
        let rect = Rectangle::from_edges(0.0, 0.0, 2.0, 2.0);
        assert!(rect.contains(&Point::new(1.0, 1.0)));
        assert!(rect.contains(&Point::new(0.0, 0.0)));
        assert!(rect.contains(&Point::new(2.0, 2.0)));
        assert!(rect.contains(&Point::new(0.0, 2.0)));
        assert!(!rect.contains(&Point::new(2.0 + 1e-9, 1.0)));
        assert!(!rect.contains(&Point::new(1.0, -1e-9)));
    }

    #[test]
    fn test_quadrants_tile_parent() {
        let parent = Rectangle::from_edges(-1.0, -1.0, 2.0, 2.0);
        let [nw, ne, sw, se] = parent.quadrants();

        assert_eq!(nw, Rectangle::from_edges(-1.0, 0.5, 0.5, 2.0));
        assert_eq!(ne, Rectangle::from_edges(0.5, 0.5, 2.0, 2.0));
        assert_eq!(sw, Rectangle::from_edges(-1.0, -1.0, 0.5, 0.5));
        assert_eq!(se, Rectangle::from_edges(0.5, -1.0, 2.0, 0.5));

        let total: f64 = [nw, ne, sw, se].iter().map(Rectangle::area).sum();
        assert!((total - parent.area()).abs() < 1e-12);
    }
}
