//! Bucketed point-region quadtree.
//!
//! The tree is built once, top-down, from a fixed point set and never
//! mutated afterwards. A node holding more than `capacity` points is split at
//! its center into four quadrants (NW, NE, SW, SE). Points on the vertical
//! split line go east, points on the horizontal one go north.

use tracing::debug;

use crate::error::{QuadTreeError, Result};
use crate::{Point, Rectangle};

/// Depth at which a node stays a leaf regardless of its point count.
///
/// Enough halvings to walk the whole `f64` exponent range of a boundary.
pub const DEFAULT_MAX_DEPTH: usize = 1100;

#[derive(Debug, Clone)]
enum Node {
    Leaf { points: Vec<Point> },
    /// Children in NW, NE, SW, SE order.
    Internal { children: Box<[QuadTree; 4]> },
}

/// A quadtree node and the subtree it owns.
#[derive(Debug, Clone)]
pub struct QuadTree {
    boundary: Rectangle,
    capacity: usize,
    node: Node,
}

impl QuadTree {
    /// Build a tree over `points` whose leaves hold at most `capacity` points.
    ///
    /// The root boundary is the tight bounding box of the input. Fails on an
    /// empty point set or a zero capacity.
    pub fn new(points: &[Point], capacity: usize) -> Result<Self> {
        Self::with_max_depth(points, capacity, DEFAULT_MAX_DEPTH)
    }

    /// Like [`QuadTree::new`], with an explicit depth limit.
    ///
    /// A node stays a leaf above capacity only when all its points share one
    /// coordinate, when halving its boundary no longer narrows it at `f64`
    /// precision, or at `max_depth`. Without these, more than `capacity`
    /// duplicates would split forever. Queries are unaffected since such
    /// leaves are filtered point by point.
    pub fn with_max_depth(points: &[Point], capacity: usize, max_depth: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(QuadTreeError::InvalidCapacity);
        }
        let boundary = Rectangle::bounding(points)?;
        let tree = Self::build(boundary, points.to_vec(), capacity, max_depth);

        debug!(
            points = points.len(),
            capacity,
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            "Built quadtree"
        );
        Ok(tree)
    }

    fn build(boundary: Rectangle, points: Vec<Point>, capacity: usize, depth_left: usize) -> Self {
        if points.len() <= capacity {
            return Self::leaf(boundary, points, capacity);
        }
        if depth_left == 0 {
            debug!(points = points.len(), capacity, ?boundary, "Depth limit reached, leaf kept over capacity");
            return Self::leaf(boundary, points, capacity);
        }
        if points.windows(2).all(|pair| pair[0] == pair[1]) {
            debug!(points = points.len(), capacity, ?boundary, "Identical points, leaf kept over capacity");
            return Self::leaf(boundary, points, capacity);
        }

        let total = points.len();
        let mid = boundary.center();
        let mut groups: [Vec<Point>; 4] = Default::default();
        for point in points {
            groups[quadrant_index(&point, &mid)].push(point);
        }

        // A quadrant equal to its parent that takes every point would split the same way forever.
        let quadrants = boundary.quadrants();
        if let Some(stuck) = (0..4).find(|&i| quadrants[i] == boundary && groups[i].len() == total) {
            debug!(points = total, capacity, ?boundary, "Split cannot narrow boundary, leaf kept over capacity");
            let points = std::mem::take(&mut groups[stuck]);
            return Self::leaf(boundary, points, capacity);
        }

        // Always four children, empty quadrants included.
        let [nw, ne, sw, se] = quadrants;
        let [nw_points, ne_points, sw_points, se_points] = groups;
        let children = [
            Self::build(nw, nw_points, capacity, depth_left - 1),
            Self::build(ne, ne_points, capacity, depth_left - 1),
            Self::build(sw, sw_points, capacity, depth_left - 1),
            Self::build(se, se_points, capacity, depth_left - 1),
        ];

        Self { boundary, capacity, node: Node::Internal { children: Box::new(children) } }
    }

    fn leaf(boundary: Rectangle, points: Vec<Point>, capacity: usize) -> Self {
        Self { boundary, capacity, node: Node::Leaf { points } }
    }

    /// Region this node is responsible for.
    #[inline]
    pub fn boundary(&self) -> &Rectangle {
        &self.boundary
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.node, Node::Leaf { .. })
    }

    /// The four children in NW, NE, SW, SE order, or `None` for a leaf.
    pub fn children(&self) -> Option<&[QuadTree; 4]> {
        match &self.node {
            Node::Internal { children } => Some(&**children),
            Node::Leaf { .. } => None,
        }
    }

    /// Points stored at this node, or `None` if it is internal.
    pub fn leaf_points(&self) -> Option<&[Point]> {
        match &self.node {
            Node::Leaf { points } => Some(points.as_slice()),
            Node::Internal { .. } => None,
        }
    }

    /// Total number of points stored in this subtree.
    pub fn len(&self) -> usize {
        match &self.node {
            Node::Leaf { points } => points.len(),
            Node::Internal { children } => children.iter().map(QuadTree::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Height of this subtree; 0 for a leaf.
    pub fn depth(&self) -> usize {
        match &self.node {
            Node::Leaf { .. } => 0,
            Node::Internal { children } => {
                1 + children.iter().map(QuadTree::depth).max().unwrap_or(0)
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match &self.node {
            Node::Leaf { .. } => 1,
            Node::Internal { children } => children.iter().map(QuadTree::leaf_count).sum(),
        }
    }

    /// Every leaf of this subtree, depth-first in NW, NE, SW, SE order.
    pub fn leaves(&self) -> Vec<&QuadTree> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a QuadTree>) {
        match &self.node {
            Node::Leaf { .. } => out.push(self),
            Node::Internal { children } => {
                for child in children.iter() {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Boundary of every leaf, in [`QuadTree::leaves`] order.
    pub fn rectangles(&self) -> Vec<Rectangle> {
        self.leaves().into_iter().map(|leaf| leaf.boundary).collect()
    }

    /// Unfiltered point group of every leaf, in [`QuadTree::leaves`] order.
    pub fn point_groups(&self) -> Vec<Vec<Point>> {
        self.leaves()
            .into_iter()
            .map(|leaf| leaf.leaf_points().unwrap_or_default().to_vec())
            .collect()
    }

    /// All points stored in this subtree, in leaf order.
    pub fn points(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.len());
        self.collect_points(&mut points);
        points
    }

    fn collect_points(&self, out: &mut Vec<Point>) {
        match &self.node {
            Node::Leaf { points } => out.extend_from_slice(points),
            Node::Internal { children } => {
                for child in children.iter() {
                    child.collect_points(out);
                }
            }
        }
    }

    /// Exact filter of this subtree's points against `area`, without pruning.
    pub fn points_in(&self, area: &Rectangle) -> Vec<Point> {
        let mut found = Vec::new();
        self.points_in_into(area, &mut found);
        found
    }

    fn points_in_into(&self, area: &Rectangle, found: &mut Vec<Point>) {
        match &self.node {
            Node::Leaf { points } => {
                found.extend(points.iter().filter(|point| area.contains(point)));
            }
            Node::Internal { children } => {
                for child in children.iter() {
                    child.points_in_into(area, found);
                }
            }
        }
    }

    /// Points lying inside `area`, edges included.
    ///
    /// Subtrees whose boundary misses `area` are skipped, and subtrees whose
    /// boundary lies strictly inside it are returned whole. A boundary equal
    /// to `area` is not strictly inside, so it is filtered point by point.
    pub fn query(&self, area: &Rectangle) -> Vec<Point> {
        let mut found = Vec::new();
        self.query_into(area, &mut found);
        found
    }

    fn query_into(&self, area: &Rectangle, found: &mut Vec<Point>) {
        if !self.boundary.intersects(area) {
            return;
        }
        if self.boundary.is_strictly_inside(area) {
            self.collect_points(found);
            return;
        }

        match &self.node {
            Node::Internal { children } => {
                for child in children.iter() {
                    child.query_into(area, found);
                }
            }
            Node::Leaf { .. } => self.points_in_into(area, found),
        }
    }
}

/// Index into `[NW, NE, SW, SE]`. Ties go east and north.
#[inline]
fn quadrant_index(point: &Point, mid: &Point) -> usize {
    let east = point.x >= mid.x;
    let north = point.y >= mid.y;
    match (north, east) {
        (true, false) => 0,
        (true, true) => 1,
        (false, false) => 2,
        (false, true) => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut points: Vec<Point>) -> Vec<Point> {
        points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        points
    }

    fn sample() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(-1.0, -1.0),
            Point::new(2.0, 2.0),
        ]
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(QuadTree::new(&[], 4).unwrap_err(), QuadTreeError::EmptyInput);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = QuadTree::new(&sample(), 0).unwrap_err();
        assert_eq!(err, QuadTreeError::InvalidCapacity);
    }

    #[test]
    fn test_small_input_stays_leaf() {
        let tree = QuadTree::new(&sample(), 4).unwrap();
        assert!(tree.is_leaf());
        assert_eq!(tree.leaf_points().unwrap(), sample().as_slice());
        assert_eq!(tree.rectangles(), vec![Rectangle::from_edges(-1.0, -1.0, 2.0, 2.0)]);
    }

    #[test]
    fn test_sample_scenario() {
        let tree = QuadTree::new(&sample(), 1).unwrap();
        assert_eq!(*tree.boundary(), Rectangle::from_edges(-1.0, -1.0, 2.0, 2.0));
        assert!(!tree.is_leaf());
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.leaf_count(), 10);

        let found = tree.query(&Rectangle::from_edges(0.0, 0.0, 2.0, 2.0));
        assert_eq!(
            sorted(found),
            vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)]
        );
    }

    #[test]
    fn test_empty_quadrants_get_leaves() {
        let tree = QuadTree::new(&sample(), 1).unwrap();
        let [nw, ne, sw, se] = tree.children().unwrap();
        assert!(nw.is_leaf() && nw.is_empty());
        assert!(se.is_leaf() && se.is_empty());
        assert_eq!(ne.len(), 2);
        assert_eq!(sw.len(), 2);
    }

    #[test]
    fn test_ties_go_north_east() {
        // Root is [0,2]x[0,2], so the split lines are x = 1 and y = 1.
        let points = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ];
        let tree = QuadTree::new(&points, 4).unwrap();
        let [nw, ne, sw, se] = tree.children().unwrap();

        assert_eq!(nw.points(), vec![Point::new(0.0, 1.0)]);
        assert_eq!(ne.points(), vec![Point::new(2.0, 2.0), Point::new(1.0, 1.0)]);
        assert_eq!(sw.points(), vec![Point::new(0.0, 0.0)]);
        assert_eq!(se.points(), vec![Point::new(1.0, 0.0)]);
    }

    #[test]
    fn test_query_outside_is_empty() {
        let tree = QuadTree::new(&sample(), 1).unwrap();
        let found = tree.query(&Rectangle::from_edges(10.0, 10.0, 20.0, 20.0));
        assert!(found.is_empty());
    }

    #[test]
    fn test_query_own_boundary_returns_everything() {
        let tree = QuadTree::new(&sample(), 1).unwrap();
        let found = tree.query(tree.boundary());
        assert_eq!(sorted(found), sorted(sample()));
    }

    #[test]
    fn test_query_degenerate_area() {
        let tree = QuadTree::new(&sample(), 1).unwrap();
        let at = Point::new(1.0, 1.0);
        assert_eq!(tree.query(&Rectangle::new(at, at)), vec![at]);

        let nowhere = Point::new(0.5, 0.25);
        assert!(tree.query(&Rectangle::new(nowhere, nowhere)).is_empty());
    }

    #[test]
    fn test_points_in_matches_query() {
        let tree = QuadTree::new(&sample(), 1).unwrap();
        let area = Rectangle::from_edges(-1.0, -1.0, 0.5, 1.0);
        assert_eq!(sorted(tree.points_in(&area)), sorted(tree.query(&area)));
    }

    #[test]
    fn test_duplicates_terminate() {
        let mut points = vec![Point::new(1.0, 1.0); 10];
        points.push(Point::new(0.0, 0.0));
        let tree = QuadTree::with_max_depth(&points, 2, 16).unwrap();

        assert!(tree.depth() <= 16);
        assert_eq!(tree.len(), 11);
        let found = tree.query(&Rectangle::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0)));
        assert_eq!(found.len(), 10);
    }

    #[test]
    fn test_all_identical_points_stay_in_root() {
        let points = vec![Point::new(5.0, 5.0); 8];
        let tree = QuadTree::new(&points, 1).unwrap();
        assert!(tree.is_leaf());
        assert_eq!(tree.len(), 8);
    }

    #[test]
    fn test_wide_range_respects_capacity() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(1e30, 1e30),
        ];
        let tree = QuadTree::new(&points, 1).unwrap();

        assert!(tree.depth() > 64);
        assert!(tree.leaves().iter().all(|leaf| leaf.len() <= 1));
        assert_eq!(sorted(tree.points()), sorted(points.to_vec()));
        let found = tree.query(&Rectangle::from_edges(0.5, -1.0, 2.0, 1.0));
        assert_eq!(sorted(found), vec![Point::new(1.0, 0.0), Point::new(2.0, 0.0)]);
    }

    #[test]
    fn test_adjacent_floats_stop_splitting() {
        // No f64 lies strictly between these, so halving cannot separate them.
        let next = f64::from_bits(1.0f64.to_bits() + 1);
        let points = [Point::new(1.0, 0.0), Point::new(next, 0.0)];
        let tree = QuadTree::new(&points, 1).unwrap();

        assert!(tree.is_leaf());
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.query(tree.boundary()).len(), 2);
    }

    #[test]
    fn test_explicit_max_depth_caps_tree() {
        let tree = QuadTree::with_max_depth(&sample(), 1, 1).unwrap();
        assert_eq!(tree.depth(), 1);
        let [_, ne, sw, _] = tree.children().unwrap();
        assert!(ne.is_leaf() && ne.len() == 2);
        assert!(sw.is_leaf() && sw.len() == 2);
    }

    #[test]
    fn test_points_in_ignores_pruning() {
        let tree = QuadTree::new(&sample(), 1).unwrap();
        let everything = Rectangle::from_edges(-5.0, -5.0, 5.0, 5.0);
        assert_eq!(sorted(tree.points_in(&everything)), sorted(sample()));
        let [_, ne, _, _] = tree.children().unwrap();
        assert_eq!(ne.points_in(&Rectangle::from_edges(1.5, 1.5, 2.0, 2.0)), vec![Point::new(2.0, 2.0)]);
    }

    #[test]
    fn test_capacity_propagates() {
        let tree = QuadTree::new(&sample(), 1).unwrap();
        assert!(tree.leaves().iter().all(|leaf| leaf.capacity() == 1));
    }
}
