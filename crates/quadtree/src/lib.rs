//! Static point-region quadtree.
//!
//! This crate contains:
//! - `Point` and `Rectangle` value types with the geometric predicates
//! - `QuadTree`, built once from a point set and queried by rectangle
//! - `QuadTreeError` for rejected construction input

mod error;
mod rectangle;
mod tree;

pub use error::{QuadTreeError, Result};
pub use rectangle::Rectangle;
pub use tree::{QuadTree, DEFAULT_MAX_DEPTH};

/// A 2D point. Defaults to the origin.
pub type Point = glam::DVec2;
