//! Geometry kernel: points, segments, and the predicates every engine shares.
//!
//! Purpose
//! - One orientation predicate with one relative collinear band, used by all
//!   four hull algorithms and both intersection algorithms.
//! - Tolerance-aware equality and duplicate collapsing for parsed input.
//!
//! Assumptions and conventions
//! - Coordinates are finite `f64`; constructors reject NaN/∞.
//! - `Left` means counter-clockwise; hulls are reported CCW.
//! - Code cross-refs: `crate::config::GeomCfg`, `crate::hull`, `crate::lines`

mod intersect;
mod predicates;
mod types;

pub use intersect::{segments_intersect, segments_intersect_with, Intersection, IntersectionResult};
pub use predicates::{
    cross, distance, distance_sq, orientation, orientation_eps, within_box, Orientation,
};
pub use types::{Point, PointSet, Segment};
