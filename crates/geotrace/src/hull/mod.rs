//! Convex hull engine: four interchangeable algorithms behind one contract.
//!
//! Purpose
//! - `HullEngine::compute_with(points, cfg) → (Hull, Trace)` for brute force,
//!   Jarvis march, Graham scan, and QuickHull.
//! - Every engine returns the same canonical vertex list for the same input:
//!   CCW, no collinear interior vertices, starting at the lowest vertex
//!   (minimum y, then minimum x).
//!
//! Assumptions and conventions
//! - Duplicates are collapsed (first occurrence wins) before any algorithm runs.
//! - Fewer than 3 distinct points yield a degenerate hull of those points and
//!   an empty trace; all-collinear input yields the two extreme points.
//! - Code cross-refs: `kernel::orientation_eps`, `trace::TraceRecorder`,
//!   `algorithm::HullAlgorithm`

mod brute_force;
mod compare;
mod graham;
mod jarvis;
mod quickhull;

use std::cmp::Ordering;

use serde::Serialize;

use crate::config::GeomCfg;
use crate::error::{GeomError, Result};
use crate::kernel::{orientation_eps, within_box, Orientation, Point, PointSet};
use crate::trace::Trace;

pub use brute_force::BruteForce;
pub use compare::{compare_hulls, compare_hulls_with, Comparison, HullRun};
pub use graham::GrahamScan;
pub use jarvis::JarvisMarch;
pub use quickhull::QuickHull;

/// Common contract of the four hull algorithms.
pub trait HullEngine {
    /// Display name of the algorithm.
    fn name(&self) -> &'static str;

    /// Compute the hull and its trace with explicit tolerances.
    fn compute_with(&self, points: &PointSet, cfg: &GeomCfg) -> (Hull, Trace);

    /// Compute with the process-wide tolerances.
    fn compute(&self, points: &PointSet) -> (Hull, Trace) {
        self.compute_with(points, &GeomCfg::global())
    }
}

/// Shape class of a hull.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HullKind {
    Empty,
    Point,
    Segment,
    Polygon,
}

/// Convex hull vertices in canonical CCW order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Hull {
    vertices: Vec<Point>,
}

impl Hull {
    /// Rotate a CCW vertex cycle so that it starts at its lowest vertex.
    pub(crate) fn from_ccw(mut vertices: Vec<Point>) -> Self {
        if let Some(start) = lowest_index(&vertices) {
            vertices.rotate_left(start);
        }
        Self { vertices }
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn kind(&self) -> HullKind {
        match self.vertices.len() {
            0 => HullKind::Empty,
            1 => HullKind::Point,
            2 => HullKind::Segment,
            _ => HullKind::Polygon,
        }
    }

    /// The vertices, provided the hull is a proper polygon.
    pub fn require_polygon(&self) -> Result<&[Point]> {
        if self.vertices.len() < 3 {
            return Err(GeomError::InsufficientPoints {
                found: self.vertices.len(),
            });
        }
        Ok(&self.vertices)
    }

    /// Inside or on the boundary (process-wide tolerances).
    pub fn contains(&self, p: Point) -> bool {
        self.contains_with(p, &GeomCfg::global())
    }

    /// Inside or on the boundary.
    pub fn contains_with(&self, p: Point, cfg: &GeomCfg) -> bool {
        let v = &self.vertices;
        match v.len() {
            0 => false,
            1 => v[0].approx_eq(&p, cfg.eps_point),
            2 => {
                orientation_eps(v[0], v[1], p, cfg.eps_orient) == Orientation::Collinear
                    && within_box(p, v[0], v[1], cfg.eps_point)
            }
            n => (0..n).all(|i| {
                orientation_eps(v[i], v[(i + 1) % n], p, cfg.eps_orient) != Orientation::Right
            }),
        }
    }

    /// Same vertices as `other`, ignoring the starting vertex.
    pub fn same_vertex_set(&self, other: &Hull) -> bool {
        self.vertices.len() == other.vertices.len()
            && self
                .vertices
                .iter()
                .all(|p| other.vertices.iter().any(|q| p == q))
    }
}

/// Index of the lowest point (minimum y, then minimum x).
pub(crate) fn lowest_index(points: &[Point]) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp_yx(b))
        .map(|(i, _)| i)
}

/// Shared front end: collapse duplicates, short-circuit degenerate sizes.
///
/// Returns `Err(hull)` when no algorithm needs to run.
pub(crate) fn prepare(points: &PointSet, cfg: &GeomCfg) -> std::result::Result<Vec<Point>, Hull> {
    let pts = points.distinct(cfg);
    if pts.len() < 3 {
        return Err(Hull::from_ccw(pts));
    }
    Ok(pts)
}

/// Collinear point `p` strictly beyond the box of `a`, `b`.
#[inline]
pub(crate) fn outside_span(p: Point, a: Point, b: Point, cfg: &GeomCfg) -> bool {
    !within_box(p, a, b, cfg.eps_point)
}

/// Total order on polar angle around `pivot`, closer first on ties.
pub(crate) fn by_angle(pivot: Point, a: &Point, b: &Point) -> Ordering {
    let ta = (a.y - pivot.y).atan2(a.x - pivot.x);
    let tb = (b.y - pivot.y).atan2(b.x - pivot.x);
    ta.total_cmp(&tb).then_with(|| {
        crate::kernel::distance_sq(pivot, *a).total_cmp(&crate::kernel::distance_sq(pivot, *b))
    })
}
