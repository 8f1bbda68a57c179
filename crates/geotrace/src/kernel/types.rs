//! Point, segment, and point-set types.
//!
//! - `Point`: plain `f64` pair, compared with a tolerance (never bit-exact).
//! - `Segment`: ordered pair of distinct points; zero length is rejected.
//! - `PointSet`: caller-ordered points, validated finite; duplicates are kept
//!   here and collapsed on demand by `distinct`.

use std::cmp::Ordering;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::config::GeomCfg;
use crate::error::{GeomError, Result};

/// Planar point.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn vec(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Componentwise equality within `eps`.
    #[inline]
    pub fn approx_eq(&self, other: &Point, eps: f64) -> bool {
        (self.x - other.x).abs() < eps && (self.y - other.y).abs() < eps
    }

    /// Lexicographic `(y, x)` order; the "lowest" point is the minimum.
    #[inline]
    pub fn cmp_yx(&self, other: &Point) -> Ordering {
        self.y
            .total_cmp(&other.y)
            .then_with(|| self.x.total_cmp(&other.x))
    }

    /// Lexicographic `(x, y)` order used by the sweep and by QuickHull extremes.
    #[inline]
    pub fn cmp_xy(&self, other: &Point) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

/// Tolerance-based equality using the process-wide `eps_point`.
impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, GeomCfg::global().eps_point)
    }
}

impl From<Vector2<f64>> for Point {
    #[inline]
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Directed segment `a → b` with `a ≠ b` (within tolerance).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SegmentRepr")]
pub struct Segment {
    a: Point,
    b: Point,
}

#[derive(Deserialize)]
struct SegmentRepr {
    a: Point,
    b: Point,
}

impl TryFrom<SegmentRepr> for Segment {
    type Error = GeomError;
    fn try_from(r: SegmentRepr) -> Result<Self> {
        Segment::new(r.a, r.b)
    }
}

impl Segment {
    /// Build a segment using the process-wide tolerances.
    pub fn new(a: Point, b: Point) -> Result<Self> {
        Self::new_with(a, b, &GeomCfg::global())
    }

    /// Build a segment; rejects non-finite and zero-length input.
    pub fn new_with(a: Point, b: Point, cfg: &GeomCfg) -> Result<Self> {
        for p in [a, b] {
            if !p.is_finite() {
                return Err(GeomError::InvalidInput {
                    index: 0,
                    x: p.x,
                    y: p.y,
                });
            }
        }
        if a.approx_eq(&b, cfg.eps_point) {
            return Err(GeomError::DegenerateSegment { x: a.x, y: a.y });
        }
        Ok(Self { a, b })
    }

    #[inline]
    pub fn a(&self) -> Point {
        self.a
    }

    #[inline]
    pub fn b(&self) -> Point {
        self.b
    }

    /// Endpoints ordered by `(x, y)`: `(left, right)`.
    #[inline]
    pub fn ordered(&self) -> (Point, Point) {
        if self.a.cmp_xy(&self.b) == Ordering::Greater {
            (self.b, self.a)
        } else {
            (self.a, self.b)
        }
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.a.x == self.b.x
    }

    /// `dy/dx`; `+∞` for vertical segments.
    #[inline]
    pub fn slope(&self) -> f64 {
        let (l, r) = self.ordered();
        if self.is_vertical() {
            f64::INFINITY
        } else {
            (r.y - l.y) / (r.x - l.x)
        }
    }

    /// Height of the supporting line at `x`, clamped to the segment's x-range.
    ///
    /// Vertical segments report `hint` clamped to their y-range (the sweep
    /// passes the current event height).
    pub fn y_at(&self, x: f64, hint: f64) -> f64 {
        let (l, r) = self.ordered();
        if self.is_vertical() {
            return hint.clamp(l.y, r.y);
        }
        let t = ((x - l.x) / (r.x - l.x)).clamp(0.0, 1.0);
        l.y + t * (r.y - l.y)
    }
}

/// Caller-ordered sequence of finite points.
#[derive(Clone, Debug, Default, Serialize)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Validate every coordinate; the first non-finite one is reported.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            tracing::debug!(index, x = p.x, y = p.y, "rejecting non-finite point");
            return Err(GeomError::InvalidInput {
                index,
                x: p.x,
                y: p.y,
            });
        }
        Ok(Self { points })
    }

    /// Convenience constructor from `(x, y)` pairs.
    pub fn from_xy(xy: &[(f64, f64)]) -> Result<Self> {
        Self::new(xy.iter().map(|&p| Point::from(p)).collect())
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Collapse duplicates within `cfg.eps_point`; the first occurrence wins and
    /// the caller's order is preserved.
    pub fn distinct(&self, cfg: &GeomCfg) -> Vec<Point> {
        let pts = &self.points;
        let n = pts.len();
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&i, &j| pts[i].cmp_xy(&pts[j]).then(i.cmp(&j)));
        let mut dup = vec![false; n];
        for (k, &i) in order.iter().enumerate() {
            if dup[i] {
                continue;
            }
            for &j in &order[k + 1..] {
                if pts[j].x - pts[i].x >= cfg.eps_point {
                    break;
                }
                if dup[j] || (pts[j].y - pts[i].y).abs() >= cfg.eps_point {
                    continue;
                }
                if j < i {
                    dup[i] = true;
                    break;
                }
                dup[j] = true;
            }
        }
        pts.iter()
            .zip(dup)
            .filter(|(_, d)| !d)
            .map(|(p, _)| *p)
            .collect()
    }
}

impl From<PointSet> for Vec<Point> {
    fn from(ps: PointSet) -> Self {
        ps.points
    }
}
