//! Segment/segment intersection classification.
//!
//! The general case uses the four orientations of each segment's endpoints
//! against the other segment. Collinear pairs are projected onto the dominant
//! axis of their common extent and the two 1-D intervals are intersected, so a
//! collinear overlap is reported once as an interval.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::predicates::{cross, orientation_eps, Orientation};
use super::types::{Point, Segment};
use crate::config::GeomCfg;

/// Outcome of intersecting two segments.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Intersection {
    /// The segments share no point.
    None,
    /// Exactly one common point (crossing or touching).
    Point { at: Point },
    /// Collinear segments sharing the interval `from → to` (ordered along the
    /// dominant axis).
    Overlap { from: Point, to: Point },
}

impl Intersection {
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Intersection::None)
    }

    /// Short label used in trace rationales.
    pub fn label(&self) -> &'static str {
        match self {
            Intersection::None => "none",
            Intersection::Point { .. } => "point",
            Intersection::Overlap { .. } => "overlap",
        }
    }

    /// Points to highlight when replaying this outcome.
    pub fn points(&self) -> Vec<Point> {
        match *self {
            Intersection::None => Vec::new(),
            Intersection::Point { at } => vec![at],
            Intersection::Overlap { from, to } => vec![from, to],
        }
    }
}

/// Intersection found between two segments of an input sequence.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntersectionResult {
    /// Indices of the contributing segments, `first < second`.
    pub first: usize,
    pub second: usize,
    pub outcome: Intersection,
}

/// Classify `s1 ∩ s2` with the process-wide tolerances.
pub fn segments_intersect(s1: &Segment, s2: &Segment) -> Intersection {
    segments_intersect_with(s1, s2, &GeomCfg::global())
}

/// Classify `s1 ∩ s2`. Symmetric in its arguments.
pub fn segments_intersect_with(s1: &Segment, s2: &Segment, cfg: &GeomCfg) -> Intersection {
    let eps = cfg.eps_orient;
    let (a, b, c, d) = (s1.a(), s1.b(), s2.a(), s2.b());
    let o1 = orientation_eps(a, b, c, eps);
    let o2 = orientation_eps(a, b, d, eps);
    let o3 = orientation_eps(c, d, a, eps);
    let o4 = orientation_eps(c, d, b, eps);

    let col = Orientation::Collinear;
    if (o1 == col && o2 == col) || (o3 == col && o4 == col) {
        return collinear_overlap(s1, s2, cfg);
    }
    if o1 == o2 || o3 == o4 {
        return Intersection::None;
    }
    // Touching cases snap to the endpoint that lies on the other segment.
    let at = if o1 == col {
        c
    } else if o2 == col {
        d
    } else if o3 == col {
        a
    } else if o4 == col {
        b
    } else {
        match line_crossing(a, b, c, d) {
            Some(p) => p,
            None => return Intersection::None,
        }
    };
    Intersection::Point { at }
}

/// Crossing of the supporting lines, parameter clamped onto `a → b`.
///
/// A vertical or horizontal segment pins that coordinate of the result to its
/// own exact value.
fn line_crossing(a: Point, b: Point, c: Point, d: Point) -> Option<Point> {
    let r = b.vec() - a.vec();
    let s = d.vec() - c.vec();
    let denom = r.x * s.y - r.y * s.x;
    if denom == 0.0 {
        return None;
    }
    let t = (cross(a, c, Point::from(a.vec() + s)) / denom).clamp(0.0, 1.0);
    let mut p = Point::from(a.vec() + r * t);
    if c.x == d.x {
        p.x = c.x;
    } else if a.x == b.x {
        p.x = a.x;
    }
    if c.y == d.y {
        p.y = c.y;
    } else if a.y == b.y {
        p.y = a.y;
    }
    Some(p)
}

fn collinear_overlap(s1: &Segment, s2: &Segment, cfg: &GeomCfg) -> Intersection {
    let pts = [s1.a(), s1.b(), s2.a(), s2.b()];
    let (min_x, max_x, min_y, max_y) = pts.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(lx, hx, ly, hy), p| (lx.min(p.x), hx.max(p.x), ly.min(p.y), hy.max(p.y)),
    );
    let along_x = max_x - min_x >= max_y - min_y;
    let key = |p: &Point| if along_x { p.x } else { p.y };
    let by_axis = |p: &Point, q: &Point| -> Ordering {
        if along_x {
            p.cmp_xy(q)
        } else {
            p.cmp_yx(q)
        }
    };
    let lo_of = |s: &Segment| -> Point {
        if by_axis(&s.a(), &s.b()) == Ordering::Greater {
            s.b()
        } else {
            s.a()
        }
    };
    let hi_of = |s: &Segment| -> Point {
        if by_axis(&s.a(), &s.b()) == Ordering::Greater {
            s.a()
        } else {
            s.b()
        }
    };
    let (lo1, hi1, lo2, hi2) = (lo_of(s1), hi_of(s1), lo_of(s2), hi_of(s2));
    let from = if by_axis(&lo1, &lo2) == Ordering::Less {
        lo2
    } else {
        lo1
    };
    let to = if by_axis(&hi1, &hi2) == Ordering::Greater {
        hi2
    } else {
        hi1
    };
    let gap = key(&to) - key(&from);
    if gap < -cfg.eps_point {
        Intersection::None
    } else if gap <= cfg.eps_point {
        Intersection::Point { at: from }
    } else {
        Intersection::Overlap { from, to }
    }
}
