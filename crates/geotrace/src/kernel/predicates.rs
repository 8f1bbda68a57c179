use serde::{Deserialize, Serialize};

use super::types::Point;
use crate::config::GeomCfg;

/// Turn direction of `a → b → c`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Left,
    Right,
    Collinear,
}

/// Cross product `(b − a) × (c − a)`; positive for a left (CCW) turn.
#[inline]
pub fn cross(a: Point, b: Point, c: Point) -> f64 {
    let ab = b.vec() - a.vec();
    let ac = c.vec() - a.vec();
    ab.x * ac.y - ab.y * ac.x
}

/// Orientation with the process-wide tolerance.
#[inline]
pub fn orientation(a: Point, b: Point, c: Point) -> Orientation {
    orientation_eps(a, b, c, GeomCfg::global().eps_orient)
}

/// Orientation with an explicit collinear band `|cross| <= eps·|b − a|·|c − a|`.
///
/// The band is relative: `eps` bounds the sine of the angle at `a`, so the
/// answer does not change when all three points are scaled together. Values
/// inside the band are always `Collinear`, so reordering a near-collinear
/// triple never flips between `Left` and `Right`.
#[inline]
pub fn orientation_eps(a: Point, b: Point, c: Point, eps: f64) -> Orientation {
    let ab = b.vec() - a.vec();
    let ac = c.vec() - a.vec();
    let z = ab.x * ac.y - ab.y * ac.x;
    let band = eps * ab.norm() * ac.norm();
    if z > band {
        Orientation::Left
    } else if z < -band {
        Orientation::Right
    } else {
        Orientation::Collinear
    }
}

#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (b.vec() - a.vec()).norm()
}

#[inline]
pub fn distance_sq(a: Point, b: Point) -> f64 {
    (b.vec() - a.vec()).norm_squared()
}

/// `p` lies within the axis-aligned box of `a`, `b` (inflated by `eps`).
///
/// Combined with a `Collinear` orientation this is the on-segment test.
#[inline]
pub fn within_box(p: Point, a: Point, b: Point, eps: f64) -> bool {
    p.x >= a.x.min(b.x) - eps
        && p.x <= a.x.max(b.x) + eps
        && p.y >= a.y.min(b.y) - eps
        && p.y <= a.y.max(b.y) + eps
}
