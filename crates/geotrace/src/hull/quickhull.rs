use super::{prepare, Hull, HullEngine};
use crate::config::GeomCfg;
use crate::kernel::{cross, distance_sq, orientation_eps, Orientation, Point, PointSet};
use crate::trace::{StepTag, Trace, TraceRecorder, TraceStep, Verdict};

/// Divide and conquer on the x-extremes, O(n log n) average, O(n²) worst.
///
/// The chord `leftmost → rightmost` splits the input; each side recursively
/// keeps the point farthest from the current line (always a hull vertex) and
/// discards everything inside the triangle it forms.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuickHull;

impl HullEngine for QuickHull {
    fn name(&self) -> &'static str {
        "QuickHull"
    }

    fn compute_with(&self, points: &PointSet, cfg: &GeomCfg) -> (Hull, Trace) {
        let pts = match prepare(points, cfg) {
            Ok(p) => p,
            Err(hull) => return (hull, Trace::default()),
        };
        let (Some(&left), Some(&right)) = (
            pts.iter().min_by(|a, b| a.cmp_xy(b)),
            pts.iter().max_by(|a, b| a.cmp_xy(b)),
        ) else {
            return (Hull::default(), Trace::default());
        };

        let mut rec = TraceRecorder::new();
        rec.push(
            TraceStep::new(
                StepTag::FarthestSplit,
                format!(
                    "initial chord ({}, {}) -> ({}, {}) between x-extremes",
                    left.x, left.y, right.x, right.y
                ),
            )
            .with_points([left, right])
            .with_verdict(Verdict::Accept),
        );

        let mut below = Vec::new();
        let mut above = Vec::new();
        for &p in &pts {
            match orientation_eps(left, right, p, cfg.eps_orient) {
                Orientation::Right => below.push(p),
                Orientation::Left => above.push(p),
                Orientation::Collinear => {
                    if !p.approx_eq(&left, cfg.eps_point) && !p.approx_eq(&right, cfg.eps_point) {
                        rec.push(
                            TraceStep::new(StepTag::Pruned, "on the initial chord")
                                .with_points([p])
                                .with_verdict(Verdict::Reject),
                        );
                    }
                }
            }
        }

        let mut hull = vec![left];
        expand(left, right, below, cfg, &mut rec, &mut hull);
        hull.push(right);
        expand(right, left, above, cfg, &mut rec, &mut hull);
        (Hull::from_ccw(hull), rec.finish())
    }
}

/// Append the hull chain strictly between `p` and `q`.
///
/// `outside` holds the points to the right of `p → q`.
fn expand(
    p: Point,
    q: Point,
    outside: Vec<Point>,
    cfg: &GeomCfg,
    rec: &mut TraceRecorder,
    hull: &mut Vec<Point>,
) {
    // right of p → q means negative cross; the farthest has the smallest value.
    // Ties lie on one parallel line: take the end of that run (farthest from p)
    // so a point in the middle of a hull edge never becomes a vertex.
    let deepest = outside
        .iter()
        .map(|a| cross(p, q, *a))
        .fold(f64::INFINITY, f64::min);
    // relative to the depth, like the orientation band
    let band = cfg.eps_orient * deepest.abs();
    let Some(&far) = outside
        .iter()
        .filter(|a| cross(p, q, **a) <= deepest + band)
        .max_by(|a, b| distance_sq(p, **a).total_cmp(&distance_sq(p, **b)))
    else {
        return;
    };
    rec.push(
        TraceStep::new(
            StepTag::FarthestSplit,
            format!(
                "({}, {}) is farthest from line ({}, {}) -> ({}, {})",
                far.x, far.y, p.x, p.y, q.x, q.y
            ),
        )
        .with_points([p, q, far])
        .with_verdict(Verdict::Accept),
    );

    let mut left_part = Vec::new();
    let mut right_part = Vec::new();
    for pt in outside {
        if pt.approx_eq(&far, cfg.eps_point) {
            continue;
        }
        if orientation_eps(p, far, pt, cfg.eps_orient) == Orientation::Right {
            left_part.push(pt);
        } else if orientation_eps(far, q, pt, cfg.eps_orient) == Orientation::Right {
            right_part.push(pt);
        } else {
            rec.push(
                TraceStep::new(
                    StepTag::Pruned,
                    format!("({}, {}) lies inside the triangle", pt.x, pt.y),
                )
                .with_points([p, far, q, pt])
                .with_verdict(Verdict::Reject),
            );
        }
    }
    expand(p, far, left_part, cfg, rec, hull);
    hull.push(far);
    expand(far, q, right_part, cfg, rec, hull);
}
