use super::{outside_span, prepare, Hull, HullEngine};
use crate::config::GeomCfg;
use crate::kernel::{orientation_eps, Orientation, Point, PointSet};
use crate::trace::{StepTag, Trace, TraceRecorder, TraceStep, Verdict};

/// Exhaustive pairwise edge test, O(n³).
///
/// An ordered pair `(a, b)` is a CCW hull edge iff no point lies to its right
/// and no collinear point lies beyond the span of `a`, `b`. Accepted edges are
/// chained from the lowest vertex into the hull polygon.
#[derive(Clone, Copy, Debug, Default)]
pub struct BruteForce;

impl HullEngine for BruteForce {
    fn name(&self) -> &'static str {
        "Brute Force"
    }

    fn compute_with(&self, points: &PointSet, cfg: &GeomCfg) -> (Hull, Trace) {
        let pts = match prepare(points, cfg) {
            Ok(p) => p,
            Err(hull) => return (hull, Trace::default()),
        };
        let mut rec = TraceRecorder::new();
        let n = pts.len();
        let mut next: Vec<Option<usize>> = vec![None; n];

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let (a, b) = (pts[i], pts[j]);
                let blocker = (0..n).filter(|&k| k != i && k != j).find(|&k| {
                    match orientation_eps(a, b, pts[k], cfg.eps_orient) {
                        Orientation::Right => true,
                        Orientation::Collinear => outside_span(pts[k], a, b, cfg),
                        Orientation::Left => false,
                    }
                });
                let step = TraceStep::new(
                    StepTag::CandidateEdge,
                    match blocker {
                        Some(k) => format!(
                            "reject {i}->{j}: point {k} ({}, {}) lies outside the edge",
                            pts[k].x, pts[k].y
                        ),
                        None => format!("accept {i}->{j}: no point lies to the right"),
                    },
                )
                .with_points([a, b]);
                match blocker {
                    Some(k) => rec.push(
                        step.with_points([pts[k]])
                            .with_verdict(Verdict::Reject),
                    ),
                    None => {
                        // the all-collinear case accepts both directions of the
                        // extreme pair; keep the first edge found per vertex
                        if next[i].is_none() {
                            next[i] = Some(j);
                        }
                        rec.push(step.with_verdict(Verdict::Accept));
                    }
                }
            }
        }

        let hull = chain(&pts, &next);
        tracing::trace!(edges = next.iter().flatten().count(), "brute-force edges chained");
        (Hull::from_ccw(hull), rec.finish())
    }
}

/// Follow accepted edges from the lowest vertex until the cycle closes.
fn chain(pts: &[Point], next: &[Option<usize>]) -> Vec<Point> {
    let Some(start) = super::lowest_index(pts) else {
        return Vec::new();
    };
    let mut out = vec![pts[start]];
    let mut cur = start;
    while let Some(nx) = next[cur] {
        if nx == start || out.len() > pts.len() {
            break;
        }
        out.push(pts[nx]);
        cur = nx;
    }
    out
}
