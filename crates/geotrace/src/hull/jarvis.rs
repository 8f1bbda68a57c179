use super::{lowest_index, prepare, Hull, HullEngine};
use crate::config::GeomCfg;
use crate::kernel::{distance_sq, orientation_eps, Orientation, PointSet};
use crate::trace::{StepTag, Trace, TraceRecorder, TraceStep, Verdict};

/// Gift wrapping, O(n·h).
///
/// Starts at the lowest point (a guaranteed hull vertex) and repeatedly picks
/// the candidate with no point to the right of `current → candidate`; among
/// collinear candidates the farthest wins, so points inside an edge are
/// skipped. Wrapping stops when the start vertex is selected again.
#[derive(Clone, Copy, Debug, Default)]
pub struct JarvisMarch;

impl HullEngine for JarvisMarch {
    fn name(&self) -> &'static str {
        "Jarvis March"
    }

    fn compute_with(&self, points: &PointSet, cfg: &GeomCfg) -> (Hull, Trace) {
        let pts = match prepare(points, cfg) {
            Ok(p) => p,
            Err(hull) => return (hull, Trace::default()),
        };
        let mut rec = TraceRecorder::new();
        let n = pts.len();
        let Some(start) = lowest_index(&pts) else {
            return (Hull::default(), Trace::default());
        };
        rec.push(
            TraceStep::new(
                StepTag::AcceptVertex,
                format!("start at lowest point {start}"),
            )
            .with_points([pts[start]])
            .with_verdict(Verdict::Accept),
        );

        let mut hull = vec![pts[start]];
        let mut cur = start;
        // a hull never has more than n vertices; the bound guards the loop
        for _ in 0..n {
            let mut best = if cur == 0 { 1 } else { 0 };
            for q in 0..n {
                if q == cur || q == best {
                    continue;
                }
                let o = orientation_eps(pts[cur], pts[best], pts[q], cfg.eps_orient);
                let replace = match o {
                    Orientation::Right => true,
                    Orientation::Collinear => {
                        distance_sq(pts[cur], pts[q]) > distance_sq(pts[cur], pts[best])
                    }
                    Orientation::Left => false,
                };
                let why = match (o, replace) {
                    (Orientation::Right, _) => {
                        format!("{q} is right of {cur}->{best}: new candidate")
                    }
                    (Orientation::Collinear, true) => {
                        format!("{q} is collinear and farther than {best}: new candidate")
                    }
                    (Orientation::Collinear, false) => {
                        format!("{q} is collinear but not farther than {best}")
                    }
                    (Orientation::Left, _) => format!("{q} is left of {cur}->{best}: keep {best}"),
                };
                rec.push(
                    TraceStep::new(StepTag::PivotCandidate, why)
                        .with_points([pts[cur], pts[best], pts[q]])
                        .with_verdict(if replace {
                            Verdict::Accept
                        } else {
                            Verdict::Reject
                        }),
                );
                if replace {
                    best = q;
                }
            }
            if best == start {
                break;
            }
            rec.push(
                TraceStep::new(StepTag::AcceptVertex, format!("wrap {cur} -> {best}"))
                    .with_points([pts[cur], pts[best]])
                    .with_verdict(Verdict::Accept),
            );
            hull.push(pts[best]);
            cur = best;
        }
        (Hull::from_ccw(hull), rec.finish())
    }
}
