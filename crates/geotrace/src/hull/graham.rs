use super::{by_angle, lowest_index, prepare, Hull, HullEngine};
use crate::config::GeomCfg;
use crate::kernel::{distance_sq, orientation_eps, Orientation, Point, PointSet};
use crate::trace::{StepTag, Trace, TraceRecorder, TraceStep, Verdict};

/// Angular sort and stack scan, O(n log n).
#[derive(Clone, Copy, Debug, Default)]
pub struct GrahamScan;

impl HullEngine for GrahamScan {
    fn name(&self) -> &'static str {
        "Graham Scan"
    }

    fn compute_with(&self, points: &PointSet, cfg: &GeomCfg) -> (Hull, Trace) {
        let mut pts = match prepare(points, cfg) {
            Ok(p) => p,
            Err(hull) => return (hull, Trace::default()),
        };
        let Some(pivot_idx) = lowest_index(&pts) else {
            return (Hull::default(), Trace::default());
        };
        let pivot = pts.swap_remove(pivot_idx);
        let sorted = sort_around(pivot, pts, cfg);

        let mut rec = TraceRecorder::new();
        let mut stack: Vec<Point> = Vec::with_capacity(sorted.len() + 1);
        stack.push(pivot);
        rec.push(
            TraceStep::new(StepTag::ScanPush, "push pivot (lowest point)")
                .with_points([pivot])
                .with_verdict(Verdict::Accept),
        );
        for p in sorted {
            while stack.len() >= 2 {
                let (s1, s2) = (stack[stack.len() - 2], stack[stack.len() - 1]);
                let o = orientation_eps(s1, s2, p, cfg.eps_orient);
                if o == Orientation::Left {
                    break;
                }
                rec.push(
                    TraceStep::new(
                        StepTag::ScanPop,
                        format!(
                            "pop ({}, {}): turn towards ({}, {}) is {}",
                            s2.x,
                            s2.y,
                            p.x,
                            p.y,
                            if o == Orientation::Right {
                                "right"
                            } else {
                                "straight"
                            }
                        ),
                    )
                    .with_points([s1, s2, p])
                    .with_verdict(Verdict::Reject),
                );
                stack.pop();
            }
            rec.push(
                TraceStep::new(StepTag::ScanPush, format!("push ({}, {})", p.x, p.y))
                    .with_points([p])
                    .with_verdict(Verdict::Accept),
            );
            stack.push(p);
        }
        (Hull::from_ccw(stack), rec.finish())
    }
}

/// Sort by polar angle around `pivot`, closer first along a shared ray.
///
/// `atan2` can split points of one ray by an ulp, so runs of points collinear
/// with the pivot are re-sorted by distance after the angular sort.
fn sort_around(pivot: Point, mut pts: Vec<Point>, cfg: &GeomCfg) -> Vec<Point> {
    pts.sort_by(|a, b| by_angle(pivot, a, b));
    let mut i = 0;
    while i < pts.len() {
        let mut j = i + 1;
        while j < pts.len()
            && orientation_eps(pivot, pts[i], pts[j], cfg.eps_orient) == Orientation::Collinear
        {
            j += 1;
        }
        pts[i..j].sort_by(|a, b| distance_sq(pivot, *a).total_cmp(&distance_sq(pivot, *b)));
        i = j;
    }
    pts
}
