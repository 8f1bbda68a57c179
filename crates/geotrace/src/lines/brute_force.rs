use super::IntersectionEngine;
use crate::config::GeomCfg;
use crate::kernel::{segments_intersect_with, IntersectionResult, Segment};
use crate::trace::{StepTag, Trace, TraceRecorder, TraceStep, Verdict};

/// Every unordered pair tested once, O(n²).
#[derive(Clone, Copy, Debug, Default)]
pub struct BruteForcePairs;

impl IntersectionEngine for BruteForcePairs {
    fn name(&self) -> &'static str {
        "Brute Force"
    }

    fn compute_with(
        &self,
        segments: &[Segment],
        cfg: &GeomCfg,
    ) -> (Vec<IntersectionResult>, Trace) {
        let mut rec = TraceRecorder::new();
        let mut hits = Vec::new();
        for i in 0..segments.len() {
            for j in (i + 1)..segments.len() {
                let outcome = segments_intersect_with(&segments[i], &segments[j], cfg);
                let verdict = if outcome.is_none() {
                    Verdict::Reject
                } else {
                    Verdict::Accept
                };
                rec.push(
                    TraceStep::new(
                        StepTag::PairTest,
                        format!("segments {i} and {j}: {}", outcome.label()),
                    )
                    .with_segments([segments[i], segments[j]])
                    .with_points(outcome.points())
                    .with_verdict(verdict),
                );
                if !outcome.is_none() {
                    hits.push(IntersectionResult {
                        first: i,
                        second: j,
                        outcome,
                    });
                }
            }
        }
        (hits, rec.finish())
    }
}
