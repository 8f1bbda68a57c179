//! Line intersection engine: two interchangeable algorithms behind one contract.
//!
//! Purpose
//! - `IntersectionEngine::compute_with(segments, cfg) → (hits, Trace)` for
//!   the exhaustive pairwise test and the sweep line.
//! - `hits` lists only intersecting pairs (point or overlap), sorted by
//!   `(first, second)` segment index; non-intersecting outcomes appear in the
//!   trace. `intersect_pair` is the two-segment entry point and returns the
//!   single outcome, `Intersection::None` included.
//!
//! Assumptions and conventions
//! - Segments are validated at construction (`Segment::new`), so engines are
//!   total over their input.
//! - Code cross-refs: `kernel::segments_intersect_with`, `algorithm::IntersectionAlgorithm`

mod brute_force;
mod sweep;

use crate::algorithm::IntersectionAlgorithm;
use crate::config::GeomCfg;
use crate::error::{GeomError, Result};
use crate::kernel::{Intersection, IntersectionResult, Point, Segment};
use crate::trace::Trace;

pub use brute_force::BruteForcePairs;
pub use sweep::SweepLine;

/// Common contract of the two intersection algorithms.
pub trait IntersectionEngine {
    fn name(&self) -> &'static str;

    fn compute_with(
        &self,
        segments: &[Segment],
        cfg: &GeomCfg,
    ) -> (Vec<IntersectionResult>, Trace);

    fn compute(&self, segments: &[Segment]) -> (Vec<IntersectionResult>, Trace) {
        self.compute_with(segments, &GeomCfg::global())
    }
}

/// Validate raw endpoint pairs into segments; the first failure is reported
/// with its segment index.
pub fn segments_from(pairs: &[(Point, Point)]) -> Result<Vec<Segment>> {
    pairs
        .iter()
        .enumerate()
        .map(|(index, &(a, b))| {
            Segment::new(a, b).map_err(|e| match e {
                GeomError::InvalidInput { x, y, .. } => GeomError::InvalidInput { index, x, y },
                other => other,
            })
        })
        .collect()
}

/// Intersect exactly two segments with the chosen algorithm.
pub fn intersect_pair(
    algorithm: IntersectionAlgorithm,
    s1: Segment,
    s2: Segment,
) -> (Intersection, Trace) {
    let (hits, trace) = algorithm.compute(&[s1, s2]);
    let outcome = hits
        .first()
        .map_or(Intersection::None, |hit| hit.outcome);
    (outcome, trace)
}

#[cfg(test)]
mod tests;
