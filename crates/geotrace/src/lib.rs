//! Planar convex hulls and segment intersections with replayable traces.
//!
//! Every algorithm returns its result together with a [`Trace`]: the ordered
//! decisions it made, detailed enough to animate the run step by step.
//!
//! Layout
//! - `kernel`: points, segments, orientation, pairwise segment intersection.
//! - `hull`: brute force, Jarvis march, Graham scan, QuickHull.
//! - `lines`: brute-force pairs and sweep line.
//! - `algorithm`: the closed catalogue of the six algorithms.
//! - `config`: process-wide tolerances.
//!
//! All engines are pure functions of their input and the tolerances; nothing
//! is shared between runs.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod hull;
pub mod kernel;
pub mod lines;
pub mod trace;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use algorithm::{Algorithm, HullAlgorithm, IntersectionAlgorithm};
pub use config::GeomCfg;
pub use error::{GeomError, Result};
pub use hull::{compare_hulls, Comparison, Hull, HullKind};
pub use kernel::{Intersection, IntersectionResult, Point, PointSet, Segment};
pub use trace::{StepTag, Trace, TraceStep, Verdict};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::algorithm::{Algorithm, HullAlgorithm, IntersectionAlgorithm};
    pub use crate::config::GeomCfg;
    pub use crate::error::GeomError;
    pub use crate::hull::{compare_hulls, Hull, HullEngine, HullKind};
    pub use crate::kernel::{
        orientation, segments_intersect, Intersection, IntersectionResult, Orientation, Point,
        PointSet, Segment,
    };
    pub use crate::lines::{intersect_pair, IntersectionEngine};
    pub use crate::trace::{Frame, StepTag, Trace, TraceStep, Verdict};
}

/// Validate raw points and run one hull algorithm.
pub fn convex_hull(algorithm: HullAlgorithm, points: &[Point]) -> Result<(Hull, Trace)> {
    let set = PointSet::new(points.to_vec())?;
    Ok(algorithm.compute(&set))
}

/// Validate raw endpoint pairs and run one intersection algorithm.
pub fn find_intersections(
    algorithm: IntersectionAlgorithm,
    pairs: &[(Point, Point)],
) -> Result<(Vec<IntersectionResult>, Trace)> {
    let segments = lines::segments_from(pairs)?;
    Ok(algorithm.compute(&segments))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convex_hull_rejects_non_finite() {
        let err = convex_hull(
            HullAlgorithm::GrahamScan,
            &[Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)],
        )
        .unwrap_err();
        assert!(matches!(err, GeomError::InvalidInput { index: 1, .. }));
    }

    #[test]
    fn find_intersections_end_to_end() {
        let (hits, trace) = find_intersections(
            IntersectionAlgorithm::SweepLine,
            &[
                (Point::new(0.0, 0.0), Point::new(2.0, 2.0)),
                (Point::new(0.0, 2.0), Point::new(2.0, 0.0)),
            ],
        )
        .unwrap();
        assert_eq!(hits.len(), 1);
        assert!(trace.count(StepTag::SweepCross) == 1);
    }
}
