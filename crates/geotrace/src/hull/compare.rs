//! Run all four hull algorithms on one input.
//!
//! Engines are pure functions of their input, so the runs go through rayon
//! without any synchronization; results come back in `HullAlgorithm::ALL`
//! order.

use rayon::prelude::*;
use serde::Serialize;

use super::Hull;
use crate::algorithm::HullAlgorithm;
use crate::config::GeomCfg;
use crate::kernel::PointSet;
use crate::trace::Trace;

/// Result of one algorithm inside a comparison.
#[derive(Clone, Debug, Serialize)]
pub struct HullRun {
    pub algorithm: HullAlgorithm,
    pub hull: Hull,
    pub trace: Trace,
}

/// All four runs over the same input.
#[derive(Clone, Debug, Serialize)]
pub struct Comparison {
    pub runs: Vec<HullRun>,
}

impl Comparison {
    pub fn get(&self, algorithm: HullAlgorithm) -> Option<&HullRun> {
        self.runs.iter().find(|r| r.algorithm == algorithm)
    }

    /// Every run produced the same vertex set.
    pub fn agree(&self) -> bool {
        match self.runs.split_first() {
            Some((first, rest)) => rest.iter().all(|r| r.hull.same_vertex_set(&first.hull)),
            None => true,
        }
    }
}

pub fn compare_hulls(points: &PointSet) -> Comparison {
    compare_hulls_with(points, &GeomCfg::global())
}

pub fn compare_hulls_with(points: &PointSet, cfg: &GeomCfg) -> Comparison {
    let runs: Vec<HullRun> = HullAlgorithm::ALL
        .as_slice()
        .par_iter()
        .map(|&algorithm| {
            let (hull, trace) = algorithm.compute_with(points, cfg);
            HullRun {
                algorithm,
                hull,
                trace,
            }
        })
        .collect();
    let cmp = Comparison { runs };
    tracing::debug!(points = points.len(), agree = cmp.agree(), "hull comparison");
    cmp
}
