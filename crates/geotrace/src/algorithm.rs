//! Closed catalogue of the six algorithms.
//!
//! Each identifier is bound to exactly one engine at compile time; parsing
//! accepts the display names ("Jarvis March", "QuickHull", ...) and kebab-case
//! ids ("jarvis-march", "quickhull", ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::GeomCfg;
use crate::error::GeomError;
use crate::hull::{BruteForce, GrahamScan, Hull, HullEngine, JarvisMarch, QuickHull};
use crate::kernel::{IntersectionResult, PointSet, Segment};
use crate::lines::{BruteForcePairs, IntersectionEngine, SweepLine};
use crate::trace::Trace;

/// Convex hull algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HullAlgorithm {
    BruteForce,
    JarvisMarch,
    GrahamScan,
    QuickHull,
}

/// Segment intersection algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntersectionAlgorithm {
    BruteForce,
    SweepLine,
}

/// Any of the six algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "family", content = "algorithm", rename_all = "kebab-case")]
pub enum Algorithm {
    Hull(HullAlgorithm),
    Intersection(IntersectionAlgorithm),
}

impl HullAlgorithm {
    pub const ALL: [HullAlgorithm; 4] = [
        HullAlgorithm::BruteForce,
        HullAlgorithm::JarvisMarch,
        HullAlgorithm::GrahamScan,
        HullAlgorithm::QuickHull,
    ];

    pub const fn id(&self) -> &'static str {
        match self {
            HullAlgorithm::BruteForce => "brute-force",
            HullAlgorithm::JarvisMarch => "jarvis-march",
            HullAlgorithm::GrahamScan => "graham-scan",
            HullAlgorithm::QuickHull => "quickhull",
        }
    }

    pub fn engine(&self) -> &'static dyn HullEngine {
        match self {
            HullAlgorithm::BruteForce => &BruteForce,
            HullAlgorithm::JarvisMarch => &JarvisMarch,
            HullAlgorithm::GrahamScan => &GrahamScan,
            HullAlgorithm::QuickHull => &QuickHull,
        }
    }

    pub fn name(&self) -> &'static str {
        self.engine().name()
    }

    pub fn compute(&self, points: &PointSet) -> (Hull, Trace) {
        self.compute_with(points, &GeomCfg::global())
    }

    pub fn compute_with(&self, points: &PointSet, cfg: &GeomCfg) -> (Hull, Trace) {
        let (hull, trace) = self.engine().compute_with(points, cfg);
        tracing::debug!(
            algorithm = self.id(),
            points = points.len(),
            vertices = hull.len(),
            steps = trace.len(),
            "hull computed"
        );
        (hull, trace)
    }
}

impl IntersectionAlgorithm {
    pub const ALL: [IntersectionAlgorithm; 2] =
        [IntersectionAlgorithm::BruteForce, IntersectionAlgorithm::SweepLine];

    pub const fn id(&self) -> &'static str {
        match self {
            IntersectionAlgorithm::BruteForce => "brute-force",
            IntersectionAlgorithm::SweepLine => "sweep-line",
        }
    }

    pub fn engine(&self) -> &'static dyn IntersectionEngine {
        match self {
            IntersectionAlgorithm::BruteForce => &BruteForcePairs,
            IntersectionAlgorithm::SweepLine => &SweepLine,
        }
    }

    pub fn name(&self) -> &'static str {
        self.engine().name()
    }

    pub fn compute(&self, segments: &[Segment]) -> (Vec<IntersectionResult>, Trace) {
        self.compute_with(segments, &GeomCfg::global())
    }

    pub fn compute_with(
        &self,
        segments: &[Segment],
        cfg: &GeomCfg,
    ) -> (Vec<IntersectionResult>, Trace) {
        let (hits, trace) = self.engine().compute_with(segments, cfg);
        tracing::debug!(
            algorithm = self.id(),
            segments = segments.len(),
            hits = hits.len(),
            steps = trace.len(),
            "intersections computed"
        );
        (hits, trace)
    }
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Hull(HullAlgorithm::BruteForce),
        Algorithm::Hull(HullAlgorithm::JarvisMarch),
        Algorithm::Hull(HullAlgorithm::GrahamScan),
        Algorithm::Hull(HullAlgorithm::QuickHull),
        Algorithm::Intersection(IntersectionAlgorithm::BruteForce),
        Algorithm::Intersection(IntersectionAlgorithm::SweepLine),
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Hull(a) => a.name(),
            Algorithm::Intersection(a) => a.name(),
        }
    }

    pub const fn family(&self) -> &'static str {
        match self {
            Algorithm::Hull(_) => "hull",
            Algorithm::Intersection(_) => "intersection",
        }
    }
}

impl fmt::Display for HullAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for IntersectionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.family())
    }
}

/// Lowercase, with spaces and underscores folded into dashes.
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            ' ' | '_' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

impl FromStr for HullAlgorithm {
    type Err = GeomError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        HullAlgorithm::ALL
            .into_iter()
            .find(|a| a.id() == key || normalize(a.name()) == key)
            .or(match key.as_str() {
                "quick-hull" => Some(HullAlgorithm::QuickHull),
                "gift-wrapping" => Some(HullAlgorithm::JarvisMarch),
                _ => None,
            })
            .ok_or_else(|| GeomError::UnknownAlgorithm(s.to_string()))
    }
}

impl FromStr for IntersectionAlgorithm {
    type Err = GeomError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        IntersectionAlgorithm::ALL
            .into_iter()
            .find(|a| a.id() == key || normalize(a.name()) == key)
            .ok_or_else(|| GeomError::UnknownAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_has_six_distinct_entries() {
        assert_eq!(Algorithm::ALL.len(), 6);
        for (i, a) in Algorithm::ALL.iter().enumerate() {
            for b in &Algorithm::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn display_names_parse_back() {
        for a in HullAlgorithm::ALL {
            assert_eq!(a.name().parse::<HullAlgorithm>().unwrap(), a);
            assert_eq!(a.id().parse::<HullAlgorithm>().unwrap(), a);
        }
        for a in IntersectionAlgorithm::ALL {
            assert_eq!(a.name().parse::<IntersectionAlgorithm>().unwrap(), a);
            assert_eq!(a.id().parse::<IntersectionAlgorithm>().unwrap(), a);
        }
        assert_eq!(
            "Sweep Line".parse::<IntersectionAlgorithm>().unwrap(),
            IntersectionAlgorithm::SweepLine
        );
        assert!("One More (TBD)".parse::<IntersectionAlgorithm>().is_err());
    }

    #[test]
    fn quickhull_selector_runs_quickhull() {
        let algo: HullAlgorithm = "QuickHull".parse().unwrap();
        assert_eq!(algo, HullAlgorithm::QuickHull);
        assert_eq!(algo.engine().name(), "QuickHull");
        let pts = PointSet::from_xy(&[(0.0, 0.0), (4.0, 0.0), (2.0, 3.0), (2.0, 1.0)]).unwrap();
        let (_, trace) = algo.compute(&pts);
        assert!(trace.count(crate::trace::StepTag::FarthestSplit) > 0);
        assert_eq!(trace.count(crate::trace::StepTag::PivotCandidate), 0);
    }
}
