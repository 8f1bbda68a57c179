//! Step recording for replay and animation.
//!
//! A `Trace` is the ordered list of `TraceStep`s produced by one algorithm run.
//! It is fully materialized before the engine returns, holds no hidden state,
//! and can be replayed any number of times (`frames()` is a plain iterator
//! over the stored steps).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kernel::{Point, Segment};

/// Kind of decision recorded in a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepTag {
    /// Brute-force hull: one ordered pair tested as a hull edge.
    CandidateEdge,
    /// Jarvis march: one comparison against the current best candidate.
    PivotCandidate,
    /// Jarvis march: a vertex appended to the hull.
    AcceptVertex,
    /// Graham scan stack push.
    ScanPush,
    /// Graham scan stack pop.
    ScanPop,
    /// QuickHull: farthest point from the current line.
    FarthestSplit,
    /// QuickHull: point discarded inside a triangle.
    Pruned,
    /// Brute-force intersection: one unordered pair tested.
    PairTest,
    /// Sweep line: segment enters the active set.
    SweepInsert,
    /// Sweep line: segment leaves the active set.
    SweepRemove,
    /// Sweep line: newly adjacent pair tested.
    SweepTest,
    /// Sweep line: two active segments exchange order at a crossing.
    SweepCross,
}

impl StepTag {
    pub const fn as_str(&self) -> &'static str {
        match self {
            StepTag::CandidateEdge => "candidate-edge",
            StepTag::PivotCandidate => "pivot-candidate",
            StepTag::AcceptVertex => "accept-vertex",
            StepTag::ScanPush => "scan-push",
            StepTag::ScanPop => "scan-pop",
            StepTag::FarthestSplit => "farthest-split",
            StepTag::Pruned => "pruned",
            StepTag::PairTest => "pair-test",
            StepTag::SweepInsert => "sweep-insert",
            StepTag::SweepRemove => "sweep-remove",
            StepTag::SweepTest => "sweep-test",
            StepTag::SweepCross => "sweep-cross",
        }
    }
}

impl fmt::Display for StepTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accept/reject outcome attached to decision steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Accept,
    Reject,
}

/// One recorded iteration. Immutable once pushed into a trace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    tag: StepTag,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    segments: Vec<Segment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    verdict: Option<Verdict>,
    rationale: String,
}

impl TraceStep {
    pub fn new(tag: StepTag, rationale: impl Into<String>) -> Self {
        Self {
            tag,
            points: Vec::new(),
            segments: Vec::new(),
            verdict: None,
            rationale: rationale.into(),
        }
    }

    #[must_use]
    pub fn with_points(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        self.points.extend(points);
        self
    }

    #[must_use]
    pub fn with_segments(mut self, segments: impl IntoIterator<Item = Segment>) -> Self {
        self.segments.extend(segments);
        self
    }

    #[must_use]
    pub fn with_verdict(mut self, verdict: Verdict) -> Self {
        self.verdict = Some(verdict);
        self
    }

    #[inline]
    pub fn tag(&self) -> StepTag {
        self.tag
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    #[inline]
    pub fn rationale(&self) -> &str {
        &self.rationale
    }
}

/// Ordered, finite, replayable sequence of steps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    steps: Vec<TraceStep>,
}

/// Renderer-facing view of a step: index, tag, and the step itself.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub index: usize,
    pub tag: StepTag,
    pub step: &'a TraceStep,
}

impl Trace {
    #[inline]
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&TraceStep> {
        self.steps.get(index)
    }

    /// Frames keyed by step index and tag, in recording order.
    pub fn frames(&self) -> impl Iterator<Item = Frame<'_>> + '_ {
        self.steps.iter().enumerate().map(|(index, step)| Frame {
            index,
            tag: step.tag,
            step,
        })
    }

    /// Number of steps carrying `tag`.
    pub fn count(&self, tag: StepTag) -> usize {
        self.steps.iter().filter(|s| s.tag == tag).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceStep> {
        self.steps.iter()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceStep;
    type IntoIter = std::slice::Iter<'a, TraceStep>;
    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Append-only collector used by the engines; `finish` seals the trace.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    steps: Vec<TraceStep>,
}

impl TraceRecorder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, step: TraceStep) {
        self.steps.push(step);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn finish(self) -> Trace {
        Trace { steps: self.steps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trace {
        let mut rec = TraceRecorder::new();
        rec.push(
            TraceStep::new(StepTag::ScanPush, "push pivot").with_points([Point::new(0.0, 0.0)]),
        );
        rec.push(
            TraceStep::new(StepTag::ScanPop, "right turn")
                .with_points([Point::new(1.0, 1.0)])
                .with_verdict(Verdict::Reject),
        );
        rec.push(TraceStep::new(StepTag::ScanPush, "left turn"));
        rec.finish()
    }

    #[test]
    fn frames_are_indexed_in_order_and_replayable() {
        let trace = sample();
        let first: Vec<(usize, StepTag)> = trace.frames().map(|f| (f.index, f.tag)).collect();
        let second: Vec<(usize, StepTag)> = trace.frames().map(|f| (f.index, f.tag)).collect();
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![(0, StepTag::ScanPush), (1, StepTag::ScanPop), (2, StepTag::ScanPush)]
        );
        assert_eq!(trace.count(StepTag::ScanPush), 2);
        assert_eq!(trace.get(1).and_then(|s| s.verdict()), Some(Verdict::Reject));
    }

    #[test]
    fn tags_serialize_kebab_case() {
        let trace = sample();
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["steps"][0]["tag"], "scan-push");
        assert_eq!(json["steps"][1]["verdict"], "reject");
        assert!(json["steps"][2].get("points").is_none());
        for tag in [StepTag::CandidateEdge, StepTag::SweepCross, StepTag::FarthestSplit] {
            let v = serde_json::to_value(tag).unwrap();
            assert_eq!(v, tag.as_str());
        }
    }
}
