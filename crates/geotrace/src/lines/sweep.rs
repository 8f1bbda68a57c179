//! Sweep line over segment endpoints and discovered crossings.
//!
//! Events are grouped by point and handled left to right (`x`, then `y`). At
//! each event point every segment that starts there, ends there, or passes
//! through it is tested against the others of that group while all of them
//! are still in the status, so endpoint-on-interior touches and multi-way
//! crossings are found in one place. Ending and passing segments then leave
//! the status, starting and passing ones re-enter in their order just right
//! of the point, and only pairs that became adjacent are tested. A crossing
//! ahead of the sweep becomes a new event point.
//!
//! Points closer than a tolerance are one event point. The tolerance is
//! `eps_point` near the origin and relative to the coordinates beyond 1.
//!
//! The status is a `BTreeSet` whose comparator reads the current sweep
//! position. Stored segments keep their relative order while stored: all
//! segments through an event point are removed before the position moves
//! past it and reinserted after.

use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::IntersectionEngine;
use crate::config::GeomCfg;
use crate::kernel::{segments_intersect_with, Intersection, IntersectionResult, Point, Segment};
use crate::trace::{StepTag, Trace, TraceRecorder, TraceStep, Verdict};

/// Sweep-line intersection reporting.
#[derive(Clone, Copy, Debug, Default)]
pub struct SweepLine;

impl IntersectionEngine for SweepLine {
    fn name(&self) -> &'static str {
        "Sweep Line"
    }

    fn compute_with(
        &self,
        segments: &[Segment],
        cfg: &GeomCfg,
    ) -> (Vec<IntersectionResult>, Trace) {
        let order = Order::new(segments, cfg.eps_point);
        let mut sweep = Sweep::new(&order, cfg);
        sweep.run();
        sweep.finish()
    }
}

#[derive(Clone, Copy, Debug)]
struct SweepPos {
    at: Point,
    /// Order just right of `at`; otherwise just left of it.
    after: bool,
}

/// Comparator state shared by every status entry.
struct Order<'a> {
    segs: &'a [Segment],
    eps: f64,
    pos: Cell<SweepPos>,
}

impl<'a> Order<'a> {
    fn new(segs: &'a [Segment], eps: f64) -> Self {
        Self {
            segs,
            eps,
            pos: Cell::new(SweepPos {
                at: Point::new(0.0, 0.0),
                after: true,
            }),
        }
    }

    fn set(&self, at: Point, after: bool) {
        self.pos.set(SweepPos { at, after });
    }

    fn height(&self, slot: Slot, pos: SweepPos) -> f64 {
        match slot {
            Slot::Seg(i) => self.segs[i].y_at(pos.at.x, pos.at.y),
            Slot::Floor | Slot::Ceil => pos.at.y,
        }
    }
}

/// A segment, or a bound just below (`Floor`) or above (`Ceil`) every
/// segment through the sweep point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Seg(usize),
    Floor,
    Ceil,
}

#[derive(Clone, Copy)]
struct Entry<'a> {
    slot: Slot,
    order: &'a Order<'a>,
}

impl Entry<'_> {
    fn seg(&self) -> Option<usize> {
        match self.slot {
            Slot::Seg(i) => Some(i),
            Slot::Floor | Slot::Ceil => None,
        }
    }
}

/// Bottom to top at the sweep position. Heights within tolerance of each other
/// meet at the sweep point; those are ordered by slope (ascending right of
/// the point, descending left of it) and then by index.
impl Ord for Entry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        if let (Slot::Seg(i), Slot::Seg(j)) = (self.slot, other.slot) {
            if i == j {
                return Ordering::Equal;
            }
        }
        let order = self.order;
        let pos = order.pos.get();
        let (ya, yb) = (order.height(self.slot, pos), order.height(other.slot, pos));
        if (ya - yb).abs() > tolerance(order.eps, pos.at) {
            return ya.total_cmp(&yb);
        }
        match (self.slot, other.slot) {
            (Slot::Floor, Slot::Floor) | (Slot::Ceil, Slot::Ceil) => Ordering::Equal,
            (Slot::Floor, _) | (_, Slot::Ceil) => Ordering::Less,
            (_, Slot::Floor) | (Slot::Ceil, _) => Ordering::Greater,
            (Slot::Seg(i), Slot::Seg(j)) => {
                let by_slope = order.segs[i].slope().total_cmp(&order.segs[j].slope());
                let by_slope = if pos.after {
                    by_slope
                } else {
                    by_slope.reverse()
                };
                by_slope.then(i.cmp(&j))
            }
        }
    }
}

impl PartialOrd for Entry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry<'_> {}

/// Event point ordered by `(x, y)`.
#[derive(Clone, Copy, Debug)]
struct XyKey(Point);

impl Ord for XyKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp_xy(&other.0)
    }
}

impl PartialOrd for XyKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for XyKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for XyKey {}

/// Everything that happens at one event point.
#[derive(Debug, Default)]
struct Batch {
    starts: Vec<usize>,
    ends: Vec<usize>,
    crossings: Vec<(usize, usize)>,
}

impl Batch {
    fn absorb(&mut self, other: Batch) {
        self.starts.extend(other.starts);
        self.ends.extend(other.ends);
        self.crossings.extend(other.crossings);
    }
}

#[derive(Debug, Default)]
struct EventQueue {
    events: BTreeMap<XyKey, Batch>,
}

impl EventQueue {
    fn at(&mut self, p: Point) -> &mut Batch {
        self.events.entry(XyKey(p)).or_default()
    }

    /// The next event point, merged with every pending point within tolerance
    /// of it (even when an unrelated point sorts between them).
    fn pop_batch(&mut self, eps: f64) -> Option<(Point, Batch)> {
        let (XyKey(at), mut batch) = self.events.pop_first()?;
        let tol = tolerance(eps, at);
        let limit = XyKey(Point::new(at.x + tol, f64::NEG_INFINITY));
        let close: Vec<XyKey> = self
            .events
            .range(..limit)
            .map(|(k, _)| *k)
            .filter(|k| k.0.approx_eq(&at, tol))
            .collect();
        for k in close {
            if let Some(more) = self.events.remove(&k) {
                batch.absorb(more);
            }
        }
        Some((at, batch))
    }

    /// Move a computed crossing onto pending event coordinates within
    /// tolerance: first its `x`, then at that `x` its `y`, so a crossing on a
    /// vertical segment shares that segment's `x`. Never moves `q` to or
    /// behind `after`.
    fn snap(&self, q: Point, after: Point, eps: f64) -> Point {
        let tol = tolerance(eps, q);
        let lo = XyKey(Point::new(q.x - tol, f64::NEG_INFINITY));
        let hi = XyKey(Point::new(q.x + tol, f64::INFINITY));
        let Some(&XyKey(near)) = self.events.range(lo..hi).next().map(|(k, _)| k) else {
            return q;
        };
        let lo = XyKey(Point::new(near.x, q.y - tol));
        let hi = XyKey(Point::new(near.x, q.y + tol));
        let snapped = match self.events.range(lo..hi).next() {
            Some((XyKey(p), _)) => *p,
            None => Point::new(near.x, q.y),
        };
        if snapped.cmp_xy(&after) == Ordering::Greater {
            snapped
        } else {
            q
        }
    }
}

/// `eps` near the origin, relative to the larger coordinate of `p` beyond 1.
fn tolerance(eps: f64, p: Point) -> f64 {
    eps * p.x.abs().max(p.y.abs()).max(1.0)
}

/// `p` with its `x` clamped to the range both segments span.
fn within_span(p: Point, s: &Segment, t: &Segment) -> Point {
    let ((sl, sr), (tl, tr)) = (s.ordered(), t.ordered());
    let (lo, hi) = (sl.x.max(tl.x), sr.x.min(tr.x));
    if lo > hi {
        return p;
    }
    Point::new(p.x.clamp(lo, hi), p.y)
}

struct Sweep<'a> {
    order: &'a Order<'a>,
    cfg: &'a GeomCfg,
    queue: EventQueue,
    status: BTreeSet<Entry<'a>>,
    tested: HashSet<(usize, usize)>,
    hits: BTreeMap<(usize, usize), Intersection>,
    rec: TraceRecorder,
}

impl<'a> Sweep<'a> {
    fn new(order: &'a Order<'a>, cfg: &'a GeomCfg) -> Self {
        let mut queue = EventQueue::default();
        for (i, s) in order.segs.iter().enumerate() {
            let (l, r) = s.ordered();
            queue.at(l).starts.push(i);
            queue.at(r).ends.push(i);
        }
        Self {
            order,
            cfg,
            queue,
            status: BTreeSet::new(),
            tested: HashSet::new(),
            hits: BTreeMap::new(),
            rec: TraceRecorder::new(),
        }
    }

    fn entry(&self, slot: Slot) -> Entry<'a> {
        Entry {
            slot,
            order: self.order,
        }
    }

    fn run(&mut self) {
        while let Some((at, batch)) = self.queue.pop_batch(self.cfg.eps_point) {
            self.handle(at, batch);
        }
    }

    fn handle(&mut self, at: Point, batch: Batch) {
        let segs = self.order.segs;
        for &(s, t) in &batch.crossings {
            self.rec.push(
                TraceStep::new(
                    StepTag::SweepCross,
                    format!("segments {s} and {t} exchange order at ({}, {})", at.x, at.y),
                )
                .with_segments([segs[s], segs[t]])
                .with_points([at]),
            );
        }

        self.order.set(at, false);
        let through = self.meeting();
        let mut group: Vec<usize> = batch.starts.iter().chain(&through).copied().collect();
        group.sort_unstable();
        group.dedup();
        for (k, &s) in group.iter().enumerate() {
            for &t in &group[k + 1..] {
                self.test(s, t, at);
            }
        }

        let mut leaving: Vec<usize> = through.iter().chain(&batch.ends).copied().collect();
        leaving.sort_unstable();
        leaving.dedup();
        for &i in &leaving {
            self.remove(i);
        }
        for &i in &batch.ends {
            self.rec.push(
                TraceStep::new(
                    StepTag::SweepRemove,
                    format!(
                        "remove segment {i} at x = {}; {} active",
                        at.x,
                        self.status.len()
                    ),
                )
                .with_segments([segs[i]])
                .with_points([at]),
            );
        }

        self.order.set(at, true);
        let passing = through.iter().filter(|i| !batch.ends.contains(*i));
        let entering: Vec<usize> = batch.starts.iter().chain(passing).copied().collect();
        for &i in &entering {
            let e = self.entry(Slot::Seg(i));
            self.status.insert(e);
        }
        for &i in &batch.starts {
            self.rec.push(
                TraceStep::new(
                    StepTag::SweepInsert,
                    format!(
                        "insert segment {i} at x = {}; {} active",
                        at.x,
                        self.status.len()
                    ),
                )
                .with_segments([segs[i]])
                .with_points([at]),
            );
        }

        self.test_new_neighbors(at);
    }

    /// Stored segments through the sweep point, bottom to top.
    fn meeting(&self) -> Vec<usize> {
        let (lo, hi) = (self.entry(Slot::Floor), self.entry(Slot::Ceil));
        self.status.range(lo..=hi).filter_map(Entry::seg).collect()
    }

    /// The run of segments through the sweep point against the segments just
    /// below and above it; the gap's two sides when the run is empty.
    fn test_new_neighbors(&mut self, at: Point) {
        let (lo, hi) = (self.entry(Slot::Floor), self.entry(Slot::Ceil));
        let below = self.status.range(..lo).next_back().and_then(Entry::seg);
        let above = self.status.range(hi..).next().and_then(Entry::seg);
        let mut run = self.status.range(lo..=hi).filter_map(Entry::seg);
        let lowest = run.next();
        let highest = run.next_back().or(lowest);
        match (lowest, highest) {
            (Some(l), Some(h)) => {
                if let Some(b) = below {
                    self.test(b, l, at);
                }
                if let Some(a) = above {
                    self.test(h, a, at);
                }
            }
            _ => {
                if let (Some(b), Some(a)) = (below, above) {
                    self.test(b, a, at);
                }
            }
        }
    }

    fn remove(&mut self, i: usize) {
        let key = self.entry(Slot::Seg(i));
        if !self.status.remove(&key) {
            // rounding left the stored order out of step with the comparator
            self.status.retain(|e| e.slot != Slot::Seg(i));
        }
    }

    fn test(&mut self, s: usize, t: usize, at: Point) {
        let key = (s.min(t), s.max(t));
        if s == t || !self.tested.insert(key) {
            return;
        }
        let (first, second) = key;
        let segs = self.order.segs;
        let outcome = segments_intersect_with(&segs[first], &segs[second], self.cfg);
        self.rec.push(
            TraceStep::new(
                StepTag::SweepTest,
                format!("segments {first} and {second}: {}", outcome.label()),
            )
            .with_segments([segs[first], segs[second]])
            .with_points(outcome.points())
            .with_verdict(if outcome.is_none() {
                Verdict::Reject
            } else {
                Verdict::Accept
            }),
        );
        if let Intersection::Point { at: p } = outcome {
            let p = within_span(p, &segs[first], &segs[second]);
            let ahead = p.cmp_xy(&at) == Ordering::Greater
                && !p.approx_eq(&at, tolerance(self.cfg.eps_point, at));
            if ahead {
                let p = self.queue.snap(p, at, self.cfg.eps_point);
                self.queue.at(p).crossings.push(key);
            }
        }
        if !outcome.is_none() {
            self.hits.insert(key, outcome);
        }
    }

    fn finish(self) -> (Vec<IntersectionResult>, Trace) {
        let hits = self
            .hits
            .into_iter()
            .map(|((first, second), outcome)| IntersectionResult {
                first,
                second,
                outcome,
            })
            .collect();
        (hits, self.rec.finish())
    }
}
