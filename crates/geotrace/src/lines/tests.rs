use super::*;
use crate::trace::{StepTag, Verdict};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
    Segment::new(Point::new(ax, ay), Point::new(bx, by)).expect("non-degenerate segment")
}

fn pairs(hits: &[IntersectionResult]) -> Vec<(usize, usize)> {
    hits.iter().map(|h| (h.first, h.second)).collect()
}

#[test]
fn crossing_diagonals_meet_at_center() {
    for algo in IntersectionAlgorithm::ALL {
        let (hits, trace) = algo.compute(&[seg(0.0, 0.0, 2.0, 2.0), seg(0.0, 2.0, 2.0, 0.0)]);
        assert_eq!(hits.len(), 1, "{algo}");
        assert_eq!((hits[0].first, hits[0].second), (0, 1));
        assert_eq!(
            hits[0].outcome,
            Intersection::Point {
                at: Point::new(1.0, 1.0)
            },
            "{algo}"
        );
        assert!(!trace.is_empty());
    }
}

#[test]
fn parallel_pair_yields_none() {
    for algo in IntersectionAlgorithm::ALL {
        let (outcome, trace) =
            intersect_pair(algo, seg(0.0, 0.0, 1.0, 0.0), seg(0.0, 1.0, 1.0, 1.0));
        assert_eq!(outcome, Intersection::None, "{algo}");
        // the rejected test is still visible in the trace
        assert!(trace
            .iter()
            .any(|s| s.verdict() == Some(Verdict::Reject)));
    }
}

#[test]
fn collinear_overlap_reported_once() {
    for algo in IntersectionAlgorithm::ALL {
        let (hits, _) = algo.compute(&[seg(0.0, 0.0, 2.0, 0.0), seg(1.0, 0.0, 3.0, 0.0)]);
        assert_eq!(hits.len(), 1, "{algo}");
        assert_eq!(
            hits[0].outcome,
            Intersection::Overlap {
                from: Point::new(1.0, 0.0),
                to: Point::new(2.0, 0.0)
            },
            "{algo}"
        );
    }
}

#[test]
fn trace_tags_match_algorithm() {
    let segs = [
        seg(0.0, 0.0, 4.0, 4.0),
        seg(0.0, 4.0, 4.0, 0.0),
        seg(1.0, 3.5, 3.0, 3.8),
    ];
    let (_, bf) = IntersectionAlgorithm::BruteForce.compute(&segs);
    assert_eq!(bf.len(), 3);
    assert!(bf.iter().all(|s| s.tag() == StepTag::PairTest));
    assert_eq!(bf.get(0).map(|s| s.segments().len()), Some(2));

    let (_, sw) = IntersectionAlgorithm::SweepLine.compute(&segs);
    assert_eq!(sw.count(StepTag::SweepInsert), 3);
    assert_eq!(sw.count(StepTag::SweepRemove), 3);
    assert_eq!(sw.count(StepTag::SweepCross), 1);
    assert_eq!(sw.count(StepTag::PairTest), 0);
    assert!(sw.count(StepTag::SweepTest) >= 1);
}

#[test]
fn shared_endpoints_found_for_every_pair() {
    // three segments fanning out of the origin, plus one closing the fan
    let segs = [
        seg(0.0, 0.0, 2.0, -1.0),
        seg(0.0, 0.0, 2.0, 0.0),
        seg(0.0, 0.0, 2.0, 1.0),
        seg(2.0, -1.0, 2.0, 1.0),
    ];
    let (bf, _) = IntersectionAlgorithm::BruteForce.compute(&segs);
    let (sw, _) = IntersectionAlgorithm::SweepLine.compute(&segs);
    assert_eq!(bf.len(), 6);
    assert_eq!(pairs(&bf), pairs(&sw));
    for (a, b) in bf.iter().zip(&sw) {
        assert_eq!(a.outcome, b.outcome);
    }
}

#[test]
fn vertical_segment_crossing_stacked_horizontals() {
    let segs = [
        seg(1.0, 0.0, 1.0, 3.0),
        seg(0.0, 0.5, 2.0, 0.5),
        seg(0.0, 1.5, 2.0, 1.5),
        seg(0.0, 2.5, 2.0, 2.5),
    ];
    let (sw, trace) = IntersectionAlgorithm::SweepLine.compute(&segs);
    assert_eq!(pairs(&sw), vec![(0, 1), (0, 2), (0, 3)]);
    assert_eq!(
        sw[1].outcome,
        Intersection::Point {
            at: Point::new(1.0, 1.5)
        }
    );
    assert!(trace.count(StepTag::SweepCross) >= 2);
}

#[test]
fn endpoint_touch_after_triple_crossing() {
    // 0, 2 and 3 cross at (11/3, 10/3); 3 then ends on the interior of 1
    let segs = [
        seg(1.0, 4.0, 5.0, 3.0),
        seg(5.0, 3.0, 3.0, 3.0),
        seg(4.0, 5.0, 3.0, 0.0),
        seg(2.0, 5.0, 4.0, 3.0),
    ];
    let (bf, _) = IntersectionAlgorithm::BruteForce.compute(&segs);
    let (sw, _) = IntersectionAlgorithm::SweepLine.compute(&segs);
    assert_eq!(
        pairs(&sw),
        vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
    );
    let touch = sw.iter().find(|h| (h.first, h.second) == (1, 3));
    assert_eq!(
        touch.map(|h| h.outcome),
        Some(Intersection::Point {
            at: Point::new(4.0, 3.0)
        })
    );
    assert_eq!(bf, sw);
}

#[test]
fn segment_ending_on_a_vertical() {
    let segs = [seg(2.0, 0.0, 2.0, 4.0), seg(0.0, 1.0, 2.0, 2.0), seg(2.0, 3.0, 4.0, 3.0)];
    let (sw, _) = IntersectionAlgorithm::SweepLine.compute(&segs);
    assert_eq!(pairs(&sw), vec![(0, 1), (0, 2)]);
    assert_eq!(
        sw[0].outcome,
        Intersection::Point {
            at: Point::new(2.0, 2.0)
        }
    );
}

#[test]
fn segments_from_reports_bad_index() {
    let ok = segments_from(&[(Point::new(0.0, 0.0), Point::new(1.0, 0.0))]).unwrap();
    assert_eq!(ok.len(), 1);
    let err = segments_from(&[
        (Point::new(0.0, 0.0), Point::new(1.0, 0.0)),
        (Point::new(0.0, f64::NAN), Point::new(1.0, 0.0)),
    ])
    .unwrap_err();
    assert!(matches!(err, GeomError::InvalidInput { index: 1, .. }));
    let err = segments_from(&[(Point::new(2.0, 2.0), Point::new(2.0, 2.0))]).unwrap_err();
    assert!(matches!(err, GeomError::DegenerateSegment { .. }));
}

#[test]
fn empty_and_single_inputs() {
    for algo in IntersectionAlgorithm::ALL {
        let (hits, trace) = algo.compute(&[]);
        assert!(hits.is_empty());
        assert!(trace.is_empty());
        let (hits, _) = algo.compute(&[seg(0.0, 0.0, 1.0, 1.0)]);
        assert!(hits.is_empty());
    }
}

#[test]
fn sweep_matches_brute_force_on_random_segments() {
    let mut rng = StdRng::seed_from_u64(0x5eed_1e55);
    for round in 0..40 {
        let n = rng.gen_range(2..40);
        let segs: Vec<Segment> = (0..n)
            .map(|_| {
                let a = Point::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0));
                let b = Point::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0));
                Segment::new(a, b).unwrap()
            })
            .collect();
        let (bf, _) = IntersectionAlgorithm::BruteForce.compute(&segs);
        let (sw, _) = IntersectionAlgorithm::SweepLine.compute(&segs);
        assert_eq!(pairs(&bf), pairs(&sw), "round {round}, n = {n}");
    }
}

fn grid_segments(rng: &mut StdRng, n: usize, side: i32, scale: f64) -> Vec<Segment> {
    let mut segs = Vec::with_capacity(n);
    while segs.len() < n {
        let mut corner = || {
            let x = rng.gen_range(0..side) as f64 * scale;
            let y = rng.gen_range(0..side) as f64 * scale;
            Point::new(x, y)
        };
        let (a, b) = (corner(), corner());
        if let Ok(s) = Segment::new(a, b) {
            segs.push(s);
        }
    }
    segs
}

#[test]
fn sweep_matches_brute_force_on_integer_grids() {
    // shared endpoints, touches, overlaps, and verticals on every round
    let mut rng = StdRng::seed_from_u64(2000);
    for round in 0..2000 {
        let n = rng.gen_range(2..20);
        let segs = grid_segments(&mut rng, n, 6, 1.0);
        let (bf, _) = IntersectionAlgorithm::BruteForce.compute(&segs);
        let (sw, _) = IntersectionAlgorithm::SweepLine.compute(&segs);
        assert_eq!(bf, sw, "round {round}: {segs:?}");
    }
}

#[test]
fn sweep_matches_brute_force_on_scaled_grids() {
    let mut rng = StdRng::seed_from_u64(0x5ca1e);
    for scale in [1e-4, 0.1, 1e6] {
        for round in 0..300 {
            let n = rng.gen_range(2..25);
            let segs = grid_segments(&mut rng, n, 6, scale);
            let (bf, _) = IntersectionAlgorithm::BruteForce.compute(&segs);
            let (sw, _) = IntersectionAlgorithm::SweepLine.compute(&segs);
            assert_eq!(pairs(&bf), pairs(&sw), "scale {scale}, round {round}: {segs:?}");
        }
    }
}

#[test]
fn sweep_tests_each_pair_at_most_once() {
    let mut rng = StdRng::seed_from_u64(7);
    let segs: Vec<Segment> = (0..25)
        .map(|_| {
            let a = Point::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
            let b = Point::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
            Segment::new(a, b).unwrap()
        })
        .collect();
    let (_, trace) = IntersectionAlgorithm::SweepLine.compute(&segs);
    let mut seen = std::collections::HashSet::new();
    for step in trace.iter().filter(|s| s.tag() == StepTag::SweepTest) {
        let pair = step.rationale().to_string();
        assert!(seen.insert(pair), "pair tested twice");
    }
    assert!(seen.len() <= 25 * 24 / 2);
}
