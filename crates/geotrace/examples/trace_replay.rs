//! Replay the trace of each hull algorithm on a small square.
//!
//! Usage:
//!   cargo run -p geotrace --example trace_replay
//!   cargo run -p geotrace --example trace_replay -- quickhull

use geotrace::prelude::*;

fn main() {
    let only = std::env::args().nth(1);
    let square = PointSet::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.5, 0.5)])
        .expect("finite points");
    for algo in HullAlgorithm::ALL {
        if let Some(name) = &only {
            match name.parse::<HullAlgorithm>() {
                Ok(a) if a == algo => {}
                Ok(_) => continue,
                Err(e) => {
                    eprintln!("{e}");
                    return;
                }
            }
        }
        let (hull, trace) = algo.compute(&square);
        println!("== {algo}: {} vertices, {} steps", hull.len(), trace.len());
        for frame in trace.frames() {
            let verdict = match frame.step.verdict() {
                Some(Verdict::Accept) => "+",
                Some(Verdict::Reject) => "-",
                None => " ",
            };
            println!(
                "{:>3} {verdict} {:<16} {}",
                frame.index,
                frame.tag.as_str(),
                frame.step.rationale()
            );
        }
    }
}
