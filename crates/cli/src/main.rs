mod input;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geotrace::config::{EPS_ORIENT, EPS_POINT};
use geotrace::prelude::*;
use serde::Serialize;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "geotrace")]
#[command(about = "Convex hulls and segment intersections with step-by-step traces")]
struct Cmd {
    /// Log every algorithm run to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Point equality tolerance
    #[arg(long, global = true)]
    eps_point: Option<f64>,

    /// Relative collinear band in orientation tests (sine of the turn angle)
    #[arg(long, global = true)]
    eps_orient: Option<f64>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// List the available algorithms
    Algorithms,
    /// Convex hull of a JSON point list
    Hull {
        #[arg(long, default_value = "graham-scan")]
        algo: HullAlgorithm,
        /// Input file; stdin when omitted or `-`
        #[arg(long)]
        input: Option<PathBuf>,
        /// Include the full trace in the output
        #[arg(long)]
        trace: bool,
        /// Write JSON here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Pairwise intersections of a JSON segment list
    Intersect {
        #[arg(long, default_value = "sweep-line")]
        algo: IntersectionAlgorithm,
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        trace: bool,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Run all four hull algorithms and check that they agree
    Compare {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct HullReport<'a> {
    algorithm: &'static str,
    kind: HullKind,
    vertices: &'a [Point],
    steps: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<&'a Trace>,
}

#[derive(Serialize)]
struct IntersectReport<'a> {
    algorithm: &'static str,
    intersections: &'a [IntersectionResult],
    steps: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<&'a Trace>,
}

#[derive(Serialize)]
struct CompareRow<'a> {
    algorithm: &'static str,
    vertices: &'a [Point],
    steps: usize,
}

#[derive(Serialize)]
struct CompareReport<'a> {
    agree: bool,
    runs: Vec<CompareRow<'a>>,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if cmd.eps_point.is_some() || cmd.eps_orient.is_some() {
        GeomCfg::install(GeomCfg {
            eps_point: cmd.eps_point.unwrap_or(EPS_POINT),
            eps_orient: cmd.eps_orient.unwrap_or(EPS_ORIENT),
        })
        .context("installing tolerances")?;
    }

    match cmd.action {
        Action::Algorithms => algorithms(),
        Action::Hull {
            algo,
            input,
            trace,
            out,
        } => hull(algo, input.as_deref(), trace, out.as_deref()),
        Action::Intersect {
            algo,
            input,
            trace,
            out,
        } => intersect(algo, input.as_deref(), trace, out.as_deref()),
        Action::Compare { input, out } => compare(input.as_deref(), out.as_deref()),
    }
}

fn algorithms() -> Result<()> {
    for a in Algorithm::ALL {
        let id = match a {
            Algorithm::Hull(h) => h.id(),
            Algorithm::Intersection(i) => i.id(),
        };
        println!("{:<13} {:<13} {}", a.family(), id, a.name());
    }
    Ok(())
}

fn hull(
    algo: HullAlgorithm,
    input: Option<&Path>,
    with_trace: bool,
    out: Option<&Path>,
) -> Result<()> {
    let points = input::parse_points(&input::read_source(input)?)?;
    tracing::info!(algo = algo.id(), points = points.len(), "hull");
    let (hull, trace) = algo.compute(&points);
    emit(
        out,
        &HullReport {
            algorithm: algo.name(),
            kind: hull.kind(),
            vertices: hull.vertices(),
            steps: trace.len(),
            trace: with_trace.then_some(&trace),
        },
    )
}

fn intersect(
    algo: IntersectionAlgorithm,
    input: Option<&Path>,
    with_trace: bool,
    out: Option<&Path>,
) -> Result<()> {
    let segments = input::parse_segments(&input::read_source(input)?)?;
    tracing::info!(algo = algo.id(), segments = segments.len(), "intersect");
    let (hits, trace) = algo.compute(&segments);
    emit(
        out,
        &IntersectReport {
            algorithm: algo.name(),
            intersections: &hits,
            steps: trace.len(),
            trace: with_trace.then_some(&trace),
        },
    )
}

fn compare(input: Option<&Path>, out: Option<&Path>) -> Result<()> {
    let points = input::parse_points(&input::read_source(input)?)?;
    let cmp = compare_hulls(&points);
    if !cmp.agree() {
        tracing::warn!(points = points.len(), "hull algorithms disagree");
    }
    let runs = cmp
        .runs
        .iter()
        .map(|r| CompareRow {
            algorithm: r.algorithm.name(),
            vertices: r.hull.vertices(),
            steps: r.trace.len(),
        })
        .collect();
    emit(
        out,
        &CompareReport {
            agree: cmp.agree(),
            runs,
        },
    )
}

/// Pretty JSON to `out` (parent directories created) or stdout.
fn emit<T: Serialize>(out: Option<&Path>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("creating output dir {}", parent.display()))?;
                }
            }
            std::fs::write(path, json)
                .with_context(|| format!("writing output {}", path.display()))?;
            tracing::info!(out = %path.display(), "wrote");
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/run/hull.json");
        emit(Some(&out), &serde_json::json!({"agree": true})).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.contains("\"agree\": true"));
    }

    #[test]
    fn hull_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("square.json");
        std::fs::write(&input, "[[0,0],[1,0],[1,1],[0,1],[0.5,0.5]]").unwrap();
        let out = dir.path().join("hull.json");
        hull(HullAlgorithm::QuickHull, Some(&input), true, Some(&out)).unwrap();
        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(report["algorithm"], "QuickHull");
        assert_eq!(report["kind"], "polygon");
        assert_eq!(report["vertices"].as_array().map(|v| v.len()), Some(4));
        assert!(report["trace"].is_object());
    }

    #[test]
    fn cli_parses_display_names() {
        let cmd = Cmd::try_parse_from(["geotrace", "hull", "--algo", "Jarvis March"]).unwrap();
        assert!(matches!(
            cmd.action,
            Action::Hull {
                algo: HullAlgorithm::JarvisMarch,
                ..
            }
        ));
        assert!(Cmd::try_parse_from(["geotrace", "intersect", "--algo", "bogus"]).is_err());
    }
}
