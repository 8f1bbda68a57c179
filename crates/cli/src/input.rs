//! JSON input for the CLI.
//!
//! Points may be given as `[x, y]` pairs or `{"x": .., "y": ..}` objects, either
//! as a bare array or wrapped as `{"points": [...]}`. Segments are pairs of
//! points (`[[x, y], [x, y]]` or `{"a": .., "b": ..}`), bare or wrapped as
//! `{"segments": [...]}`.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use geotrace::lines::segments_from;
use geotrace::{Point, PointSet, Segment};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPoint {
    Pair([f64; 2]),
    Named { x: f64, y: f64 },
}

impl From<RawPoint> for Point {
    fn from(p: RawPoint) -> Self {
        match p {
            RawPoint::Pair([x, y]) => Point::new(x, y),
            RawPoint::Named { x, y } => Point::new(x, y),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSegment {
    Pair([RawPoint; 2]),
    Named { a: RawPoint, b: RawPoint },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PointsDoc {
    Bare(Vec<RawPoint>),
    Wrapped { points: Vec<RawPoint> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SegmentsDoc {
    Bare(Vec<RawSegment>),
    Wrapped { segments: Vec<RawSegment> },
}

/// Read the whole input; `None` or `-` means stdin.
pub fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read_to_string(p)
            .with_context(|| format!("reading input {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading input from stdin")?;
            Ok(buf)
        }
    }
}

pub fn parse_points(text: &str) -> Result<PointSet> {
    let doc: PointsDoc = serde_json::from_str(text).context("parsing point list")?;
    let raw = match doc {
        PointsDoc::Bare(v) | PointsDoc::Wrapped { points: v } => v,
    };
    let points = raw.into_iter().map(Point::from).collect();
    Ok(PointSet::new(points)?)
}

pub fn parse_segments(text: &str) -> Result<Vec<Segment>> {
    let doc: SegmentsDoc = serde_json::from_str(text).context("parsing segment list")?;
    let raw = match doc {
        SegmentsDoc::Bare(v) | SegmentsDoc::Wrapped { segments: v } => v,
    };
    let pairs: Vec<(Point, Point)> = raw
        .into_iter()
        .map(|s| match s {
            RawSegment::Pair([a, b]) | RawSegment::Named { a, b } => (a.into(), b.into()),
        })
        .collect();
    Ok(segments_from(&pairs)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn points_in_every_shape() {
        let a = parse_points("[[0, 0], [1, 0], [0, 1]]").unwrap();
        let b = parse_points(r#"[{"x": 0, "y": 0}, {"x": 1, "y": 0}, [0, 1]]"#).unwrap();
        let c = parse_points(r#"{"points": [[0, 0], [1, 0], [0, 1]]}"#).unwrap();
        assert_eq!(a.points(), b.points());
        assert_eq!(a.points(), c.points());
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn segments_in_every_shape() {
        let a = parse_segments("[[[0, 0], [2, 2]], [[0, 2], [2, 0]]]").unwrap();
        let b = parse_segments(
            r#"{"segments": [{"a": [0, 0], "b": {"x": 2, "y": 2}}, [[0, 2], [2, 0]]]}"#,
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_segment_is_an_error() {
        let err = parse_segments("[[[1, 1], [1, 1]]]").unwrap_err();
        assert!(err.to_string().contains("degenerate"));
    }

    #[test]
    fn malformed_json_has_context() {
        let err = parse_points("[[0, 0], [1]]").unwrap_err();
        assert!(format!("{err:#}").contains("parsing point list"));
    }

    #[test]
    fn reads_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "[[3, 4]]").unwrap();
        let text = read_source(Some(f.path())).unwrap();
        assert_eq!(parse_points(&text).unwrap().len(), 1);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = read_source(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("nope.json"));
    }
}
