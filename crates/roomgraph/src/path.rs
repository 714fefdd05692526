//! SVG path and polyline parsing into the shape model.
//!
//! Input is the `d` attribute of a `<path>` (the `M L C Z H V` command
//! set, absolute and relative) or the `points` attribute of a
//! `<polyline>`. Output is a flat vertex list: curve control points
//! are dropped and only the curve's endpoint becomes a vertex, because
//! the editor works on straight wall runs.
//!
//! ## Rust Lesson #1: Pattern matching
//!
//! `match` is like a switch statement that can destructure. Each
//! `PathSegment` variant carries its own fields (`abs`, coordinates),
//! and the compiler checks we handle every case we care about.
//!
//! Parsing is permissive: a malformed token ends the parse and we keep
//! everything read up to that point. Callers validate semantics; an
//! empty or broken `d` string is an empty shape, not an exception.

use crate::geometry::Point;
use crate::object::{Closure, GeometryObject, can_be_closed};
use svgtypes::{PathParser, PathSegment, PointsParser};

/// Result of parsing a `d` string: the vertex run and whether a `Z`
/// closed it.
#[derive(Debug, Clone, PartialEq)]
pub struct PathData {
    pub points: Vec<Point>,
    pub closure: Closure,
}

#[inline]
fn resolve(cursor: Point, abs: bool, x: f64, y: f64) -> Point {
    if abs {
        Point::new(x, y)
    } else {
        Point::new(cursor.x + x, cursor.y + y)
    }
}

/// Parse a path `d` string into vertices.
///
/// Supported commands: `M`/`m`, `L`/`l`, `H`/`h`, `V`/`v`, `C`/`c`
/// (endpoint only), `Z`/`z`. Extra coordinate pairs after a move are
/// implicit line-tos (the tokenizer already expands them). A second
/// `M` starts a new contour, which this model doesn't represent, so
/// parsing stops there. Consecutive duplicate vertices collapse, and
/// an explicit return-to-start before `Z` is dropped in favor of the
/// closure flag.
pub fn parse_path(d: &str) -> PathData {
    let mut points: Vec<Point> = Vec::new();
    let mut closure = Closure::Open;
    let mut cursor = Point::new(0.0, 0.0);
    let mut subpath_start = Point::new(0.0, 0.0);
    let mut seen_move = false;

    for token in PathParser::from(d) {
        let Ok(segment) = token else {
            break; // keep whatever parsed before the bad token
        };
        match segment {
            PathSegment::MoveTo { abs, x, y } => {
                if seen_move {
                    break; // single-contour model
                }
                cursor = resolve(cursor, abs, x, y);
                subpath_start = cursor;
                points.push(cursor);
                seen_move = true;
            }
            PathSegment::LineTo { abs, x, y } => {
                cursor = resolve(cursor, abs, x, y);
                points.push(cursor);
            }
            PathSegment::HorizontalLineTo { abs, x } => {
                cursor.x = if abs { x } else { cursor.x + x };
                points.push(cursor);
            }
            PathSegment::VerticalLineTo { abs, y } => {
                cursor.y = if abs { y } else { cursor.y + y };
                points.push(cursor);
            }
            PathSegment::CurveTo { abs, x, y, .. } => {
                // Control points dropped; the endpoint is the vertex
                cursor = resolve(cursor, abs, x, y);
                points.push(cursor);
            }
            PathSegment::ClosePath { .. } => {
                closure = Closure::Closed;
                cursor = subpath_start;
            }
            _ => break, // outside the supported command set
        }
    }

    points.dedup_by(|a, b| a.approx_eq(*b));
    if closure.is_closed() && points.len() > 1 && points[points.len() - 1].approx_eq(points[0]) {
        points.pop();
    }

    PathData { points, closure }
}

/// Parse a polyline `points` attribute ("x,y x,y ...") into vertices.
/// The tokenizer stops silently at the first malformed pair.
pub fn parse_polyline_points(attr: &str) -> Vec<Point> {
    PointsParser::from(attr)
        .map(|(x, y)| Point::new(x, y))
        .collect()
}

/// Serialize vertices back to a path `d` string.
pub fn path_data(points: &[Point], closure: Closure) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(points.len() + 1);
    for (i, p) in points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        parts.push(format!("{command} {} {}", p.x, p.y));
    }
    if closure.is_closed() && !points.is_empty() {
        parts.push("Z".to_string());
    }
    parts.join(" ")
}

/// Serialize vertices to a polyline `points` attribute.
pub fn polyline_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

impl GeometryObject {
    /// Build an object (points, lines, intersections) from a path `d`
    /// string.
    pub fn from_path_data(id: impl Into<String>, d: &str) -> Self {
        let parsed = parse_path(d);
        GeometryObject::new(id, parsed.points, parsed.closure)
    }

    /// Like [`from_path_data`](Self::from_path_data) but derives the
    /// wall segments with a visual gap.
    pub fn from_path_data_with_gap(id: impl Into<String>, d: &str, gap_size: f64) -> Self {
        let mut object = Self::from_path_data(id, d);
        object.rebuild_with_gap(gap_size);
        object
    }

    /// Build an object from a polyline `points` attribute. Polylines
    /// have no `Z`; the shape closes when its ends meet (an explicit
    /// duplicate of the first point also counts).
    pub fn from_polyline_points(id: impl Into<String>, attr: &str) -> Self {
        let mut points = parse_polyline_points(attr);
        let mut closure = Closure::Open;
        if points.len() > 3 && points[points.len() - 1].approx_eq(points[0]) {
            points.pop();
            closure = Closure::Closed;
        } else if can_be_closed(&points) {
            closure = Closure::Closed;
        }
        GeometryObject::new(id, points, closure)
    }

    /// The object's outline as a path `d` string.
    pub fn to_path_data(&self) -> String {
        path_data(&self.points, self.closure)
    }

    /// The object's outline as a polyline `points` attribute.
    pub fn to_polyline_points(&self) -> String {
        polyline_points(&self.points)
    }
}

// ============================================================================
// TESTS
// ============================================================================
