//! Edit operations driven by pointer interactions: moving and
//! deleting vertices, reconstructing point runs from line maps, and
//! the line-editing helpers (straighten, shared-endpoint
//! propagation).
//!
//! The drag-end protocol is: snap the pointer position (snap module),
//! call [`GeometryObject::move_point`] with the result, and read the
//! refreshed caches. Closedness only ever moves one way here: an open
//! shape whose ends meet gets promoted, a closed shape never silently
//! reopens.

use crate::geometry::Point;
use crate::intersect::PROXIMITY_THRESHOLD;
use crate::object::{Closure, EditError, GeometryObject, LineMap, LineSegment, can_be_closed};
use std::collections::HashMap;

/// Minimum vertex count for a shape that can still lose a point.
const MIN_POINTS: usize = 3;

/// Per-axis distance under which an endpoint counts as "the same
/// corner" during propagation.
const ENDPOINT_MATCH: f64 = 2.0;

impl GeometryObject {
    /// Move one vertex and re-derive the caches.
    ///
    /// An open shape whose endpoints land within closing distance is
    /// promoted to closed (three points minimum). Closed shapes stay
    /// closed regardless of where the vertex goes.
    pub fn move_point(&mut self, index: usize, to: Point) -> Result<(), EditError> {
        if index >= self.points.len() {
            return Err(EditError::PointOutOfRange {
                index,
                len: self.points.len(),
            });
        }
        self.points[index] = to;
        if !self.closure.is_closed() && can_be_closed(&self.points) {
            self.closure = Closure::Closed;
        }
        self.rebuild();
        Ok(())
    }

    /// Delete one vertex and re-derive the caches.
    ///
    /// Returns `Ok(true)` when the point was removed, `Ok(false)` as
    /// a silent no-op when removal would leave fewer than three
    /// points (a shape below that is not a shape anymore).
    pub fn delete_point(&mut self, index: usize) -> Result<bool, EditError> {
        if index >= self.points.len() {
            return Err(EditError::PointOutOfRange {
                index,
                len: self.points.len(),
            });
        }
        if self.points.len() <= MIN_POINTS {
            return Ok(false);
        }
        self.points.remove(index);
        self.rebuild();
        Ok(true)
    }
}

/// Which handle of a wall segment was grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentEnd {
    Start,
    End,
}

/// Straighten a segment onto its dominant axis.
///
/// The grabbed end stays fixed; the other end swings onto the
/// horizontal or vertical (whichever the segment already leans
/// toward), preserving the segment's length and general direction.
pub fn straighten_segment(points: [f64; 4], fixed: SegmentEnd) -> [f64; 4] {
    let [start_x, start_y, end_x, end_y] = points;
    let delta_x = (end_x - start_x).abs();
    let delta_y = (end_y - start_y).abs();
    let more_horizontal = delta_x >= delta_y;
    let length = (delta_x * delta_x + delta_y * delta_y).sqrt();

    match fixed {
        SegmentEnd::Start => {
            if more_horizontal {
                let end_x = start_x + if end_x > start_x { length } else { -length };
                [start_x, start_y, end_x, start_y]
            } else {
                let end_y = start_y + if end_y > start_y { length } else { -length };
                [start_x, start_y, start_x, end_y]
            }
        }
        SegmentEnd::End => {
            if more_horizontal {
                let start_x = end_x + if start_x > end_x { length } else { -length };
                [start_x, end_y, end_x, end_y]
            } else {
                let start_y = end_y + if start_y > end_y { length } else { -length };
                [end_x, start_y, end_x, end_y]
            }
        }
    }
}

/// Which endpoint moved between two versions of a segment.
///
/// Returns `(old, new)` for the endpoint that changed, or `None` when
/// both moved (or neither). Comparison is exact because the values
/// are copies of each other, not recomputed.
pub fn shifted_endpoints(original: [f64; 4], updated: [f64; 4]) -> Option<(Point, Point)> {
    if updated[0] == original[0] && updated[1] == original[1] {
        return Some((
            Point::new(original[2], original[3]),
            Point::new(updated[2], updated[3]),
        ));
    }
    if updated[2] == original[2] && updated[3] == original[3] {
        return Some((
            Point::new(original[0], original[1]),
            Point::new(updated[0], updated[1]),
        ));
    }
    None
}

#[inline]
fn at_corner(x: f64, y: f64, corner: Point) -> bool {
    (x - corner.x).abs() < ENDPOINT_MATCH && (y - corner.y).abs() < ENDPOINT_MATCH
}

/// Propagate a moved endpoint of `line_id` to the walls that share it.
///
/// The walls connected to `line_id` are found through the
/// intersection index; each one whose endpoint sits at `old_point`
/// gets that endpoint translated by the same delta. Returns updated
/// copies of the affected segments; the caller applies them.
pub fn translate_shared_endpoint(
    object: &GeometryObject,
    line_id: &str,
    old_point: Point,
    new_point: Point,
) -> Result<Vec<LineSegment>, EditError> {
    if object.lines.get(line_id).is_none() {
        return Err(EditError::UnknownLine(line_id.to_string()));
    }

    let empty = Vec::new();
    let on_clicked = object.intersection_lines.get(line_id).unwrap_or(&empty);

    // Intersection points sitting at the moved corner
    let affected: Vec<&String> = on_clicked
        .iter()
        .filter(|point_id| {
            object
                .intersection_points
                .get(*point_id)
                .is_some_and(|p| at_corner(p.coordinates.x, p.coordinates.y, old_point))
        })
        .collect();
    if affected.is_empty() {
        return Ok(Vec::new());
    }

    // Walls reachable through those points, excluding the moved one
    let mut connected: Vec<&str> = Vec::new();
    for point_id in &affected {
        if let Some(point) = object.intersection_points.get(*point_id) {
            for other in &point.lines {
                if other != line_id && !connected.contains(&other.as_str()) {
                    connected.push(other.as_str());
                }
            }
        }
    }

    let dx = new_point.x - old_point.x;
    let dy = new_point.y - old_point.y;

    let mut updated = Vec::new();
    // Walk the line map, not the connected set, to keep output order
    // deterministic
    for segment in object.lines.iter() {
        if !connected.contains(&segment.id.as_str()) {
            continue;
        }
        let mut copy = segment.clone();
        if at_corner(copy.points[0], copy.points[1], old_point) {
            copy.points[0] += dx;
            copy.points[1] += dy;
        }
        if at_corner(copy.points[2], copy.points[3], old_point) {
            copy.points[2] += dx;
            copy.points[3] += dy;
        }
        updated.push(copy);
    }
    Ok(updated)
}

// ----------------------------------------------------------------------------
// Line map -> point run reconstruction
// ----------------------------------------------------------------------------
//
// ## Rust Lesson #10: HashMap keys
//
// JS objects happily key on anything stringly. Rust's HashMap needs
// `Eq + Hash`, and floats are neither (NaN breaks both). Endpoints
// in a line map are exact copies of each other though, so keying on
// the raw bit patterns (`f64::to_bits`) is both safe and fast here.

struct EndpointGraph {
    /// Node coordinates in first-seen order
    points: Vec<Point>,
    /// Node index -> neighboring node indices
    adjacency: Vec<Vec<usize>>,
}

impl EndpointGraph {
    fn build(lines: &LineMap) -> Self {
        let mut index: HashMap<(u64, u64), usize> = HashMap::new();
        let mut graph = EndpointGraph {
            points: Vec::new(),
            adjacency: Vec::new(),
        };

        let mut intern = |p: Point, graph: &mut EndpointGraph| -> usize {
            *index.entry((p.x.to_bits(), p.y.to_bits())).or_insert_with(|| {
                graph.points.push(p);
                graph.adjacency.push(Vec::new());
                graph.points.len() - 1
            })
        };

        for segment in lines.iter() {
            let a = intern(segment.start(), &mut graph);
            let b = intern(segment.end(), &mut graph);
            if a != b {
                if !graph.adjacency[a].contains(&b) {
                    graph.adjacency[a].push(b);
                }
                if !graph.adjacency[b].contains(&a) {
                    graph.adjacency[b].push(a);
                }
            }
        }
        graph
    }

    /// Nodes with exactly one neighbor, in first-seen order.
    fn loose_ends(&self) -> Vec<usize> {
        (0..self.points.len())
            .filter(|&i| self.adjacency[i].len() == 1)
            .collect()
    }
}

/// Reconstruct the vertex run from a line map.
///
/// An open chain (exactly two degree-1 endpoints) is walked from its
/// first loose end so the run comes out connected even if the map was
/// stored out of order. Loops and anything more tangled fall back to
/// first-seen endpoint order, which for derived line maps IS the walk
/// order.
pub fn lines_to_points(lines: &LineMap) -> Vec<Point> {
    if lines.is_empty() {
        return Vec::new();
    }

    let graph = EndpointGraph::build(lines);
    let ends = graph.loose_ends();

    if ends.len() == 2 {
        let mut run: Vec<Point> = Vec::with_capacity(graph.points.len());
        let mut visited = vec![false; graph.points.len()];
        let mut current = ends[0];
        loop {
            visited[current] = true;
            run.push(graph.points[current]);
            match graph.adjacency[current].iter().find(|&&n| !visited[n]) {
                Some(&next) => current = next,
                None => break,
            }
        }
        // Disconnected leftovers (multiple chains in one map) keep
        // their first-seen order
        for i in 0..graph.points.len() {
            if !visited[i] {
                run.push(graph.points[i]);
            }
        }
        run
    } else {
        graph.points
    }
}

/// Does this line map form a closed polygon?
///
/// True when every endpoint is shared by two walls, or when exactly
/// two loose ends remain within [`PROXIMITY_THRESHOLD`] of each other
/// (the user has drawn back to the start but not exactly onto it).
/// Needs at least three walls either way.
pub fn forms_closed_polygon(lines: &LineMap) -> bool {
    if lines.len() < 3 {
        return false;
    }
    let graph = EndpointGraph::build(lines);
    let ends = graph.loose_ends();
    match ends.len() {
        0 => true,
        2 => graph.points[ends[0]].distance(graph.points[ends[1]]) <= PROXIMITY_THRESHOLD,
        _ => false,
    }
}

// ============================================================================
// TESTS
// ============================================================================
