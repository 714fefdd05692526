//! Merging two closed outlines that share a wall.
//!
//! Shapes qualify for merging when at least two vertex pairs (one
//! vertex from each shape) sit within the tolerance; those pairs are
//! the shared wall. The merged outline is built by dropping the
//! shared wall and walking around the union:
//!
//! 1. Find the common boundary (midpoints of matching vertex pairs).
//! 2. Rotate each outline so its boundary run starts at index 0, with
//!    the run contiguous.
//! 3. Emit the run's first vertex, then the second shape's non-shared
//!    side (reversed when its forward direction walks away from the
//!    junction), then the first shape from the run's last vertex on.
//! 4. Deduplicate and drop vertices that have become collinear where
//!    the shared wall met a straight run.
//!
//! Infeasible merges (fewer than two boundary pairs, or outlines that
//! degenerate) return `None`.

use crate::geometry::{POINT_EPSILON, Point};
use crate::object::{Closure, EditError, GeometryObject};

/// Default vertex-pair distance for boundary detection.
pub const MERGE_TOLERANCE: f64 = 4.0;

/// How far a normalized-direction dot product may deviate from 1 and
/// still count as collinear.
pub const COLLINEAR_DOT_EPSILON: f64 = 1e-3;

/// Midpoints of vertex pairs (one from each outline) within
/// `tolerance` of each other. Every pairing within tolerance counts,
/// so one clustered vertex can anchor more than one pair.
fn find_common_boundary(points1: &[Point], points2: &[Point], tolerance: f64) -> Vec<Point> {
    let mut boundary = Vec::new();
    for p1 in points1 {
        for p2 in points2 {
            if p1.distance(*p2) <= tolerance {
                boundary.push(p1.midpoint(*p2));
            }
        }
    }
    boundary
}

fn near_boundary(p: Point, boundary: &[Point], tolerance: f64) -> bool {
    boundary.iter().any(|b| p.distance(*b) <= tolerance)
}

/// Rotate the outline so a boundary vertex whose predecessor is NOT a
/// boundary vertex comes first. That makes the boundary run start at
/// index 0 and never wrap. `None` when every vertex is on the
/// boundary (the outlines coincide).
fn rotate_to_boundary_start(
    points: &[Point],
    boundary: &[Point],
    tolerance: f64,
) -> Option<Vec<Point>> {
    let n = points.len();
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        if near_boundary(points[i], boundary, tolerance) && !near_boundary(prev, boundary, tolerance)
        {
            let mut rotated = points.to_vec();
            rotated.rotate_left(i);
            return Some(rotated);
        }
    }
    None
}

/// Index of the last vertex in the boundary run that starts at 0.
fn boundary_run_end(ordered: &[Point], boundary: &[Point], tolerance: f64) -> usize {
    let mut end = 0;
    while end + 1 < ordered.len() && near_boundary(ordered[end + 1], boundary, tolerance) {
        end += 1;
    }
    end
}

fn push_unique(outline: &mut Vec<Point>, p: Point) {
    if outline.last().is_none_or(|last| !last.approx_eq(p)) {
        outline.push(p);
    }
}

/// Drop every vertex whose neighbors make it redundant: zero-length
/// edges and straight-through vertices (normalized-direction dot
/// within [`COLLINEAR_DOT_EPSILON`] of magnitude 1). The outline is
/// treated as a cycle, so the first and last vertices are candidates
/// too.
fn remove_collinear(points: &[Point]) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut kept = Vec::with_capacity(n);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let curr = points[i];
        let next = points[(i + 1) % n];

        let len_in = prev.distance(curr);
        let len_out = curr.distance(next);
        if len_in < POINT_EPSILON || len_out < POINT_EPSILON {
            continue; // duplicate vertex
        }

        let dot = ((curr.x - prev.x) * (next.x - curr.x) + (curr.y - prev.y) * (next.y - curr.y))
            / (len_in * len_out);
        if (dot.abs() - 1.0).abs() <= COLLINEAR_DOT_EPSILON {
            continue; // straight through (or doubling back)
        }
        kept.push(curr);
    }
    kept
}

/// Merge two closed outlines along their shared wall.
///
/// `None` when fewer than two vertex pairs match within `tolerance`,
/// or when the result degenerates below three vertices.
pub fn merge_polygons(points1: &[Point], points2: &[Point], tolerance: f64) -> Option<Vec<Point>> {
    if points1.len() < 3 || points2.len() < 3 {
        return None;
    }

    let boundary = find_common_boundary(points1, points2, tolerance);
    if boundary.len() < 2 {
        return None;
    }

    let ordered1 = rotate_to_boundary_start(points1, &boundary, tolerance)?;
    let ordered2 = rotate_to_boundary_start(points2, &boundary, tolerance)?;
    let end1 = boundary_run_end(&ordered1, &boundary, tolerance);
    let end2 = boundary_run_end(&ordered2, &boundary, tolerance);

    let mut merged: Vec<Point> = Vec::new();

    // One end of the disappearing wall
    push_unique(&mut merged, ordered1[0]);

    // The second outline's far side. Walk it in whichever direction
    // leaves the junction at ordered1[0] rather than jumping across.
    let side = &ordered2[end2 + 1..];
    if let (Some(first), Some(last)) = (side.first(), side.last()) {
        if ordered1[0].distance(*first) <= ordered1[0].distance(*last) {
            for p in side {
                push_unique(&mut merged, *p);
            }
        } else {
            for p in side.iter().rev() {
                push_unique(&mut merged, *p);
            }
        }
    }

    // The other end of the wall, then the rest of the first outline
    for p in &ordered1[end1..] {
        push_unique(&mut merged, *p);
    }

    // Closedness lives in the Closure flag, not a repeated vertex
    while merged.len() > 1 && merged[merged.len() - 1].approx_eq(merged[0]) {
        merged.pop();
    }

    let merged = remove_collinear(&merged);
    if merged.len() < 3 {
        return None;
    }
    Some(merged)
}

impl GeometryObject {
    /// Merge this closed object with another along their shared wall,
    /// producing a new closed object with the given id. Presentation
    /// metadata comes from `self`; the result is tagged with a
    /// `merged` attribute.
    ///
    /// `Err` when either shape is open; `Ok(None)` when the shapes
    /// share no wall within `tolerance`.
    pub fn merge(
        &self,
        other: &GeometryObject,
        tolerance: f64,
        merged_id: &str,
    ) -> Result<Option<GeometryObject>, EditError> {
        if !self.closure.is_closed() || !other.closure.is_closed() {
            return Err(EditError::NotClosed);
        }
        let Some(points) = merge_polygons(&self.points, &other.points, tolerance) else {
            return Ok(None);
        };

        let mut merged = GeometryObject::new(merged_id, points, Closure::Closed);
        merged.inherit_style(self);
        merged.attrs.insert("merged".to_string(), "true".to_string());
        Ok(Some(merged))
    }
}

// ============================================================================
// TESTS
// ============================================================================
