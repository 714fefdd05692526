//! Splitting a closed outline in two along an infinite line.
//!
//! The split line is treated as infinite: only its direction matters.
//! Each polygon edge is intersected with it (accepting hits within the
//! edge's bounding box grown by [`EDGE_SLACK`]), then every original
//! vertex is classified onto one side of the line by cross product.
//! Walking the outline once, each accepted intersection point is
//! inserted into BOTH halves and flips which half receives it first,
//! so the cut becomes a shared wall. Finally each half is sorted
//! clockwise around its own centroid and deduplicated.
//!
//! Returns `None` when the line crosses fewer than two edges; a graze
//! or a miss is infeasible, not an error.

use crate::geometry::{Line, Point, centroid, infinite_line_edge_intersection};
use crate::object::{Closure, EditError, GeometryObject};
use std::cmp::Ordering;

/// How far outside an edge's bounding box an intersection may land
/// and still count as hitting that edge. Matches the corner-contact
/// threshold used by the intersection index.
pub const EDGE_SLACK: f64 = 5.0;

/// The two halves produced by a split, each an independent outline.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult {
    pub first: Vec<Point>,
    pub second: Vec<Point>,
}

fn within_edge_box(p: Point, a: Point, b: Point, slack: f64) -> bool {
    p.x >= a.x.min(b.x) - slack
        && p.x <= a.x.max(b.x) + slack
        && p.y >= a.y.min(b.y) - slack
        && p.y <= a.y.max(b.y) + slack
}

/// Sort an outline clockwise around its centroid (screen coordinates,
/// y down). Only valid for convex-ish vertex clouds, which is what a
/// straight cut of a simple room outline produces.
fn sort_clockwise(points: &mut [Point]) {
    let Some(center) = centroid(points) else {
        return;
    };
    points.sort_by(|a, b| {
        let angle_a = (a.y - center.y).atan2(a.x - center.x);
        let angle_b = (b.y - center.y).atan2(b.x - center.x);
        angle_a.partial_cmp(&angle_b).unwrap_or(Ordering::Equal)
    });
}

/// Drop consecutive near-duplicates, including the wrap-around pair.
/// With the edge slack, one crossing can register on two adjacent
/// edges and get inserted twice.
fn dedup_outline(points: &mut Vec<Point>) {
    points.dedup_by(|a, b| a.approx_eq(*b));
    while points.len() > 1 && points[points.len() - 1].approx_eq(points[0]) {
        points.pop();
    }
}

/// Split the outline `points` along the infinite line through
/// `split_line`. `None` if the line crosses fewer than two edges.
pub fn split_polygon(points: &[Point], split_line: Line) -> Option<SplitResult> {
    if points.len() < 3 {
        return None;
    }

    let a = split_line.start();
    let b = split_line.end();
    let n = points.len();

    // Where the infinite line crosses the outline's edges
    let mut crossings: Vec<Point> = Vec::new();
    for i in 0..n {
        let p1 = points[i];
        let p2 = points[(i + 1) % n];
        if let Some(hit) = infinite_line_edge_intersection(a, b, p1, p2, EDGE_SLACK) {
            crossings.push(hit);
        }
    }
    if crossings.len() < 2 {
        return None;
    }

    let mut first: Vec<Point> = Vec::new();
    let mut second: Vec<Point> = Vec::new();
    let mut on_first = true;

    for i in 0..n {
        let point = points[i];

        // Which side of the cut is this vertex on?
        let side = (b.x - a.x) * (point.y - a.y) - (b.y - a.y) * (point.x - a.x);
        if side >= 0.0 {
            first.push(point);
        } else {
            second.push(point);
        }

        // Crossings on the edge arriving at this vertex go to both
        // halves; the walk flips halves at every crossing
        let prev = points[(i + n - 1) % n];
        for hit in &crossings {
            if within_edge_box(*hit, prev, point, EDGE_SLACK) {
                if on_first {
                    first.push(*hit);
                } else {
                    second.push(*hit);
                }
                on_first = !on_first;
                if on_first {
                    first.push(*hit);
                } else {
                    second.push(*hit);
                }
            }
        }
    }

    sort_clockwise(&mut first);
    sort_clockwise(&mut second);
    dedup_outline(&mut first);
    dedup_outline(&mut second);

    if first.len() < 3 || second.len() < 3 {
        return None;
    }

    Some(SplitResult { first, second })
}

impl GeometryObject {
    /// Split a closed object into two closed children with the given
    /// ids. Presentation metadata is inherited from the parent.
    ///
    /// `Err` for an open shape; `Ok(None)` when the line doesn't cross
    /// the outline twice.
    pub fn split(
        &self,
        split_line: Line,
        first_id: &str,
        second_id: &str,
    ) -> Result<Option<(GeometryObject, GeometryObject)>, EditError> {
        if !self.closure.is_closed() {
            return Err(EditError::NotClosed);
        }
        let Some(result) = split_polygon(&self.points, split_line) else {
            return Ok(None);
        };

        let mut first = GeometryObject::new(first_id, result.first, Closure::Closed);
        let mut second = GeometryObject::new(second_id, result.second, Closure::Closed);
        first.inherit_style(self);
        second.inherit_style(self);
        Ok(Some((first, second)))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    fn assert_same_outline(actual: &[Point], expected: &[Point]) {
        assert_eq!(actual.len(), expected.len(), "outline size: {actual:?}");
        for e in expected {
            assert!(
                actual.iter().any(|p| p.approx_eq(*e)),
                "missing vertex {e:?} in {actual:?}"
            );
        }
    }

    #[test]
    fn vertical_cut_through_square() {
        let result = split_polygon(&square(), Line::new(5.0, -5.0, 5.0, 15.0)).unwrap();

        assert_same_outline(
            &result.first,
            &[
                Point::new(0.0, 0.0),
                Point::new(5.0, 0.0),
                Point::new(5.0, 10.0),
                Point::new(0.0, 10.0),
            ],
        );
        assert_same_outline(
            &result.second,
            &[
                Point::new(5.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(5.0, 10.0),
            ],
        );
    }

    #[test]
    fn halves_share_the_cut_points() {
        let result = split_polygon(&square(), Line::new(5.0, -5.0, 5.0, 15.0)).unwrap();
        for cut in [Point::new(5.0, 0.0), Point::new(5.0, 10.0)] {
            assert!(result.first.iter().any(|p| p.approx_eq(cut)));
            assert!(result.second.iter().any(|p| p.approx_eq(cut)));
        }
    }

    #[test]
    fn vertex_conservation() {
        // Every original vertex survives into exactly one half
        let result = split_polygon(&square(), Line::new(5.0, -5.0, 5.0, 15.0)).unwrap();
        for v in square() {
            let in_first = result.first.iter().any(|p| p.approx_eq(v));
            let in_second = result.second.iter().any(|p| p.approx_eq(v));
            assert!(in_first ^ in_second, "vertex {v:?} should be in exactly one half");
        }
    }

    #[test]
    fn outlines_come_out_clockwise_sorted() {
        let result = split_polygon(&square(), Line::new(5.0, -5.0, 5.0, 15.0)).unwrap();
        // Angle around the centroid increases monotonically
        let c = centroid(&result.first).unwrap();
        let angles: Vec<f64> = result
            .first
            .iter()
            .map(|p| (p.y - c.y).atan2(p.x - c.x))
            .collect();
        for pair in angles.windows(2) {
            assert!(pair[0] <= pair[1], "angles not sorted: {angles:?}");
        }
    }

    #[test]
    fn miss_is_infeasible() {
        let result = split_polygon(&square(), Line::new(20.0, -5.0, 20.0, 15.0));
        assert_eq!(result, None, "line entirely outside the outline");
    }

    #[test]
    fn degenerate_input_is_infeasible() {
        let two = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        assert_eq!(split_polygon(&two, Line::new(5.0, -5.0, 5.0, 5.0)), None);
    }

    #[test]
    fn diagonal_cut_of_square() {
        // Cut corner-to-corner: both halves are triangles
        let result = split_polygon(&square(), Line::new(-5.0, -5.0, 15.0, 15.0)).unwrap();
        assert!(result.first.len() >= 3);
        assert!(result.second.len() >= 3);
        // Corner vertices (0,0) and (10,10) lie on the cut and appear somewhere
        let all: Vec<Point> = result.first.iter().chain(result.second.iter()).copied().collect();
        assert!(all.iter().any(|p| p.approx_eq(Point::new(0.0, 0.0))));
        assert!(all.iter().any(|p| p.approx_eq(Point::new(10.0, 10.0))));
    }

    #[test]
    fn object_split_produces_closed_children() {
        let mut parent = GeometryObject::new("room-1", square(), Closure::Closed);
        parent.fill = Some("#aabbcc".into());

        let (first, second) = parent
            .split(Line::new(5.0, -5.0, 5.0, 15.0), "room-1a", "room-1b")
            .unwrap()
            .unwrap();

        assert!(first.closure.is_closed());
        assert!(second.closure.is_closed());
        assert_eq!(first.id, "room-1a");
        assert_eq!(first.lines.len(), 4, "rectangle child has 4 walls");
        assert_eq!(first.fill.as_deref(), Some("#aabbcc"), "style inherited");
    }

    #[test]
    fn object_split_requires_closed_shape() {
        let open = GeometryObject::new("hall", square(), Closure::Open);
        let err = open
            .split(Line::new(5.0, -5.0, 5.0, 15.0), "a", "b")
            .unwrap_err();
        assert_eq!(err, EditError::NotClosed);
    }

    #[test]
    fn object_split_miss_is_ok_none() {
        let parent = GeometryObject::new("room-1", square(), Closure::Closed);
        let result = parent.split(Line::new(50.0, 0.0, 50.0, 10.0), "a", "b").unwrap();
        assert!(result.is_none());
    }
}
