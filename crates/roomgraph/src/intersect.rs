//! Intersection indexing over a shape's wall segments.
//!
//! Two passes, both O(n²) over segment pairs (shapes here are tens of
//! walls, not thousands):
//!
//! 1. Endpoint proximity: every endpoint pairing between two segments
//!    that sits within [`PROXIMITY_THRESHOLD`] gets an intersection
//!    point at the pair's midpoint. This is what marks the shared
//!    corners of a wall run; two parallel walls can share two corners
//!    and get two points.
//! 2. True crossings: segment pairs that are NOT endpoint-connected
//!    are tested for a real segment-segment crossing. The exclusion
//!    keeps corner contacts from double-registering as crossings.
//!
//! Point ids are `p-{n}` with `n` counting up from 1 across both
//! passes.

use crate::geometry::Point;
use crate::object::LineSegment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Endpoint distance under which two segments count as connected.
/// Also the proximity-pass recording threshold.
pub const PROXIMITY_THRESHOLD: f64 = 5.0;

/// A recorded intersection: where, and between which two lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionPoint {
    pub coordinates: Point,
    /// Ids of the two segments that produced this point.
    pub lines: [String; 2],
}

/// Output of [`find_intersections`]: the points keyed by id, and the
/// reverse index from line id to the point ids sitting on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntersectionSet {
    pub points: BTreeMap<String, IntersectionPoint>,
    pub lines: BTreeMap<String, Vec<String>>,
}

impl IntersectionSet {
    fn record(&mut self, counter: &mut usize, at: Point, a: &LineSegment, b: &LineSegment) {
        let id = format!("p-{counter}");
        *counter += 1;
        self.points.insert(
            id.clone(),
            IntersectionPoint {
                coordinates: at,
                lines: [a.id.clone(), b.id.clone()],
            },
        );
        self.lines.entry(a.id.clone()).or_default().push(id.clone());
        self.lines.entry(b.id.clone()).or_default().push(id);
    }
}

/// Smallest endpoint-to-endpoint distance between two segments.
fn closest_endpoint_distance(a: &LineSegment, b: &LineSegment) -> f64 {
    let mut best = f64::INFINITY;
    for pa in [a.start(), a.end()] {
        for pb in [b.start(), b.end()] {
            best = best.min(pa.distance(pb));
        }
    }
    best
}

/// Do the two segments touch at their ends (within `threshold`)?
pub fn endpoints_connected(a: &LineSegment, b: &LineSegment, threshold: f64) -> bool {
    closest_endpoint_distance(a, b) <= threshold
}

/// Index every intersection among `segments`. See the module docs for
/// the two-pass scheme.
pub fn find_intersections(segments: &[LineSegment]) -> IntersectionSet {
    let mut set = IntersectionSet::default();
    for segment in segments {
        set.lines.insert(segment.id.clone(), Vec::new());
    }

    let mut counter = 1usize;

    // Pass 1: endpoint proximity (corner contacts). Every endpoint
    // pairing within the threshold gets its own point
    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            for pa in [segments[i].start(), segments[i].end()] {
                for pb in [segments[j].start(), segments[j].end()] {
                    if pa.distance(pb) <= PROXIMITY_THRESHOLD {
                        set.record(&mut counter, pa.midpoint(pb), &segments[i], &segments[j]);
                    }
                }
            }
        }
    }

    // Pass 2: true crossings between non-adjacent segments
    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            if endpoints_connected(&segments[i], &segments[j], PROXIMITY_THRESHOLD) {
                continue;
            }
            if let Some(hit) = segments[i].as_line().segment_intersection(&segments[j].as_line()) {
                set.record(&mut counter, hit, &segments[i], &segments[j]);
            }
        }
    }

    set
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(id: &str, points: [f64; 4]) -> LineSegment {
        LineSegment::new(id, points)
    }

    #[test]
    fn corner_contact_records_midpoint() {
        // Two walls meeting 4 units apart at a corner
        let a = seg("l-1", [0.0, 0.0, 10.0, 0.0]);
        let b = seg("l-2", [10.0, 4.0, 10.0, 20.0]);
        let set = find_intersections(&[a, b]);

        assert_eq!(set.points.len(), 1);
        let point = &set.points["p-1"];
        assert_eq!(point.coordinates, Point::new(10.0, 2.0), "midpoint of the gap");
        assert_eq!(point.lines, ["l-1".to_string(), "l-2".to_string()]);
        assert_eq!(set.lines["l-1"], vec!["p-1"]);
        assert_eq!(set.lines["l-2"], vec!["p-1"]);
    }

    #[test]
    fn far_endpoints_do_not_register() {
        let a = seg("l-1", [0.0, 0.0, 10.0, 0.0]);
        let b = seg("l-2", [10.0, 6.0, 10.0, 20.0]);
        let set = find_intersections(&[a, b]);
        assert!(set.points.is_empty(), "6 units is past the threshold");
        assert!(set.lines["l-1"].is_empty(), "reverse index still has the line");
    }

    #[test]
    fn parallel_walls_register_a_point_per_corner_pair() {
        // Two 20-unit walls 3 apart: the start-start and end-end
        // pairs are both within the threshold and each gets a point
        let a = seg("l-1", [0.0, 0.0, 20.0, 0.0]);
        let b = seg("l-2", [0.0, 3.0, 20.0, 3.0]);
        let set = find_intersections(&[a, b]);

        assert_eq!(set.points.len(), 2, "one point per close endpoint pair");
        let coords: Vec<Point> = set.points.values().map(|p| p.coordinates).collect();
        assert!(coords.iter().any(|c| c.approx_eq(Point::new(0.0, 1.5))));
        assert!(coords.iter().any(|c| c.approx_eq(Point::new(20.0, 1.5))));
        assert_eq!(set.lines["l-1"].len(), 2, "both corners visible from each wall");
        assert_eq!(set.lines["l-2"].len(), 2);
    }

    #[test]
    fn true_crossing_between_detached_segments() {
        let a = seg("l-1", [0.0, 0.0, 20.0, 20.0]);
        let b = seg("l-2", [0.0, 20.0, 20.0, 0.0]);
        let set = find_intersections(&[a, b]);

        assert_eq!(set.points.len(), 1);
        assert_eq!(set.points["p-1"].coordinates, Point::new(10.0, 10.0));
    }

    #[test]
    fn corner_contact_is_not_also_a_crossing() {
        // A V shape: the two segments share a vertex exactly, so they
        // both touch (pass 1) and mathematically cross at that vertex.
        // Adjacency exclusion keeps pass 2 quiet.
        let a = seg("l-1", [0.0, 0.0, 10.0, 10.0]);
        let b = seg("l-2", [10.0, 10.0, 20.0, 0.0]);
        let set = find_intersections(&[a, b]);

        assert_eq!(set.points.len(), 1, "one corner point, no crossing duplicate");
        assert_eq!(set.points["p-1"].coordinates, Point::new(10.0, 10.0));
    }

    #[test]
    fn ids_count_up_across_passes() {
        let segments = vec![
            seg("l-1", [0.0, 0.0, 10.0, 0.0]),
            seg("l-2", [10.0, 0.0, 10.0, 10.0]), // touches l-1
            seg("l-3", [-20.0, -20.0, 40.0, 40.0]), // crosses nothing near endpoints
        ];
        let set = find_intersections(&segments);

        // The l-1/l-2 corner comes out of pass 1; the two true
        // crossings of l-3 come out of pass 2 with the same counter
        assert_eq!(set.points.len(), 3);
        assert_eq!(set.points["p-1"].coordinates, Point::new(10.0, 0.0));
        let mut ids: Vec<usize> = set
            .points
            .keys()
            .map(|k| k.trim_start_matches("p-").parse().unwrap())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=ids.len()).collect::<Vec<_>>());
    }

    #[test]
    fn square_outline_registers_every_corner() {
        let segments = vec![
            seg("s-line-1", [0.0, 0.0, 10.0, 0.0]),
            seg("s-line-2", [10.0, 0.0, 10.0, 10.0]),
            seg("s-line-3", [10.0, 10.0, 0.0, 10.0]),
            seg("s-line-4", [0.0, 10.0, 0.0, 0.0]),
        ];
        let set = find_intersections(&segments);

        assert_eq!(set.points.len(), 4, "one point per corner");
        for points in set.lines.values() {
            assert_eq!(points.len(), 2, "every wall touches two corners");
        }
    }
}
