//! Core geometry types for roomgraph.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! In JS you'd write: `const point = { x: 1.0, y: 2.0 }`
//! In Rust, we define a `struct` with explicit types.
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = like console.log, lets you print with `{:?}`
//! - `Clone` = can duplicate the value (like spread: `{...obj}`)
//! - `Copy` = can copy implicitly (small stack values only)
//! - `PartialEq` = can compare with `==`
//! - `Serialize`/`Deserialize` = JSON via serde (like JSON.stringify)

use serde::{Deserialize, Serialize};

/// Tolerance for treating two coordinates as the same point.
pub const POINT_EPSILON: f64 = 1e-4;

/// Triangle-area threshold below which three points count as collinear.
pub const COLLINEAR_AREA_EPSILON: f64 = 1e-4;

/// A 2D point with x,y coordinates.
///
/// `f64` = 64-bit float (like JS's `number` but explicitly sized)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A line segment defined by two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

// ============================================================================
// IMPLEMENTATIONS (methods)
// ============================================================================
//
// ## Rust Lesson #5: impl blocks
//
// In JS you'd use class methods: `class Point { distance() {...} }`
// In Rust, we separate data (struct) from behavior (impl).
// This lets you add methods to types from other crates!

impl Point {
    /// Create a new point. This is a common pattern instead of constructors.
    ///
    /// Called as: `Point::new(1.0, 2.0)` (like static method)
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Squared distance. Cheaper when only comparing against a
    /// squared threshold (the closed-shape check works this way).
    #[inline]
    pub fn distance_sq(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Midpoint between this point and another.
    #[inline]
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Per-axis equality within [`POINT_EPSILON`].
    ///
    /// Used for deduplication of derived vertices, where coordinates
    /// come out of the same arithmetic and differ only by float noise.
    #[inline]
    pub fn approx_eq(&self, other: Point) -> bool {
        (self.x - other.x).abs() < POINT_EPSILON && (self.y - other.y).abs() < POINT_EPSILON
    }
}

impl Line {
    #[inline]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build a line from two points.
    #[inline]
    pub fn from_points(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    /// Get the start point of the line.
    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Get the end point of the line.
    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Get the midpoint of the line.
    #[inline]
    pub fn midpoint(&self) -> Point {
        self.start().midpoint(self.end())
    }

    /// Length of the line segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }

    /// True segment-segment intersection, parametric form.
    ///
    /// Solves for parameters `ua` (along self) and `ub` (along other);
    /// the segments cross only when both land in [0, 1].
    ///
    /// ## Rust Lesson #6: Option<T>
    ///
    /// Rust has no `null` or `undefined`. Instead, we use `Option<T>`:
    /// - `Some(value)` = we have a value
    /// - `None` = no value
    ///
    /// This is checked at compile time - you CAN'T forget to handle None!
    pub fn segment_intersection(&self, other: &Line) -> Option<Point> {
        let denom = (other.y2 - other.y1) * (self.x2 - self.x1)
            - (other.x2 - other.x1) * (self.y2 - self.y1);
        if denom == 0.0 {
            return None; // Parallel or coincident
        }

        let ua = ((other.x2 - other.x1) * (self.y1 - other.y1)
            - (other.y2 - other.y1) * (self.x1 - other.x1))
            / denom;
        let ub = ((self.x2 - self.x1) * (self.y1 - other.y1)
            - (self.y2 - self.y1) * (self.x1 - other.x1))
            / denom;

        if (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub) {
            Some(Point::new(
                self.x1 + ua * (self.x2 - self.x1),
                self.y1 + ua * (self.y2 - self.y1),
            ))
        } else {
            None
        }
    }
}

/// Intersect the infinite line through `a`-`b` with the edge `p1`-`p2`.
///
/// The hit is accepted when it lands inside the edge's bounding box
/// grown by `slack` units on every side. The slack keeps near-vertex
/// crossings from slipping between two adjacent edges.
///
/// Uses the standard-form representation (A*x + B*y = C per line);
/// a determinant near zero means the lines are parallel.
pub fn infinite_line_edge_intersection(
    a: Point,
    b: Point,
    p1: Point,
    p2: Point,
    slack: f64,
) -> Option<Point> {
    let a1 = b.y - a.y;
    let b1 = a.x - b.x;
    let c1 = a1 * a.x + b1 * a.y;

    let a2 = p2.y - p1.y;
    let b2 = p1.x - p2.x;
    let c2 = a2 * p1.x + b2 * p1.y;

    let det = a1 * b2 - a2 * b1;
    if det.abs() < 1e-10 {
        return None;
    }

    let x = (b2 * c1 - b1 * c2) / det;
    let y = (a1 * c2 - a2 * c1) / det;

    if x >= p1.x.min(p2.x) - slack
        && x <= p1.x.max(p2.x) + slack
        && y >= p1.y.min(p2.y) - slack
        && y <= p1.y.max(p2.y) + slack
    {
        Some(Point::new(x, y))
    } else {
        None
    }
}

/// Check whether three points are collinear via twice-the-triangle-area.
pub fn are_collinear(p1: Point, p2: Point, p3: Point) -> bool {
    let area = (p2.x - p1.x) * (p3.y - p1.y) - (p3.x - p1.x) * (p2.y - p1.y);
    area.abs() < COLLINEAR_AREA_EPSILON
}

/// Arithmetic mean of a point set. `None` for an empty slice.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|p| p.x).sum();
    let sum_y: f64 = points.iter().map(|p| p.y).sum();
    Some(Point::new(sum_x / n, sum_y / n))
}

/// Get the bounding box of a point set as (min_x, min_y, max_x, max_y).
pub fn bounding_box(points: &[Point]) -> Option<(f64, f64, f64, f64)> {
    if points.is_empty() {
        return None;
    }

    // Iterators! Like JS's .map().filter().reduce() but zero-cost.
    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    Some((min_x, min_y, max_x, max_y))
}

// ============================================================================
// TESTS
// ============================================================================
//
// Tests live right next to the code! Run with `cargo test`.
// The #[cfg(test)] means this only compiles during testing.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p1.distance(p2), 5.0); // 3-4-5 triangle
    }

    #[test]
    fn point_midpoint() {
        let mid = Point::new(0.0, 0.0).midpoint(Point::new(10.0, 4.0));
        assert_eq!(mid, Point::new(5.0, 2.0));
    }

    #[test]
    fn approx_eq_within_epsilon() {
        let p = Point::new(1.0, 2.0);
        assert!(p.approx_eq(Point::new(1.0 + 1e-5, 2.0 - 1e-5)));
        assert!(!p.approx_eq(Point::new(1.001, 2.0)));
    }

    #[test]
    fn line_length() {
        let line = Line::new(0.0, 0.0, 3.0, 4.0);
        assert_eq!(line.length(), 5.0);
    }

    #[test]
    fn segments_crossing() {
        let a = Line::new(0.0, 0.0, 10.0, 10.0);
        let b = Line::new(0.0, 10.0, 10.0, 0.0);
        let hit = a.segment_intersection(&b).unwrap();
        assert!(hit.approx_eq(Point::new(5.0, 5.0)), "expected (5,5), got {:?}", hit);
    }

    #[test]
    fn segments_parallel() {
        let a = Line::new(0.0, 0.0, 10.0, 0.0);
        let b = Line::new(0.0, 5.0, 10.0, 5.0);
        assert_eq!(a.segment_intersection(&b), None);
    }

    #[test]
    fn segments_disjoint_on_infinite_cross() {
        // The infinite lines cross at (5,5) but segment b stops short
        let a = Line::new(0.0, 0.0, 10.0, 10.0);
        let b = Line::new(0.0, 10.0, 4.0, 6.0);
        assert_eq!(a.segment_intersection(&b), None);
    }

    #[test]
    fn infinite_line_hits_edge() {
        // Vertical splitter through x=5 against the bottom edge of a square
        let hit = infinite_line_edge_intersection(
            Point::new(5.0, -5.0),
            Point::new(5.0, 15.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            5.0,
        )
        .unwrap();
        assert!(hit.approx_eq(Point::new(5.0, 0.0)));
    }

    #[test]
    fn infinite_line_respects_slack() {
        // Crossing at x=20 is 10 units outside the edge box, beyond the slack
        let hit = infinite_line_edge_intersection(
            Point::new(20.0, -5.0),
            Point::new(20.0, 15.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            5.0,
        );
        assert_eq!(hit, None);

        // 3 units outside is within the 5-unit slack
        let hit = infinite_line_edge_intersection(
            Point::new(13.0, -5.0),
            Point::new(13.0, 15.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            5.0,
        );
        assert!(hit.is_some());
    }

    #[test]
    fn collinear_points() {
        assert!(are_collinear(
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 10.0),
        ));
        assert!(!are_collinear(
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.1),
            Point::new(10.0, 10.0),
        ));
    }

    #[test]
    fn centroid_of_square() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert_eq!(centroid(&points), Some(Point::new(5.0, 5.0)));
        assert_eq!(centroid(&[]), None);
    }

    #[test]
    fn bbox_of_points() {
        let points = vec![
            Point::new(2.0, 1.0),
            Point::new(10.0, 0.0),
            Point::new(4.0, 7.0),
        ];
        assert_eq!(bounding_box(&points), Some((2.0, 0.0, 10.0, 7.0)));
        assert_eq!(bounding_box(&[]), None);
    }
}
