//! The editable shape model: line segments, the id-keyed line map,
//! and the `GeometryObject` that ties points, lines and intersections
//! together.
//!
//! ## Rust Lesson #4: Ownership & Vec
//!
//! `Vec<Point>` is like a JS array `Point[]` - a growable list.
//! Unlike JS, Rust tracks *who owns* the data.
//!
//! - `GeometryObject` OWNS its points - when it's dropped, they're freed
//! - No garbage collector - memory is freed deterministically
//! - `&[Point]` would be a BORROWED slice (read-only view)
//!
//! The `points` array is the source of truth. `lines`,
//! `intersection_lines` and `intersection_points` are derived caches,
//! refreshed by [`GeometryObject::rebuild`] after every mutation.

use crate::geometry::Point;
use crate::intersect::{IntersectionPoint, find_intersections};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Squared distance under which an open shape's endpoints count as
/// touching, allowing promotion to a closed loop (2 units apart).
pub const CLOSE_DISTANCE_SQ: f64 = 4.0;

/// One wall segment of a shape.
///
/// `points` is `[x1, y1, x2, y2]`. When a visual gap was applied during
/// derivation, `original_points` keeps the ungapped endpoints so edits
/// can recover the true geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSegment {
    pub id: String,
    pub points: [f64; 4],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_points: Option<[f64; 4]>,
}

impl LineSegment {
    pub fn new(id: impl Into<String>, points: [f64; 4]) -> Self {
        Self {
            id: id.into(),
            points,
            original_points: None,
        }
    }

    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.points[0], self.points[1])
    }

    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.points[2], self.points[3])
    }

    #[inline]
    pub fn as_line(&self) -> crate::geometry::Line {
        crate::geometry::Line::new(self.points[0], self.points[1], self.points[2], self.points[3])
    }
}

/// Whether a shape's outline loops back on itself.
///
/// ## Rust Lesson #8: Enums
///
/// A JS boolean flag (`closed: true`) becomes a two-variant enum here.
/// Enums make the states nameable, and `match` forces you to handle
/// both. On the wire it still serializes as the original boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Closure {
    #[default]
    Open,
    Closed,
}

impl Closure {
    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(self, Closure::Closed)
    }
}

impl Serialize for Closure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.is_closed())
    }
}

impl<'de> Deserialize<'de> for Closure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let closed = bool::deserialize(deserializer)?;
        Ok(if closed { Closure::Closed } else { Closure::Open })
    }
}

/// Id-keyed collection of line segments.
///
/// ## Rust Lesson #9: Implementing traits by hand
///
/// Serde's derive would give us `Vec` = JSON array, but the store
/// format is a JSON *object* keyed by line id. And a plain map type
/// would sort keys as strings, putting "line-10" before "line-2".
/// So we keep a Vec (insertion order = walk order) and hand-write
/// the Serialize/Deserialize impls for the map-shaped wire format.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineMap {
    segments: Vec<LineSegment>,
}

impl LineMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<LineSegment>) -> Self {
        Self { segments }
    }

    pub fn push(&mut self, segment: LineSegment) {
        self.segments.push(segment);
    }

    pub fn get(&self, id: &str) -> Option<&LineSegment> {
        self.segments.iter().find(|s| s.id == id)
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineSegment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Numeric suffix of a line id ("room-1-line-12" -> 12), used to
/// restore walk order after deserializing from an unordered JSON map.
fn line_ordinal(id: &str) -> u64 {
    id.rsplit('-')
        .next()
        .and_then(|tail| tail.parse().ok())
        .unwrap_or(u64::MAX)
}

impl Serialize for LineMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.segments.len()))?;
        for segment in &self.segments {
            map.serialize_entry(&segment.id, segment)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LineMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LineMapVisitor;

        impl<'de> Visitor<'de> for LineMapVisitor {
            type Value = LineMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of line id to line segment")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<LineMap, A::Error> {
                let mut segments: Vec<LineSegment> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((_, segment)) = access.next_entry::<String, LineSegment>()? {
                    segments.push(segment);
                }
                segments.sort_by_key(|s| line_ordinal(&s.id));
                Ok(LineMap { segments })
            }
        }

        deserializer.deserialize_map(LineMapVisitor)
    }
}

impl<'a> IntoIterator for &'a LineMap {
    type Item = &'a LineSegment;
    type IntoIter = std::slice::Iter<'a, LineSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Derive wall segments from consecutive point pairs.
///
/// Ids are `{owner_id}-line-{n}`, numbered from 0 in walk order. For a
/// closed shape one extra segment connects the last point back to the
/// first, unless the two already coincide.
///
/// A positive `gap_size` pulls each segment's endpoints inward along
/// its direction (a visual gap at every vertex). Segments shorter than
/// twice the gap collapse to their midpoint instead of inverting. The
/// ungapped endpoints are kept in `original_points`; with `gap_size`
/// of zero the field stays `None`.
pub fn derive_lines(points: &[Point], owner_id: &str, closure: Closure, gap_size: f64) -> LineMap {
    let mut map = LineMap::new();
    if points.len() < 2 {
        return map;
    }

    let mut counter = 0usize;
    let mut push_segment = |a: Point, b: Point, map: &mut LineMap| {
        let id = format!("{owner_id}-line-{counter}");
        counter += 1;

        if gap_size > 0.0 {
            let length = a.distance(b);
            let (ga, gb) = if length < gap_size * 2.0 {
                // Too short to gap both ends; collapse to the middle
                let mid = a.midpoint(b);
                (mid, mid)
            } else {
                let ux = (b.x - a.x) / length;
                let uy = (b.y - a.y) / length;
                (
                    Point::new(a.x + ux * gap_size, a.y + uy * gap_size),
                    Point::new(b.x - ux * gap_size, b.y - uy * gap_size),
                )
            };
            let mut segment = LineSegment::new(id, [ga.x, ga.y, gb.x, gb.y]);
            segment.original_points = Some([a.x, a.y, b.x, b.y]);
            map.push(segment);
        } else {
            map.push(LineSegment::new(id, [a.x, a.y, b.x, b.y]));
        }
    };

    for pair in points.windows(2) {
        push_segment(pair[0], pair[1], &mut map);
    }

    if closure.is_closed() {
        let first = points[0];
        let last = points[points.len() - 1];
        if !last.approx_eq(first) {
            push_segment(last, first, &mut map);
        }
    }

    map
}

/// Can this point run be promoted to a closed loop? Needs at least
/// three points with the ends within the closing distance.
pub fn can_be_closed(points: &[Point]) -> bool {
    points.len() >= 3
        && points[0].distance_sq(points[points.len() - 1]) <= CLOSE_DISTANCE_SQ
}

/// Errors from object-level edit operations.
///
/// Geometric infeasibility (a split line that misses, shapes with no
/// shared wall) is deliberately NOT an error; those return `None`.
/// This enum is for arguments that can never be valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Point index past the end of the point list.
    PointOutOfRange { index: usize, len: usize },
    /// Operation requires a closed shape.
    NotClosed,
    /// Referenced line id does not exist on the object.
    UnknownLine(String),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EditError::PointOutOfRange { index, len } => {
                write!(f, "point index {index} out of range (shape has {len} points)")
            }
            EditError::NotClosed => write!(f, "operation requires a closed shape"),
            EditError::UnknownLine(id) => write!(f, "no line with id '{id}'"),
        }
    }
}

impl std::error::Error for EditError {}

/// An editable shape: the point list plus derived caches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryObject {
    pub id: String,
    pub points: Vec<Point>,
    #[serde(default)]
    pub lines: LineMap,
    /// line id -> intersection point ids sitting on that line
    #[serde(default)]
    pub intersection_lines: BTreeMap<String, Vec<String>>,
    /// intersection point id ("p-1", "p-2", ...) -> point record
    #[serde(default)]
    pub intersection_points: BTreeMap<String, IntersectionPoint>,
    #[serde(rename = "closed", default)]
    pub closure: Closure,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Free-form passthrough attributes (source element metadata).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
}

impl GeometryObject {
    /// Build an object from a point list and derive its caches.
    pub fn new(id: impl Into<String>, points: Vec<Point>, closure: Closure) -> Self {
        let mut object = Self {
            id: id.into(),
            points,
            lines: LineMap::new(),
            intersection_lines: BTreeMap::new(),
            intersection_points: BTreeMap::new(),
            closure,
            fill: None,
            stroke: None,
            stroke_width: None,
            attrs: BTreeMap::new(),
        };
        object.rebuild();
        object
    }

    /// Re-derive `lines` and both intersection caches from `points`.
    /// Call after any mutation of the point list.
    pub fn rebuild(&mut self) {
        self.rebuild_with_gap(0.0);
    }

    /// Like [`rebuild`](Self::rebuild) with a visual gap applied to the
    /// derived segments.
    pub fn rebuild_with_gap(&mut self, gap_size: f64) {
        self.lines = derive_lines(&self.points, &self.id, self.closure, gap_size);
        let found = find_intersections(self.lines.segments());
        self.intersection_points = found.points;
        self.intersection_lines = found.lines;
    }

    /// Whether the endpoints are close enough to promote to a loop.
    pub fn can_be_closed(&self) -> bool {
        can_be_closed(&self.points)
    }

    /// Copy presentation metadata (fill/stroke/attrs) from another
    /// object. Used when split/merge spawn children from a parent.
    pub(crate) fn inherit_style(&mut self, parent: &GeometryObject) {
        self.fill = parent.fill.clone();
        self.stroke = parent.stroke.clone();
        self.stroke_width = parent.stroke_width;
        self.attrs = parent.attrs.clone();
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

    #[test]
    fn derive_lines_open_chain() {
        let lines = derive_lines(&square(), "room-1", Closure::Open, 0.0);
        assert_eq!(lines.len(), 3, "4 points open = 3 segments");
        assert_eq!(lines.segments()[0].id, "room-1-line-0");
        assert_eq!(lines.segments()[0].points, [0.0, 0.0, 10.0, 0.0]);
        assert_eq!(lines.segments()[2].points, [10.0, 10.0, 0.0, 10.0]);
    }

    #[test]
    fn derive_lines_closed_adds_closing_segment() {
        let lines = derive_lines(&square(), "room-1", Closure::Closed, 0.0);
        assert_eq!(lines.len(), 4, "closed square = 4 segments");
        let closing = &lines.segments()[3];
        assert_eq!(closing.id, "room-1-line-3");
        assert_eq!(closing.points, [0.0, 10.0, 0.0, 0.0]);
    }

    #[test]
    fn derive_lines_skips_closing_when_ends_coincide() {
        let mut points = square();
        points.push(Point::new(0.0, 0.0)); // explicit return to start
        let lines = derive_lines(&points, "room-1", Closure::Closed, 0.0);
        assert_eq!(lines.len(), 4, "no degenerate fifth segment");
    }

    #[test]
    fn derive_lines_with_gap_keeps_originals() {
        let points = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let lines = derive_lines(&points, "w", Closure::Open, 2.0);
        let seg = &lines.segments()[0];
        assert_eq!(seg.points, [2.0, 0.0, 8.0, 0.0]);
        assert_eq!(seg.original_points, Some([0.0, 0.0, 10.0, 0.0]));
    }

    #[test]
    fn derive_lines_gap_collapses_short_segment() {
        // 3 units long, gap 2 on each side would invert it
        let points = vec![Point::new(0.0, 0.0), Point::new(3.0, 0.0)];
        let lines = derive_lines(&points, "w", Closure::Open, 2.0);
        let seg = &lines.segments()[0];
        assert_eq!(seg.points, [1.5, 0.0, 1.5, 0.0]);
    }

    #[test]
    fn derive_lines_zero_gap_has_no_originals() {
        let lines = derive_lines(&square(), "room-1", Closure::Closed, 0.0);
        assert!(lines.iter().all(|s| s.original_points.is_none()));
    }

    #[test]
    fn can_be_closed_thresholds() {
        // Endpoints exactly 2 apart: on the boundary, still closable
        let near = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 2.0),
        ];
        assert!(can_be_closed(&near));

        let far = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 2.1),
        ];
        assert!(!can_be_closed(&far));

        // Two points can never close no matter how near
        let two = vec![Point::new(0.0, 0.0), Point::new(0.5, 0.0)];
        assert!(!can_be_closed(&two));
    }

    #[test]
    fn object_rebuild_populates_caches() {
        let object = GeometryObject::new("room-1", square(), Closure::Closed);
        assert_eq!(object.lines.len(), 4);
        // Every segment shares endpoints with its neighbors, so the
        // proximity pass records a point per vertex
        assert_eq!(object.intersection_points.len(), 4);
        assert_eq!(object.intersection_lines.len(), 4);
    }

    #[test]
    fn line_map_json_is_keyed_by_id() {
        let lines = derive_lines(&square(), "room-1", Closure::Closed, 0.0);
        let json = serde_json::to_value(&lines).unwrap();
        assert!(json.get("room-1-line-0").is_some());
        assert_eq!(json["room-1-line-3"]["points"][3], 0.0);
    }

    #[test]
    fn line_map_round_trip_restores_walk_order() {
        // 11 segments so that string-sorted keys would misplace line-10
        let points: Vec<Point> = (0..12).map(|i| Point::new(i as f64, 0.0)).collect();
        let lines = derive_lines(&points, "hall", Closure::Open, 0.0);
        let json = serde_json::to_string(&lines).unwrap();
        let back: LineMap = serde_json::from_str(&json).unwrap();
        let ids: Vec<&str> = back.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids[2], "hall-line-2");
        assert_eq!(ids[10], "hall-line-10");
        assert_eq!(back, lines);
    }

    #[test]
    fn object_json_round_trip() {
        let mut object = GeometryObject::new("room-1", square(), Closure::Closed);
        object.fill = Some("#ff0000".into());
        let json = serde_json::to_string(&object).unwrap();
        assert!(json.contains("\"closed\":true"));
        assert!(json.contains("\"intersectionPoints\""));
        let back: GeometryObject = serde_json::from_str(&json).unwrap();
        assert_eq!(back, object);
    }

    #[test]
    fn closure_serializes_as_bool() {
        assert_eq!(serde_json::to_string(&Closure::Closed).unwrap(), "true");
        assert_eq!(serde_json::to_string(&Closure::Open).unwrap(), "false");
        let c: Closure = serde_json::from_str("true").unwrap();
        assert_eq!(c, Closure::Closed);
    }
}
