//! Snapping support for drag interactions: nearest existing vertex,
//! and grid snapping against generated grid lines.
//!
//! Grid snapping carries one deliberate quirk from the rendering
//! contract: every returned y coordinate is shifted by
//! [`GRID_Y_OFFSET`], because the drawn grid itself is offset from
//! geometry space by that much. The `distance` on a [`SnapHit`] is
//! measured before the offset is applied.

use crate::geometry::{Point, bounding_box};

/// Vertical offset between geometry space and the drawn grid.
pub const GRID_Y_OFFSET: f64 = 5.0;

/// Default grid cell size in drawing units.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// A snap result: where to land, how far the target moved, and (for
/// vertex snapping) which candidate index won.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SnapHit {
    /// Index into the candidate list, `None` for grid snaps.
    pub index: Option<usize>,
    pub coordinate: Point,
    pub distance: f64,
}

/// Find the candidate vertex closest to `target`. `None` only for an
/// empty candidate list.
pub fn find_closest_point(candidates: &[Point], target: Point) -> Option<SnapHit> {
    let mut best: Option<SnapHit> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let distance = candidate.distance(target);
        if best.as_ref().is_none_or(|b| distance < b.distance) {
            best = Some(SnapHit {
                index: Some(index),
                coordinate: *candidate,
                distance,
            });
        }
    }
    best
}

/// The grid as explicit line coordinates: y values of horizontal
/// lines and x values of vertical lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLines {
    pub horizontal: Vec<f64>,
    pub vertical: Vec<f64>,
}

/// Generate grid lines covering the given bounds, padded by two cells
/// on every side and aligned to grid multiples.
pub fn grid_lines_for_bounds(
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    grid_size: f64,
) -> GridLines {
    let padding = grid_size * 2.0;
    let start_x = ((min_x - padding) / grid_size).floor() * grid_size;
    let end_x = ((max_x + padding) / grid_size).ceil() * grid_size;
    let start_y = ((min_y - padding) / grid_size).floor() * grid_size;
    let end_y = ((max_y + padding) / grid_size).ceil() * grid_size;

    let mut lines = GridLines::default();
    let mut x = start_x;
    while x <= end_x {
        lines.vertical.push(x);
        x += grid_size;
    }
    let mut y = start_y;
    while y <= end_y {
        lines.horizontal.push(y);
        y += grid_size;
    }
    lines
}

/// Grid lines covering a point set's bounding box. Empty input gets
/// an empty grid.
pub fn grid_lines_for_points(points: &[Point], grid_size: f64) -> GridLines {
    match bounding_box(points) {
        Some((min_x, min_y, max_x, max_y)) => {
            grid_lines_for_bounds(min_x, min_y, max_x, max_y, grid_size)
        }
        None => GridLines::default(),
    }
}

/// Grid snapping parameters. The threshold is how far a point may be
/// from a grid line and still get pulled onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSnapConfig {
    pub grid_size: f64,
    pub threshold: f64,
}

impl Default for GridSnapConfig {
    fn default() -> Self {
        Self::with_grid_size(DEFAULT_GRID_SIZE)
    }
}

impl GridSnapConfig {
    /// Threshold defaults to half a cell, so every point is within
    /// reach of some line on each axis.
    pub fn with_grid_size(grid_size: f64) -> Self {
        Self {
            grid_size,
            threshold: grid_size / 2.0,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Nearest value in `values` to `target`, with its distance.
fn nearest_line(values: &[f64], target: f64) -> Option<(f64, f64)> {
    let mut best: Option<(f64, f64)> = None;
    for &value in values {
        let distance = (value - target).abs();
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((value, distance));
        }
    }
    best
}

/// Round both axes to grid multiples. The fallback when no explicit
/// grid line is near enough.
fn round_to_grid(point: Point, grid_size: f64) -> SnapHit {
    let x = (point.x / grid_size).round() * grid_size;
    let y = (point.y / grid_size).round() * grid_size;
    let snapped = Point::new(x, y);
    SnapHit {
        index: None,
        coordinate: Point::new(snapped.x, snapped.y + GRID_Y_OFFSET),
        distance: point.distance(snapped),
    }
}

/// Snap `point` to the grid.
///
/// Candidate lines within the threshold win per axis: both axes near
/// a line snap to the line intersection, one axis near snaps that
/// axis only, and with neither near the point rounds to the closest
/// grid multiples. Every branch applies the y offset.
pub fn snap_to_grid(point: Point, grid: &GridLines, config: &GridSnapConfig) -> SnapHit {
    let nearest_h = nearest_line(&grid.horizontal, point.y);
    let nearest_v = nearest_line(&grid.vertical, point.x);

    let h = nearest_h.filter(|(_, d)| *d <= config.threshold);
    let v = nearest_v.filter(|(_, d)| *d <= config.threshold);

    match (v, h) {
        (Some((x, dx)), Some((y, dy))) => SnapHit {
            index: None,
            coordinate: Point::new(x, y + GRID_Y_OFFSET),
            distance: (dx * dx + dy * dy).sqrt(),
        },
        (Some((x, dx)), None) => SnapHit {
            index: None,
            coordinate: Point::new(x, point.y + GRID_Y_OFFSET),
            distance: dx,
        },
        (None, Some((y, dy))) => SnapHit {
            index: None,
            coordinate: Point::new(point.x, y + GRID_Y_OFFSET),
            distance: dy,
        },
        (None, None) => round_to_grid(point, config.grid_size),
    }
}

// ============================================================================
// TESTS
// ============================================================================
