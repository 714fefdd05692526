//! # roomgraph
//!
//! Floor-plan vector geometry: SVG path data in, an editable graph of
//! points, wall segments and intersections out, plus the split, merge
//! and snapping operations an interactive editor needs.
//!
//! ## Rust Lesson #7: Modules
//!
//! Rust modules are like ES6 modules but more explicit:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! Unlike Node.js, you must explicitly declare every module.

pub mod edit;
pub mod geometry;
pub mod intersect;
pub mod merge;
pub mod object;
pub mod path;
pub mod snap;
pub mod split;

// Re-export common types at crate root for convenience.
pub use edit::{SegmentEnd, forms_closed_polygon, lines_to_points, shifted_endpoints,
    straighten_segment, translate_shared_endpoint};
pub use geometry::{Line, Point, are_collinear, bounding_box, centroid};
pub use intersect::{IntersectionPoint, IntersectionSet, PROXIMITY_THRESHOLD, find_intersections};
pub use merge::{MERGE_TOLERANCE, merge_polygons};
pub use object::{
    Closure, EditError, GeometryObject, LineMap, LineSegment, can_be_closed, derive_lines,
};
pub use path::{PathData, parse_path, parse_polyline_points, path_data, polyline_points};
pub use snap::{
    DEFAULT_GRID_SIZE, GridLines, GridSnapConfig, SnapHit, find_closest_point,
    grid_lines_for_bounds, grid_lines_for_points, snap_to_grid,
};
pub use split::{SplitResult, split_polygon};
