//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `parse` - Build a geometry object from path or polyline data
//! - `split` - Split a closed object along a line
//! - `merge` - Merge two objects along a shared wall
//! - `snap` - Snap a point to the grid or to an object's vertices
//! - `inspect` - Summarize an object's geometry

pub mod common;
pub mod parse;
pub mod split;
pub mod merge;
pub mod snap;
pub mod inspect;

pub use parse::cmd_parse;
pub use split::cmd_split;
pub use merge::cmd_merge;
pub use snap::cmd_snap;
pub use inspect::cmd_inspect;
