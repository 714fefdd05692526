//! `snap` - snap a point to the grid or to an object's vertices.

use super::common::{load_object, parse_point_flag, print_json};
use roomgraph::{GridSnapConfig, Point, find_closest_point, grid_lines_for_points, snap_to_grid};

pub fn cmd_snap(args: &[String]) {
    let mut point: Option<Point> = None;
    let mut candidates: Option<&str> = None;
    let mut grid_size: Option<f64> = None;
    let mut threshold: Option<f64> = None;
    let mut pretty = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--point" | "-p" => {
                i += 1;
                if i < args.len() {
                    point = parse_point_flag(&args[i]);
                    if point.is_none() {
                        eprintln!("Invalid --point value: expected x,y");
                        std::process::exit(1);
                    }
                }
            }
            "--candidates" | "-c" => {
                i += 1;
                if i < args.len() {
                    candidates = Some(&args[i]);
                }
            }
            "--grid-size" => {
                i += 1;
                if i < args.len() {
                    grid_size = args[i].parse().ok();
                }
            }
            "--threshold" => {
                i += 1;
                if i < args.len() {
                    threshold = args[i].parse().ok();
                }
            }
            "--pretty" => {
                pretty = true;
            }
            other => {
                eprintln!("Unexpected argument: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(point) = point else {
        eprintln!("Usage: roomgraph snap --point x,y [--candidates <object.json|->] [--grid-size <n>] [--threshold <n>]");
        std::process::exit(1);
    };

    // Vertex snapping when a candidate object is given, grid otherwise
    if let Some(source) = candidates {
        let object = load_object(source);
        match find_closest_point(&object.points, point) {
            Some(hit) => print_json(&hit, pretty),
            None => {
                eprintln!("{} has no points to snap to", object.id);
                std::process::exit(1);
            }
        }
        return;
    }

    let mut config = grid_size
        .map(GridSnapConfig::with_grid_size)
        .unwrap_or_default();
    if let Some(threshold) = threshold {
        config = config.with_threshold(threshold);
    }

    // Grid lines spanning one cell around the point are enough; the
    // fallback rounding covers everything else
    let grid = grid_lines_for_points(&[point], config.grid_size);
    let hit = snap_to_grid(point, &grid, &config);
    print_json(&hit, pretty);
}
