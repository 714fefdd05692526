//! `parse` - build a geometry object from path or polyline data.

use super::common::{print_json, read_input};
use roomgraph::GeometryObject;

pub fn cmd_parse(args: &[String]) {
    let mut source: Option<&str> = None;
    let mut id = "shape-1";
    let mut polyline = false;
    let mut gap = 0.0;
    let mut pretty = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--id" => {
                i += 1;
                if i < args.len() {
                    id = &args[i];
                }
            }
            "--polyline" => {
                polyline = true;
            }
            "--gap" => {
                i += 1;
                if i < args.len() {
                    gap = args[i].parse().unwrap_or(0.0);
                }
            }
            "--pretty" => {
                pretty = true;
            }
            other => {
                if source.is_none() {
                    source = Some(other);
                } else {
                    eprintln!("Unexpected argument: {}", other);
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }

    let Some(source) = source else {
        eprintln!("Usage: roomgraph parse <d|-> [--id <id>] [--polyline] [--gap <n>] [--pretty]");
        std::process::exit(1);
    };

    // The positional argument is the data itself; `-` reads it from stdin
    let data = if source == "-" {
        read_input("-").trim().to_string()
    } else {
        source.to_string()
    };

    let mut object = if polyline {
        GeometryObject::from_polyline_points(id, &data)
    } else {
        GeometryObject::from_path_data(id, &data)
    };
    if gap > 0.0 {
        object.rebuild_with_gap(gap);
    }

    eprintln!(
        "Parsed {} points, {} lines ({})",
        object.points.len(),
        object.lines.len(),
        if object.closure.is_closed() { "closed" } else { "open" }
    );
    print_json(&object, pretty);
}
