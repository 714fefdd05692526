//! Common utilities shared across CLI commands.

use roomgraph::{GeometryObject, Line, Point};
use std::fs;
use std::io::Read;

/// Read an input argument: a file path, or `-` for stdin.
pub fn read_input(source: &str) -> String {
    if source == "-" {
        let mut buffer = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
            eprintln!("Failed to read stdin: {}", e);
            std::process::exit(1);
        }
        buffer
    } else {
        match fs::read_to_string(source) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Failed to read {}: {}", source, e);
                std::process::exit(1);
            }
        }
    }
}

/// Load a geometry object from a JSON file (or stdin via `-`).
pub fn load_object(source: &str) -> GeometryObject {
    let content = read_input(source);
    match serde_json::from_str(&content) {
        Ok(object) => object,
        Err(e) => {
            eprintln!("Invalid geometry object in {}: {}", source, e);
            std::process::exit(1);
        }
    }
}

/// Parse a comma-separated number list of known length.
fn parse_numbers(value: &str, count: usize) -> Option<Vec<f64>> {
    let numbers: Option<Vec<f64>> = value
        .split(',')
        .map(|part| part.trim().parse().ok())
        .collect();
    numbers.filter(|n| n.len() == count)
}

/// Parse `x1,y1,x2,y2` into a line.
pub fn parse_line_flag(value: &str) -> Option<Line> {
    parse_numbers(value, 4).map(|n| Line::new(n[0], n[1], n[2], n[3]))
}

/// Parse `x,y` into a point.
pub fn parse_point_flag(value: &str) -> Option<Point> {
    parse_numbers(value, 2).map(|n| Point::new(n[0], n[1]))
}

/// Print a value as JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T, pretty: bool) {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match rendered {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(1);
        }
    }
}
