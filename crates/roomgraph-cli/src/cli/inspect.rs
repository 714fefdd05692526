//! `inspect` - summarize an object's geometry.

use super::common::{load_object, print_json};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    id: String,
    closed: bool,
    point_count: usize,
    line_count: usize,
    intersection_count: usize,
    can_be_closed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    bounds: Option<(f64, f64, f64, f64)>,
    path_data: String,
}

pub fn cmd_inspect(args: &[String]) {
    let mut source: Option<&str> = None;
    let mut pretty = false;

    for arg in args {
        match arg.as_str() {
            "--pretty" => pretty = true,
            other => {
                if source.is_none() {
                    source = Some(other);
                } else {
                    eprintln!("Unexpected argument: {}", other);
                    std::process::exit(1);
                }
            }
        }
    }

    let Some(source) = source else {
        eprintln!("Usage: roomgraph inspect <object.json|-> [--pretty]");
        std::process::exit(1);
    };

    let object = load_object(source);
    let summary = Summary {
        id: object.id.clone(),
        closed: object.closure.is_closed(),
        point_count: object.points.len(),
        line_count: object.lines.len(),
        intersection_count: object.intersection_points.len(),
        can_be_closed: object.can_be_closed(),
        bounds: roomgraph::bounding_box(&object.points),
        path_data: object.to_path_data(),
    };
    print_json(&summary, pretty);
}
