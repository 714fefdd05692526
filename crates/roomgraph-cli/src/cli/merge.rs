//! `merge` - merge two objects along a shared wall.

use super::common::{load_object, print_json};
use roomgraph::MERGE_TOLERANCE;

pub fn cmd_merge(args: &[String]) {
    let mut sources: Vec<&str> = Vec::new();
    let mut tolerance = MERGE_TOLERANCE;
    let mut id: Option<&str> = None;
    let mut pretty = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-t" | "--tolerance" => {
                i += 1;
                if i < args.len() {
                    tolerance = args[i].parse().unwrap_or(MERGE_TOLERANCE);
                }
            }
            "--id" => {
                i += 1;
                if i < args.len() {
                    id = Some(&args[i]);
                }
            }
            "--pretty" => {
                pretty = true;
            }
            other => {
                sources.push(other);
            }
        }
        i += 1;
    }

    if sources.len() != 2 {
        eprintln!("Usage: roomgraph merge <a.json> <b.json|-> [-t <tolerance>] [--id <id>] [--pretty]");
        std::process::exit(1);
    }

    let a = load_object(sources[0]);
    let b = load_object(sources[1]);
    let merged_id = id
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}-{}", a.id, b.id));

    match a.merge(&b, tolerance, &merged_id) {
        Ok(Some(merged)) => {
            eprintln!(
                "Merged {} and {} into {} ({} points)",
                a.id,
                b.id,
                merged.id,
                merged.points.len()
            );
            print_json(&merged, pretty);
        }
        Ok(None) => {
            eprintln!(
                "{} and {} share no wall within tolerance {}",
                a.id, b.id, tolerance
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Cannot merge: {}", e);
            std::process::exit(1);
        }
    }
}
