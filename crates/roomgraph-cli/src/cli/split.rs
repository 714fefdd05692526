//! `split` - split a closed object along a line.

use super::common::{load_object, parse_line_flag, print_json};
use roomgraph::Line;

pub fn cmd_split(args: &[String]) {
    let mut source: Option<&str> = None;
    let mut line: Option<Line> = None;
    let mut pretty = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--line" | "-l" => {
                i += 1;
                if i < args.len() {
                    line = parse_line_flag(&args[i]);
                    if line.is_none() {
                        eprintln!("Invalid --line value: expected x1,y1,x2,y2");
                        std::process::exit(1);
                    }
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

    let (Some(source), Some(line)) = (source, line) else {
        eprintln!("Usage: roomgraph split <object.json|-> --line x1,y1,x2,y2 [--pretty]");
        std::process::exit(1);
    };

    let object = load_object(source);
    let first_id = format!("{}-a", object.id);
    let second_id = format!("{}-b", object.id);

    match object.split(line, &first_id, &second_id) {
        Ok(Some((first, second))) => {
            eprintln!(
                "Split {} into {} ({} points) and {} ({} points)",
                object.id,
                first.id,
                first.points.len(),
                second.id,
                second.points.len()
            );
            print_json(&vec![first, second], pretty);
        }
        Ok(None) => {
            eprintln!("Split line does not cross the outline twice");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Cannot split {}: {}", object.id, e);
            std::process::exit(1);
        }
    }
}
