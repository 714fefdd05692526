//! roomgraph - CLI for floor-plan geometry editing
//!
//! Usage:
//!   roomgraph parse <d|->               Build an object from path data
//!   roomgraph split <obj> --line ...    Split a closed object
//!   roomgraph merge <a> <b>             Merge two objects
//!   roomgraph snap --point x,y          Snap a point
//!   roomgraph inspect <obj>             Summarize an object

mod cli;

use std::env;

use cli::{cmd_inspect, cmd_merge, cmd_parse, cmd_snap, cmd_split};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() >= 2 {
        match args[1].as_str() {
            "parse" => {
                cmd_parse(&args[2..]);
                return;
            }
            "split" => {
                cmd_split(&args[2..]);
                return;
            }
            "merge" => {
                cmd_merge(&args[2..]);
                return;
            }
            "snap" => {
                cmd_snap(&args[2..]);
                return;
            }
            "inspect" => {
                cmd_inspect(&args[2..]);
                return;
            }
            "help" | "--help" | "-h" => {
                print_usage(&args[0]);
                return;
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!();
            }
        }
    }

    print_usage(&args[0]);
    std::process::exit(1);
}

fn print_usage(prog: &str) {
    println!("roomgraph - floor-plan geometry editing");
    println!();
    println!("Usage:");
    println!("  {} parse <d|-> [--id <id>] [--polyline] [--gap <n>]", prog);
    println!("      Build a geometry object from a path d string (or a");
    println!("      polyline points attribute with --polyline)");
    println!();
    println!("  {} split <object.json|-> --line x1,y1,x2,y2", prog);
    println!("      Split a closed object along the infinite line; prints");
    println!("      a two-element JSON array");
    println!();
    println!("  {} merge <a.json> <b.json|-> [-t <tolerance>] [--id <id>]", prog);
    println!("      Merge two closed objects along their shared wall");
    println!();
    println!("  {} snap --point x,y [--grid-size <n>] [--threshold <n>]", prog);
    println!("  {} snap --point x,y --candidates <object.json|->", prog);
    println!("      Snap a point to the grid, or to an object's vertices");
    println!();
    println!("  {} inspect <object.json|->", prog);
    println!("      Point/line/intersection/closure summary");
    println!();
    println!("All commands accept --pretty for indented JSON. Data goes to");
    println!("stdout, diagnostics to stderr; `-` reads from stdin.");
}
