//! circle-pack - CLI for packing circles into a small enclosing circle
//!
//! Usage:
//!   circle-pack pack <diameters.txt>   Pack and write SVG/JSON
//!   circle-pack benchmark              Compare strategies on random input
//!   circle-pack strategies             List available strategies

use std::env;

use circle_pack::Strategy;

mod cli;

use cli::{cmd_benchmark, cmd_pack};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() >= 2 {
        match args[1].as_str() {
            "pack" => {
                cmd_pack(&args[2..]);
                return;
            }
            "benchmark" => {
                cmd_benchmark(&args[2..]);
                return;
            }
            "strategies" => {
                cmd_strategies();
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

    print_usage(args.first().map(String::as_str).unwrap_or("circle-pack"));
    std::process::exit(1);
}

fn print_usage(prog: &str) {
    eprintln!("circle-pack - pack circles into the smallest enclosing circle");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} pack <diameters.txt | -> [options]", prog);
    eprintln!("  {} benchmark [-n <count>] [--seed <n>]", prog);
    eprintln!("  {} strategies", prog);
    eprintln!();
    eprintln!("Pack options:");
    eprintln!("  -s, --strategy <name>   Placement strategy (default: greedy)");
    eprintln!("  -o, --output <file>     Output file (default: stdout)");
    eprintln!("      --json              Output JSON instead of SVG");
    eprintln!("      --png <file>        Also write a PNG rendering");
    eprintln!("  -c, --config <file>     YAML config");
    eprintln!();
    eprintln!("Stdin support:");
    eprintln!("  cat diameters.txt | {} pack -", prog);
}

fn cmd_strategies() {
    println!("Available strategies:");
    for strategy in Strategy::all() {
        println!("  {:<10} {}", strategy.name(), strategy.description());
    }
}
