//! Benchmark command implementation.

use std::time::Instant;

use rand::prelude::*;
use rand::rngs::StdRng;

use circle_pack::Strategy;

use super::common::radii_from_diameters;

/// Execute the benchmark command.
pub fn cmd_benchmark(args: &[String]) {
    let mut count: usize = 30;
    let mut seed: Option<u64> = None;
    let mut min_diameter: f64 = 5.0;
    let mut max_diameter: f64 = 50.0;
    let mut strategy_name: Option<&str> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--count" => {
                i += 1;
                if i < args.len() {
                    count = args[i].parse().unwrap_or(count);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().ok();
                }
            }
            "--min" => {
                i += 1;
                if i < args.len() {
                    min_diameter = args[i].parse().unwrap_or(min_diameter);
                }
            }
            "--max" => {
                i += 1;
                if i < args.len() {
                    max_diameter = args[i].parse().unwrap_or(max_diameter);
                }
            }
            "-s" | "--strategy" => {
                i += 1;
                if i < args.len() {
                    strategy_name = Some(args[i].as_str());
                }
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            _ => {}
        }
        i += 1;
    }

    if count == 0 {
        eprintln!("Error: --count must be at least 1");
        std::process::exit(1);
    }
    if !(min_diameter > 0.0 && max_diameter > min_diameter && max_diameter.is_finite()) {
        eprintln!("Error: need 0 < --min < --max < inf, got {} and {}", min_diameter, max_diameter);
        std::process::exit(1);
    }

    let strategies: Vec<Strategy> = match strategy_name {
        Some(name) => match Strategy::from_name(name) {
            Some(strategy) => vec![strategy],
            None => {
                eprintln!("Unknown strategy: {}", name);
                std::process::exit(1);
            }
        },
        None => Strategy::all().to_vec(),
    };

    let mut rng: Box<dyn RngCore> = match seed {
        Some(s) => Box::new(StdRng::seed_from_u64(s)),
        None => Box::new(StdRng::from_os_rng()),
    };
    let diameters: Vec<f64> = (0..count)
        .map(|_| rng.random_range(min_diameter..max_diameter))
        .collect();
    let radii = radii_from_diameters(&diameters);

    println!(
        "Generated {} diameters in [{}, {}){}",
        count,
        min_diameter,
        max_diameter,
        seed.map(|s| format!(" (seed {})", s)).unwrap_or_default()
    );

    for strategy in strategies {
        println!("\nRunning '{}' strategy...", strategy.name());
        let start = Instant::now();
        let placement = match strategy.place(&radii) {
            Ok(placement) => placement,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };
        let elapsed = start.elapsed();

        println!();
        println!("═══════════════════════════════════════════════");
        println!("  BENCHMARK: {}", strategy.name().to_uppercase());
        println!("═══════════════════════════════════════════════");
        println!("  Circles: {}", radii.len());
        println!("  Placed: {}", placement.circles.len());
        println!("  Unplaced: {}", placement.unplaced.len());
        println!("  Enclosing diameter: {:.3}", placement.enclosing.circle.diameter());
        println!("  Optimality rate: {:.4}", placement.optimality());
        println!("  Time: {:?}", elapsed);
        println!("  Time (ms): {:.2}", elapsed.as_secs_f64() * 1000.0);
        println!(
            "  Enclosing searches: {} ({:.2}ms)",
            placement.stats.enclosing_computations,
            placement.stats.enclosing_millis()
        );
        println!("═══════════════════════════════════════════════");
    }
}

fn print_usage() {
    eprintln!("Usage: circle-pack benchmark [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -n, --count <n>         Number of random circles (default: 30)");
    eprintln!("      --seed <n>          Random seed for reproducibility");
    eprintln!("      --min <d>           Smallest diameter (default: 5)");
    eprintln!("      --max <d>           Largest diameter (default: 50)");
    eprintln!("  -s, --strategy <name>   Only run one strategy (default: all)");
    eprintln!();
    eprintln!("Packs random diameters with each strategy and compares the results.");
}
