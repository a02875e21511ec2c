//! Pack command implementation.

use std::fs;
use std::io::{self, Read};
use std::time::Instant;

use serde::Serialize;

use circle_pack::{Circle, Placement, Strategy};

use super::common::{
    parse_diameters, pixels_per_unit, pixels_to_mm, placement_to_svg, radii_from_diameters,
    write_png, OutputFormat,
};
use super::config::{PackConfig, Units};

/// A circle in JSON output format.
#[derive(Serialize)]
struct JsonCircle {
    x: f64,
    y: f64,
    r: f64,
}

impl From<&Circle> for JsonCircle {
    fn from(circle: &Circle) -> Self {
        Self { x: circle.center_x, y: circle.center_y, r: circle.radius }
    }
}

/// A radius the strategy could not place.
#[derive(Serialize)]
struct JsonUnplaced {
    index: usize,
    radius: f64,
}

#[derive(Serialize)]
struct JsonStats {
    elapsed_ms: f64,
    enclosing_ms: f64,
    enclosing_computations: usize,
    optimality: f64,
}

/// Full JSON output of a pack run.
#[derive(Serialize)]
struct JsonOutput {
    strategy: &'static str,
    units: &'static str,
    circles: Vec<JsonCircle>,
    enclosing: JsonCircle,
    support: Vec<usize>,
    unplaced: Vec<JsonUnplaced>,
    stats: JsonStats,
}

/// Execute the pack command.
pub fn cmd_pack(args: &[String]) {
    let mut input_path: Option<&str> = None;
    let mut output_path: Option<&str> = None;
    let mut png_path: Option<&str> = None;
    let mut config_path: Option<&str> = None;
    let mut strategy_name: Option<&str> = None;
    let mut units: Option<Units> = None;
    let mut dpi: Option<f64> = None;
    let mut format = OutputFormat::Svg;
    let mut quiet = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-s" | "--strategy" => {
                i += 1;
                if i < args.len() {
                    strategy_name = Some(args[i].as_str());
                }
            }
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(args[i].as_str());
                }
            }
            "--png" => {
                i += 1;
                if i < args.len() {
                    png_path = Some(args[i].as_str());
                }
            }
            "-c" | "--config" => {
                i += 1;
                if i < args.len() {
                    config_path = Some(args[i].as_str());
                }
            }
            "-u" | "--units" => {
                i += 1;
                if i < args.len() {
                    units = Some(Units::from_name(&args[i]).unwrap_or_else(|| {
                        eprintln!("Unknown units: {} (expected mm or px)", args[i]);
                        std::process::exit(1);
                    }));
                }
            }
            "--dpi" => {
                i += 1;
                if i < args.len() {
                    dpi = args[i].parse().ok().filter(|d: &f64| d.is_finite() && *d > 0.0);
                    if dpi.is_none() {
                        eprintln!("Invalid dpi: {}", args[i]);
                        std::process::exit(1);
                    }
                }
            }
            "--json" => format = OutputFormat::Json,
            "-q" | "--quiet" => quiet = true,
            "-h" | "--help" => {
                print_usage();
                return;
            }
            path if path == "-" || !path.starts_with('-') => {
                if input_path.is_none() {
                    input_path = Some(path);
                }
            }
            other => {
                eprintln!("Warning: ignoring unknown option {}", other);
            }
        }
        i += 1;
    }

    let input_path = input_path.unwrap_or_else(|| {
        eprintln!("Error: diameter file required");
        print_usage();
        std::process::exit(1);
    });

    let mut config = match config_path {
        Some(path) => PackConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }),
        None => PackConfig::default(),
    };
    if let Some(units) = units {
        config.units = units;
    }
    if let Some(dpi) = dpi {
        config.dpi = dpi;
    }

    let strategy = match strategy_name {
        Some(name) => Strategy::from_name(name).unwrap_or_else(|| {
            eprintln!("Unknown strategy: {}", name);
            eprintln!("Run 'circle-pack strategies' to list available strategies.");
            std::process::exit(1);
        }),
        None => config.strategy().unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }),
    };

    let content = read_input(input_path).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let diameters = parse_diameters(&content);
    if diameters.is_empty() {
        eprintln!("Error: no diameters found in {}", input_path);
        std::process::exit(1);
    }
    let radii = radii_from_diameters(&diameters);

    if !quiet {
        eprintln!("Packing {} circles with '{}'...", radii.len(), strategy.name());
    }

    let start = Instant::now();
    let placement = strategy.place(&radii).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    if !quiet {
        print_report(&placement, strategy, &config, elapsed_ms);
    }

    let scale = pixels_per_unit(config.units, config.dpi);
    let rendered = placement_to_svg(&placement, &config.style, scale);

    if let Some(path) = png_path {
        if let Err(e) = write_png(&rendered, path) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        if !quiet {
            eprintln!("PNG written to {} ({}x{})", path, rendered.width_px, rendered.height_px);
        }
    }

    let output = match format {
        OutputFormat::Svg => rendered.svg,
        OutputFormat::Json => {
            let json = to_json(&placement, strategy, config.units, elapsed_ms);
            match serde_json::to_string_pretty(&json) {
                Ok(json) => json,
                Err(e) => {
                    eprintln!("Error serializing JSON: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    match output_path {
        Some(path) => {
            fs::write(path, output).unwrap_or_else(|e| {
                eprintln!("Error: failed to write {}: {}", path, e);
                std::process::exit(1);
            });
            if !quiet {
                eprintln!("Output written to {}", path);
            }
        }
        None => println!("{}", output),
    }
}

/// Read the diameter list from a file, or from stdin for `-`.
fn read_input(path: &str) -> Result<String, String> {
    if path == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        Ok(content)
    } else {
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))
    }
}

fn to_json(placement: &Placement, strategy: Strategy, units: Units, elapsed_ms: f64) -> JsonOutput {
    JsonOutput {
        strategy: strategy.name(),
        units: units.name(),
        circles: placement.circles.iter().map(JsonCircle::from).collect(),
        enclosing: JsonCircle::from(&placement.enclosing.circle),
        support: placement.enclosing.support.clone(),
        unplaced: placement
            .unplaced
            .iter()
            .map(|u| JsonUnplaced { index: u.index, radius: u.radius })
            .collect(),
        stats: JsonStats {
            elapsed_ms,
            enclosing_ms: placement.stats.enclosing_millis(),
            enclosing_computations: placement.stats.enclosing_computations,
            optimality: placement.optimality(),
        },
    }
}

/// Summary on stderr, keeping stdout for the SVG/JSON.
fn print_report(placement: &Placement, strategy: Strategy, config: &PackConfig, elapsed_ms: f64) {
    let diameter = placement.enclosing.circle.diameter();
    let diameter_mm = match config.units {
        Units::Mm => diameter,
        Units::Px => pixels_to_mm(diameter, config.dpi),
    };

    eprintln!("  Strategy: {}", strategy.name());
    eprintln!("  Elapsed: {:.3} ms", elapsed_ms);
    eprintln!("  Diameter: {:.3} mm", diameter_mm);
    eprintln!("  Optimality rate: {:.4}", placement.optimality());
    eprintln!("  n: {}", placement.circles.len());
    if !placement.unplaced.is_empty() {
        let radii: Vec<String> = placement.unplaced.iter().map(|u| format!("{}", u.radius)).collect();
        eprintln!("  Unplaced radii: {}", radii.join(", "));
    }
    eprintln!(
        "  Enclosing circle: {} computations, {:.3} ms",
        placement.stats.enclosing_computations,
        placement.stats.enclosing_millis()
    );
}

fn print_usage() {
    eprintln!("Usage: circle-pack pack <diameters.txt | -> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --strategy <name>   Placement strategy (default: greedy)");
    eprintln!("  -o, --output <file>     Write output to file instead of stdout");
    eprintln!("      --json              Output JSON instead of SVG");
    eprintln!("      --png <file>        Also rasterise the arrangement to PNG");
    eprintln!("  -u, --units <mm|px>     Unit of the input diameters (default: mm)");
    eprintln!("      --dpi <n>           Resolution for unit conversion (default: 96)");
    eprintln!("  -c, --config <file>     YAML config with defaults and render style");
    eprintln!("  -q, --quiet             No report on stderr");
    eprintln!();
    eprintln!("Reads one diameter per line; other lines are ignored.");
}
