//! Advisor entry point: CLI wiring around the analysis pipeline.

use std::path::Path;
use std::process;

use hp_advisor::config::Scenario;
use hp_advisor::io::export::export_csv;
use hp_advisor::pipeline::{AnalysisOutcome, run_analysis};

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    csv_out: Option<String>,
}

fn print_help() {
    eprintln!("hp-advisor - heat-pump sizing and grid-impact advisor");
    eprintln!();
    eprintln!("Usage: hp-advisor [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>   Load scenario from a TOML file");
    eprintln!("  --preset <name>     Use a built-in preset (apartment_block)");
    eprintln!("  --seed <u64>        Override the synthetic weather seed");
    eprintln!("  --csv-out <path>    Export the combined load series to CSV");
    eprintln!("  --help              Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the apartment_block preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        csv_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--csv-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --csv-out requires a path argument");
                    process::exit(1);
                }
                cli.csv_out = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    // Load scenario: --scenario takes priority, then --preset, then baseline
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match Scenario::from_toml_file(Path::new(path)) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match Scenario::from_preset(name) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        Scenario::apartment_block()
    };

    // Apply seed override
    if let Some(seed) = cli.seed_override {
        scenario.analysis.seed = seed;
    }

    // Validate and run
    let outcome = match run_analysis(&scenario) {
        Ok(outcome) => outcome,
        Err(errors) => {
            for e in &errors {
                eprintln!("{e}");
            }
            process::exit(1);
        }
    };

    match outcome {
        AnalysisOutcome::Complete(report) => {
            println!("{report}");

            if let Some(ref path) = cli.csv_out {
                if let Err(e) = export_csv(&report.combined_load, Path::new(path)) {
                    eprintln!("error: failed to write CSV: {e}");
                    process::exit(1);
                }
                eprintln!("Combined load series written to {path}");
            }
        }
        AnalysisOutcome::NoSuitableModel {
            heat_demand,
            selection,
        } => {
            println!("{heat_demand}");
            println!();
            println!(
                "No catalog model reaches the required {:.1} kW within a sane cascade size.",
                selection.required_capacity_kw
            );
            if cli.csv_out.is_some() {
                eprintln!("note: no load series to export without a selected model");
            }
        }
    }
}
