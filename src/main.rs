//! Planline - fiscal-year budget plan editor with a TUI.

mod config;
mod tui;

use std::env;
use std::path::PathBuf;

fn print_usage() {
    eprintln!("Usage: planline [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                 Excel workbook to import on startup (.xlsx)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <FILE>    Export the plan to FILE and exit (non-interactive)");
    eprintln!("  --budget <AMOUNT>      Budget figure (overrides config)");
    eprintln!("  --year <YEAR>          Fiscal-year label, Buddhist Era (overrides config)");
    eprintln!("  --config <FILE>        Load configuration from FILE");
    eprintln!("  --no-config            Skip configuration loading entirely");
    eprintln!("  -h, --help             Print help");
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut file_path: Option<PathBuf> = None;
    let mut output_file: Option<PathBuf> = None;
    let mut budget_arg: Option<f64> = None;
    let mut year_arg: Option<i32> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut no_config = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires a file path");
                    std::process::exit(1);
                }
                output_file = Some(PathBuf::from(&args[i]));
            }
            "--budget" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --budget requires a value");
                    std::process::exit(1);
                }
                match args[i].parse::<f64>() {
                    Ok(value) => budget_arg = Some(value),
                    Err(_) => {
                        eprintln!("Error: invalid budget: {}", args[i]);
                        std::process::exit(1);
                    }
                }
            }
            "--year" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --year requires a value");
                    std::process::exit(1);
                }
                match args[i].parse::<i32>() {
                    Ok(value) => year_arg = Some(value),
                    Err(_) => {
                        eprintln!("Error: invalid year: {}", args[i]);
                        std::process::exit(1);
                    }
                }
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                }
                config_path = Some(PathBuf::from(&args[i]));
            }
            "--no-config" => {
                no_config = true;
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
            _ => {
                if file_path.is_none() {
                    file_path = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }

    let (config, warnings) = if no_config {
        (config::Config::default(), Vec::new())
    } else {
        config::load_config(config_path.as_deref())
    };
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    let budget = budget_arg.or(config.budget);
    let fiscal_year = year_arg.or(config.fiscal_year);

    let mut app = match tui::App::with_file(file_path, budget, fiscal_year, config.export_dir) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(output_path) = output_file {
        match app.document.export_xlsx_to(&output_path) {
            Ok(path) => println!("Exported to {}", path.display()),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else if let Err(e) = tui::run(&mut app) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
