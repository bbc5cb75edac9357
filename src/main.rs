//! Damage Cost Checker - Vehicle repair cost estimation from detection output
//!
//! A CLI tool that turns damage-detection model output into a priced repair
//! estimate using brand-specific price tables.

use clap::Parser;
use damage_cost_checker::cli::Cli;
use damage_cost_checker::commands;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
