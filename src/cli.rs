//! CLI definition using clap

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Parser)]
#[command(name = "damage-cost-checker")]
#[command(version)]
#[command(about = "Vehicle damage repair cost estimation from AI detection output")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Data directory override (vehicle and price stores)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate repair cost from a detection output file
    Estimate {
        /// Path to prediction JSON file
        predictions: PathBuf,

        /// Brand whose stored price table to use
        #[arg(long, short = 'b')]
        brand: Option<String>,

        /// Use the brand of a registered vehicle
        #[arg(long, short = 'r')]
        registration: Option<String>,

        /// Ad-hoc price table file (JSON map of part name to price)
        #[arg(long)]
        prices: Option<PathBuf>,

        /// Write the estimate to a JSON file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Estimate every prediction file in a folder
    Batch {
        /// Path to folder containing prediction JSON files
        folder: PathBuf,

        /// Brand whose stored price table to use
        #[arg(long, short = 'b')]
        brand: Option<String>,

        /// Use the brand of a registered vehicle
        #[arg(long, short = 'r')]
        registration: Option<String>,

        /// Ad-hoc price table file (JSON map of part name to price)
        #[arg(long)]
        prices: Option<PathBuf>,

        /// Write batch results to a JSON file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Export saved results to Excel
    Export {
        /// Path to JSON results file (single estimate or batch results)
        results: PathBuf,

        /// Output Excel file path
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Register a vehicle
    Register {
        /// Registration number (e.g. "KA 01 AB 1234")
        registration: String,

        /// Brand (selects the price table for estimates)
        #[arg(long, short = 'b')]
        brand: String,

        /// Model name
        #[arg(long)]
        model: Option<String>,

        /// Model year
        #[arg(long)]
        year: Option<u32>,

        /// Owner name
        #[arg(long)]
        owner: Option<String>,

        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// List registered vehicles
    Vehicles {
        /// Filter by brand
        #[arg(long, short = 'b')]
        brand: Option<String>,
    },

    /// Show one vehicle by registration
    Lookup {
        /// Registration number
        registration: String,
    },

    /// Remove a vehicle by registration
    Unregister {
        /// Registration number
        registration: String,
    },

    /// Import a brand price table from a JSON or CSV file
    SetPrices {
        /// Brand the table belongs to
        #[arg(long, short = 'b')]
        brand: String,

        /// Path to price table (JSON map, or CSV with part,price header)
        file: PathBuf,
    },

    /// Show a brand's price table
    Prices {
        /// Brand to show. Uses the configured default if not specified.
        #[arg(long, short = 'b')]
        brand: Option<String>,
    },

    /// List brands with stored price tables
    Brands,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default brand for estimates
        #[arg(long)]
        set_brand: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
