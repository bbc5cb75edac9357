//! Error types for damage-cost-checker

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid prediction file {path}: {reason}")]
    InvalidPredictions { path: String, reason: String },

    #[error("No price data found for brand: {0}")]
    PriceTableNotFound(String),

    #[error("Negative price for part \"{part}\": {price}")]
    InvalidPrice { part: String, price: f64 },

    #[error("Invalid CSV header in {0}: expected part,price")]
    CsvHeader(String),

    #[error("Invalid price in row {row}: {value}")]
    CsvPrice { row: usize, value: String },

    #[error("Missing part name in row {0}")]
    CsvPart(usize),

    #[error("No vehicle found with registration: {0}")]
    VehicleNotFound(String),

    #[error("No price source: pass --prices, --brand or --registration, or set a default brand")]
    NoPriceSource,

    #[error("Excel export error: {0}")]
    Excel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
