//! Core types for damage cost estimation

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Brand price table: part/damage name -> unit repair price
pub type PriceMapping = HashMap<String, f64>;

/// Deserialize a class id given as a number or a numeric string
fn class_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(value) => Ok(value),
        Raw::Float(value) => Ok(value as i64),
        Raw::Text(value) => value.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// One detected damage instance from the vision model
///
/// Extra per-prediction fields (bounding boxes etc.) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Damage class id (0-13 in the current model)
    #[serde(deserialize_with = "class_id")]
    pub class: i64,

    /// Detection confidence (0.0 - 1.0)
    pub confidence: f64,
}

/// Detection model output document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionSet {
    pub predictions: Vec<Prediction>,
}

/// One line item of the cost breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceDetail {
    /// Detection confidence, rounded to 3 decimals
    pub confidence: f64,

    /// Resolved part/damage name ("Unknown" for ids outside the table)
    pub part: String,

    /// Unit price weighted by the rounded confidence
    pub price: f64,
}

/// Estimator output: total plus ordered breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEstimate {
    pub total_price: f64,
    pub details: Vec<PriceDetail>,
}

/// One estimate with metadata, as saved by the estimate command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateEntry {
    /// Prediction file the estimate was computed from
    pub source: String,

    /// Brand whose price table was used (None for ad-hoc price files)
    #[serde(default)]
    pub brand: Option<String>,

    /// When the estimate was computed
    pub estimated_at: chrono::DateTime<chrono::Utc>,

    /// Estimate result
    pub estimate: CostEstimate,
}

/// Batch estimation results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResults {
    /// Per-file estimates
    pub entries: Vec<EstimateEntry>,
    /// Total prediction files processed
    pub total_processed: usize,
    /// Number of successful estimates
    pub successful: usize,
    /// Number of failed files
    pub failed: usize,
    /// Batch start time
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// Batch end time
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

/// Registered vehicle record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Unique identifier
    pub id: String,

    /// Registration number (e.g. "KA 01 AB 1234")
    pub registration: String,

    /// Brand, selects the price table for estimates
    pub brand: String,

    /// Model name
    #[serde(default)]
    pub model: Option<String>,

    /// Model year
    #[serde(default)]
    pub year: Option<u32>,

    /// Owner name
    #[serde(default)]
    pub owner: Option<String>,

    /// Notes/memo
    #[serde(default)]
    pub notes: Option<String>,

    /// When registered
    pub registered_at: chrono::DateTime<chrono::Utc>,
}

impl VehicleRecord {
    pub fn new(registration: String, brand: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            registration,
            brand,
            model: None,
            year: None,
            owner: None,
            notes: None,
            registered_at: chrono::Utc::now(),
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_owner(mut self, owner: String) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_notes(mut self, notes: String) -> Self {
        self.notes = Some(notes);
        self
    }
}
