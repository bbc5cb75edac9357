//! Prediction file discovery and loading

use crate::error::{Error, Result};
use crate::types::PredictionSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extension accepted for detection output
const PREDICTION_EXTENSION: &str = "json";

fn has_prediction_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(PREDICTION_EXTENSION))
        .unwrap_or(false)
}

/// Check that a path exists and looks like a prediction file
pub fn validate_prediction_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }

    if !has_prediction_extension(path) {
        return Err(Error::InvalidPredictions {
            path: path.display().to_string(),
            reason: "expected a .json detection output file".to_string(),
        });
    }

    Ok(())
}

/// Load and parse a detection output file
pub fn load_predictions(path: &Path) -> Result<PredictionSet> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::FileNotFound(path.display().to_string()),
        _ => Error::Io(e),
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| Error::InvalidPredictions {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Recursively collect prediction files under a folder, sorted by path
pub fn scan_prediction_files(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(Error::FileNotFound(folder.display().to_string()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_prediction_extension(path))
        .collect();

    files.sort();
    Ok(files)
}
