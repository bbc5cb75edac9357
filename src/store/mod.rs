//! Persistent stores for brand price tables and vehicle records

pub mod vehicles;

pub use vehicles::VehicleStore;

use crate::error::{Error, Result};
use crate::types::PriceMapping;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// Persistent store for per-brand price tables
///
/// One document per brand in `damage_prices.json` under the data
/// directory. The handle is constructed explicitly at startup and passed
/// by reference to whatever needs it.
pub struct PriceStore {
    store_path: PathBuf,
    tables: HashMap<String, PriceMapping>,
}

impl PriceStore {
    /// Create or load a price store
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("damage_prices.json");

        let tables = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).unwrap_or_default()
        } else {
            HashMap::new()
        };

        Ok(Self { store_path, tables })
    }

    /// Save store to disk
    fn save(&self) -> Result<()> {
        let file = File::create(&self.store_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.tables)?;
        Ok(())
    }

    /// Get the price table for a brand
    ///
    /// The brand is trimmed before lookup. A brand without price data is
    /// an error, not an empty table.
    pub fn brand_prices(&self, brand: &str) -> Result<&PriceMapping> {
        let brand = brand.trim();
        self.tables
            .get(brand)
            .ok_or_else(|| Error::PriceTableNotFound(brand.to_string()))
    }

    /// Insert or replace the price table for a brand
    ///
    /// Rejects negative prices; a price of zero is allowed.
    pub fn set_brand_prices(&mut self, brand: &str, prices: PriceMapping) -> Result<()> {
        for (part, price) in &prices {
            if *price < 0.0 {
                return Err(Error::InvalidPrice {
                    part: part.clone(),
                    price: *price,
                });
            }
        }

        self.tables.insert(brand.trim().to_string(), prices);
        self.save()
    }

    /// Remove a brand's price table
    pub fn remove_brand(&mut self, brand: &str) -> Result<bool> {
        let removed = self.tables.remove(brand.trim()).is_some();
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    /// All brands with price tables, sorted
    pub fn brands(&self) -> Vec<&str> {
        let mut brands: Vec<_> = self.tables.keys().map(String::as_str).collect();
        brands.sort_unstable();
        brands
    }

    /// Number of brands with price tables
    pub fn count(&self) -> usize {
        self.tables.len()
    }
}
