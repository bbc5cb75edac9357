//! Vehicle store for registered vehicles

use crate::error::Result;
use crate::types::VehicleRecord;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// Persistent store for vehicle records
pub struct VehicleStore {
    store_path: PathBuf,
    vehicles: HashMap<String, VehicleRecord>,
}

impl VehicleStore {
    /// Create or load a vehicle store
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("vehicles.json");

        let vehicles = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).unwrap_or_default()
        } else {
            HashMap::new()
        };

        Ok(Self {
            store_path,
            vehicles,
        })
    }

    /// Save store to disk
    fn save(&self) -> Result<()> {
        let file = File::create(&self.store_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.vehicles)?;
        Ok(())
    }

    /// Add a new vehicle and return its id
    pub fn add_vehicle(&mut self, vehicle: VehicleRecord) -> Result<String> {
        let id = vehicle.id.clone();
        self.vehicles.insert(id.clone(), vehicle);
        self.save()?;
        Ok(id)
    }

    /// Find the first vehicle matching a registration number
    ///
    /// The query is trimmed; matching is exact. With duplicate
    /// registrations the first in registration order wins.
    pub fn get_by_registration(&self, registration: &str) -> Option<&VehicleRecord> {
        let registration = registration.trim();
        self.all_vehicles()
            .into_iter()
            .find(|v| v.registration == registration)
    }

    /// All vehicles sorted by registration
    pub fn all_vehicles(&self) -> Vec<&VehicleRecord> {
        let mut vehicles: Vec<_> = self.vehicles.values().collect();
        vehicles.sort_by(|a, b| a.registration.cmp(&b.registration));
        vehicles
    }

    /// Vehicles of a single brand
    pub fn vehicles_by_brand(&self, brand: &str) -> Vec<&VehicleRecord> {
        let brand = brand.trim();
        self.all_vehicles()
            .into_iter()
            .filter(|v| v.brand.eq_ignore_ascii_case(brand))
            .collect()
    }

    /// Remove a vehicle by registration
    pub fn remove_by_registration(&mut self, registration: &str) -> Result<bool> {
        let registration = registration.trim();
        let id = self
            .vehicles
            .values()
            .find(|v| v.registration == registration)
            .map(|v| v.id.clone());

        match id {
            Some(id) => {
                self.vehicles.remove(&id);
                self.save()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Update a vehicle
    pub fn update_vehicle(&mut self, vehicle: VehicleRecord) -> Result<bool> {
        if self.vehicles.contains_key(&vehicle.id) {
            self.vehicles.insert(vehicle.id.clone(), vehicle);
            self.save()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Total vehicle count
    pub fn count(&self) -> usize {
        self.vehicles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(registration: &str, brand: &str) -> VehicleRecord {
        VehicleRecord::new(registration.to_string(), brand.to_string())
    }

    #[test]
    fn test_add_and_find_by_registration() {
        let dir = tempdir().unwrap();
        let mut store = VehicleStore::open(dir.path().to_path_buf()).unwrap();

        store.add_vehicle(record("KA 01 AB 1234", "Honda")).unwrap();

        let found = store.get_by_registration("KA 01 AB 1234").unwrap();
        assert_eq!(found.brand, "Honda");
        assert!(store.get_by_registration("KA 99 ZZ 0000").is_none());
    }

    #[test]
    fn test_registration_query_is_trimmed() {
        let dir = tempdir().unwrap();
        let mut store = VehicleStore::open(dir.path().to_path_buf()).unwrap();

        store.add_vehicle(record("MH 12 DE 1433", "Tata")).unwrap();

        assert!(store.get_by_registration("  MH 12 DE 1433  ").is_some());
    }

    #[test]
    fn test_vehicles_persist_across_reopen() {
        let dir = tempdir().unwrap();

        {
            let mut store = VehicleStore::open(dir.path().to_path_buf()).unwrap();
            store.add_vehicle(record("KA 01 AB 1234", "Honda")).unwrap();
        }

        let store = VehicleStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.count(), 1);
        assert!(store.get_by_registration("KA 01 AB 1234").is_some());
    }

    #[test]
    fn test_all_vehicles_sorted_by_registration() {
        let dir = tempdir().unwrap();
        let mut store = VehicleStore::open(dir.path().to_path_buf()).unwrap();

        store.add_vehicle(record("MH 12 DE 1433", "Tata")).unwrap();
        store.add_vehicle(record("DL 03 CA 9871", "Honda")).unwrap();

        let regs: Vec<&str> = store
            .all_vehicles()
            .iter()
            .map(|v| v.registration.as_str())
            .collect();
        assert_eq!(regs, vec!["DL 03 CA 9871", "MH 12 DE 1433"]);
    }

    #[test]
    fn test_vehicles_by_brand() {
        let dir = tempdir().unwrap();
        let mut store = VehicleStore::open(dir.path().to_path_buf()).unwrap();

        store.add_vehicle(record("KA 01 AB 1234", "Honda")).unwrap();
        store.add_vehicle(record("MH 12 DE 1433", "Tata")).unwrap();

        let hondas = store.vehicles_by_brand("honda");
        assert_eq!(hondas.len(), 1);
        assert_eq!(hondas[0].registration, "KA 01 AB 1234");
    }

    #[test]
    fn test_remove_by_registration() {
        let dir = tempdir().unwrap();
        let mut store = VehicleStore::open(dir.path().to_path_buf()).unwrap();

        store.add_vehicle(record("KA 01 AB 1234", "Honda")).unwrap();

        assert!(store.remove_by_registration("KA 01 AB 1234").unwrap());
        assert!(!store.remove_by_registration("KA 01 AB 1234").unwrap());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_update_vehicle() {
        let dir = tempdir().unwrap();
        let mut store = VehicleStore::open(dir.path().to_path_buf()).unwrap();

        let original = record("KA 01 AB 1234", "Honda");
        let id = store.add_vehicle(original.clone()).unwrap();

        let mut updated = original;
        updated.brand = "Tata".to_string();
        assert!(store.update_vehicle(updated).unwrap());

        let found = store.get_by_registration("KA 01 AB 1234").unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.brand, "Tata");

        let unknown = record("ZZ 00 XX 0000", "Honda");
        assert!(!store.update_vehicle(unknown).unwrap());
    }
}
