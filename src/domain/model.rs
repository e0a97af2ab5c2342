use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One vehicle listing as it appears in a warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year_model: i32,
    pub date_added: DateTime<Utc>,
    pub price: f64,
    pub licensed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: String,
    pub long: String,
}

/// An inventory location and the vehicles it holds, in their current display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseRecord {
    pub id: Option<String>,
    pub name: String,
    pub location: Option<GeoLocation>,
    /// 倉庫內停放區域 (原始文件的 `cars.location`)
    pub wing: Option<String>,
    pub vehicles: Vec<VehicleRecord>,
}

impl WarehouseRecord {
    pub fn find_vehicle(&self, id: &str) -> Option<&VehicleRecord> {
        self.vehicles.iter().find(|v| v.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRecord {
    pub warehouse: String,
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub warehouses: Vec<WarehouseRecord>,
    pub skipped: Vec<SkippedRecord>,
}

impl LoadReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn vehicle_count(&self) -> usize {
        self.warehouses.iter().map(|w| w.vehicles.len()).sum()
    }
}
