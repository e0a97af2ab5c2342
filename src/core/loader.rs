//! Fetches a warehouse-list document and turns it into typed records.
//!
//! The document is a JSON array of warehouses. Each warehouse carries its
//! vehicles under `cars.vehicles` (a flat `vehicles` array is accepted too).
//! How a malformed vehicle is treated depends on the [`Tolerance`]:
//! strict loads fail as a whole, lenient loads drop the vehicle and record
//! why in [`LoadReport::skipped`]. A broken warehouse envelope always fails.

use crate::core::sort::SortSpec;
use crate::domain::model::{
    GeoLocation, LoadReport, SkippedRecord, VehicleRecord, WarehouseRecord,
};
use crate::domain::ports::{CatalogSource, ConfigProvider};
use crate::utils::error::{CatalogError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tolerance {
    #[default]
    Strict,
    Lenient,
}

impl Tolerance {
    pub fn from_lenient_flag(lenient: bool) -> Self {
        if lenient {
            Tolerance::Lenient
        } else {
            Tolerance::Strict
        }
    }
}

pub struct CatalogLoader<S: CatalogSource> {
    source: S,
    tolerance: Tolerance,
}

impl<S: CatalogSource> CatalogLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            tolerance: Tolerance::Strict,
        }
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn from_config<C: ConfigProvider>(source: S, config: &C) -> Self {
        Self::new(source).with_tolerance(Tolerance::from_lenient_flag(config.lenient()))
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub async fn load(&self) -> Result<LoadReport> {
        tracing::debug!("Fetching catalog from: {}", self.source.location());
        let bytes = self.source.fetch().await?;
        tracing::debug!("Fetched {} bytes", bytes.len());

        let report = parse_catalog(&bytes, self.tolerance)?;

        tracing::info!(
            "Loaded {} warehouses, {} vehicles ({} skipped)",
            report.warehouses.len(),
            report.vehicle_count(),
            report.skipped_count()
        );
        for skipped in &report.skipped {
            tracing::warn!(
                "Skipped vehicle #{} in '{}': {}",
                skipped.index,
                skipped.warehouse,
                skipped.reason
            );
        }

        Ok(report)
    }
}

/// Parses a catalog document. Every warehouse comes back in the default
/// `date-asc` order.
pub fn parse_catalog(bytes: &[u8], tolerance: Tolerance) -> Result<LoadReport> {
    let document: Value = serde_json::from_slice(bytes)?;
    let entries = match document {
        Value::Array(entries) => entries,
        other => {
            return Err(CatalogError::parse(format!(
                "expected a JSON array of warehouses, found {}",
                json_type_name(&other)
            )))
        }
    };

    let default_order = SortSpec::default();
    let mut report = LoadReport::default();

    for (position, entry) in entries.into_iter().enumerate() {
        let raw: RawWarehouse = serde_json::from_value(entry)
            .map_err(|e| CatalogError::parse(format!("warehouse #{}: {}", position, e)))?;

        let name = raw.name;
        let (wing, raw_vehicles) = match (raw.cars, raw.vehicles) {
            (Some(cars), _) => (cars.location, cars.vehicles),
            (None, Some(vehicles)) => (None, vehicles),
            (None, None) => {
                return Err(CatalogError::parse(format!(
                    "warehouse '{}' has no vehicle collection",
                    name
                )))
            }
        };

        let mut seen_ids = HashSet::new();
        let mut vehicles = Vec::with_capacity(raw_vehicles.len());

        for (index, value) in raw_vehicles.into_iter().enumerate() {
            let parsed = parse_vehicle(value).and_then(|vehicle| {
                if seen_ids.insert(vehicle.id.clone()) {
                    Ok(vehicle)
                } else {
                    Err(format!("duplicate id '{}'", vehicle.id))
                }
            });

            match (parsed, tolerance) {
                (Ok(vehicle), _) => vehicles.push(vehicle),
                (Err(reason), Tolerance::Strict) => {
                    return Err(CatalogError::parse(format!(
                        "warehouse '{}', vehicle #{}: {}",
                        name, index, reason
                    )))
                }
                (Err(reason), Tolerance::Lenient) => report.skipped.push(SkippedRecord {
                    warehouse: name.clone(),
                    index,
                    reason,
                }),
            }
        }

        report.warehouses.push(WarehouseRecord {
            id: raw.id.map(|id| id.into_string()),
            name,
            location: raw.location.map(|loc| GeoLocation {
                lat: loc.lat.into_string(),
                long: loc.long.into_string(),
            }),
            wing,
            vehicles: default_order.sort(&vehicles),
        });
    }

    Ok(report)
}

fn parse_vehicle(value: Value) -> std::result::Result<VehicleRecord, String> {
    let raw: RawVehicle = serde_json::from_value(value).map_err(|e| e.to_string())?;

    let year_model = raw.year_model.into_year()?;
    let date_added = parse_date_added(&raw.date_added)
        .ok_or_else(|| format!("date_added '{}' is not a valid date", raw.date_added))?;

    Ok(VehicleRecord {
        id: raw.id.into_string(),
        make: raw.make,
        model: raw.model,
        year_model,
        date_added,
        price: raw.price,
        licensed: raw.licensed,
    })
}

/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` (UTC) and plain `YYYY-MM-DD`.
pub fn parse_date_added(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// 原始文件中 id 與座標可能是字串也可能是數字
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
        }
    }

    fn into_year(self) -> std::result::Result<i32, String> {
        let parsed = match &self {
            Scalar::Text(s) => s.trim().parse::<i32>().ok(),
            Scalar::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        };
        parsed.ok_or_else(|| format!("year_model '{}' is not an integer year", self.into_string()))
    }
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    lat: Scalar,
    long: Scalar,
}

#[derive(Debug, Deserialize)]
struct RawCars {
    location: Option<String>,
    vehicles: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawWarehouse {
    #[serde(rename = "_id")]
    id: Option<Scalar>,
    name: String,
    location: Option<RawLocation>,
    cars: Option<RawCars>,
    vehicles: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct RawVehicle {
    #[serde(rename = "_id")]
    id: Scalar,
    make: String,
    model: String,
    year_model: Scalar,
    date_added: String,
    price: f64,
    licensed: bool,
}
