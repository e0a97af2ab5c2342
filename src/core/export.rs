use crate::domain::model::WarehouseRecord;
use crate::utils::error::{CatalogError, Result};
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn render(&self, warehouses: &[WarehouseRecord]) -> Result<String> {
        match self {
            OutputFormat::Table => Ok(to_table(warehouses)),
            OutputFormat::Csv => to_csv(warehouses),
            OutputFormat::Json => to_json(warehouses),
        }
    }
}

/// Plain-text listing: one block per warehouse tab.
pub fn to_table(warehouses: &[WarehouseRecord]) -> String {
    let mut out = String::new();

    for (tab, warehouse) in warehouses.iter().enumerate() {
        let _ = write!(out, "[{}] {}", tab, warehouse.name);
        if let Some(wing) = &warehouse.wing {
            let _ = write!(out, " ({})", wing);
        }
        out.push('\n');

        if warehouse.vehicles.is_empty() {
            out.push_str("  (no vehicles)\n");
            continue;
        }

        let _ = writeln!(
            out,
            "  {:<6} {:<14} {:<20} {:>4}  {:<10} {:>12}  {}",
            "id", "make", "model", "year", "added", "price", "licensed"
        );
        for v in &warehouse.vehicles {
            let _ = writeln!(
                out,
                "  {:<6} {:<14} {:<20} {:>4}  {:<10} {:>12.2}  {}",
                v.id,
                v.make,
                v.model,
                v.year_model,
                v.date_added.format("%Y-%m-%d"),
                v.price,
                if v.licensed { "yes" } else { "no" }
            );
        }
    }

    out
}

pub fn to_csv(warehouses: &[WarehouseRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "warehouse",
        "id",
        "make",
        "model",
        "year_model",
        "date_added",
        "price",
        "licensed",
    ])?;

    for warehouse in warehouses {
        for v in &warehouse.vehicles {
            let year_model = v.year_model.to_string();
            let date_added = v.date_added.to_rfc3339();
            let price = v.price.to_string();
            writer.write_record([
                warehouse.name.as_str(),
                v.id.as_str(),
                v.make.as_str(),
                v.model.as_str(),
                year_model.as_str(),
                date_added.as_str(),
                price.as_str(),
                if v.licensed { "true" } else { "false" },
            ])?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CatalogError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| CatalogError::ExportError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

pub fn to_json(warehouses: &[WarehouseRecord]) -> Result<String> {
    serde_json::to_string_pretty(warehouses).map_err(|e| CatalogError::ExportError {
        message: format!("Failed to serialize catalog: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::VehicleRecord;
    use chrono::{TimeZone, Utc};

    fn warehouses() -> Vec<WarehouseRecord> {
        vec![
            WarehouseRecord {
                id: Some("1".into()),
                name: "Warehouse A".into(),
                location: None,
                wing: Some("West wing".into()),
                vehicles: vec![VehicleRecord {
                    id: "1".into(),
                    make: "Volkswagen".into(),
                    model: "Jetta, III".into(),
                    year_model: 1995,
                    date_added: Utc.with_ymd_and_hms(2018, 9, 18, 0, 0, 0).unwrap(),
                    price: 12947.52,
                    licensed: true,
                }],
            },
            WarehouseRecord {
                id: None,
                name: "Warehouse B".into(),
                location: None,
                wing: None,
                vehicles: vec![],
            },
        ]
    }

    #[test]
    fn test_csv_quotes_fields_and_uses_rfc3339() {
        let csv = to_csv(&warehouses()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "warehouse,id,make,model,year_model,date_added,price,licensed"
        );
        assert_eq!(
            lines[1],
            "Warehouse A,1,Volkswagen,\"Jetta, III\",1995,2018-09-18T00:00:00+00:00,12947.52,true"
        );
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_table_lists_every_tab() {
        let table = to_table(&warehouses());
        assert!(table.contains("[0] Warehouse A (West wing)"));
        assert!(table.contains("2018-09-18"));
        assert!(table.contains("12947.52"));
        assert!(table.contains("[1] Warehouse B\n  (no vehicles)"));
    }

    #[test]
    fn test_json_shape() {
        let json: serde_json::Value =
            serde_json::from_str(&to_json(&warehouses()).unwrap()).unwrap();
        assert_eq!(json[0]["name"], "Warehouse A");
        assert_eq!(json[0]["vehicles"][0]["date_added"], "2018-09-18T00:00:00Z");
        assert_eq!(json[1]["vehicles"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_output_format_dispatch() {
        let rendered = OutputFormat::Csv.render(&warehouses()).unwrap();
        assert!(rendered.starts_with("warehouse,id"));
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }
}
