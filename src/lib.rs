pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{source_for_location, source_from_config, HttpSource, LocalStorage, StorageSource};
pub use config::{toml_config::TomlConfig, CatalogSettings};
pub use crate::core::loader::{parse_catalog, CatalogLoader, Tolerance};
pub use crate::core::session::{GarageSession, LoadOutcome, LoadTicket};
pub use crate::core::sort::{sort, Direction, SortKey, SortSpec};
pub use domain::model::{LoadReport, SkippedRecord, VehicleRecord, WarehouseRecord};
pub use utils::error::{CatalogError, Result};
