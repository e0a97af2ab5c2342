pub mod export;
pub mod loader;
pub mod session;
pub mod sort;

pub use crate::domain::model::{LoadReport, SkippedRecord, VehicleRecord, WarehouseRecord};
pub use crate::domain::ports::{CatalogSource, ConfigProvider, DetailsOverlay, RenderSurface, Storage};
pub use crate::utils::error::Result;
