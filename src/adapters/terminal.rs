use crate::core::export::OutputFormat;
use crate::domain::model::{VehicleRecord, WarehouseRecord};
use crate::domain::ports::{DetailsOverlay, RenderSurface};
use crate::utils::error::Result;

/// Renders the catalog into a string buffer in the chosen [`OutputFormat`].
#[derive(Debug, Default)]
pub struct TextSurface {
    format: OutputFormat,
    output: String,
    error: Option<String>,
}

impl TextSurface {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    /// Output of the last render, or the export error it hit.
    pub fn take_output(&mut self) -> Result<String> {
        if let Some(message) = self.error.take() {
            return Err(crate::utils::error::CatalogError::ExportError { message });
        }
        Ok(std::mem::take(&mut self.output))
    }
}

impl RenderSurface for TextSurface {
    fn render(&mut self, warehouses: &[WarehouseRecord]) {
        match self.format.render(warehouses) {
            Ok(text) => {
                self.output = text;
                self.error = None;
            }
            Err(e) => {
                tracing::error!("Failed to render catalog: {}", e);
                self.output.clear();
                self.error = Some(e.to_string());
            }
        }
    }
}

/// Details card printed to the terminal instead of a modal dialog.
#[derive(Debug, Default)]
pub struct TextOverlay {
    content: Option<String>,
}

impl TextOverlay {
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

impl DetailsOverlay for TextOverlay {
    fn open(&mut self, vehicle: &VehicleRecord) {
        self.content = Some(format!(
            "{} {} ({})\n  id:       {}\n  added:    {}\n  price:    ${:.2}\n  licensed: {}",
            vehicle.make,
            vehicle.model,
            vehicle.year_model,
            vehicle.id,
            vehicle.date_added.format("%Y-%m-%d"),
            vehicle.price,
            if vehicle.licensed { "yes" } else { "no" }
        ));
    }

    fn close(&mut self) {
        self.content = None;
    }

    fn is_open(&self) -> bool {
        self.content.is_some()
    }
}
