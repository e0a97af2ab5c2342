//! State owned by one hosting UI session: the loaded warehouses, the sort
//! last applied on each warehouse tab, and the generation of the load in
//! flight. A load that finishes after [`GarageSession::dispose`] or after a
//! newer [`GarageSession::begin_load`] is dropped without touching state.

use crate::core::loader::CatalogLoader;
use crate::core::sort::SortSpec;
use crate::domain::model::{LoadReport, WarehouseRecord};
use crate::domain::ports::{CatalogSource, DetailsOverlay, RenderSurface};
use crate::utils::error::{CatalogError, Result};

/// Name prefix of the per-tab sort select control.
pub const SORT_CONTROL_PREFIX: &str = "sortby-tab-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { warehouses: usize, skipped: usize },
    Discarded,
}

#[derive(Debug, Default)]
pub struct GarageSession {
    warehouses: Vec<WarehouseRecord>,
    sort_specs: Vec<SortSpec>,
    generation: u64,
    disposed: bool,
    last_error: Option<String>,
}

impl GarageSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<LoadReport>,
    ) -> Result<LoadOutcome> {
        if self.disposed || ticket.0 != self.generation {
            tracing::debug!(
                "Discarding stale load result (ticket {}, current {}, disposed {})",
                ticket.0,
                self.generation,
                self.disposed
            );
            return Ok(LoadOutcome::Discarded);
        }

        match result {
            Ok(report) => {
                let outcome = LoadOutcome::Applied {
                    warehouses: report.warehouses.len(),
                    skipped: report.skipped_count(),
                };
                self.sort_specs = vec![SortSpec::default(); report.warehouses.len()];
                self.warehouses = report.warehouses;
                self.last_error = None;
                Ok(outcome)
            }
            Err(e) => {
                self.warehouses.clear();
                self.sort_specs.clear();
                self.last_error = Some(e.user_friendly_message());
                Err(e)
            }
        }
    }

    pub async fn load_from<S: CatalogSource>(
        &mut self,
        loader: &CatalogLoader<S>,
    ) -> Result<LoadOutcome> {
        let ticket = self.begin_load();
        let result = loader.load().await;
        self.complete_load(ticket, result)
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn warehouses(&self) -> &[WarehouseRecord] {
        &self.warehouses
    }

    pub fn warehouse(&self, tab: usize) -> Result<&WarehouseRecord> {
        self.warehouses.get(tab).ok_or(CatalogError::TabOutOfRange {
            tab,
            len: self.warehouses.len(),
        })
    }

    pub fn sort_spec(&self, tab: usize) -> Result<SortSpec> {
        self.warehouse(tab)?;
        Ok(self.sort_specs[tab])
    }

    /// Applies a `"<field>-<direction>"` token to one tab. On error the tab's
    /// ordering and remembered sort are left as they were.
    pub fn apply_sort(&mut self, tab: usize, token: &str) -> Result<SortSpec> {
        let spec = token.parse::<SortSpec>()?;
        self.apply_spec(tab, spec)?;
        Ok(spec)
    }

    pub fn apply_spec(&mut self, tab: usize, spec: SortSpec) -> Result<()> {
        let len = self.warehouses.len();
        let warehouse = self
            .warehouses
            .get_mut(tab)
            .ok_or(CatalogError::TabOutOfRange { tab, len })?;

        warehouse.vehicles = spec.sort(&warehouse.vehicles);
        self.sort_specs[tab] = spec;
        tracing::debug!("Tab {} ('{}') sorted by {}", tab, warehouse.name, spec);
        Ok(())
    }

    /// Handles a change event from a `sortby-tab-<n>` select control.
    pub fn apply_sort_from_control(&mut self, control_name: &str, value: &str) -> Result<SortSpec> {
        let tab = control_name
            .strip_prefix(SORT_CONTROL_PREFIX)
            .and_then(|n| n.parse::<usize>().ok())
            .ok_or_else(|| CatalogError::InvalidSortToken {
                token: control_name.to_string(),
                reason: format!("expected a control named '{}<n>'", SORT_CONTROL_PREFIX),
            })?;
        self.apply_sort(tab, value)
    }

    pub fn open_details<O: DetailsOverlay>(
        &self,
        tab: usize,
        vehicle_id: &str,
        overlay: &mut O,
    ) -> Result<()> {
        let vehicle = self
            .warehouse(tab)?
            .find_vehicle(vehicle_id)
            .ok_or_else(|| CatalogError::VehicleNotFound {
                tab,
                id: vehicle_id.to_string(),
            })?;
        overlay.open(vehicle);
        Ok(())
    }

    pub fn close_details<O: DetailsOverlay>(&self, overlay: &mut O) {
        overlay.close();
    }

    pub fn render<R: RenderSurface>(&self, surface: &mut R) {
        surface.render(&self.warehouses);
    }
}
