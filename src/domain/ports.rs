use crate::domain::model::{VehicleRecord, WarehouseRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn lenient(&self) -> bool;
}

/// Where a catalog document comes from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human readable location used in logs and errors.
    fn location(&self) -> &str;
    async fn fetch(&self) -> Result<Vec<u8>>;
}

/// Modal overlay showing a single vehicle. Owned by the host UI framework.
pub trait DetailsOverlay {
    fn open(&mut self, vehicle: &VehicleRecord);
    fn close(&mut self);
    fn is_open(&self) -> bool;
}

/// Draws the warehouse tabs and their vehicle cards.
pub trait RenderSurface {
    fn render(&mut self, warehouses: &[WarehouseRecord]);
}

#[async_trait]
impl<T: CatalogSource + ?Sized> CatalogSource for Box<T> {
    fn location(&self) -> &str {
        (**self).location()
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        (**self).fetch().await
    }
}
