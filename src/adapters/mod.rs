// Adapters layer: concrete implementations for external systems (storage, http, terminal).

pub mod http;
pub mod storage;
pub mod terminal;

use crate::domain::ports::{CatalogSource, ConfigProvider};
use crate::utils::error::Result;
use std::time::Duration;

pub use http::HttpSource;
pub use storage::{LocalStorage, StorageSource};

/// Picks HTTP for `http://` / `https://` locations and local files otherwise.
pub fn source_for_location(location: &str, timeout: Duration) -> Result<Box<dyn CatalogSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, timeout)?))
    } else {
        let storage = LocalStorage::new(String::new());
        Ok(Box::new(StorageSource::new(storage, location)))
    }
}

pub fn source_from_config<C: ConfigProvider>(config: &C) -> Result<Box<dyn CatalogSource>> {
    source_for_location(config.source(), config.request_timeout())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_selection_by_scheme() {
        let timeout = Duration::from_secs(1);
        let http = source_for_location("https://example.com/garage.json", timeout).unwrap();
        assert_eq!(http.location(), "https://example.com/garage.json");

        let file = source_for_location("./data/garage.json", timeout).unwrap();
        assert_eq!(file.location(), "./data/garage.json");
    }
}
