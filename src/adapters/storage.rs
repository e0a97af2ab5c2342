use crate::domain::ports::{CatalogSource, Storage};
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

/// Reads the catalog document from a [`Storage`] backend.
pub struct StorageSource<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> StorageSource<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

#[async_trait]
impl<S: Storage> CatalogSource for StorageSource<S> {
    fn location(&self) -> &str {
        &self.path
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        // 讀檔失敗屬於來源無法取得，而非系統錯誤
        self.storage
            .read_file(&self.path)
            .await
            .map_err(|e| CatalogError::fetch(&self.path, e.to_string()))
    }
}
