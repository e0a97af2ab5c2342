use crate::core::export::OutputFormat;
use crate::core::loader::Tolerance;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub load: LoadConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub location: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoadConfig {
    pub tolerance: Option<Tolerance>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayConfig {
    pub default_sort: Option<String>,
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GARAGE_SRC})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn tolerance(&self) -> Tolerance {
        self.load.tolerance.unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_source("source.location", &self.source.location)?;

        if let Some(timeout) = self.source.timeout_seconds {
            crate::utils::validation::validate_range("source.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(sort) = &self.display.default_sort {
            sort.parse::<crate::core::sort::SortSpec>()?;
        }

        if let Some(output) = &self.output {
            crate::utils::validation::validate_path("output.path", &output.path)?;
        }

        Ok(())
    }
}
