#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::adapters::http::DEFAULT_TIMEOUT;
use crate::core::export::OutputFormat;
use crate::core::loader::Tolerance;
use crate::core::sort::SortSpec;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

/// Effective settings after merging the TOML file with command line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSettings {
    pub source: String,
    pub timeout: Duration,
    pub tolerance: Tolerance,
    pub sort: Option<SortSpec>,
    pub tab: Option<usize>,
    pub format: OutputFormat,
    pub output: Option<String>,
}

impl CatalogSettings {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            timeout: DEFAULT_TIMEOUT,
            tolerance: Tolerance::Strict,
            sort: None,
            tab: None,
            format: OutputFormat::Table,
            output: None,
        }
    }

    pub fn from_toml(config: &TomlConfig) -> Result<Self> {
        let mut settings = Self::new(config.source.location.clone());
        if let Some(secs) = config.source.timeout_seconds {
            settings.timeout = Duration::from_secs(secs);
        }
        settings.tolerance = config.tolerance();
        settings.sort = config
            .display
            .default_sort
            .as_deref()
            .map(str::parse::<SortSpec>)
            .transpose()?;
        settings.format = config.display.format.unwrap_or_default();
        settings.output = config.output.as_ref().map(|o| o.path.clone());
        Ok(settings)
    }

    /// 命令列參數覆蓋設定檔
    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig, file: Option<&TomlConfig>) -> Result<Self> {
        let mut settings = match file {
            Some(config) => Self::from_toml(config)?,
            None => Self::new(validation::validate_required_field("src", &cli.src)?.clone()),
        };

        if let Some(src) = &cli.src {
            settings.source = src.clone();
        }
        if let Some(secs) = cli.timeout_secs {
            settings.timeout = Duration::from_secs(secs);
        }
        if cli.lenient {
            settings.tolerance = Tolerance::Lenient;
        }
        if let Some(token) = &cli.sort {
            settings.sort = Some(token.parse()?);
        }
        if cli.tab.is_some() {
            settings.tab = cli.tab;
        }
        if let Some(format) = cli.format {
            settings.format = format;
        }
        if cli.output.is_some() {
            settings.output = cli.output.clone();
        }

        Ok(settings)
    }
}

impl ConfigProvider for CatalogSettings {
    fn source(&self) -> &str {
        &self.source
    }

    fn request_timeout(&self) -> Duration {
        self.timeout
    }

    fn lenient(&self) -> bool {
        self.tolerance == Tolerance::Lenient
    }
}

impl Validate for CatalogSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_source("src", &self.source)?;
        validation::validate_range("timeout_secs", self.timeout.as_secs(), 1, 300)?;
        if let Some(output) = &self.output {
            validation::validate_path("output", output)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::utils::error::CatalogError;
    use crate::core::sort::{Direction, SortKey};
    use clap::Parser;

    #[test]
    fn test_cli_only_settings() {
        let cli = CliConfig::parse_from([
            "garage-catalog",
            "--src",
            "https://garage.example.com/w.json",
            "--sort",
            "price-dsc",
            "--tab",
            "1",
            "--format",
            "json",
            "--lenient",
        ]);
        let settings = CatalogSettings::from_cli(&cli, None).unwrap();

        assert_eq!(settings.source, "https://garage.example.com/w.json");
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
        assert_eq!(
            settings.sort,
            Some(SortSpec::new(SortKey::Price, Direction::Desc))
        );
        assert_eq!(settings.tab, Some(1));
        assert_eq!(settings.format, OutputFormat::Json);
        assert!(settings.lenient());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[source]
location = "./from-file.json"
timeout_seconds = 30

[display]
default_sort = "date-dsc"
format = "csv"
"#,
        )
        .unwrap();
        let cli = CliConfig::parse_from(["garage-catalog", "--timeout-secs", "3"]);

        let settings = CatalogSettings::from_cli(&cli, Some(&file)).unwrap();
        assert_eq!(settings.source, "./from-file.json");
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(settings.sort.unwrap().to_string(), "date-dsc");
        assert_eq!(settings.format, OutputFormat::Csv);
        assert!(!settings.lenient());
    }

    #[test]
    fn test_missing_source() {
        let cli = CliConfig::parse_from(["garage-catalog"]);
        assert!(matches!(
            CatalogSettings::from_cli(&cli, None),
            Err(CatalogError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_sort_flag() {
        let cli = CliConfig::parse_from(["garage-catalog", "--src", "./w.json", "--sort", "horsepower-asc"]);
        assert!(matches!(
            CatalogSettings::from_cli(&cli, None),
            Err(CatalogError::InvalidKeyError { .. })
        ));
    }

    #[test]
    fn test_zero_timeout_fails_validation() {
        let mut settings = CatalogSettings::new("./w.json");
        settings.timeout = Duration::from_secs(0);
        assert!(settings.validate().is_err());
    }
}
