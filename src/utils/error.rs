use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to fetch catalog from {source_location}: {message}")]
    FetchError {
        source_location: String,
        message: String,
    },

    #[error("Catalog document is malformed: {message}")]
    ParseError { message: String },

    #[error("Unrecognized sort key: {key}")]
    InvalidKeyError { key: String },

    #[error("Invalid sort token '{token}': {reason}")]
    InvalidSortToken { token: String, reason: String },

    #[error("Warehouse tab {tab} does not exist ({len} tabs loaded)")]
    TabOutOfRange { tab: usize, len: usize },

    #[error("Vehicle '{id}' not found in warehouse tab {tab}")]
    VehicleNotFound { tab: usize, id: String },

    #[error("CSV export failed: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Export failed: {message}")]
    ExportError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Request,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn fetch(source_location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FetchError {
            source_location: source_location.into(),
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FetchError { .. } => ErrorCategory::Network,
            Self::ParseError { .. } => ErrorCategory::Data,
            Self::InvalidKeyError { .. }
            | Self::InvalidSortToken { .. }
            | Self::TabOutOfRange { .. }
            | Self::VehicleNotFound { .. } => ErrorCategory::Request,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
            Self::CsvError(_) | Self::ExportError { .. } | Self::IoError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 使用者可改用預設排序繼續
            ErrorCategory::Request => ErrorSeverity::Low,
            // 網路錯誤通常可重新嘗試
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::FetchError { source_location, .. } => format!(
                "Check that {} is reachable and try again",
                source_location
            ),
            Self::ParseError { .. } => {
                "Verify the catalog is a JSON array of warehouses, or rerun with --lenient to skip malformed vehicles".to_string()
            }
            Self::InvalidKeyError { .. } | Self::InvalidSortToken { .. } => {
                "Use one of: date-asc, date-dsc, price-asc, price-dsc, year_model-asc, year_model-dsc, make-asc, model-asc".to_string()
            }
            Self::TabOutOfRange { len, .. } => {
                format!("Choose a tab between 0 and {}", len.saturating_sub(1))
            }
            Self::VehicleNotFound { .. } => {
                "List the warehouse first to see the available vehicle ids".to_string()
            }
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => {
                "Review the command line flags and the TOML configuration file".to_string()
            }
            Self::CsvError(_) | Self::ExportError { .. } | Self::IoError(_) => {
                "Check that the output location is writable".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::FetchError { .. } => format!("Could not load the catalog. {}", self),
            Self::ParseError { .. } => format!("The catalog could not be read. {}", self),
            Self::InvalidKeyError { key } => format!("Cannot sort by '{}'", key),
            _ => self.to_string(),
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        let location = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        let message = if err.is_timeout() {
            format!("request timed out ({})", err)
        } else {
            err.to_string()
        };
        Self::FetchError {
            source_location: location,
            message,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_category() {
        assert_eq!(
            CatalogError::fetch("http://x", "boom").severity(),
            ErrorSeverity::Medium
        );
        assert_eq!(CatalogError::parse("bad").severity(), ErrorSeverity::High);
        assert_eq!(
            CatalogError::InvalidKeyError {
                key: "horsepower".into()
            }
            .category(),
            ErrorCategory::Request
        );
        let io = CatalogError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(io.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_json_error_becomes_parse_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(CatalogError::from(err), CatalogError::ParseError { .. }));
    }

    #[test]
    fn test_user_friendly_message_names_key() {
        let err = CatalogError::InvalidKeyError {
            key: "horsepower".into(),
        };
        assert_eq!(err.user_friendly_message(), "Cannot sort by 'horsepower'");
    }
}
