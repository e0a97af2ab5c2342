//! Ordering of vehicle listings.
//!
//! Sort requests arrive from the rendering surface as `"<field>-<direction>"`
//! tokens (for example `price-dsc`). They are parsed into a [`SortSpec`] once,
//! and only typed keys reach the comparators.

use crate::domain::model::VehicleRecord;
use crate::utils::error::{CatalogError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    DateAdded,
    Price,
    YearModel,
    Make,
    Model,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: Direction,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateAdded => "date",
            SortKey::Price => "price",
            SortKey::YearModel => "year_model",
            SortKey::Make => "make",
            SortKey::Model => "model",
        }
    }

    fn compare(&self, a: &VehicleRecord, b: &VehicleRecord) -> Ordering {
        match self {
            SortKey::DateAdded => a.date_added.cmp(&b.date_added),
            SortKey::Price => a.price.total_cmp(&b.price),
            SortKey::YearModel => a.year_model.cmp(&b.year_model),
            // 以 Unicode code point 比較，不套用語系規則
            SortKey::Make => a.make.cmp(&b.make),
            SortKey::Model => a.model.cmp(&b.model),
        }
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "date" | "date_added" => Ok(SortKey::DateAdded),
            "price" => Ok(SortKey::Price),
            "year_model" => Ok(SortKey::YearModel),
            "make" => Ok(SortKey::Make),
            "model" => Ok(SortKey::Model),
            other => Err(CatalogError::InvalidKeyError {
                key: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "dsc",
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for Direction {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(Direction::Asc),
            "dsc" | "desc" => Ok(Direction::Desc),
            other => Err(CatalogError::InvalidSortToken {
                token: other.to_string(),
                reason: "direction must be 'asc' or 'dsc'".to_string(),
            }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SortSpec {
    pub fn new(key: SortKey, direction: Direction) -> Self {
        Self { key, direction }
    }

    pub fn sort(&self, vehicles: &[VehicleRecord]) -> Vec<VehicleRecord> {
        sort(vehicles, self.key, self.direction)
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(SortKey::DateAdded, Direction::Asc)
    }
}

impl FromStr for SortSpec {
    type Err = CatalogError;

    /// Parses `<field>-<direction>`. Field names may contain `_` but never `-`,
    /// so the token is split at the last dash.
    fn from_str(token: &str) -> Result<Self> {
        let (field, direction) =
            token
                .rsplit_once('-')
                .ok_or_else(|| CatalogError::InvalidSortToken {
                    token: token.to_string(),
                    reason: "expected '<field>-<direction>'".to_string(),
                })?;

        let key = field.parse::<SortKey>()?;
        let direction = direction
            .parse::<Direction>()
            .map_err(|_| CatalogError::InvalidSortToken {
                token: token.to_string(),
                reason: format!("unknown direction '{}'", direction),
            })?;

        Ok(Self { key, direction })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.key, self.direction)
    }
}

/// Returns a new, stably ordered copy of `vehicles`. The input is left as is.
pub fn sort(vehicles: &[VehicleRecord], key: SortKey, direction: Direction) -> Vec<VehicleRecord> {
    let mut sorted = vehicles.to_vec();
    // slice::sort_by 為穩定排序，相同鍵值保留原順序
    sorted.sort_by(|a, b| direction.apply(key.compare(a, b)));
    sorted
}
