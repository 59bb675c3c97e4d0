//! CSV catalog loader.
//!
//! ## CSV Format
//!
//! A catalog directory holds one CSV file per option kind. Column order does
//! **not** matter (headers are matched by name). `description` may be
//! omitted or left empty.
//!
//! | File             | Columns                                 |
//! |------------------|-----------------------------------------|
//! | `services.csv`   | `id`, `name`, `base_price`, `description` |
//! | `industries.csv` | `id`, `name`, `multiplier`, `description` |
//! | `features.csv`   | `id`, `name`, `price`, `description`      |
//! | `timelines.csv`  | `id`, `name`, `multiplier` (optional file) |
//!
//! Ids are lowercase words separated by hyphens (`web-development`).
//! Timeline ids must be one of `rush`, `standard` or `flexible`; when
//! `timelines.csv` is absent the standard timelines are used.
//!
//! ### Example `services.csv`
//!
//! ```csv
//! id,name,base_price,description
//! web-development,Web Development,25000,Custom websites and web applications
//! cloud-solutions,Cloud Solutions,20000,Cloud migration and infrastructure
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use quote_core::{
    Catalog, FeatureOption, IndustryProfile, ServiceOption, TimelineCode, TimelineOption,
};
use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};

pub const SERVICES_FILE: &str = "services.csv";
pub const INDUSTRIES_FILE: &str = "industries.csv";
pub const FEATURES_FILE: &str = "features.csv";
pub const TIMELINES_FILE: &str = "timelines.csv";

static ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("catalog id pattern is a valid regex")
});

/// Errors that can occur when loading catalog data.
///
/// Row numbers are 1-based and count data rows only (the header is row 0).
#[derive(Debug, Error)]
pub enum CatalogLoaderError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error in {file}: {message}")]
    CsvParse { file: &'static str, message: String },

    #[error("{file} row {row}: invalid id '{id}' (expected lowercase words separated by hyphens)")]
    InvalidId {
        file: &'static str,
        row: usize,
        id: String,
    },

    #[error("{file} row {row}: duplicate id '{id}'")]
    DuplicateId {
        file: &'static str,
        row: usize,
        id: String,
    },

    #[error("{file} row {row}: price of '{id}' must be non-negative, got {price}")]
    NegativePrice {
        file: &'static str,
        row: usize,
        id: String,
        price: Decimal,
    },

    #[error("{file} row {row}: multiplier of '{id}' must be positive, got {multiplier}")]
    InvalidMultiplier {
        file: &'static str,
        row: usize,
        id: String,
        multiplier: Decimal,
    },

    #[error("{file} row {row}: unknown timeline '{id}' (expected rush, standard or flexible)")]
    UnknownTimeline {
        file: &'static str,
        row: usize,
        id: String,
    },
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct ServiceRecord {
    id: String,
    name: String,
    base_price: Decimal,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct IndustryRecord {
    id: String,
    name: String,
    multiplier: Decimal,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct FeatureRecord {
    id: String,
    name: String,
    price: Decimal,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct TimelineRecord {
    id: String,
    name: String,
    multiplier: Decimal,
}

/// Tracks ids already seen in one file and checks their shape.
struct IdCheck {
    file: &'static str,
    seen: HashSet<String>,
}

impl IdCheck {
    fn new(file: &'static str) -> Self {
        Self {
            file,
            seen: HashSet::new(),
        }
    }

    fn check(
        &mut self,
        row: usize,
        id: &str,
    ) -> Result<(), CatalogLoaderError> {
        if !ID_PATTERN.is_match(id) {
            return Err(CatalogLoaderError::InvalidId {
                file: self.file,
                row,
                id: id.to_string(),
            });
        }
        if !self.seen.insert(id.to_string()) {
            return Err(CatalogLoaderError::DuplicateId {
                file: self.file,
                row,
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

fn check_price(
    file: &'static str,
    row: usize,
    id: &str,
    price: Decimal,
) -> Result<(), CatalogLoaderError> {
    if price < Decimal::ZERO {
        return Err(CatalogLoaderError::NegativePrice {
            file,
            row,
            id: id.to_string(),
            price,
        });
    }
    Ok(())
}

fn check_multiplier(
    file: &'static str,
    row: usize,
    id: &str,
    multiplier: Decimal,
) -> Result<(), CatalogLoaderError> {
    if multiplier <= Decimal::ZERO {
        return Err(CatalogLoaderError::InvalidMultiplier {
            file,
            row,
            id: id.to_string(),
            multiplier,
        });
    }
    Ok(())
}

/// Deserializes every record of a CSV file, trimming surrounding whitespace.
fn read_records<R: Read, T: DeserializeOwned>(
    reader: R,
    file: &'static str,
) -> Result<Vec<T>, CatalogLoaderError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|e| CatalogLoaderError::CsvParse {
            file,
            message: e.to_string(),
        })
}

fn open(path: &Path) -> Result<File, CatalogLoaderError> {
    File::open(path).map_err(|source| CatalogLoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loader for catalog data from CSV files.
///
/// Loading is strict: a malformed catalog is rejected as a whole rather than
/// partially applied.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parse service options from a CSV reader.
    pub fn parse_services<R: Read>(reader: R) -> Result<Vec<ServiceOption>, CatalogLoaderError> {
        let records: Vec<ServiceRecord> = read_records(reader, SERVICES_FILE)?;
        let mut ids = IdCheck::new(SERVICES_FILE);

        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let row = index + 1;
                ids.check(row, &record.id)?;
                check_price(SERVICES_FILE, row, &record.id, record.base_price)?;
                Ok(ServiceOption {
                    id: record.id,
                    name: record.name,
                    base_price: record.base_price,
                    description: record.description,
                })
            })
            .collect()
    }

    /// Parse industry profiles from a CSV reader.
    pub fn parse_industries<R: Read>(
        reader: R
    ) -> Result<Vec<IndustryProfile>, CatalogLoaderError> {
        let records: Vec<IndustryRecord> = read_records(reader, INDUSTRIES_FILE)?;
        let mut ids = IdCheck::new(INDUSTRIES_FILE);

        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let row = index + 1;
                ids.check(row, &record.id)?;
                check_multiplier(INDUSTRIES_FILE, row, &record.id, record.multiplier)?;
                Ok(IndustryProfile {
                    id: record.id,
                    name: record.name,
                    multiplier: record.multiplier,
                    description: record.description,
                })
            })
            .collect()
    }

    /// Parse add-on features from a CSV reader.
    pub fn parse_features<R: Read>(reader: R) -> Result<Vec<FeatureOption>, CatalogLoaderError> {
        let records: Vec<FeatureRecord> = read_records(reader, FEATURES_FILE)?;
        let mut ids = IdCheck::new(FEATURES_FILE);

        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let row = index + 1;
                ids.check(row, &record.id)?;
                check_price(FEATURES_FILE, row, &record.id, record.price)?;
                Ok(FeatureOption {
                    id: record.id,
                    name: record.name,
                    price: record.price,
                    description: record.description,
                })
            })
            .collect()
    }

    /// Parse timeline options from a CSV reader.
    pub fn parse_timelines<R: Read>(reader: R) -> Result<Vec<TimelineOption>, CatalogLoaderError> {
        let records: Vec<TimelineRecord> = read_records(reader, TIMELINES_FILE)?;
        let mut ids = IdCheck::new(TIMELINES_FILE);

        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let row = index + 1;
                ids.check(row, &record.id)?;
                let code = TimelineCode::parse(&record.id).ok_or_else(|| {
                    CatalogLoaderError::UnknownTimeline {
                        file: TIMELINES_FILE,
                        row,
                        id: record.id.clone(),
                    }
                })?;
                check_multiplier(TIMELINES_FILE, row, &record.id, record.multiplier)?;
                Ok(TimelineOption {
                    code,
                    label: record.name,
                    multiplier: record.multiplier,
                })
            })
            .collect()
    }

    /// Load a complete catalog from the CSV files in `dir`.
    ///
    /// `services.csv`, `industries.csv` and `features.csv` are required;
    /// `timelines.csv` falls back to [`Catalog::standard_timelines`].
    pub fn load_dir(dir: &Path) -> Result<Catalog, CatalogLoaderError> {
        debug!(dir = %dir.display(), "loading catalog");

        let services = Self::parse_services(open(&dir.join(SERVICES_FILE))?)?;
        let industries = Self::parse_industries(open(&dir.join(INDUSTRIES_FILE))?)?;
        let features = Self::parse_features(open(&dir.join(FEATURES_FILE))?)?;

        let timelines_path = dir.join(TIMELINES_FILE);
        let timelines = if timelines_path.is_file() {
            Self::parse_timelines(open(&timelines_path)?)?
        } else {
            debug!(path = %timelines_path.display(), "no timelines file, using standard timelines");
            Catalog::standard_timelines()
        };

        info!(
            services = services.len(),
            industries = industries.len(),
            features = features.len(),
            timelines = timelines.len(),
            "catalog loaded from {}",
            dir.display()
        );

        Ok(Catalog {
            services,
            industries,
            features,
            timelines,
        })
    }
}
