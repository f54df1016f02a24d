//! Fixtures
//!
//! Facility catalogs described in YAML, under `<base>/facilities/<name>.yml`.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{CatalogError, Facility},
    customers::{CustomerClass, CustomerClassError},
};

pub mod facilities;

pub use facilities::{FacilityFixture, parse_currency, parse_rate};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,

        /// Underlying IO error
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid rate format
    #[error("Invalid rate format: {0}")]
    InvalidRate(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between a rate and its facility
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Unknown customer class label
    #[error(transparent)]
    Customer(#[from] CustomerClassError),

    /// Two labels in one price table name the same customer class
    #[error("customer class {class} is priced twice, as {first:?} and {second:?}")]
    DuplicateClass {
        /// The class both labels resolve to
        class: CustomerClass,

        /// Label seen first
        first: String,

        /// Label that clashed with it
        second: String,
    },

    /// Facility not loaded
    #[error("Facility not found: {0}")]
    FacilityNotFound(String),

    /// Catalog assembly error
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Loaded facilities, keyed by fixture name
    facilities: FxHashMap<String, Facility>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            facilities: FxHashMap::default(),
        }
    }

    /// Load a facility from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if its rates
    /// or catalog are invalid.
    pub fn load_facility(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self
            .base_path
            .join("facilities")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path).map_err(|source| FixtureError::Io {
            path: file_path.clone(),
            source,
        })?;

        let fixture: FacilityFixture = serde_norway::from_str(&contents)?;
        let facility = Facility::try_from(fixture)?;

        debug!(
            fixture = name,
            facility = facility.name(),
            items = facility.catalog().len(),
            "loaded facility fixture"
        );

        self.facilities.insert(name.to_string(), facility);

        Ok(self)
    }

    /// Load a single facility fixture from the default base path
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_facility(name)?;

        Ok(fixture)
    }

    /// Get a loaded facility by fixture name
    ///
    /// # Errors
    ///
    /// Returns an error if the facility has not been loaded.
    pub fn facility(&self, name: &str) -> Result<&Facility, FixtureError> {
        self.facilities
            .get(name)
            .ok_or_else(|| FixtureError::FacilityNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn loads_facility_from_base_path() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::create_dir_all(dir.path().join("facilities"))?;
        fs::write(
            dir.path().join("facilities").join("studio.yml"),
            "name: Studio\ncurrency: GBP\nrooms:\n  booth:\n    name: Booth\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_facility("studio")?;

        let facility = fixture.facility("studio")?;

        assert_eq!(facility.name(), "Studio");
        assert!(facility.catalog().contains("booth"));

        Ok(())
    }

    #[test]
    fn missing_file_reports_path() {
        let mut fixture = Fixture::with_base_path("/nonexistent");

        let result = fixture.load_facility("nowhere");

        assert!(matches!(
            result,
            Err(FixtureError::Io { path, .. }) if path.ends_with("facilities/nowhere.yml")
        ));
    }

    #[test]
    fn unloaded_facility_is_not_found() {
        let fixture = Fixture::new();

        assert!(matches!(
            fixture.facility("grand-hall"),
            Err(FixtureError::FacilityNotFound(name)) if name == "grand-hall"
        ));
    }
}
