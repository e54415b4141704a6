// crates/countrydata-core/src/refresh.rs

//! Load → fetch → merge → save.
//!
//! All mutation is confined to the first and last step. Every failure before
//! [`DatasetStore::save`] leaves the file exactly as it was.

use crate::error::Result;
use crate::loader::{self, DatasetStore, UpstreamSource};
use crate::merge::{self, merge_on};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Settings for one refresh run.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    pub data_file: PathBuf,
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            data_file: loader::default_data_file(),
            api_url: loader::REST_COUNTRIES_URL.to_string(),
            timeout: loader::DEFAULT_TIMEOUT,
        }
    }
}

impl RefreshConfig {
    pub fn store(&self) -> DatasetStore {
        DatasetStore::new(&self.data_file)
    }

    #[cfg(feature = "fetch")]
    pub fn client(&self) -> Result<loader::RestCountriesClient> {
        Ok(loader::RestCountriesClient::new(
            self.api_url.clone(),
            self.timeout,
        )?)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub path: PathBuf,
    pub countries: usize,
    pub previous_version: String,
    pub version: String,
    pub last_updated: String,
}

/// Refresh with today's local date.
pub fn refresh<S: UpstreamSource + ?Sized>(
    store: &DatasetStore,
    source: &S,
) -> Result<RefreshReport> {
    refresh_on(store, source, Local::now().date_naive())
}

pub fn refresh_on<S: UpstreamSource + ?Sized>(
    store: &DatasetStore,
    source: &S,
    today: NaiveDate,
) -> Result<RefreshReport> {
    let existing = store.load()?;

    // A bad version aborts before the network is touched.
    let previous_version = existing.metadata.version.clone();
    merge::next_version(&previous_version)?;

    debug!(origin = source.origin(), "requesting upstream data");
    let snapshot = source.fetch()?;

    let dataset = merge_on(&existing, snapshot, today)?;
    store.save(&dataset)?;

    let report = RefreshReport {
        path: store.path().to_path_buf(),
        countries: dataset.countries.len(),
        previous_version: match previous_version {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        },
        version: dataset.metadata.version,
        last_updated: dataset.metadata.last_updated,
    };
    info!(
        path = %report.path.display(),
        countries = report.countries,
        version = %report.version,
        "country data updated"
    );
    Ok(report)
}
