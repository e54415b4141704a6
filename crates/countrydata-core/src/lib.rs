// crates/countrydata-core/src/lib.rs

//! # countrydata-core
//!
//! Keeps a curated `countryData.json` in step with the RestCountries API.
//! Upstream fields are re-mapped on every run; each record's `customData`
//! survives untouched, and the dataset version moves up by 0.1.
//!
//! ```no_run
//! use countrydata_core::{refresh, RefreshConfig};
//!
//! # fn main() -> countrydata_core::Result<()> {
//! let config = RefreshConfig::default();
//! let report = refresh(&config.store(), &config.client()?)?;
//! println!("{} countries, version {}", report.countries, report.version);
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod loader;
pub mod merge;
pub mod model;
pub mod refresh;

// Re-exports
pub use crate::error::{FetchError, LoadError, MergeError, RefreshError, Result, WriteError};
pub use crate::loader::{DatasetStore, UpstreamSource};
#[cfg(feature = "fetch")]
pub use crate::loader::RestCountriesClient;
pub use crate::merge::{merge, merge_on, next_version};
pub use crate::model::{CountryRecord, Dataset, Flag, IndependenceStatus, Metadata, RawCountry, StoredDataset};
pub use crate::refresh::{refresh, refresh_on, RefreshConfig, RefreshReport};
