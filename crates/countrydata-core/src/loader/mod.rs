// crates/countrydata-core/src/loader/mod.rs

//! # Data Loader
//!
//! The two boundary collaborators of a refresh: the JSON file on disk
//! ([`DatasetStore`]) and the upstream provider ([`UpstreamSource`]).

mod store;
pub use store::DatasetStore;

mod fetch;
pub use fetch::UpstreamSource;
#[cfg(feature = "fetch")]
pub use fetch::RestCountriesClient;

use std::path::PathBuf;
use std::time::Duration;

pub const REST_COUNTRIES_URL: &str = "https://restcountries.com/v3.1/all";
pub const DEFAULT_DATA_FILE: &str = "data/countryData.json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}
