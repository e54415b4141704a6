use clap::Parser;
use countrydata_core::loader::{DEFAULT_DATA_FILE, DEFAULT_TIMEOUT, REST_COUNTRIES_URL};
use countrydata_core::RefreshConfig;
use std::path::PathBuf;
use std::time::Duration;

/// CLI arguments for update-country-data. All optional; no arguments means
/// the defaults below.
#[derive(Debug, Parser)]
#[command(
    name = "update-country-data",
    version,
    about = "Refresh the local country dataset from the RestCountries API"
)]
pub struct CliArgs {
    /// Dataset file to refresh in place
    #[arg(long = "data-file", env = "COUNTRY_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Upstream endpoint returning the full country list
    #[arg(long = "api-url", env = "COUNTRY_DATA_API_URL", default_value = REST_COUNTRIES_URL)]
    pub api_url: String,

    /// HTTP request timeout in seconds
    #[arg(long = "timeout-secs", env = "COUNTRY_DATA_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

impl CliArgs {
    pub fn into_config(self) -> RefreshConfig {
        RefreshConfig {
            data_file: self.data_file,
            api_url: self.api_url,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
