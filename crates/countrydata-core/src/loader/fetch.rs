// crates/countrydata-core/src/loader/fetch.rs
use crate::error::FetchError;
use crate::model::UpstreamSnapshot;

/// Where the fresh country list comes from.
///
/// The refresh pipeline only needs one blocking call; the HTTP client below is
/// the production implementation, tests plug in canned snapshots.
pub trait UpstreamSource {
    /// Human-readable origin, used in logs.
    fn origin(&self) -> &str;

    fn fetch(&self) -> Result<UpstreamSnapshot, FetchError>;
}

#[cfg(feature = "fetch")]
pub use client::RestCountriesClient;

#[cfg(feature = "fetch")]
mod client {
    use super::UpstreamSource;
    use crate::error::FetchError;
    use crate::model::UpstreamSnapshot;
    use reqwest::blocking::Client;
    use std::time::Duration;
    use tracing::debug;

    /// Blocking HTTP client for the RestCountries `/all` endpoint.
    #[derive(Debug, Clone)]
    pub struct RestCountriesClient {
        url: String,
        client: Client,
    }

    impl RestCountriesClient {
        pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
            let url = url.into();
            let client = Client::builder()
                .timeout(timeout)
                .user_agent(concat!("countrydata/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| FetchError::Transport {
                    url: url.clone(),
                    source: Box::new(e),
                })?;
            Ok(Self { url, client })
        }

        pub fn with_client(url: impl Into<String>, client: Client) -> Self {
            Self {
                url: url.into(),
                client,
            }
        }
    }

    impl UpstreamSource for RestCountriesClient {
        fn origin(&self) -> &str {
            &self.url
        }

        fn fetch(&self) -> Result<UpstreamSnapshot, FetchError> {
            debug!(url = %self.url, "fetching upstream snapshot");

            let response = self
                .client
                .get(&self.url)
                .send()
                .map_err(|e| FetchError::Transport {
                    url: self.url.clone(),
                    source: Box::new(e),
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url: self.url.clone(),
                    status: status.as_u16(),
                });
            }

            let snapshot: UpstreamSnapshot =
                serde_json::from_reader(response).map_err(|e| FetchError::Decode {
                    url: self.url.clone(),
                    source: e,
                })?;

            debug!(url = %self.url, countries = snapshot.len(), "fetched upstream snapshot");
            Ok(snapshot)
        }
    }
}
