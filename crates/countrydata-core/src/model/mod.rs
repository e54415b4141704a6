// crates/countrydata-core/src/model/mod.rs
pub mod dataset;
pub mod raw;

pub use dataset::{CountryRecord, Dataset, Flag, IndependenceStatus, Metadata};
pub use raw::{RawCountry, StoredCountry, StoredDataset, StoredMetadata, UpstreamSnapshot};
