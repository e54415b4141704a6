// crates/countrydata-core/src/model/raw.rs
use serde::Deserialize;
use serde_json::{Map, Value};

/// Raw country object as served by RestCountries v3.1.
///
/// Every field is optional: the payload is only loosely trusted, and the
/// merger checks the fields it needs itself. Unknown fields are ignored.
/// NOTE: This type mirrors the external API and is not part of the dataset
/// schema written to disk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCountry {
    #[serde(default)]
    pub cca3: Option<String>,
    #[serde(default)]
    pub cca2: Option<String>,
    #[serde(default)]
    pub name: Option<RawName>,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub area: Option<f64>,
    /// `{ "eng": "English", "spa": "Spanish" }`
    #[serde(default)]
    pub languages: Option<Map<String, Value>>,
    /// `{ "USD": { "name": "United States dollar", "symbol": "$" } }`
    #[serde(default)]
    pub currencies: Option<Map<String, Value>>,
    #[serde(default)]
    pub timezones: Option<Vec<String>>,
    #[serde(default)]
    pub continents: Option<Vec<String>>,
    #[serde(default)]
    pub borders: Option<Vec<String>>,
    #[serde(default)]
    pub capital: Option<Vec<String>>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub flags: Option<RawFlags>,
    /// Emoji glyph, e.g. "🇺🇸".
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub car: Option<RawCar>,
    #[serde(rename = "unMember", default)]
    pub un_member: Option<bool>,
    #[serde(default)]
    pub independent: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawName {
    #[serde(default)]
    pub common: Option<String>,
    #[serde(default)]
    pub official: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFlags {
    #[serde(default)]
    pub png: Option<String>,
    #[serde(default)]
    pub svg: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCar {
    #[serde(default)]
    pub side: Option<String>,
}

pub type UpstreamSnapshot = Vec<RawCountry>;

/// The dataset as found on disk before a refresh.
///
/// Only the parts the merger reads are typed; everything else in the file is
/// replaced wholesale by the new dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredDataset {
    pub countries: Vec<StoredCountry>,
    pub metadata: StoredMetadata,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoredCountry {
    #[serde(rename = "ISO_A3")]
    pub iso_a3: String,
    #[serde(rename = "customData", default)]
    pub custom_data: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoredMetadata {
    /// Kept untyped: a string ("1.2") and a number (1.2) are both accepted,
    /// anything else is reported by the merger as a bad version.
    #[serde(default)]
    pub version: Value,
}
