// crates/countrydata-core/src/model/dataset.rs
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// The dataset written to disk: country records plus version metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub countries: Vec<CountryRecord>,
    pub metadata: Metadata,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// `YYYY-MM-DD`
    pub last_updated: String,
    /// Decimal with one fractional digit, e.g. "2.1".
    pub version: String,
    pub sources: Vec<String>,
}

/// A country entry in the curated dataset, keyed by `ISO_A3`.
///
/// List-valued fields (`languages`, `currencies`, ...) are stored as
/// comma-joined strings; an absent list is the empty string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    #[serde(rename = "ISO_A3")]
    pub iso_a3: String,
    #[serde(rename = "ISO_A2", default, skip_serializing_if = "Option::is_none")]
    pub iso_a2: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_name: Option<String>,
    pub population: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    pub languages: String,
    pub currencies: String,
    pub timezones: String,
    pub continents: String,
    pub borders: String,
    pub capital: String,
    pub region: String,
    pub subregion: String,
    pub flag: Flag,
    pub driving_side: String,
    pub un_member: bool,
    pub independence_status: IndependenceStatus,
    /// Locally curated data. Never sourced from upstream.
    #[serde(default)]
    pub custom_data: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flag {
    /// PNG image URL.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg_url: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

/// Serialized as `true`, `false` or the string `"Unknown"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndependenceStatus {
    Independent,
    Dependent,
    Unknown,
}

pub const UNKNOWN_STATUS: &str = "Unknown";

impl From<Option<bool>> for IndependenceStatus {
    fn from(v: Option<bool>) -> Self {
        match v {
            Some(true) => Self::Independent,
            Some(false) => Self::Dependent,
            None => Self::Unknown,
        }
    }
}

impl Serialize for IndependenceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Independent => serializer.serialize_bool(true),
            Self::Dependent => serializer.serialize_bool(false),
            Self::Unknown => serializer.serialize_str(UNKNOWN_STATUS),
        }
    }
}

impl<'de> Deserialize<'de> for IndependenceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Flag(b) => Ok(Some(b).into()),
            Repr::Text(s) if s == UNKNOWN_STATUS => Ok(Self::Unknown),
            Repr::Text(s) => Err(serde::de::Error::custom(format!(
                "expected a boolean or \"{UNKNOWN_STATUS}\", found {s:?}"
            ))),
        }
    }
}

impl Dataset {
    /// All countries, in upstream order.
    pub fn countries(&self) -> &[CountryRecord] {
        &self.countries
    }

    /// Find a country by ISO3 code, case-insensitive (e.g. "USA", "deu").
    pub fn find_country(&self, iso3: &str) -> Option<&CountryRecord> {
        self.countries
            .iter()
            .find(|c| c.iso_a3.eq_ignore_ascii_case(iso3))
    }
}
