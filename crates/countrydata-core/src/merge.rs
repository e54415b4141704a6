// crates/countrydata-core/src/merge.rs

//! # Dataset Merger
//!
//! Pure transform from `(existing dataset, upstream snapshot)` to the new
//! dataset. Upstream fields replace everything except `customData`, which is
//! carried over by `ISO_A3`. No I/O happens here; the clock is passed in by
//! [`merge_on`].

use crate::error::MergeError;
use crate::model::raw::{RawCountry, StoredDataset};
use crate::model::{CountryRecord, Dataset, Flag, IndependenceStatus, Metadata};
use chrono::{Local, NaiveDate};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Sentinel for absent capital and driving side.
pub const NOT_AVAILABLE: &str = "N/A";
pub const DEFAULT_FLAG_DESCRIPTION: &str = "No description available";
pub const LIST_DELIMITER: &str = ",";
pub const SOURCE_NAME: &str = "RestCountries API";
pub const VERSION_STEP: f64 = 0.1;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Merge using today's local date.
pub fn merge(existing: &StoredDataset, upstream: Vec<RawCountry>) -> Result<Dataset, MergeError> {
    merge_on(existing, upstream, Local::now().date_naive())
}

/// Merge with an explicit `lastUpdated` date.
///
/// Fails on the first record missing a required field; no partial dataset is
/// ever returned.
pub fn merge_on(
    existing: &StoredDataset,
    upstream: Vec<RawCountry>,
    today: NaiveDate,
) -> Result<Dataset, MergeError> {
    let version = next_version(&existing.metadata.version)?;

    // First record wins when the stored file repeats a code.
    let mut custom_by_code: HashMap<&str, Option<&Map<String, Value>>> =
        HashMap::with_capacity(existing.countries.len());
    for c in &existing.countries {
        custom_by_code
            .entry(c.iso_a3.as_str())
            .or_insert(c.custom_data.as_ref());
    }

    let mut seen = HashSet::with_capacity(upstream.len());
    let mut countries = Vec::with_capacity(upstream.len());

    for (index, raw) in upstream.into_iter().enumerate() {
        let record = map_country(index, raw, &custom_by_code)?;
        if !seen.insert(record.iso_a3.clone()) {
            return Err(MergeError::DuplicateCode {
                code: record.iso_a3,
            });
        }
        countries.push(record);
    }

    debug!(
        countries = countries.len(),
        carried_over = custom_by_code.len(),
        %version,
        "merged upstream snapshot"
    );

    Ok(Dataset {
        countries,
        metadata: Metadata {
            last_updated: today.format(DATE_FORMAT).to_string(),
            version,
            sources: vec![SOURCE_NAME.to_string()],
        },
    })
}

/// Parse the stored version and add [`VERSION_STEP`], rendered with one
/// decimal digit ("1.2" -> "1.3").
pub fn next_version(current: &Value) -> Result<String, MergeError> {
    let parsed = match current {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };

    match parsed {
        // Past 2^53 or so the step vanishes and the version would stall.
        Some(v) if v.is_finite() && v + VERSION_STEP > v => {
            Ok(format!("{:.1}", v + VERSION_STEP))
        }
        _ => Err(MergeError::BadVersion {
            found: match current {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }),
    }
}

fn map_country(
    index: usize,
    raw: RawCountry,
    custom_by_code: &HashMap<&str, Option<&Map<String, Value>>>,
) -> Result<CountryRecord, MergeError> {
    let iso_a3 = present(raw.cca3).ok_or_else(|| MergeError::MissingField {
        country: format!("#{index}"),
        field: "cca3",
    })?;
    let missing = |field| MergeError::MissingField {
        country: iso_a3.clone(),
        field,
    };

    let (name, official_name) = match raw.name {
        Some(n) => (present(n.common), present(n.official)),
        None => (None, None),
    };
    let name = name.ok_or_else(|| missing("name.common"))?;
    let population = raw.population.ok_or_else(|| missing("population"))?;
    let flags = raw.flags.unwrap_or_default();
    let flag_url = present(flags.png).ok_or_else(|| missing("flags.png"))?;

    let custom_data = custom_by_code
        .get(iso_a3.as_str())
        .copied()
        .flatten()
        .cloned()
        .unwrap_or_default();

    Ok(CountryRecord {
        iso_a2: raw.cca2,
        name,
        official_name,
        population,
        area: raw.area,
        languages: join_values(raw.languages.as_ref(), |_, v| v.as_str()),
        currencies: join_values(raw.currencies.as_ref(), |code, v| {
            Some(v.get("name").and_then(Value::as_str).unwrap_or(code))
        }),
        timezones: join_list(raw.timezones),
        continents: join_list(raw.continents),
        borders: join_list(raw.borders),
        capital: raw
            .capital
            .and_then(|c| c.into_iter().next())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        region: raw.region.unwrap_or_default(),
        subregion: raw.subregion.unwrap_or_default(),
        flag: Flag {
            url: flag_url,
            svg_url: flags.svg,
            description: flags
                .alt
                .unwrap_or_else(|| DEFAULT_FLAG_DESCRIPTION.to_string()),
            emoji: raw.flag,
        },
        driving_side: raw
            .car
            .and_then(|c| c.side)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        un_member: raw.un_member.unwrap_or(false),
        independence_status: IndependenceStatus::from(raw.independent),
        custom_data,
        iso_a3,
    })
}

/// Required strings count as missing when empty.
fn present(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

fn join_list(items: Option<Vec<String>>) -> String {
    items.map(|v| v.join(LIST_DELIMITER)).unwrap_or_default()
}

/// Joins the values of a keyed upstream object in document order.
fn join_values<'a, F>(map: Option<&'a Map<String, Value>>, pick: F) -> String
where
    F: Fn(&'a str, &'a Value) -> Option<&'a str>,
{
    map.map(|m| {
        m.iter()
            .filter_map(|(k, v)| pick(k.as_str(), v))
            .collect::<Vec<_>>()
            .join(LIST_DELIMITER)
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn stored(value: Value) -> StoredDataset {
        serde_json::from_value(value).unwrap()
    }

    fn snapshot(value: Value) -> Vec<RawCountry> {
        serde_json::from_value(value).unwrap()
    }

    fn existing() -> StoredDataset {
        stored(json!({
            "countries": [
                { "ISO_A3": "USA", "name": "United States", "customData": { "note": "x", "rank": 3 } },
                { "ISO_A3": "FRA", "customData": { "visited": true } },
                { "ISO_A3": "ATA" }
            ],
            "metadata": { "lastUpdated": "2023-01-01", "version": "1.2", "sources": ["RestCountries API"] }
        }))
    }

    fn upstream() -> Vec<RawCountry> {
        snapshot(json!([
            {
                "cca3": "USA", "cca2": "US",
                "name": { "common": "United States", "official": "United States of America" },
                "population": 331000000,
                "area": 9372610.0,
                "languages": { "eng": "English" },
                "currencies": { "USD": { "name": "United States dollar", "symbol": "$" } },
                "timezones": ["UTC-12:00", "UTC-11:00"],
                "continents": ["North America"],
                "borders": ["CAN", "MEX"],
                "capital": ["Washington, D.C."],
                "region": "Americas",
                "subregion": "North America",
                "flags": { "png": "https://flagcdn.com/w320/us.png", "svg": "https://flagcdn.com/us.svg", "alt": "Stars and stripes" },
                "flag": "🇺🇸",
                "car": { "side": "right" },
                "unMember": true,
                "independent": true
            },
            {
                "cca3": "NZL",
                "name": { "common": "New Zealand" },
                "population": 5084300,
                "flags": { "png": "https://flagcdn.com/w320/nz.png" }
            },
            {
                "cca3": "FRA",
                "name": { "common": "France" },
                "population": 67391582,
                "languages": { "fra": "French" },
                "flags": { "png": "https://flagcdn.com/w320/fr.png" },
                "independent": false
            }
        ]))
    }

    #[test]
    fn maps_upstream_fields() {
        let ds = merge_on(&existing(), upstream(), day()).unwrap();
        let usa = ds.find_country("USA").unwrap();

        assert_eq!(usa.iso_a2.as_deref(), Some("US"));
        assert_eq!(usa.official_name.as_deref(), Some("United States of America"));
        assert_eq!(usa.population, 331_000_000);
        assert_eq!(usa.area, Some(9_372_610.0));
        assert_eq!(usa.languages, "English");
        assert_eq!(usa.currencies, "United States dollar");
        assert_eq!(usa.timezones, "UTC-12:00,UTC-11:00");
        assert_eq!(usa.borders, "CAN,MEX");
        assert_eq!(usa.capital, "Washington, D.C.");
        assert_eq!(usa.flag.svg_url.as_deref(), Some("https://flagcdn.com/us.svg"));
        assert_eq!(usa.flag.description, "Stars and stripes");
        assert_eq!(usa.flag.emoji.as_deref(), Some("🇺🇸"));
        assert_eq!(usa.driving_side, "right");
        assert!(usa.un_member);
        assert_eq!(usa.independence_status, IndependenceStatus::Independent);
    }

    #[test]
    fn absent_fields_get_sentinels() {
        let ds = merge_on(&existing(), upstream(), day()).unwrap();
        let nzl = ds.find_country("NZL").unwrap();

        assert_eq!(nzl.capital, NOT_AVAILABLE);
        assert_eq!(nzl.flag.description, DEFAULT_FLAG_DESCRIPTION);
        assert_eq!(nzl.driving_side, NOT_AVAILABLE);
        assert_eq!(nzl.languages, "");
        assert_eq!(nzl.currencies, "");
        assert_eq!(nzl.continents, "");
        assert_eq!(nzl.region, "");
        assert_eq!(nzl.subregion, "");
        assert_eq!(nzl.area, None);
        assert!(!nzl.un_member);
        assert_eq!(nzl.independence_status, IndependenceStatus::Unknown);
    }

    #[test]
    fn custom_data_is_carried_over_by_code() {
        let ds = merge_on(&existing(), upstream(), day()).unwrap();

        assert_eq!(
            Value::Object(ds.find_country("USA").unwrap().custom_data.clone()),
            json!({ "note": "x", "rank": 3 })
        );
        assert_eq!(
            Value::Object(ds.find_country("FRA").unwrap().custom_data.clone()),
            json!({ "visited": true })
        );
        assert!(ds.find_country("NZL").unwrap().custom_data.is_empty());
        // Dropped upstream: gone from the output.
        assert!(ds.find_country("ATA").is_none());
    }

    #[test]
    fn code_match_is_exact() {
        let prior = stored(json!({
            "countries": [{ "ISO_A3": "usa", "customData": { "note": "lowercase" } }],
            "metadata": { "version": "1.0" }
        }));
        let ds = merge_on(&prior, upstream(), day()).unwrap();
        assert!(ds.find_country("USA").unwrap().custom_data.is_empty());
    }

    #[test]
    fn repeated_stored_code_uses_first_record() {
        let prior = stored(json!({
            "countries": [
                { "ISO_A3": "USA", "customData": { "note": "first" } },
                { "ISO_A3": "USA", "customData": { "note": "second" } },
                { "ISO_A3": "FRA" },
                { "ISO_A3": "FRA", "customData": { "note": "later" } }
            ],
            "metadata": { "version": "1.0" }
        }));
        let ds = merge_on(&prior, upstream(), day()).unwrap();
        assert_eq!(
            Value::Object(ds.find_country("USA").unwrap().custom_data.clone()),
            json!({ "note": "first" })
        );
        assert!(ds.find_country("FRA").unwrap().custom_data.is_empty());
    }

    #[test]
    fn keeps_upstream_order() {
        let ds = merge_on(&existing(), upstream(), day()).unwrap();
        let codes: Vec<_> = ds.countries().iter().map(|c| c.iso_a3.as_str()).collect();
        assert_eq!(codes, ["USA", "NZL", "FRA"]);
    }

    #[test]
    fn merge_is_repeatable() {
        let first = merge_on(&existing(), upstream(), day()).unwrap();
        let second = merge_on(&existing(), upstream(), day()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn metadata_is_bumped() {
        let ds = merge_on(&existing(), upstream(), day()).unwrap();
        assert_eq!(ds.metadata.last_updated, "2024-03-09");
        assert_eq!(ds.metadata.version, "1.3");
        assert_eq!(ds.metadata.sources, vec![SOURCE_NAME.to_string()]);
    }

    #[test]
    fn next_version_adds_one_tenth() {
        assert_eq!(next_version(&json!("1.2")).unwrap(), "1.3");
        assert_eq!(next_version(&json!("2.0")).unwrap(), "2.1");
        assert_eq!(next_version(&json!("0.9")).unwrap(), "1.0");
        assert_eq!(next_version(&json!(" 3 ")).unwrap(), "3.1");
        assert_eq!(next_version(&json!(4.5)).unwrap(), "4.6");
        assert_eq!(next_version(&json!(7)).unwrap(), "7.1");
    }

    #[test]
    fn next_version_rejects_non_numbers() {
        for bad in [
            json!("v1"),
            json!(""),
            json!("NaN"),
            json!(null),
            json!(true),
            json!([1]),
            json!("1e17"),
            json!(1e300),
        ] {
            assert!(
                matches!(next_version(&bad), Err(MergeError::BadVersion { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn bad_version_fails_merge() {
        let prior = stored(json!({ "countries": [], "metadata": { "version": "draft" } }));
        assert_eq!(
            merge_on(&prior, upstream(), day()),
            Err(MergeError::BadVersion { found: "draft".into() })
        );
    }

    #[test]
    fn missing_code_fails_whole_merge() {
        let err = merge_on(&existing(), snapshot(json!([{}])), day()).unwrap_err();
        assert_eq!(
            err,
            MergeError::MissingField { country: "#0".into(), field: "cca3" }
        );
    }

    #[test]
    fn missing_required_fields_are_named() {
        let cases = [
            (json!({ "cca3": "AAA", "population": 1, "flags": { "png": "u" } }), "name.common"),
            (json!({ "cca3": "AAA", "name": { "common": "A" }, "flags": { "png": "u" } }), "population"),
            (json!({ "cca3": "AAA", "name": { "common": "A" }, "population": 1 }), "flags.png"),
            (json!({ "cca3": "AAA", "name": { "common": "A" }, "population": 1, "flags": { "svg": "u" } }), "flags.png"),
        ];
        for (raw, field) in cases {
            let mut records = upstream();
            records.push(serde_json::from_value(raw).unwrap());
            let err = merge_on(&existing(), records, day()).unwrap_err();
            assert_eq!(err, MergeError::MissingField { country: "AAA".into(), field });
        }
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let mut records = upstream();
        records.push(records[1].clone());
        assert_eq!(
            merge_on(&existing(), records, day()),
            Err(MergeError::DuplicateCode { code: "NZL".into() })
        );
    }
}
