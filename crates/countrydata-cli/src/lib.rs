//! countrydata-cli
//! ===============
//!
//! Command-line front end for `countrydata-core`.
//!
//! This crate primarily provides a binary (`update-country-data`). The small
//! library target exists so that docs.rs renders this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! update-country-data
//! update-country-data --data-file data/countryData.json
//! RUST_LOG=debug update-country-data
//! ```
//!
//! For programmatic access to the merge and the dataset types, use the
//! [`countrydata-core`] crate directly.
//!
//! Links
//! -----
//! - Repository: <https://github.com/holg/countrydata-rs>
//!
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable.
