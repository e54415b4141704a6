//! update-country-data: refresh the local country dataset
//!
//! Loads the existing dataset, fetches every country from RestCountries,
//! re-maps the upstream fields while keeping each record's `customData`, bumps
//! `metadata.version` by 0.1 and overwrites the file.
//!
//! Usage
//! -----
//!
//! - Refresh `data/countryData.json` against the public API
//!   $ update-country-data
//!
//! - Point at another file or endpoint
//!   $ update-country-data --data-file ./countries.json --api-url http://localhost:8080/all
//!
//! On any failure the error is logged, the dataset stays as it was, and the
//! process exits with a nonzero status.
mod args;

use crate::args::CliArgs;
use anyhow::Context;
use clap::Parser;
use countrydata_core::{refresh, RefreshReport};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = CliArgs::parse();

    match run(args) {
        Ok(report) => {
            tracing::info!(
                "Country data updated successfully ({} countries, version {} -> {})",
                report.countries,
                report.previous_version,
                report.version
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Error updating country data: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> anyhow::Result<RefreshReport> {
    let config = args.into_config();
    let store = config.store();
    let client = config.client().context("could not set up HTTP client")?;

    refresh(&store, &client)
        .with_context(|| format!("refresh of {} aborted", store.path().display()))
}
