//! # mtrack-cli -- Command-line front end for the milestone tracker
//!
//! Provides the `mtrack` binary. Every page of the tracker is reachable by
//! its view path, and the commands that change data go through the same
//! stores the views read.
//!
//! ```bash
//! mtrack view /
//! mtrack view /chart
//! mtrack schedule --sale 4
//! mtrack assign --sale 4 --structure 2
//! mtrack create structure --file structure.json
//! mtrack update sale 4 --file sale.json
//! mtrack delete project 7
//! mtrack preview --structure 2 --total 50000 --start 2024-03-01
//! ```
//!
//! The API root comes from `--api-base`, then `MTRACK_API_BASE_URL`, then
//! `http://localhost:8000/api`.

pub mod commands;
pub mod route;
pub mod views;

use mtrack_client::{ApiError, TrackerClient, TrackerConfig};
use mtrack_store::AppStores;

/// Build the application stores from the environment and an optional
/// `--api-base` override.
pub fn build_stores(api_base: Option<&str>) -> Result<AppStores, ApiError> {
    let mut config = TrackerConfig::from_env()?;
    if let Some(raw) = api_base {
        config = config.with_base_url(raw)?;
    }
    let client = TrackerClient::new(config)?;
    Ok(AppStores::new(&client))
}
