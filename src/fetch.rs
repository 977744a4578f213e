use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};

/// Blocking GET of the search results page. Any transport error or
/// non-success status is fatal.
pub fn fetch_page(url: &str) -> Result<String> {
    info!("Fetching search results: {}", url);
    let http = |source| Error::Http {
        url: url.to_string(),
        source,
    };
    let body = reqwest::blocking::get(url)
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.text())
        .map_err(http)?;
    info!(bytes = body.len(), "fetched search results");
    Ok(body)
}

/// Read a previously saved results page instead of hitting the network.
pub fn read_page(path: &Path) -> Result<String> {
    info!("Reading saved page: {}", path.display());
    Ok(std::fs::read_to_string(path)?)
}
