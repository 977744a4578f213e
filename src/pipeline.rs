use tracing::info;

use crate::error::Result;
use crate::filter::RelevanceFilter;
use crate::normalize::{normalize, PriceTable};
use crate::parser;
use crate::settings::Settings;

/// Extract → filter → normalize for one results page.
pub fn run(markup: &str, settings: &Settings) -> Result<PriceTable> {
    let listings = parser::process_page(markup, settings)?;
    let found = listings.len();

    let relevant = RelevanceFilter::new(&settings.required_substrings).apply(listings);
    let kept = relevant.len();

    let table = normalize(relevant, settings)?;
    info!(found, kept, rows = table.len(), "processed results page");
    Ok(table)
}
