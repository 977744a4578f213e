pub mod dom;
pub mod extract;

use tracing::debug;

use crate::error::Result;
use crate::settings::Settings;
use dom::Document;
use extract::{Extractor, RawListing};

/// Markup → document tree → one raw record per listing container.
pub fn process_page(markup: &str, settings: &Settings) -> Result<Vec<RawListing>> {
    let extractor = Extractor::new(settings)?;
    let doc = Document::parse(markup);
    let listings = extractor.extract(&doc);
    debug!(
        selector = extractor.container_css(),
        containers = listings.len(),
        "extracted listing containers"
    );
    Ok(listings)
}
