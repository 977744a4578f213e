use tracing::debug;

use crate::parser::extract::RawListing;

const MISSING_NAME: &str = "n/a";

/// Keeps listings whose lower-cased name contains every required substring
/// and whose container carries no excluded marker.
pub struct RelevanceFilter {
    required: Vec<String>,
}

impl RelevanceFilter {
    pub fn new<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        RelevanceFilter {
            required: required
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn is_relevant(&self, listing: &RawListing) -> bool {
        if listing.has_excluded_marker {
            return false;
        }
        let name = listing
            .name
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_else(|| MISSING_NAME.to_string());
        self.required.iter().all(|needle| name.contains(needle.as_str()))
    }

    pub fn apply(&self, listings: Vec<RawListing>) -> Vec<RawListing> {
        let total = listings.len();
        let kept: Vec<_> = listings
            .into_iter()
            .filter(|l| self.is_relevant(l))
            .collect();
        debug!(total, kept = kept.len(), "relevance filter");
        kept
    }
}
