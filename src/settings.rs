use std::path::Path;

use config::Config;
use serde::Deserialize;

use crate::error::Result;

const ENV_PREFIX: &str = "SOLD_TREND";

/// What the normalizer does with a row whose price or sale date is
/// absent or cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Skip the row and log a warning.
    #[default]
    Drop,
    /// Abort the run on the first bad row.
    Fail,
}

/// Tag name (optional) plus the classes an element must all carry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub tag: Option<String>,
    pub classes: Vec<String>,
}

impl Signature {
    pub fn classes(classes: &str) -> Self {
        Signature {
            tag: None,
            classes: classes.split_whitespace().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub container: Signature,
    pub title: Signature,
    pub link: Signature,
    pub price: Signature,
    pub date_sold: Signature,
}

impl Default for Selectors {
    fn default() -> Self {
        Selectors {
            container: Signature::classes("s-item__wrapper clearfix"),
            title: Signature::classes("s-item__title"),
            link: Signature::classes("s-item__link"),
            price: Signature::classes("s-item__price"),
            date_sold: Signature::classes("s-item__caption--signal POSITIVE"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search_url: String,
    pub chart_title: String,
    pub required_substrings: Vec<String>,
    pub excluded_marker_class: String,
    pub currency_prefix: String,
    pub sold_prefix: String,
    pub date_format: String,
    pub missing: MissingPolicy,
    pub tick_spacing: f64,
    pub selectors: Selectors,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            search_url: "https://www.ebay.com.au/sch/i.html?_from=R40&_nkw=pokemon+sylveon+212%2F203&_sacat=0&LH_Sold=1&LH_Complete=1&LH_PrefLoc=1&rt=nc&LH_All=1".into(),
            chart_title: "Price trend for Sylveon 212/203".into(),
            required_substrings: vec!["psa 10".into(), "sylveon".into(), "212/203".into()],
            excluded_marker_class: "s-item__location".into(),
            currency_prefix: "AU $".into(),
            sold_prefix: "Sold ".into(),
            date_format: "%d %b %Y".into(),
            missing: MissingPolicy::default(),
            tick_spacing: 20.0,
            selectors: Selectors::default(),
        }
    }
}

/// Layer built-in defaults, an optional settings file, then `SOLD_TREND_*`
/// environment variables.
pub fn load(file: Option<&Path>) -> Result<Settings> {
    let mut builder = Config::builder();
    if let Some(path) = file {
        builder = builder.add_source(config::File::from(path));
    }
    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("required_substrings")
                .with_list_parse_key("selectors.container.classes")
                .with_list_parse_key("selectors.title.classes")
                .with_list_parse_key("selectors.link.classes")
                .with_list_parse_key("selectors.price.classes")
                .with_list_parse_key("selectors.date_sold.classes")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;
    Ok(settings)
}
