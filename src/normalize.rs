use std::fmt;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::parser::extract::RawListing;
use crate::settings::{MissingPolicy, Settings};

const MISSING: &str = "N/A";

/// A fully typed listing row.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub name: String,
    pub link: Option<String>,
    pub price: f64,
    pub date_sold: NaiveDate,
}

/// Columnar table of normalized listings. Rows only enter through `push`,
/// so all columns stay the same length and index-aligned.
#[derive(Debug, Default)]
pub struct PriceTable {
    names: Vec<String>,
    links: Vec<Option<String>>,
    prices: Vec<f64>,
    dates: Vec<NaiveDate>,
    hyperlinks: Vec<String>,
}

impl PriceTable {
    fn push(&mut self, row: Listing) {
        self.hyperlinks.push(hyperlink(row.link.as_deref(), &row.name));
        self.names.push(row.name);
        self.links.push(row.link);
        self.prices.push(row.price);
        self.dates.push(row.date_sold);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn links(&self) -> &[Option<String>] {
        &self.links
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn hyperlinks(&self) -> &[String] {
        &self.hyperlinks
    }

    pub fn max_price(&self) -> Option<f64> {
        self.prices.iter().copied().reduce(f64::max)
    }
}

impl fmt::Display for PriceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>3} | {:<10} | {:>10} | {:<48} | {:<60} | {}",
            "#", "Date Sold", "Price", "Name", "Hyperlink", "Link"
        )?;
        writeln!(f, "{}", "-".repeat(160))?;
        for i in 0..self.len() {
            writeln!(
                f,
                "{:>3} | {:<10} | {:>10} | {:<48} | {:<60} | {}",
                i + 1,
                self.dates[i].format("%Y-%m-%d").to_string(),
                format!("${:.2}", self.prices[i]),
                truncate(&self.names[i], 48),
                truncate(&self.hyperlinks[i], 60),
                self.links[i].as_deref().unwrap_or(MISSING),
            )?;
        }
        write!(f, "{} listings", self.len())
    }
}

/// Coerce prices and dates, apply the missing-value policy, sort by sale
/// date and build the final table.
pub fn normalize(listings: Vec<RawListing>, settings: &Settings) -> Result<PriceTable> {
    let mut rows = Vec::with_capacity(listings.len());
    for (index, raw) in listings.into_iter().enumerate() {
        match to_row(index, raw, &settings.date_format) {
            Ok(row) => rows.push(row),
            Err(e) if settings.missing == MissingPolicy::Drop => {
                warn!(error = %e, "dropping listing");
            }
            Err(e) => return Err(e),
        }
    }

    // stable: listings sold on the same day keep page order
    rows.sort_by_key(|r| r.date_sold);

    let mut table = PriceTable::default();
    for row in rows {
        table.push(row);
    }
    debug!(rows = table.len(), "normalized listings");
    Ok(table)
}

fn to_row(index: usize, raw: RawListing, date_format: &str) -> Result<Listing> {
    let name = raw.name.unwrap_or_else(|| MISSING.to_string());

    let price_text = raw.price.ok_or_else(|| Error::MissingField {
        index,
        name: name.clone(),
        field: "price",
    })?;
    let price = parse_price(&price_text).map_err(|source| Error::Price {
        index,
        name: name.clone(),
        text: price_text.clone(),
        source,
    })?;

    let date_text = raw.date_sold.ok_or_else(|| Error::MissingField {
        index,
        name: name.clone(),
        field: "sale date",
    })?;
    let date_sold = parse_sold_date(&date_text, date_format).map_err(|source| Error::Date {
        index,
        name: name.clone(),
        text: date_text.clone(),
        source,
    })?;

    Ok(Listing {
        name,
        link: raw.link,
        price,
        date_sold,
    })
}

/// Drop thousands separators and parse, e.g. `"1,234.00"` → `1234.0`.
pub fn parse_price(text: &str) -> std::result::Result<f64, std::num::ParseFloatError> {
    text.replace(',', "").trim().parse()
}

pub fn parse_sold_date(text: &str, format: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text.trim(), format)
}

/// Hover label linking back to the listing.
pub fn hyperlink(link: Option<&str>, name: &str) -> String {
    let name = escape_html(name);
    match link {
        Some(href) => format!(
            r#"<a href="{}" target="_blank" style="color: black">{}</a>"#,
            escape_html(href),
            name
        ),
        None => name,
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}
