use super::dom::{ClassMatcher, Document, Node};
use crate::error::Result;
use crate::settings::Settings;

/// One listing as found on the page, before any type coercion.
/// `None` marks a field the container did not carry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawListing {
    pub name: Option<String>,
    pub link: Option<String>,
    pub price: Option<String>,
    pub date_sold: Option<String>,
    pub has_excluded_marker: bool,
}

/// Matchers and prefixes compiled once from the settings.
pub struct Extractor {
    container: ClassMatcher,
    title: ClassMatcher,
    link: ClassMatcher,
    price: ClassMatcher,
    date_sold: ClassMatcher,
    excluded_marker: ClassMatcher,
    currency_prefix: String,
    sold_prefix: String,
}

impl Extractor {
    pub fn new(settings: &Settings) -> Result<Self> {
        let sel = &settings.selectors;
        Ok(Extractor {
            container: ClassMatcher::new(&sel.container)?,
            title: ClassMatcher::new(&sel.title)?,
            link: ClassMatcher::new(&sel.link)?,
            price: ClassMatcher::new(&sel.price)?,
            date_sold: ClassMatcher::new(&sel.date_sold)?,
            excluded_marker: ClassMatcher::classes(&settings.excluded_marker_class)?,
            currency_prefix: settings.currency_prefix.clone(),
            sold_prefix: settings.sold_prefix.clone(),
        })
    }

    pub fn container_css(&self) -> &str {
        self.container.css()
    }

    /// One record per container, however many of its fields are missing.
    pub fn extract(&self, doc: &Document) -> Vec<RawListing> {
        doc.find_all(&self.container)
            .into_iter()
            .map(|container| self.extract_one(container))
            .collect()
    }

    fn extract_one(&self, container: Node<'_>) -> RawListing {
        let name = container.find_first(&self.title).map(|n| n.text());
        let link = container
            .find_first(&self.link)
            .and_then(|n| n.attr("href"))
            .map(str::to_string);
        let price = container
            .find_first(&self.price)
            .map(|n| strip_prefix(&n.text(), &self.currency_prefix));
        let date_sold = container
            .find_first(&self.date_sold)
            .map(|n| strip_prefix(&n.text(), &self.sold_prefix));

        RawListing {
            name,
            link,
            price,
            date_sold,
            has_excluded_marker: container.contains(&self.excluded_marker),
        }
    }
}

/// Remove `prefix` only when the text starts with exactly that string.
fn strip_prefix(text: &str, prefix: &str) -> String {
    text.strip_prefix(prefix).unwrap_or(text).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> Vec<RawListing> {
        let extractor = Extractor::new(&Settings::default()).unwrap();
        extractor.extract(&Document::parse(html))
    }

    #[test]
    fn full_container() {
        let rows = extract(
            r#"<ul><li><div class="s-item__wrapper clearfix">
                <a class="s-item__link" href="https://www.ebay.com.au/itm/1">
                  <div class="s-item__title"><span>PSA 10 Sylveon   212/203</span></div>
                </a>
                <span class="s-item__price">AU $1,234.00</span>
                <span class="s-item__caption--signal POSITIVE"><span>Sold  10 Jan 2024</span></span>
            </div></li></ul>"#,
        );
        assert_eq!(rows.len(), 1);
        let r = &rows[0];
        assert_eq!(r.name.as_deref(), Some("PSA 10 Sylveon 212/203"));
        assert_eq!(r.link.as_deref(), Some("https://www.ebay.com.au/itm/1"));
        assert_eq!(r.price.as_deref(), Some("1,234.00"));
        assert_eq!(r.date_sold.as_deref(), Some("10 Jan 2024"));
        assert!(!r.has_excluded_marker);
    }

    #[test]
    fn missing_title_is_none() {
        let rows = extract(
            r#"<div class="s-item__wrapper clearfix"><span class="s-item__price">AU $5.00</span></div>"#,
        );
        assert_eq!(rows[0].name, None);
        assert_eq!(rows[0].price.as_deref(), Some("5.00"));
    }

    #[test]
    fn empty_container_still_yields_a_record() {
        let rows = extract(
            r#"<div class="s-item__wrapper clearfix"></div>
               <div class="s-item__wrapper clearfix"><span class="s-item__location">from Japan</span></div>"#,
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], RawListing::default());
        assert!(rows[1].has_excluded_marker);
        assert_eq!(rows[1].name, None);
    }

    #[test]
    fn link_without_href() {
        let rows = extract(
            r#"<div class="s-item__wrapper clearfix"><a class="s-item__link">x</a></div>"#,
        );
        assert_eq!(rows[0].link, None);
    }

    #[test]
    fn currency_prefix_is_exact() {
        assert_eq!(strip_prefix("AU $120.00", "AU $"), "120.00");
        // character-class stripping would eat the leading "U" here
        assert_eq!(strip_prefix("US $5.00", "AU $"), "US $5.00");
        assert_eq!(strip_prefix("Sold 1 Feb 2024", "Sold "), "1 Feb 2024");
    }

    #[test]
    fn only_wrapper_signature_counts_as_container() {
        let rows = extract(
            r#"<div class="s-item__wrapper"><span class="s-item__title">no clearfix</span></div>
               <div class="clearfix s-item__wrapper"><span class="s-item__title">order free</span></div>"#,
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name.as_deref(), Some("order free"));
    }
}
