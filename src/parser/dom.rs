use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};
use crate::settings::Signature;

fn ident_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?[A-Za-z_][A-Za-z0-9_-]*$").unwrap())
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Structural predicate: optional tag name plus a set of classes that must
/// all be present on the element.
#[derive(Debug, Clone)]
pub struct ClassMatcher {
    selector: Selector,
    css: String,
}

impl ClassMatcher {
    pub fn new(signature: &Signature) -> Result<Self> {
        let mut css = String::new();
        if let Some(tag) = &signature.tag {
            if !ident_re().is_match(tag) {
                return Err(Error::Signature(tag.clone()));
            }
            css.push_str(tag);
        }
        for class in &signature.classes {
            if !ident_re().is_match(class) {
                return Err(Error::Signature(class.clone()));
            }
            css.push('.');
            css.push_str(class);
        }
        if css.is_empty() {
            return Err(Error::Signature(css));
        }
        let selector = Selector::parse(&css).map_err(|_| Error::Signature(css.clone()))?;
        Ok(ClassMatcher { selector, css })
    }

    /// Matcher for a space-separated class list, e.g. `"s-item__title"`.
    pub fn classes(classes: &str) -> Result<Self> {
        Self::new(&Signature::classes(classes))
    }

    pub fn css(&self) -> &str {
        &self.css
    }
}

/// Parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(markup: &str) -> Self {
        Document {
            html: Html::parse_document(markup),
        }
    }

    /// Every element matching `matcher`, in document order.
    pub fn find_all(&self, matcher: &ClassMatcher) -> Vec<Node<'_>> {
        self.html.select(&matcher.selector).map(Node).collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    /// First descendant matching `matcher`. The node itself is never a match.
    pub fn find_first(&self, matcher: &ClassMatcher) -> Option<Node<'a>> {
        self.0.select(&matcher.selector).next().map(Node)
    }

    pub fn contains(&self, matcher: &ClassMatcher) -> bool {
        self.find_first(matcher).is_some()
    }

    /// Text content with whitespace runs collapsed and trimmed.
    pub fn text(&self) -> String {
        let raw: String = self.0.text().collect();
        whitespace_re().replace_all(&raw, " ").trim().to_string()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }
}
