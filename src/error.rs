use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load settings")]
    Settings(#[from] config::ConfigError),

    #[error("invalid class name {0:?} in selector signature")]
    Signature(String),

    #[error("request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("listing {index} ({name}) has no {field}")]
    MissingField {
        index: usize,
        name: String,
        field: &'static str,
    },

    #[error("listing {index} ({name}): cannot parse price {text:?}")]
    Price {
        index: usize,
        name: String,
        text: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("listing {index} ({name}): cannot parse sale date {text:?}")]
    Date {
        index: usize,
        name: String,
        text: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
