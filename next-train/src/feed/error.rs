//! Feed error types.

use std::fmt;

/// Errors from fetching or interpreting the transit feed.
#[derive(Debug)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// Invalid API key or unauthorized
    Unauthorized,

    /// Rate limited by the API
    RateLimited,

    /// Response body is not well-formed XML
    Xml { message: String },

    /// An attribute is missing, or a different attribute sits at its ordinal
    SchemaDrift {
        element: &'static str,
        ordinal: usize,
        expected: &'static str,
        found: Option<String>,
    },

    /// An attribute holds a value of the wrong shape
    InvalidValue {
        element: &'static str,
        field: &'static str,
        value: String,
    },
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Http(e) => write!(f, "HTTP error: {e}"),
            FeedError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            FeedError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
            FeedError::RateLimited => write!(f, "rate limited by feed API"),
            FeedError::Xml { message } => write!(f, "XML parse error: {message}"),
            FeedError::SchemaDrift {
                element,
                ordinal,
                expected,
                found,
            } => {
                write!(
                    f,
                    "feed schema drift: <{element}> attribute #{ordinal} should be {expected}"
                )?;
                match found {
                    Some(name) => write!(f, ", found {name}"),
                    None => write!(f, ", found nothing"),
                }
            }
            FeedError::InvalidValue {
                element,
                field,
                value,
            } => write!(f, "invalid {field} on <{element}>: {value:?}"),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        FeedError::Http(err)
    }
}

impl From<quick_xml::Error> for FeedError {
    fn from(err: quick_xml::Error) -> Self {
        FeedError::Xml {
            message: err.to_string(),
        }
    }
}
