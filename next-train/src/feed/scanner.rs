//! Positional scan of raw feed XML.
//!
//! The feed's schema fixes attribute order per element kind, so the scanner
//! keeps attributes in document order and lets [`super::schema`] pick them by
//! ordinal. Nothing outside the feed module sees these raw elements.

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::warn;

use super::error::FeedError;

/// A start (or empty) element with its attributes in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawElement {
    pub name: String,
    /// `(attribute name, trimmed unescaped value)` pairs.
    pub attributes: Vec<(String, String)>,
}

impl RawElement {
    /// The attribute at `ordinal`, if the element has that many.
    pub fn attribute(&self, ordinal: usize) -> Option<(&str, &str)> {
        self.attributes
            .get(ordinal)
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Scan `xml` for elements whose name is in `kinds` (all elements if empty).
///
/// Fails on the first XML error.
pub fn try_scan(xml: &str, kinds: &[&str]) -> Result<Vec<RawElement>, FeedError> {
    let mut reader = Reader::from_str(xml);
    let mut elements = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if !kinds.is_empty() && !kinds.contains(&name.as_str()) {
                    continue;
                }

                let mut attributes = Vec::new();
                for attr in e.attributes() {
                    let attr = attr.map_err(quick_xml::Error::from)?;
                    let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                    let value = attr.unescape_value()?.trim().to_string();
                    attributes.push((key, value));
                }

                elements.push(RawElement { name, attributes });
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(elements)
}

/// Lenient scan: any parse failure yields an empty sequence.
pub fn scan(xml: &str, kinds: &[&str]) -> Vec<RawElement> {
    try_scan(xml, kinds).unwrap_or_else(|e| {
        warn!(error = %e, "Discarding malformed feed document");
        Vec::new()
    })
}
