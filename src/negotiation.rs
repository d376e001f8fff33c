//! Content negotiation capabilities.
//!
//! The core never serializes anything; it only needs to tell negotiator and
//! formatter variants apart and compare them. Both capabilities identify
//! their concrete variant by [`name`](MediaTypeFormatter::name) and may
//! expose attribute state through [`attributes`](MediaTypeFormatter::attributes)
//! when instance equality is finer than variant equality.

use std::fmt;

/// Strategy variant that selects a formatter for an outcome.
///
/// Implementations are identified by variant name. A variant whose instances
/// carry state overrides `attributes` so that two instances of the same
/// variant with different state compare as different.
pub trait ContentNegotiator: fmt::Debug {
    /// Variant name, used in diagnostics and for instance compatibility.
    fn name(&self) -> &'static str;

    /// Canonical rendering of attribute state; `None` for stateless variants.
    fn attributes(&self) -> Option<String> {
        None
    }
}

/// Named serialization-strategy variant attached to a content-bearing outcome.
pub trait MediaTypeFormatter: fmt::Debug {
    /// Variant name, used in diagnostics and for instance compatibility.
    fn name(&self) -> &'static str;

    /// The media type this formatter produces.
    fn media_type(&self) -> &'static str;

    /// Canonical rendering of attribute state; `None` for stateless variants.
    fn attributes(&self) -> Option<String> {
        None
    }
}

/// The stock negotiator attached to outcomes that never override selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultContentNegotiator;

impl ContentNegotiator for DefaultContentNegotiator {
    fn name(&self) -> &'static str {
        "DefaultContentNegotiator"
    }
}

/// Negotiator pinned to a single media type, ignoring request preferences.
///
/// Carries state, so it exercises attribute-level equality: two instances
/// match only when pinned to the same media type.
#[derive(Debug, Clone)]
pub struct FixedMediaTypeNegotiator {
    media_type: String,
}

impl FixedMediaTypeNegotiator {
    /// Pin negotiation to `media_type`.
    pub fn new(media_type: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
        }
    }
}

impl ContentNegotiator for FixedMediaTypeNegotiator {
    fn name(&self) -> &'static str {
        "FixedMediaTypeNegotiator"
    }

    fn attributes(&self) -> Option<String> {
        Some(self.media_type.clone())
    }
}

/// JSON formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl MediaTypeFormatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "JsonFormatter"
    }

    fn media_type(&self) -> &'static str {
        "application/json"
    }
}

/// XML formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlFormatter;

impl MediaTypeFormatter for XmlFormatter {
    fn name(&self) -> &'static str {
        "XmlFormatter"
    }

    fn media_type(&self) -> &'static str {
        "application/xml"
    }
}

/// Form-url-encoded formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormUrlEncodedFormatter;

impl MediaTypeFormatter for FormUrlEncodedFormatter {
    fn name(&self) -> &'static str {
        "FormUrlEncodedFormatter"
    }

    fn media_type(&self) -> &'static str {
        "application/x-www-form-urlencoded"
    }
}

/// Plain-text formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextFormatter;

impl MediaTypeFormatter for PlainTextFormatter {
    fn name(&self) -> &'static str {
        "PlainTextFormatter"
    }

    fn media_type(&self) -> &'static str {
        "text/plain"
    }
}

/// The formatter set attached to content-bearing outcomes by default.
///
/// # Example
///
/// ```rust
/// use verdict::default_formatters;
///
/// assert_eq!(default_formatters().len(), 4);
/// ```
pub fn default_formatters() -> Vec<Box<dyn MediaTypeFormatter>> {
    vec![
        Box::new(JsonFormatter),
        Box::new(XmlFormatter),
        Box::new(FormUrlEncodedFormatter),
        Box::new(PlainTextFormatter),
    ]
}
