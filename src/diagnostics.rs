//! Mismatch records and the canonical diagnostic sentence.
//!
//! Every failed comparison in the crate flows through here as exactly one
//! [`Mismatch`], and every mismatch renders to exactly one sentence:
//!
//! ```text
//! When calling {action} action in {component} expected {subject} {property} {expected}, but {actual}.
//! ```
//!
//! Subject and property render only when non-empty; model-state failures
//! carry neither. The rendered sentences are a literal contract; tests pin
//! them verbatim.

use crate::outcome::HandlerIdentity;

/// One failed comparison: the property that differed and how both sides
/// render.
///
/// Never constructed unless a comparison has already been proven false;
/// construction and raising are atomic, so a verb surfaces at most one
/// mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Mismatch {
    property: String,
    expected: String,
    actual: String,
}

impl Mismatch {
    /// Mismatch on a named property.
    pub(crate) fn new(
        property: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            property: property.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Mismatch with no property segment (model-state failures).
    pub(crate) fn bare(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new("", expected, actual)
    }
}

/// Render a mismatch into the canonical sentence.
pub(crate) fn render(identity: &HandlerIdentity, subject: &str, mismatch: &Mismatch) -> String {
    let mut middle = String::new();
    for segment in [subject, mismatch.property.as_str(), mismatch.expected.as_str()] {
        if segment.is_empty() {
            continue;
        }
        if !middle.is_empty() {
            middle.push(' ');
        }
        middle.push_str(segment);
    }
    format!(
        "When calling {} action in {} expected {}, but {}.",
        identity.action(),
        identity.component(),
        middle,
        mismatch.actual
    )
}
