//! Deep equality over negotiation capabilities.
//!
//! Instance compatibility is variant identity plus attribute state, never
//! pointer identity. Formatter collections compare as unordered sets of
//! variants: counts first, then every expected variant must find a matching
//! actual instance. The count check fires before the variant check, and the
//! first unmatched expected variant wins, so each call reports one mismatch.

use crate::diagnostics::Mismatch;
use crate::negotiation::{ContentNegotiator, MediaTypeFormatter};

pub(crate) fn same_negotiator(a: &dyn ContentNegotiator, b: &dyn ContentNegotiator) -> bool {
    a.name() == b.name() && a.attributes() == b.attributes()
}

pub(crate) fn same_formatter(a: &dyn MediaTypeFormatter, b: &dyn MediaTypeFormatter) -> bool {
    a.name() == b.name() && a.attributes() == b.attributes()
}

pub(crate) fn check_negotiator(
    actual: &dyn ContentNegotiator,
    expected: &dyn ContentNegotiator,
) -> Result<(), Mismatch> {
    if same_negotiator(actual, expected) {
        Ok(())
    } else {
        Err(Mismatch::new(
            "content negotiator",
            format!("to be {}", expected.name()),
            format!("instead received {}", actual.name()),
        ))
    }
}

pub(crate) fn check_formatter_present(
    actual: &[Box<dyn MediaTypeFormatter>],
    expected: &dyn MediaTypeFormatter,
) -> Result<(), Mismatch> {
    if actual.iter().any(|f| same_formatter(f.as_ref(), expected)) {
        Ok(())
    } else {
        Err(Mismatch::new(
            "Formatters",
            format!("to contain {}", expected.name()),
            "none was found",
        ))
    }
}

/// Unordered set equality by variant: counts, then variant membership.
/// A duplicated expected variant is satisfied by any one matching actual
/// instance.
pub(crate) fn check_formatter_set(
    actual: &[Box<dyn MediaTypeFormatter>],
    expected: &[Box<dyn MediaTypeFormatter>],
) -> Result<(), Mismatch> {
    if actual.len() != expected.len() {
        return Err(Mismatch::new(
            "Formatters",
            format!("to be {}", expected.len()),
            format!("instead found {}", actual.len()),
        ));
    }

    for wanted in expected {
        let found = actual
            .iter()
            .any(|f| same_formatter(f.as_ref(), wanted.as_ref()));
        if !found {
            return Err(Mismatch::new(
                "Formatters",
                format!("to have {}", wanted.name()),
                "none was found",
            ));
        }
    }

    Ok(())
}
