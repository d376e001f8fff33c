//! Created-result assertions.

use url::Url;

use crate::diagnostics::{render, Mismatch};
use crate::equality::{check_formatter_present, check_formatter_set, check_negotiator};
use crate::error::{pass_or_raise, AssertionError};
use crate::kind::ResultKind;
use crate::location::{check_location, check_location_built, check_location_literal, LocationBuilder};
use crate::negotiation::{
    default_formatters, ContentNegotiator, DefaultContentNegotiator, MediaTypeFormatter,
};
use crate::outcome::{formatters_of, location_of, negotiator_of, ActionResult, Invocation};

use super::formatters::FormattersExpectation;
use super::model::{begin, begin_with, ResponseModelAssertion};

/// Assertions over a created result: its location, negotiator, formatter set
/// and payload.
#[derive(Debug)]
pub struct CreatedAssertion {
    invocation: Invocation,
}

impl CreatedAssertion {
    pub(crate) fn new(invocation: Invocation) -> Self {
        Self { invocation }
    }

    fn result(&self) -> &ActionResult {
        self.invocation
            .result()
            .expect("created builder exists only for a returned result")
    }

    fn location(&self) -> &Url {
        location_of(self.result()).expect("created result carries a location")
    }

    fn fail(&self, mismatch: Mismatch) -> ! {
        AssertionError::CreatedResultAssertion(render(
            self.invocation.identity(),
            ResultKind::Created.subject(),
            &mismatch,
        ))
        .raise()
    }

    /// Assert the result's location equals the given literal, compared
    /// component by component.
    pub fn at_location(self, location: &str) -> Self {
        if let Err(mismatch) = check_location_literal(self.location(), location) {
            self.fail(mismatch);
        }
        self
    }

    /// Assert the result's location equals the given parsed URI.
    pub fn at_location_uri(self, location: &Url) -> Self {
        if let Err(mismatch) = check_location(self.location(), location) {
            self.fail(mismatch);
        }
        self
    }

    /// Assert the result's location equals one built component by component.
    ///
    /// The assembled literal must be well-formed; a builder that produces an
    /// unparseable literal is a usage error raised before any comparison.
    pub fn at_location_with(
        self,
        build: impl FnOnce(LocationBuilder) -> LocationBuilder,
    ) -> Self {
        let expected = pass_or_raise(build(LocationBuilder::new()).build());
        if let Err(mismatch) = check_location_built(self.location(), &expected) {
            self.fail(mismatch);
        }
        self
    }

    /// Assert the result carries the default content negotiator.
    pub fn with_default_content_negotiator(self) -> Self {
        self.with_content_negotiator(&DefaultContentNegotiator)
    }

    /// Assert the result carries a negotiator compatible with `expected`:
    /// same variant, same attribute state.
    pub fn with_content_negotiator(self, expected: &dyn ContentNegotiator) -> Self {
        let actual = negotiator_of(self.result()).expect("created result carries a negotiator");
        if let Err(mismatch) = check_negotiator(actual, expected) {
            self.fail(mismatch);
        }
        self
    }

    /// Assert the result's formatter set contains `expected`.
    pub fn containing_media_type_formatter(self, expected: &dyn MediaTypeFormatter) -> Self {
        let actual = formatters_of(self.result()).expect("created result carries formatters");
        if let Err(mismatch) = check_formatter_present(actual, expected) {
            self.fail(mismatch);
        }
        self
    }

    /// Assert the result's formatter set is exactly the default set,
    /// ignoring order.
    pub fn containing_default_formatters(self) -> Self {
        self.containing_media_type_formatters(default_formatters())
    }

    /// Assert the result's formatter set matches `expected` as an unordered
    /// set of variants. Counts are compared first.
    pub fn containing_media_type_formatters(
        self,
        expected: Vec<Box<dyn MediaTypeFormatter>>,
    ) -> Self {
        let actual = formatters_of(self.result()).expect("created result carries formatters");
        if let Err(mismatch) = check_formatter_set(actual, &expected) {
            self.fail(mismatch);
        }
        self
    }

    /// Assert the formatters listed by the closure are each present on the
    /// result.
    pub fn containing_media_type_formatters_with(
        self,
        build: impl FnOnce(FormattersExpectation) -> FormattersExpectation,
    ) -> Self {
        let expected = build(FormattersExpectation::new()).into_expected();
        let actual = formatters_of(self.result()).expect("created result carries formatters");
        for wanted in &expected {
            if let Err(mismatch) = check_formatter_present(actual, wanted.as_ref()) {
                self.fail(mismatch);
            }
        }
        self
    }

    /// Assert the result carries a response model equal to `expected`, then
    /// narrow to model assertions.
    pub fn with_response_model<T: PartialEq + 'static>(
        self,
        expected: &T,
    ) -> ResponseModelAssertion<T> {
        begin_with(self.invocation, expected)
    }

    /// Assert the result carries a response model of type `T`, then narrow
    /// to model assertions.
    pub fn with_response_model_of<T: 'static>(self) -> ResponseModelAssertion<T> {
        begin(self.invocation)
    }

    /// Readability continuation.
    pub fn and_also(self) -> Self {
        self
    }
}
