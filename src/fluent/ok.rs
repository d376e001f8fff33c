//! Ok-result assertions.

use crate::diagnostics::{render, Mismatch};
use crate::error::AssertionError;
use crate::outcome::{payload_of, Invocation};

use super::model::{begin, begin_with, ResponseModelAssertion};

/// Assertions over an ok result.
///
/// Ok results carry at most a response model, so every verb here is about
/// the payload.
#[derive(Debug)]
pub struct OkAssertion {
    invocation: Invocation,
}

impl OkAssertion {
    pub(crate) fn new(invocation: Invocation) -> Self {
        Self { invocation }
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

    /// Assert the result carries no response model at all.
    pub fn with_no_response_model(self) -> Self {
        let has_payload = self
            .invocation
            .result()
            .and_then(payload_of)
            .is_some();
        if has_payload {
            let mismatch = Mismatch::bare("to not have a response model", "in fact such was found");
            AssertionError::OkResultAssertion(render(self.invocation.identity(), "", &mismatch))
                .raise();
        }
        self
    }

    /// Readability continuation.
    pub fn and_also(self) -> Self {
        self
    }
}
