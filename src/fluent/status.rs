//! Bad-request assertions.

use crate::diagnostics::{render, Mismatch};
use crate::error::AssertionError;
use crate::kind::ResultKind;
use crate::matchers::text_matches;
use crate::outcome::{error_message_of, ActionResult, Invocation};

/// Assertions over a bad-request result and the error message it carries.
#[derive(Debug)]
pub struct BadRequestAssertion {
    invocation: Invocation,
}

impl BadRequestAssertion {
    pub(crate) fn new(invocation: Invocation) -> Self {
        Self { invocation }
    }

    fn result(&self) -> &ActionResult {
        self.invocation
            .result()
            .expect("bad request builder exists only for a returned result")
    }

    fn fail(&self, mismatch: Mismatch) -> ! {
        AssertionError::BadRequestResultAssertion(render(
            self.invocation.identity(),
            ResultKind::BadRequest.subject(),
            &mismatch,
        ))
        .raise()
    }

    fn check_message(self, expected: String, satisfied: impl Fn(&str) -> bool) -> Self {
        match error_message_of(self.result()) {
            Some(actual) if satisfied(actual) => {}
            Some(actual) => {
                let actual = format!("instead received '{actual}'");
                self.fail(Mismatch::new("error message", expected, actual));
            }
            None => self.fail(Mismatch::new("error message", expected, "none was found")),
        }
        self
    }

    /// Assert the result's error message equals `message`.
    pub fn with_error_message(self, message: &str) -> Self {
        self.check_message(format!("to be '{message}'"), |actual| actual == message)
    }

    /// Assert the result's error message contains `fragment`.
    pub fn with_error_message_containing(self, fragment: &str) -> Self {
        self.check_message(format!("to contain '{fragment}'"), |actual| {
            actual.contains(fragment)
        })
    }

    /// Assert the result's error message matches `pattern` (glob, regex, or
    /// exact).
    pub fn with_error_message_matching(self, pattern: &str) -> Self {
        self.check_message(format!("to match '{pattern}'"), |actual| {
            text_matches(pattern, actual)
        })
    }

    /// Readability continuation.
    pub fn and_also(self) -> Self {
        self
    }
}
