//! Chain entry point and kind narrowing.
//!
//! [`expect`] wraps a captured invocation; the `to_return_*` methods check
//! the outcome tag and hand the invocation to the matching kind builder.
//! Kinds without assertable attributes (not found, bare status codes)
//! evaluate in place and return nothing.

use crate::diagnostics::{render, Mismatch};
use crate::error::{pass_or_raise, AssertionError};
use crate::kind::ResultKind;
use crate::matchers::text_matches;
use crate::outcome::{status_of, HandlerIdentity, Invocation, Outcome};

use super::content::ContentAssertion;
use super::created::CreatedAssertion;
use super::ok::OkAssertion;
use super::status::BadRequestAssertion;

/// Begin an assertion chain over a captured invocation.
///
/// Takes ownership: one capture, one chain.
///
/// # Example
///
/// ```rust
/// use verdict::{expect, ActionResult, HandlerIdentity, Invocation};
///
/// let invocation = Invocation::returning(
///     HandlerIdentity::new("OkAction", "WebApiController"),
///     ActionResult::ok(),
/// );
///
/// expect(invocation).to_return_ok();
/// ```
pub fn expect(invocation: Invocation) -> OutcomeExpectation {
    OutcomeExpectation { invocation }
}

/// Tag check shared by the fluent entry points and the scenario runner.
pub(crate) fn check_kind(invocation: &Invocation, kind: ResultKind) -> Result<(), AssertionError> {
    let identity = invocation.identity();
    match invocation.outcome() {
        Outcome::Failure(failure) => Err(AssertionError::UnhandledFailure(format!(
            "When calling {} action in {} expected action to return a result, but it failed with '{}'.",
            identity.action(),
            identity.component(),
            failure
        ))),
        Outcome::Result(result) if result.kind() == kind => Ok(()),
        Outcome::Result(result) => Err(AssertionError::UnexpectedResultKind(format!(
            "When calling {} action in {} expected action result to be {}, but instead received {}.",
            identity.action(),
            identity.component(),
            kind,
            result.kind()
        ))),
    }
}

/// Holds the captured invocation and narrows it by result kind.
#[derive(Debug)]
pub struct OutcomeExpectation {
    invocation: Invocation,
}

impl OutcomeExpectation {
    /// Assert the action returned an ok result.
    pub fn to_return_ok(self) -> OkAssertion {
        pass_or_raise(check_kind(&self.invocation, ResultKind::Ok));
        OkAssertion::new(self.invocation)
    }

    /// Assert the action returned a created result.
    pub fn to_return_created(self) -> CreatedAssertion {
        pass_or_raise(check_kind(&self.invocation, ResultKind::Created));
        CreatedAssertion::new(self.invocation)
    }

    /// Assert the action returned a content result.
    pub fn to_return_content(self) -> ContentAssertion {
        pass_or_raise(check_kind(&self.invocation, ResultKind::Content));
        ContentAssertion::new(self.invocation)
    }

    /// Assert the action returned a bad-request result.
    pub fn to_return_bad_request(self) -> BadRequestAssertion {
        pass_or_raise(check_kind(&self.invocation, ResultKind::BadRequest));
        BadRequestAssertion::new(self.invocation)
    }

    /// Assert the action returned a not-found result.
    ///
    /// Not-found results carry no attributes, so the tag check is the whole
    /// assertion.
    pub fn to_return_not_found(self) {
        pass_or_raise(check_kind(&self.invocation, ResultKind::NotFound));
    }

    /// Assert the action returned a bare status-code result with `status`.
    pub fn to_return_status(self, status: u16) {
        pass_or_raise(check_kind(&self.invocation, ResultKind::StatusCode));
        let actual = self
            .invocation
            .result()
            .and_then(status_of)
            .expect("status code result carries a status");
        if actual != status {
            let mismatch = Mismatch::bare(
                format!("to be {status}"),
                format!("instead received {actual}"),
            );
            AssertionError::StatusResultAssertion(render(
                self.invocation.identity(),
                ResultKind::StatusCode.subject(),
                &mismatch,
            ))
            .raise();
        }
    }

    /// Assert the action raised a failure instead of returning a result.
    pub fn to_fail(self) -> FailureAssertion {
        let identity = self.invocation.identity().clone();
        match self.invocation.into_outcome() {
            Outcome::Failure(failure) => FailureAssertion { identity, failure },
            Outcome::Result(result) => AssertionError::ExpectedFailure(format!(
                "When calling {} action in {} expected action to fail, but instead received {}.",
                identity.action(),
                identity.component(),
                result.kind()
            ))
            .raise(),
        }
    }
}

/// Assertions over a captured failure.
#[derive(Debug)]
pub struct FailureAssertion {
    identity: HandlerIdentity,
    failure: anyhow::Error,
}

impl FailureAssertion {
    fn fail(&self, mismatch: Mismatch) -> ! {
        AssertionError::FailureAssertion(render(&self.identity, "", &mismatch)).raise()
    }

    /// Assert the failure message equals `expected`.
    pub fn with_message(self, expected: &str) -> Self {
        let actual = self.failure.to_string();
        if actual != expected {
            self.fail(Mismatch::new(
                "failure message",
                format!("to be '{expected}'"),
                format!("instead received '{actual}'"),
            ));
        }
        self
    }

    /// Assert the failure message contains `fragment`.
    pub fn with_message_containing(self, fragment: &str) -> Self {
        let actual = self.failure.to_string();
        if !actual.contains(fragment) {
            self.fail(Mismatch::new(
                "failure message",
                format!("to contain '{fragment}'"),
                format!("instead received '{actual}'"),
            ));
        }
        self
    }

    /// Assert the failure message matches `pattern` (glob, regex, or exact).
    pub fn with_message_matching(self, pattern: &str) -> Self {
        let actual = self.failure.to_string();
        if !text_matches(pattern, &actual) {
            self.fail(Mismatch::new(
                "failure message",
                format!("to match '{pattern}'"),
                format!("instead received '{actual}'"),
            ));
        }
        self
    }

    /// Readability continuation.
    pub fn and_also(self) -> Self {
        self
    }

    /// Terminal verb: hand back the captured failure itself.
    pub fn and_provide_the_failure(self) -> anyhow::Error {
        self.failure
    }
}
