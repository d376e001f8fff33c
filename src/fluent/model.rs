//! Response-model assertions.
//!
//! Payload-bearing kind builders narrow into [`ResponseModelAssertion`] once
//! the payload's type is proven; from there the chain checks model state,
//! runs predicates, and can terminally hand the exact payload instance back.

use std::marker::PhantomData;

use crate::diagnostics::{render, Mismatch};
use crate::error::AssertionError;
use crate::matchers::text_matches;
use crate::model_state::{
    check_error_against, check_no_error_against, check_no_errors, DeclaredFields, FieldRegistry,
};
use crate::outcome::{payload_of, take_payload, Invocation, Outcome};

/// Strip module paths from a type name, keeping generic structure:
/// `alloc::vec::Vec<crate::ResponseModel>` renders as `Vec<ResponseModel>`.
fn short_type_name(full: &str) -> String {
    let mut out = String::new();
    let mut segment = String::new();
    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            segment.push(ch);
        } else {
            out.push_str(segment.rsplit("::").next().unwrap_or(""));
            segment.clear();
            out.push(ch);
        }
    }
    out.push_str(segment.rsplit("::").next().unwrap_or(""));
    out
}

fn fail_model(invocation: &Invocation, mismatch: Mismatch) -> ! {
    AssertionError::ResponseModelAssertion(render(invocation.identity(), "", &mismatch)).raise()
}

/// Narrow `invocation` to a typed response model, checking presence and
/// runtime type.
pub(crate) fn begin<T: 'static>(invocation: Invocation) -> ResponseModelAssertion<T> {
    enum PayloadCheck {
        Missing,
        WrongType(&'static str),
        Matches,
    }

    let wanted = short_type_name(std::any::type_name::<T>());
    let check = match invocation.result().and_then(payload_of) {
        None => PayloadCheck::Missing,
        Some(payload) if !payload.is::<T>() => PayloadCheck::WrongType(payload.type_name()),
        Some(_) => PayloadCheck::Matches,
    };
    match check {
        PayloadCheck::Missing => fail_model(
            &invocation,
            Mismatch::new(
                "response model",
                format!("to be of type {wanted}"),
                "no response model was found",
            ),
        ),
        PayloadCheck::WrongType(type_name) => {
            let actual = short_type_name(type_name);
            fail_model(
                &invocation,
                Mismatch::new(
                    "response model",
                    format!("to be of type {wanted}"),
                    format!("instead received {actual}"),
                ),
            )
        }
        PayloadCheck::Matches => ResponseModelAssertion {
            invocation,
            _model: PhantomData,
        },
    }
}

/// Narrow to a typed response model and additionally require it to equal
/// `expected`.
pub(crate) fn begin_with<T: PartialEq + 'static>(
    invocation: Invocation,
    expected: &T,
) -> ResponseModelAssertion<T> {
    let assertion = begin::<T>(invocation);
    let actual = assertion
        .model()
        .expect("payload presence and type checked on entry");
    if actual != expected {
        fail_model(
            &assertion.invocation,
            Mismatch::new(
                "response model",
                "to be the given model",
                "in fact it was a different model",
            ),
        );
    }
    assertion
}

/// Assertions over a typed response model and the model state captured with
/// it.
///
/// Obtained from a payload-bearing kind builder via `with_response_model` or
/// `with_response_model_of`.
#[derive(Debug)]
pub struct ResponseModelAssertion<T> {
    invocation: Invocation,
    _model: PhantomData<T>,
}

impl<T: 'static> ResponseModelAssertion<T> {
    fn model(&self) -> Option<&T> {
        self.invocation
            .result()
            .and_then(payload_of)
            .and_then(|payload| payload.downcast_ref::<T>())
    }

    fn fail_model_state(&self, mismatch: Mismatch) -> ! {
        AssertionError::ModelErrorAssertion(render(self.invocation.identity(), "", &mismatch))
            .raise()
    }

    /// Assert the captured model state has no errors at all.
    pub fn containing_no_model_state_errors(self) -> Self {
        if let Err(mismatch) = check_no_errors(self.invocation.field_errors()) {
            self.fail_model_state(mismatch);
        }
        self
    }

    /// Assert an error was recorded against `key`, then narrow to its
    /// message details.
    pub fn containing_model_state_error(self, key: &str) -> ModelErrorDetails<T> {
        if let Err(mismatch) = check_error_against(self.invocation.field_errors(), key) {
            self.fail_model_state(mismatch);
        }
        ModelErrorDetails {
            parent: self,
            key: key.to_string(),
        }
    }

    /// Assert no error was recorded against `key`.
    pub fn containing_no_model_state_error(self, key: &str) -> Self {
        if let Err(mismatch) = check_no_error_against(self.invocation.field_errors(), key) {
            self.fail_model_state(mismatch);
        }
        self
    }

    /// Assert an error was recorded against the declared field `field`.
    ///
    /// The selector resolves through the payload type's declared-field
    /// registry; naming an undeclared field is a usage error, not a normal
    /// assertion failure.
    pub fn containing_model_state_error_for(self, field: &str) -> ModelErrorDetails<T>
    where
        T: DeclaredFields,
    {
        let key = match FieldRegistry::of::<T>().resolve(field) {
            Ok(key) => key,
            Err(error) => error.raise(),
        };
        self.containing_model_state_error(key)
    }

    /// Assert no error was recorded against the declared field `field`.
    pub fn containing_no_model_state_error_for(self, field: &str) -> Self
    where
        T: DeclaredFields,
    {
        let key = match FieldRegistry::of::<T>().resolve(field) {
            Ok(key) => key,
            Err(error) => error.raise(),
        };
        self.containing_no_model_state_error(key)
    }

    /// Assert the model passes `predicate`.
    ///
    /// A predicate that panics propagates unchanged; only a `false` return
    /// is rendered as an assertion failure.
    pub fn passing(self, predicate: impl FnOnce(&T) -> bool) -> Self {
        let model = self
            .model()
            .expect("payload presence and type checked on entry");
        if !predicate(model) {
            let identity = self.invocation.identity();
            AssertionError::PredicateAssertion(render(
                identity,
                "",
                &Mismatch::new("response model", "to pass the given condition", "it failed"),
            ))
            .raise();
        }
        self
    }

    /// Readability continuation.
    pub fn and_also(self) -> Self {
        self
    }

    /// Terminal verb: move the payload out, typed as `T`.
    ///
    /// Returns the exact instance the action produced, never a copy.
    pub fn and_provide_the_model(self) -> T {
        let identity = self.invocation.identity().clone();
        let wanted = short_type_name(std::any::type_name::<T>());
        let payload = match self.invocation.into_outcome() {
            Outcome::Result(result) => take_payload(result),
            Outcome::Failure(_) => None,
        };
        let Some(payload) = payload else {
            AssertionError::ResponseModelAssertion(render(
                &identity,
                "",
                &Mismatch::new(
                    "response model",
                    format!("to be of type {wanted}"),
                    "no response model was found",
                ),
            ))
            .raise()
        };
        match payload.into_inner::<T>() {
            Ok(model) => model,
            Err(payload) => {
                let actual = short_type_name(payload.type_name());
                AssertionError::InvalidCast(render(
                    &identity,
                    "",
                    &Mismatch::new(
                        "response model",
                        format!("to be of type {wanted}"),
                        format!("instead received {actual}"),
                    ),
                ))
                .raise()
            }
        }
    }
}

/// Message-level assertions over the errors recorded against one key.
#[derive(Debug)]
pub struct ModelErrorDetails<T> {
    parent: ResponseModelAssertion<T>,
    key: String,
}

impl<T: 'static> ModelErrorDetails<T> {
    fn check(self, expected: String, satisfied: impl Fn(&str) -> bool) -> Self {
        let messages = self.parent.invocation.field_errors().errors_for(&self.key);
        if !messages.iter().any(|message| satisfied(message)) {
            let mismatch = Mismatch::new(
                format!("error message for key {}", self.key),
                expected,
                format!("instead found '{}'", messages.join("', '")),
            );
            self.parent.fail_model_state(mismatch);
        }
        self
    }

    /// Assert a recorded message equals `message`.
    pub fn that_equals(self, message: &str) -> Self {
        self.check(format!("to be '{message}'"), |actual| actual == message)
    }

    /// Assert a recorded message begins with `prefix`.
    pub fn beginning_with(self, prefix: &str) -> Self {
        self.check(format!("to begin with '{prefix}'"), |actual| {
            actual.starts_with(prefix)
        })
    }

    /// Assert a recorded message ends with `suffix`.
    pub fn ending_with(self, suffix: &str) -> Self {
        self.check(format!("to end with '{suffix}'"), |actual| {
            actual.ends_with(suffix)
        })
    }

    /// Assert a recorded message contains `fragment`.
    pub fn containing(self, fragment: &str) -> Self {
        self.check(format!("to contain '{fragment}'"), |actual| {
            actual.contains(fragment)
        })
    }

    /// Assert a recorded message matches `pattern` (glob, regex, or exact).
    pub fn matching(self, pattern: &str) -> Self {
        self.check(format!("to match '{pattern}'"), |actual| {
            text_matches(pattern, actual)
        })
    }

    /// Return to the response-model builder.
    pub fn and_also(self) -> ResponseModelAssertion<T> {
        self.parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_type_name_strips_paths() {
        assert_eq!(
            short_type_name("alloc::vec::Vec<alloc::string::String>"),
            "Vec<String>"
        );
        assert_eq!(short_type_name("u32"), "u32");
        assert_eq!(
            short_type_name("std::collections::BTreeMap<u8, core::option::Option<i64>>"),
            "BTreeMap<u8, Option<i64>>"
        );
    }
}
