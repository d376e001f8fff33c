//! Assertion-failure taxonomy.
//!
//! Every way a chain can fail is a variant here. Variants raised from a
//! [`Mismatch`](crate::diagnostics) carry the fully rendered diagnostic
//! sentence; usage errors (malformed URIs, unknown fields) carry structured
//! context instead. All of these describe a failed assertion or a misused
//! builder, never an internal fault of the harness itself.

/// A failed assertion or a misused chain verb.
///
/// Fluent verbs render the failure into one canonical sentence and panic with
/// it; the non-panicking paths (the scenario runner, internal checks) return
/// this type directly so the sentence can be inspected.
#[derive(Debug, thiserror::Error)]
pub enum AssertionError {
    /// The captured outcome's result kind differs from the requested kind.
    #[error("{0}")]
    UnexpectedResultKind(String),

    /// A failure was captured where a result was expected.
    #[error("{0}")]
    UnhandledFailure(String),

    /// A result was captured where a failure was expected.
    #[error("{0}")]
    ExpectedFailure(String),

    /// An ok-result verb found a mismatch.
    #[error("{0}")]
    OkResultAssertion(String),

    /// A created-result verb found a mismatch.
    #[error("{0}")]
    CreatedResultAssertion(String),

    /// A content-result verb found a mismatch.
    #[error("{0}")]
    ContentResultAssertion(String),

    /// A bad-request-result verb found a mismatch.
    #[error("{0}")]
    BadRequestResultAssertion(String),

    /// A status-code-result verb found a mismatch.
    #[error("{0}")]
    StatusResultAssertion(String),

    /// The response model was absent, of the wrong type, or not the
    /// expected value.
    #[error("{0}")]
    ResponseModelAssertion(String),

    /// A model-state verb found a mismatch.
    #[error("{0}")]
    ModelErrorAssertion(String),

    /// A captured failure did not carry the expected message.
    #[error("{0}")]
    FailureAssertion(String),

    /// A `passing` predicate returned false over the extracted payload.
    #[error("{0}")]
    PredicateAssertion(String),

    /// A location builder assembled a literal that is not a syntactically
    /// well-formed URI. Raised before any comparison takes place.
    #[error("expected location to assemble into a well-formed URI, but '{0}' could not be parsed")]
    MalformedUri(String),

    /// An attribute was requested that the captured result kind does not
    /// define. Only reachable through the dynamic (scenario) path; the typed
    /// chain rules this out at compile time.
    #[error("result kind '{kind}' does not support the '{attribute}' attribute")]
    ResultKindNotSupported {
        /// Kind of the captured result.
        kind: String,
        /// The attribute the caller asked for.
        attribute: String,
    },

    /// The payload's runtime type is incompatible with the requested type.
    #[error("{0}")]
    InvalidCast(String),

    /// A field selector named a field the payload type does not declare.
    #[error("'{field}' is not a declared field of {model}")]
    UnknownField {
        /// The selector that failed to resolve.
        field: String,
        /// Type name of the payload the selector was resolved against.
        model: &'static str,
    },
}

impl AssertionError {
    /// Abort the chain by unwinding with the rendered sentence.
    pub(crate) fn raise(self) -> ! {
        panic!("{self}")
    }
}

/// Unwrap a check result, raising on failure.
///
/// The fluent verbs all funnel through this so that evaluation and raising
/// stay atomic: a verb either passes and hands back its builder, or unwinds
/// with exactly one rendered mismatch.
pub(crate) fn pass_or_raise<T>(checked: Result<T, AssertionError>) -> T {
    match checked {
        Ok(value) => value,
        Err(error) => error.raise(),
    }
}
