//! Result-kind tags.
//!
//! Every outcome a handler can produce carries exactly one of these tags.
//! The fluent chain narrows on the tag before exposing any kind-specific
//! verbs; the scenario layer parses tags from strings.

/// The tagged category of a produced action result.
///
/// Using an enum keeps the supported set closed: the chain exposes one entry
/// method per variant, and anything outside this set is rejected at the
/// scenario-parsing boundary.
///
/// # Example
///
/// ```rust
/// use verdict::ResultKind;
///
/// let kind = ResultKind::Created;
/// assert_eq!(kind.as_str(), "created");
/// assert_eq!(kind.to_string(), "created result");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    /// Plain success, optionally carrying a response model.
    Ok,
    /// Resource creation with a location, negotiator and formatter set.
    Created,
    /// Negotiated content with a status code, negotiator and formatter set.
    Content,
    /// Rejected input, optionally carrying an error message.
    BadRequest,
    /// Missing resource; carries no attributes.
    NotFound,
    /// A bare status code.
    StatusCode,
}

impl ResultKind {
    /// Canonical short name, used by scenario files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Ok => "ok",
            ResultKind::Created => "created",
            ResultKind::Content => "content",
            ResultKind::BadRequest => "bad_request",
            ResultKind::NotFound => "not_found",
            ResultKind::StatusCode => "status_code",
        }
    }

    /// The subject phrase this kind contributes to diagnostic sentences,
    /// e.g. "created result" in "expected created result location to be …".
    pub fn subject(&self) -> &'static str {
        match self {
            ResultKind::Ok => "ok result",
            ResultKind::Created => "created result",
            ResultKind::Content => "content result",
            ResultKind::BadRequest => "bad request result",
            ResultKind::NotFound => "not found result",
            ResultKind::StatusCode => "status code result",
        }
    }

    /// All supported kinds.
    pub fn all() -> &'static [ResultKind] {
        &[
            ResultKind::Ok,
            ResultKind::Created,
            ResultKind::Content,
            ResultKind::BadRequest,
            ResultKind::NotFound,
            ResultKind::StatusCode,
        ]
    }
}

impl std::fmt::Display for ResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.subject())
    }
}
