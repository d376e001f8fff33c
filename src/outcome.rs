//! Captured invocation outcomes.
//!
//! The dispatch layer (outside this crate) invokes an action once, captures
//! whatever came back, and hands the capture over as an [`Invocation`]. From
//! that point the capture is immutable and owned by exactly one assertion
//! chain. Attribute access goes through the extraction functions at the
//! bottom of this module, which are keyed by result kind and never mutate
//! the outcome.

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::kind::ResultKind;
use crate::model_state::FieldErrorMap;
use crate::negotiation::{
    default_formatters, ContentNegotiator, DefaultContentNegotiator, MediaTypeFormatter,
};

/// The (action-name, component-name) pair identifying the handler under test.
///
/// Used only for diagnostic text; identities are never compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerIdentity {
    action: String,
    component: String,
}

impl HandlerIdentity {
    /// Identify `action` owned by `component`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::HandlerIdentity;
    ///
    /// let identity = HandlerIdentity::new("CreatedAction", "WebApiController");
    /// assert_eq!(identity.action(), "CreatedAction");
    /// ```
    pub fn new(action: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            component: component.into(),
        }
    }

    /// Name of the action under test.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Name of the component owning the action.
    pub fn component(&self) -> &str {
        &self.component
    }
}

/// Type-erased response payload.
///
/// Holds the exact instance the action produced. The chain hands it back
/// unchanged from `and_provide_the_model`, so identity is preserved end to
/// end, without cloning or re-serializing.
pub struct ResponsePayload {
    value: Box<dyn Any>,
    type_name: &'static str,
}

impl ResponsePayload {
    /// Wrap a payload value, capturing its type name for diagnostics.
    pub fn new<T: 'static>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Type name captured at construction.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the payload is a `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.value.is::<T>()
    }

    pub(crate) fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Move the payload out as a `T`; hands `self` back on type mismatch.
    pub(crate) fn into_inner<T: 'static>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        match self.value.downcast::<T>() {
            Ok(boxed) => Ok(*boxed),
            Err(value) => Err(Self { value, type_name }),
        }
    }
}

impl fmt::Debug for ResponsePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResponsePayload").field(&self.type_name).finish()
    }
}

/// A produced action result, tagged by kind.
///
/// Variant fields are public: the dispatch layer constructs variants
/// literally when the convenience constructors below are not enough.
#[derive(Debug)]
pub enum ActionResult {
    /// Plain success.
    Ok {
        /// Response model, when the action produced one.
        payload: Option<ResponsePayload>,
    },
    /// Resource creation.
    Created {
        /// Where the created resource lives.
        location: Url,
        /// Negotiator attached to the result.
        negotiator: Box<dyn ContentNegotiator>,
        /// Formatter set attached to the result.
        formatters: Vec<Box<dyn MediaTypeFormatter>>,
        /// Response model, when the action produced one.
        payload: Option<ResponsePayload>,
    },
    /// Negotiated content.
    Content {
        /// Status code attached to the result.
        status: u16,
        /// Negotiator attached to the result.
        negotiator: Box<dyn ContentNegotiator>,
        /// Formatter set attached to the result.
        formatters: Vec<Box<dyn MediaTypeFormatter>>,
        /// Response model, when the action produced one.
        payload: Option<ResponsePayload>,
    },
    /// Rejected input.
    BadRequest {
        /// Error message attached to the rejection, when present.
        message: Option<String>,
    },
    /// Missing resource.
    NotFound,
    /// A bare status code.
    StatusCode {
        /// The code.
        status: u16,
    },
}

impl ActionResult {
    /// The kind tag of this result.
    pub fn kind(&self) -> ResultKind {
        match self {
            ActionResult::Ok { .. } => ResultKind::Ok,
            ActionResult::Created { .. } => ResultKind::Created,
            ActionResult::Content { .. } => ResultKind::Content,
            ActionResult::BadRequest { .. } => ResultKind::BadRequest,
            ActionResult::NotFound => ResultKind::NotFound,
            ActionResult::StatusCode { .. } => ResultKind::StatusCode,
        }
    }

    /// An ok result with no response model.
    pub fn ok() -> Self {
        ActionResult::Ok { payload: None }
    }

    /// An ok result carrying `model`.
    pub fn ok_with<T: 'static>(model: T) -> Self {
        ActionResult::Ok {
            payload: Some(ResponsePayload::new(model)),
        }
    }

    /// A created result at `location` with the default negotiator and
    /// formatter set.
    pub fn created(location: Url) -> Self {
        ActionResult::Created {
            location,
            negotiator: Box::new(DefaultContentNegotiator),
            formatters: default_formatters(),
            payload: None,
        }
    }

    /// A created result at `location` carrying `model`.
    pub fn created_with<T: 'static>(location: Url, model: T) -> Self {
        match Self::created(location) {
            ActionResult::Created {
                location,
                negotiator,
                formatters,
                ..
            } => ActionResult::Created {
                location,
                negotiator,
                formatters,
                payload: Some(ResponsePayload::new(model)),
            },
            _ => unreachable!(),
        }
    }

    /// A content result with `status`, the default negotiator and formatter
    /// set, and no response model.
    pub fn content(status: u16) -> Self {
        ActionResult::Content {
            status,
            negotiator: Box::new(DefaultContentNegotiator),
            formatters: default_formatters(),
            payload: None,
        }
    }

    /// A bad-request result carrying `message`.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ActionResult::BadRequest {
            message: Some(message.into()),
        }
    }

    /// A not-found result.
    pub fn not_found() -> Self {
        ActionResult::NotFound
    }

    /// A bare status-code result.
    pub fn status(status: u16) -> Self {
        ActionResult::StatusCode { status }
    }
}

/// Either a produced result or a captured failure. Exactly one is present.
#[derive(Debug)]
pub enum Outcome {
    /// The action returned a result.
    Result(ActionResult),
    /// The action raised a failure, captured unhandled by the dispatch layer.
    Failure(anyhow::Error),
}

/// One captured action call: identity, outcome, and the field-error map the
/// upstream validation step produced while binding the request.
///
/// Created once per test scenario and never mutated. An assertion chain
/// takes ownership when it begins, so two chains can never share a capture.
#[derive(Debug)]
pub struct Invocation {
    identity: HandlerIdentity,
    outcome: Outcome,
    field_errors: FieldErrorMap,
}

impl Invocation {
    /// Capture of an action that returned `result`.
    pub fn returning(identity: HandlerIdentity, result: ActionResult) -> Self {
        Self {
            identity,
            outcome: Outcome::Result(result),
            field_errors: FieldErrorMap::new(),
        }
    }

    /// Capture of an action that raised `failure`.
    pub fn failing(identity: HandlerIdentity, failure: anyhow::Error) -> Self {
        Self {
            identity,
            outcome: Outcome::Failure(failure),
            field_errors: FieldErrorMap::new(),
        }
    }

    /// Attach the field-error map produced by request validation.
    pub fn with_field_errors(mut self, field_errors: FieldErrorMap) -> Self {
        self.field_errors = field_errors;
        self
    }

    /// Identity of the invoked handler.
    pub fn identity(&self) -> &HandlerIdentity {
        &self.identity
    }

    /// The captured outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// The field-error map captured alongside the outcome.
    pub fn field_errors(&self) -> &FieldErrorMap {
        &self.field_errors
    }

    pub(crate) fn result(&self) -> Option<&ActionResult> {
        match &self.outcome {
            Outcome::Result(result) => Some(result),
            Outcome::Failure(_) => None,
        }
    }

    pub(crate) fn into_outcome(self) -> Outcome {
        self.outcome
    }
}

// Attribute extraction, keyed by result kind. `None` means the kind does not
// define the attribute.

pub(crate) fn location_of(result: &ActionResult) -> Option<&Url> {
    match result {
        ActionResult::Created { location, .. } => Some(location),
        _ => None,
    }
}

pub(crate) fn negotiator_of(result: &ActionResult) -> Option<&dyn ContentNegotiator> {
    match result {
        ActionResult::Created { negotiator, .. } | ActionResult::Content { negotiator, .. } => {
            Some(negotiator.as_ref())
        }
        _ => None,
    }
}

pub(crate) fn formatters_of(result: &ActionResult) -> Option<&[Box<dyn MediaTypeFormatter>]> {
    match result {
        ActionResult::Created { formatters, .. } | ActionResult::Content { formatters, .. } => {
            Some(formatters.as_slice())
        }
        _ => None,
    }
}

pub(crate) fn status_of(result: &ActionResult) -> Option<u16> {
    match result {
        ActionResult::Content { status, .. } | ActionResult::StatusCode { status } => Some(*status),
        _ => None,
    }
}

pub(crate) fn payload_of(result: &ActionResult) -> Option<&ResponsePayload> {
    match result {
        ActionResult::Ok { payload }
        | ActionResult::Created { payload, .. }
        | ActionResult::Content { payload, .. } => payload.as_ref(),
        _ => None,
    }
}

pub(crate) fn error_message_of(result: &ActionResult) -> Option<&str> {
    match result {
        ActionResult::BadRequest { message } => message.as_deref(),
        _ => None,
    }
}

pub(crate) fn take_payload(result: ActionResult) -> Option<ResponsePayload> {
    match result {
        ActionResult::Ok { payload }
        | ActionResult::Created { payload, .. }
        | ActionResult::Content { payload, .. } => payload,
        _ => None,
    }
}
