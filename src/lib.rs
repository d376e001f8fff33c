//! # verdict
//!
//! A fluent assertion harness for verifying captured request-handler
//! outcomes: their result kind (ok, created, content, …), the payload they
//! carry, and the metadata attached to that payload: location URIs,
//! content negotiators, media-type formatters, and per-field validation
//! errors.
//!
//! The harness never invokes anything itself. A dispatch layer captures one
//! [`Invocation`] per test scenario; [`expect`] takes ownership of the
//! capture and narrows it into a kind-specific builder whose verbs evaluate
//! immediately and panic with one canonical diagnostic sentence on the
//! first mismatch.
//!
//! ## Quick Start
//!
//! ```rust
//! use verdict::{expect, ActionResult, HandlerIdentity, Invocation};
//! use url::Url;
//!
//! let location = Url::parse("http://somehost.com/someuri/1?query=Test").unwrap();
//! let invocation = Invocation::returning(
//!     HandlerIdentity::new("CreatedAction", "WebApiController"),
//!     ActionResult::created(location),
//! );
//!
//! expect(invocation)
//!     .to_return_created()
//!     .at_location("http://somehost.com/someuri/1?query=Test")
//!     .and_also()
//!     .containing_default_formatters();
//! ```
//!
//! ## Response Models
//!
//! ```rust
//! use verdict::{expect, ActionResult, HandlerIdentity, Invocation};
//!
//! let invocation = Invocation::returning(
//!     HandlerIdentity::new("OkResultWithResponse", "WebApiController"),
//!     ActionResult::ok_with(vec![1, 2]),
//! );
//!
//! let model = expect(invocation)
//!     .to_return_ok()
//!     .with_response_model_of::<Vec<i32>>()
//!     .containing_no_model_state_errors()
//!     .passing(|items| items.len() == 2)
//!     .and_provide_the_model();
//! assert_eq!(model, vec![1, 2]);
//! ```

pub mod dispatch;
pub mod fluent;
pub mod kind;
pub mod location;
pub mod matchers;
pub mod model_state;
pub mod negotiation;
pub mod outcome;

mod diagnostics;
mod equality;
mod error;

#[cfg(feature = "yaml")]
pub mod yaml;

// Core types
pub use error::AssertionError;
pub use kind::ResultKind;
pub use outcome::{ActionResult, HandlerIdentity, Invocation, Outcome, ResponsePayload};

// Fluent chain
pub use fluent::{
    expect, BadRequestAssertion, ContentAssertion, CreatedAssertion, FailureAssertion,
    FormattersExpectation, ModelErrorDetails, OkAssertion, OutcomeExpectation,
    ResponseModelAssertion,
};

// Negotiation capabilities
pub use negotiation::{
    default_formatters, ContentNegotiator, DefaultContentNegotiator, FixedMediaTypeNegotiator,
    FormUrlEncodedFormatter, JsonFormatter, MediaTypeFormatter, PlainTextFormatter, XmlFormatter,
};

// Model state
pub use model_state::{DeclaredFields, FieldErrorMap, FieldRegistry};

// Locations
pub use location::LocationBuilder;

// Text matching
pub use matchers::text_matches;

// Collaborator seams
pub use dispatch::{ActionDispatch, ModelValidator};

// Scenarios (feature-gated)
#[cfg(feature = "yaml")]
pub use yaml::{load_scenario, run_scenario, CheckResult, Scenario, ScenarioError};
