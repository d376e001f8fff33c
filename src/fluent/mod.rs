//! Fluent assertion API over captured invocations.
//!
//! The entry point is [`expect`], which takes ownership of one
//! [`Invocation`](crate::Invocation) and narrows it into a kind-specific
//! builder. Each builder exposes only the verbs its result kind supports;
//! verbs evaluate immediately and panic with one canonical diagnostic
//! sentence on the first mismatch.
//!
//! # Example
//!
//! ```rust,ignore
//! use verdict::expect;
//!
//! expect(invocation)
//!     .to_return_created()
//!     .at_location("http://somehost.com/someuri/1?query=Test")
//!     .and_also()
//!     .containing_default_formatters();
//! ```

mod chain;
mod content;
mod created;
mod formatters;
mod model;
mod ok;
mod status;

pub use chain::{expect, FailureAssertion, OutcomeExpectation};
#[cfg(feature = "yaml")]
pub(crate) use chain::check_kind as chain_check_kind;
pub use content::ContentAssertion;
pub use created::CreatedAssertion;
pub use formatters::FormattersExpectation;
pub use model::{ModelErrorDetails, ResponseModelAssertion};
pub use ok::OkAssertion;
pub use status::BadRequestAssertion;
