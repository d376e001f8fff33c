//! YAML scenario support.
//!
//! Expected outcomes can be declared in YAML and evaluated against a
//! captured invocation without panicking. This is a thin layer on top of
//! the same validators the fluent API uses, handling string parsing and
//! YAML deserialization.
//!
//! # Scenario File Format
//!
//! ```yaml
//! name: "create user returns created"
//! expected:
//!   kind: created                 # result kind (case-insensitive)
//!   location: "http://somehost.com/someuri/1?query=Test"
//!   default_formatters: true
//!   negotiator: DefaultContentNegotiator
//!   model_state:
//!     valid: false
//!     with_errors: [RequiredString]
//!     without_errors: [Integer]
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use verdict::yaml::{load_scenario, run_scenario};
//!
//! let scenario = load_scenario("scenario.yaml".as_ref())?;
//! let results = run_scenario(&scenario, &invocation);
//! ```

mod parser;
mod runner;

pub use parser::{load_scenario, parse_kind_name, Expected, ModelStateExpectation, Scenario, ScenarioError};
pub use runner::{run_scenario, CheckResult};
