//! The boundary contracts for excluded collaborators.
//!
//! The core never invokes anything and never validates anything; it asserts
//! over captures. These traits specify what the surrounding harness must
//! provide. Inside a parallel test runner the only requirement is that each
//! `invoke` call produce an independent [`Invocation`]; chains perform no
//! cross-instance coordination.

use crate::model_state::FieldErrorMap;
use crate::outcome::{HandlerIdentity, Invocation, ResponsePayload};

/// Invokes an action and captures whatever came back.
///
/// An implementation must capture either the produced result or the raised
/// failure (never both, never neither) and must not share captures
/// between calls.
pub trait ActionDispatch {
    /// Arguments the dispatcher forwards to the action.
    type Args;

    /// Invoke the action identified by `identity` and capture its outcome.
    fn invoke(&self, identity: HandlerIdentity, args: Self::Args) -> Invocation;
}

/// Produces the field-error map for a bound request payload.
pub trait ModelValidator {
    /// Validate `payload`, accumulating errors per field key.
    fn validate(&self, payload: &ResponsePayload) -> FieldErrorMap;
}
