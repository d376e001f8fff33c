//! Scenario evaluation against a captured invocation.
//!
//! This module translates declared expectations into the same validator
//! calls the fluent API makes and collects the results. It acts as a thin
//! adapter layer; all comparison logic lives in the validators. Unlike the
//! fluent API's immediate evaluation, this collects results without
//! panicking.

use crate::diagnostics::{render, Mismatch};
use crate::equality::check_formatter_set;
use crate::error::AssertionError;
use crate::fluent::chain_check_kind;
use crate::kind::ResultKind;
use crate::location::check_location_literal;
use crate::model_state::{check_error_against, check_no_error_against, check_no_errors};
use crate::negotiation::default_formatters;
use crate::outcome::{
    error_message_of, formatters_of, location_of, negotiator_of, status_of, ActionResult,
    Invocation,
};

use super::parser::{parse_kind_name, Expected, ModelStateExpectation, Scenario};

/// Result of evaluating a single declared expectation.
#[derive(Debug, Clone)]
pub enum CheckResult {
    /// Expectation held.
    Pass,
    /// Expectation failed with reason.
    Fail { reason: String },
}

impl CheckResult {
    /// Check if this result is a pass.
    pub fn is_pass(&self) -> bool {
        matches!(self, CheckResult::Pass)
    }

    /// Check if this result is a failure.
    pub fn is_fail(&self) -> bool {
        matches!(self, CheckResult::Fail { .. })
    }
}

impl From<Result<(), AssertionError>> for CheckResult {
    fn from(checked: Result<(), AssertionError>) -> Self {
        match checked {
            Ok(()) => CheckResult::Pass,
            Err(error) => CheckResult::Fail {
                reason: error.to_string(),
            },
        }
    }
}

fn kind_error(kind: ResultKind, sentence: String) -> AssertionError {
    match kind {
        ResultKind::Ok => AssertionError::OkResultAssertion(sentence),
        ResultKind::Created => AssertionError::CreatedResultAssertion(sentence),
        ResultKind::Content => AssertionError::ContentResultAssertion(sentence),
        ResultKind::BadRequest => AssertionError::BadRequestResultAssertion(sentence),
        ResultKind::NotFound | ResultKind::StatusCode => {
            AssertionError::StatusResultAssertion(sentence)
        }
    }
}

fn unsupported(kind: ResultKind, attribute: &str) -> AssertionError {
    AssertionError::ResultKindNotSupported {
        kind: kind.as_str().to_string(),
        attribute: attribute.to_string(),
    }
}

/// Run a scenario's expectations against a captured invocation.
///
/// Evaluates every declared expectation and returns `(description, result)`
/// pairs. The kind check always runs first; when it fails, attribute checks
/// are skipped because none of them are meaningful against a different kind.
///
/// # Example
///
/// ```rust,ignore
/// let results = run_scenario(&scenario, &invocation);
///
/// for (description, result) in &results {
///     match result {
///         CheckResult::Pass => println!("ok   {description}"),
///         CheckResult::Fail { reason } => println!("FAIL {description}: {reason}"),
///     }
/// }
/// ```
pub fn run_scenario(scenario: &Scenario, invocation: &Invocation) -> Vec<(String, CheckResult)> {
    let mut results = Vec::new();
    let expected = &scenario.expected;

    let kind = match parse_kind_name(&expected.kind) {
        Ok(kind) => kind,
        Err(error) => {
            results.push((
                format!("{} (invalid)", expected.kind),
                CheckResult::Fail {
                    reason: error.to_string(),
                },
            ));
            return results;
        }
    };

    let kind_check = chain_check_kind(invocation, kind);
    let kind_matched = kind_check.is_ok();
    results.push((format!("kind is {}", kind.as_str()), kind_check.into()));

    if let Some(model_state) = &expected.model_state {
        evaluate_model_state(model_state, invocation, &mut results);
    }

    if !kind_matched {
        return results;
    }
    let result = match invocation.result() {
        Some(result) => result,
        None => return results,
    };

    evaluate_attributes(expected, kind, invocation, result, &mut results);
    results
}

fn evaluate_attributes(
    expected: &Expected,
    kind: ResultKind,
    invocation: &Invocation,
    result: &ActionResult,
    results: &mut Vec<(String, CheckResult)>,
) {
    let identity = invocation.identity();

    if let Some(location) = &expected.location {
        let check = match location_of(result) {
            None => Err(unsupported(kind, "location")),
            Some(actual) => check_location_literal(actual, location)
                .map_err(|m| kind_error(kind, render(identity, kind.subject(), &m))),
        };
        results.push((format!("location is {location}"), check.into()));
    }

    if let Some(status) = expected.status {
        let check = match status_of(result) {
            None => Err(unsupported(kind, "status")),
            Some(actual) if actual == status => Ok(()),
            Some(actual) => {
                let mismatch = Mismatch::new(
                    "status code",
                    format!("to be {status}"),
                    format!("instead received {actual}"),
                );
                Err(kind_error(kind, render(identity, kind.subject(), &mismatch)))
            }
        };
        results.push((format!("status is {status}"), check.into()));
    }

    if let Some(name) = &expected.negotiator {
        let check = match negotiator_of(result) {
            None => Err(unsupported(kind, "negotiator")),
            Some(actual) if actual.name() == name => Ok(()),
            Some(actual) => {
                let mismatch = check_negotiator_name(actual.name(), name);
                Err(kind_error(kind, render(identity, kind.subject(), &mismatch)))
            }
        };
        results.push((format!("negotiator is {name}"), check.into()));
    }

    if expected.default_formatters {
        let check = match formatters_of(result) {
            None => Err(unsupported(kind, "formatters")),
            Some(actual) => check_formatter_set(actual, &default_formatters())
                .map_err(|m| kind_error(kind, render(identity, kind.subject(), &m))),
        };
        results.push(("default formatters".to_string(), check.into()));
    }

    if let Some(names) = &expected.formatters {
        for name in names {
            let check = match formatters_of(result) {
                None => Err(unsupported(kind, "formatters")),
                Some(actual) if actual.iter().any(|f| f.name() == name) => Ok(()),
                Some(_) => {
                    let mismatch =
                        Mismatch::new("Formatters", format!("to contain {name}"), "none was found");
                    Err(kind_error(kind, render(identity, kind.subject(), &mismatch)))
                }
            };
            results.push((format!("formatter {name} present"), check.into()));
        }
    }

    if let Some(message) = &expected.error_message {
        let check = match result {
            ActionResult::BadRequest { .. } => match error_message_of(result) {
                Some(actual) if actual == message => Ok(()),
                Some(actual) => {
                    let mismatch = Mismatch::new(
                        "error message",
                        format!("to be '{message}'"),
                        format!("instead received '{actual}'"),
                    );
                    Err(kind_error(kind, render(identity, kind.subject(), &mismatch)))
                }
                None => {
                    let mismatch = Mismatch::new(
                        "error message",
                        format!("to be '{message}'"),
                        "none was found",
                    );
                    Err(kind_error(kind, render(identity, kind.subject(), &mismatch)))
                }
            },
            _ => Err(unsupported(kind, "error_message")),
        };
        results.push((format!("error message is '{message}'"), check.into()));
    }
}

fn check_negotiator_name(actual: &str, expected: &str) -> Mismatch {
    Mismatch::new(
        "content negotiator",
        format!("to be {expected}"),
        format!("instead received {actual}"),
    )
}

fn evaluate_model_state(
    expected: &ModelStateExpectation,
    invocation: &Invocation,
    results: &mut Vec<(String, CheckResult)>,
) {
    let identity = invocation.identity();
    let errors = invocation.field_errors();

    match expected.valid {
        Some(true) => {
            let check = check_no_errors(errors)
                .map_err(|m| AssertionError::ModelErrorAssertion(render(identity, "", &m)));
            results.push(("valid model state".to_string(), check.into()));
        }
        Some(false) => {
            let check = if errors.is_valid() {
                let mismatch = Mismatch::bare("to have model state errors", "none were found");
                Err(AssertionError::ModelErrorAssertion(render(identity, "", &mismatch)))
            } else {
                Ok(())
            };
            results.push(("invalid model state".to_string(), check.into()));
        }
        None => {}
    }

    for key in &expected.with_errors {
        let check = check_error_against(errors, key)
            .map_err(|m| AssertionError::ModelErrorAssertion(render(identity, "", &m)));
        results.push((format!("model error against {key}"), check.into()));
    }

    for key in &expected.without_errors {
        let check = check_no_error_against(errors, key)
            .map_err(|m| AssertionError::ModelErrorAssertion(render(identity, "", &m)));
        results.push((format!("no model error against {key}"), check.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_errors;
    use crate::outcome::HandlerIdentity;
    use url::Url;

    fn identity() -> HandlerIdentity {
        HandlerIdentity::new("CreatedAction", "WebApiController")
    }

    fn scenario(expected: Expected) -> Scenario {
        Scenario {
            name: "scenario".to_string(),
            description: None,
            expected,
        }
    }

    fn expected(kind: &str) -> Expected {
        Expected {
            kind: kind.to_string(),
            location: None,
            status: None,
            default_formatters: false,
            formatters: None,
            negotiator: None,
            error_message: None,
            model_state: None,
        }
    }

    fn created_invocation() -> Invocation {
        let location = Url::parse("http://somehost.com/someuri/1?query=Test").unwrap();
        Invocation::returning(identity(), ActionResult::created(location))
    }

    #[test]
    fn test_run_scenario_kind_and_location() {
        let scenario = scenario(Expected {
            location: Some("http://somehost.com/someuri/1?query=Test".to_string()),
            default_formatters: true,
            ..expected("created")
        });

        let results = run_scenario(&scenario, &created_invocation());
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|(_, result)| result.is_pass()));
    }

    #[test]
    fn test_run_scenario_reports_the_rendered_sentence() {
        let scenario = scenario(Expected {
            location: Some("http://somehost.com/".to_string()),
            ..expected("created")
        });

        let results = run_scenario(&scenario, &created_invocation());
        let (_, location_check) = &results[1];
        match location_check {
            CheckResult::Fail { reason } => {
                assert!(reason.contains("expected created result location to be http://somehost.com/"));
            }
            CheckResult::Pass => panic!("location check should fail"),
        }
    }

    #[test]
    fn test_run_scenario_unknown_kind() {
        let scenario = scenario(expected("redirect"));
        let results = run_scenario(&scenario, &created_invocation());
        assert_eq!(results.len(), 1);
        assert!(results[0].1.is_fail());
    }

    #[test]
    fn test_run_scenario_wrong_kind_skips_attribute_checks() {
        let scenario = scenario(Expected {
            location: Some("http://somehost.com/".to_string()),
            ..expected("ok")
        });
        let results = run_scenario(&scenario, &created_invocation());
        assert_eq!(results.len(), 1);
        assert!(results[0].1.is_fail());
    }

    #[test]
    fn test_run_scenario_unsupported_attribute() {
        let scenario = scenario(Expected {
            status: Some(201),
            ..expected("created")
        });
        let results = run_scenario(&scenario, &created_invocation());
        let (_, status_check) = &results[1];
        match status_check {
            CheckResult::Fail { reason } => {
                assert!(reason.contains("does not support the 'status' attribute"));
            }
            CheckResult::Pass => panic!("status check should fail for created results"),
        }
    }

    #[test]
    fn test_run_scenario_model_state() {
        let scenario = scenario(Expected {
            model_state: Some(ModelStateExpectation {
                valid: Some(false),
                with_errors: vec!["RequiredString".to_string()],
                without_errors: vec!["Integer".to_string()],
            }),
            ..expected("created")
        });

        let invocation = created_invocation().with_field_errors(field_errors! {
            "RequiredString" => "The RequiredString field is required",
        });
        let results = run_scenario(&scenario, &invocation);
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|(_, result)| result.is_pass()));
    }

    #[test]
    fn test_run_scenario_negotiator_name() {
        let scenario = scenario(Expected {
            negotiator: Some("DefaultContentNegotiator".to_string()),
            ..expected("created")
        });
        let results = run_scenario(&scenario, &created_invocation());
        assert!(results.iter().all(|(_, result)| result.is_pass()));
    }

    #[test]
    fn test_run_scenario_formatter_names() {
        let scenario = scenario(Expected {
            formatters: Some(vec!["JsonFormatter".to_string(), "XmlFormatter".to_string()]),
            ..expected("created")
        });
        let results = run_scenario(&scenario, &created_invocation());
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|(_, result)| result.is_pass()));
    }

    #[test]
    fn test_run_scenario_bad_request_message() {
        let scenario = scenario(Expected {
            error_message: Some("Bad request".to_string()),
            ..expected("bad_request")
        });
        let invocation = Invocation::returning(
            HandlerIdentity::new("BadRequestAction", "WebApiController"),
            ActionResult::bad_request("Bad request"),
        );
        let results = run_scenario(&scenario, &invocation);
        assert!(results.iter().all(|(_, result)| result.is_pass()));
    }
}
