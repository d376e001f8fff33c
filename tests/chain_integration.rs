//! End-to-end chains over captured invocations.
//!
//! These exercise the public surface the way a test suite written against a
//! real dispatch layer would: capture, narrow, chain, and read the rendered
//! diagnostics on failure.

use anyhow::anyhow;
use url::Url;
use verdict::{
    expect, field_errors, ActionResult, DeclaredFields, FieldErrorMap, HandlerIdentity, Invocation,
    JsonFormatter,
};

#[derive(Debug, Clone, PartialEq)]
struct ResponseModel {
    integer: i32,
    required_string: String,
}

impl DeclaredFields for ResponseModel {
    fn declared_fields() -> &'static [&'static str] {
        &["Integer", "RequiredString", "NonRequiredString"]
    }
}

fn sample_models() -> Vec<ResponseModel> {
    vec![
        ResponseModel {
            integer: 1,
            required_string: "first".to_string(),
        },
        ResponseModel {
            integer: 2,
            required_string: "second".to_string(),
        },
    ]
}

fn identity(action: &str) -> HandlerIdentity {
    HandlerIdentity::new(action, "WebApiController")
}

#[test]
fn ok_with_list_payload_and_clean_model_state() {
    let invocation = Invocation::returning(
        identity("OkResultActionWithRequestBody"),
        ActionResult::ok_with(sample_models()),
    );

    let models = expect(invocation)
        .to_return_ok()
        .with_response_model_of::<Vec<ResponseModel>>()
        .containing_no_model_state_errors()
        .and_provide_the_model();

    assert_eq!(models.len(), 2);
}

#[test]
#[should_panic(
    expected = "When calling OkResultActionWithRequestBody action in WebApiController expected to have valid model state with no errors, but it had some."
)]
fn ok_with_field_error_fails_the_clean_model_state_check() {
    let invocation = Invocation::returning(
        identity("OkResultActionWithRequestBody"),
        ActionResult::ok_with(sample_models()),
    )
    .with_field_errors(field_errors! {
        "RequiredString" => "The RequiredString field is required",
    });

    expect(invocation)
        .to_return_ok()
        .with_response_model_of::<Vec<ResponseModel>>()
        .containing_no_model_state_errors();
}

#[test]
#[should_panic(
    expected = "When calling CreatedAction action in WebApiController expected created result location to be http://somehost.com/, but instead received http://somehost.com/someuri/1?query=Test."
)]
fn created_location_mismatch_quotes_both_uris_verbatim() {
    let location = Url::parse("http://somehost.com/someuri/1?query=Test").unwrap();
    let invocation =
        Invocation::returning(identity("CreatedAction"), ActionResult::created(location));

    expect(invocation)
        .to_return_created()
        .at_location("http://somehost.com/");
}

#[test]
#[should_panic(expected = "expected created result Formatters to be 4, but instead found 5.")]
fn formatter_count_mismatch_fires_before_variant_matching() {
    #[derive(Debug)]
    struct CustomFormatter;

    impl verdict::MediaTypeFormatter for CustomFormatter {
        fn name(&self) -> &'static str {
            "CustomFormatter"
        }

        fn media_type(&self) -> &'static str {
            "application/x-custom"
        }
    }

    let location = Url::parse("http://somehost.com/someuri/1?query=Test").unwrap();
    let mut formatters = verdict::default_formatters();
    formatters.push(Box::new(CustomFormatter));
    let result = ActionResult::Created {
        location,
        negotiator: Box::new(verdict::DefaultContentNegotiator),
        formatters,
        payload: None,
    };
    let invocation = Invocation::returning(identity("CreatedAction"), result);

    expect(invocation)
        .to_return_created()
        .containing_default_formatters();
}

#[test]
#[should_panic(
    expected = "expected to have a model error against key Name, but none found."
)]
fn field_selector_without_error_names_the_key() {
    #[derive(Debug, Clone, PartialEq)]
    struct NamedModel {
        name: String,
    }

    impl DeclaredFields for NamedModel {
        fn declared_fields() -> &'static [&'static str] {
            &["Name"]
        }
    }

    let invocation = Invocation::returning(
        identity("ModelStateCheck"),
        ActionResult::ok_with(NamedModel {
            name: "valid".to_string(),
        }),
    );

    expect(invocation)
        .to_return_ok()
        .with_response_model_of::<NamedModel>()
        .containing_model_state_error_for("Name");
}

#[test]
fn full_created_chain_with_payload_and_metadata() {
    let location = Url::parse("http://somehost.com/someuri/1?query=Test").unwrap();
    let invocation = Invocation::returning(
        identity("CreatedAction"),
        ActionResult::created_with(location, sample_models()),
    );

    let models = expect(invocation)
        .to_return_created()
        .at_location_with(|builder| {
            builder
                .with_scheme("http")
                .and_also()
                .with_host("somehost.com")
                .and_also()
                .with_absolute_path("/someuri/1")
                .and_also()
                .with_query("query=Test")
        })
        .and_also()
        .with_default_content_negotiator()
        .containing_media_type_formatter(&JsonFormatter)
        .containing_default_formatters()
        .with_response_model(&sample_models())
        .containing_no_model_state_error_for("Integer")
        .and_provide_the_model();

    assert_eq!(models, sample_models());
}

#[test]
fn captured_failures_are_assertable() {
    let invocation = Invocation::failing(
        identity("FailingAction"),
        anyhow!("connection reset by peer"),
    );

    let failure = expect(invocation)
        .to_fail()
        .with_message_containing("connection reset")
        .and_provide_the_failure();

    assert_eq!(failure.to_string(), "connection reset by peer");
}

#[test]
fn field_error_map_crosses_the_seam_as_json() {
    let value = serde_json::json!({
        "RequiredString": ["The RequiredString field is required"],
    });
    let errors = FieldErrorMap::from_json(value).unwrap();

    let invocation = Invocation::returning(
        identity("ModelStateCheck"),
        ActionResult::ok_with(sample_models()),
    )
    .with_field_errors(errors);

    expect(invocation)
        .to_return_ok()
        .with_response_model_of::<Vec<ResponseModel>>()
        .containing_model_state_error("RequiredString")
        .beginning_with("The RequiredString");
}

#[cfg(feature = "yaml")]
mod scenarios {
    use super::*;
    use verdict::run_scenario;

    #[test]
    fn declared_scenario_evaluates_without_panicking() {
        let scenario: verdict::Scenario = serde_yaml::from_str(
            r#"
name: "create returns created at the right location"
expected:
  kind: created
  location: "http://somehost.com/someuri/1?query=Test"
  negotiator: DefaultContentNegotiator
  default_formatters: true
  model_state:
    valid: true
"#,
        )
        .unwrap();

        let location = Url::parse("http://somehost.com/someuri/1?query=Test").unwrap();
        let invocation =
            Invocation::returning(identity("CreatedAction"), ActionResult::created(location));

        let results = run_scenario(&scenario, &invocation);
        assert_eq!(results.len(), 5);
        for (description, result) in &results {
            assert!(result.is_pass(), "check failed: {description}");
        }
    }

    #[test]
    fn declared_scenario_reports_failures_with_the_rendered_sentence() {
        let scenario: verdict::Scenario = serde_yaml::from_str(
            r#"
name: "wrong location"
expected:
  kind: created
  location: "http://somehost.com/"
"#,
        )
        .unwrap();

        let location = Url::parse("http://somehost.com/someuri/1?query=Test").unwrap();
        let invocation =
            Invocation::returning(identity("CreatedAction"), ActionResult::created(location));

        let results = run_scenario(&scenario, &invocation);
        let failures: Vec<_> = results.iter().filter(|(_, r)| r.is_fail()).collect();
        assert_eq!(failures.len(), 1);
        match &failures[0].1 {
            verdict::CheckResult::Fail { reason } => {
                assert!(reason.contains(
                    "expected created result location to be http://somehost.com/, but instead received http://somehost.com/someuri/1?query=Test."
                ));
            }
            verdict::CheckResult::Pass => unreachable!(),
        }
    }
}
