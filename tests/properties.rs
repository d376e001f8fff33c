//! Property suites over URI equality, formatter sets, and model state.

use std::panic::{catch_unwind, AssertUnwindSafe};

use proptest::prelude::*;
use url::Url;
use verdict::{
    expect, ActionResult, FieldErrorMap, FormUrlEncodedFormatter, HandlerIdentity, Invocation,
    JsonFormatter, MediaTypeFormatter, PlainTextFormatter, XmlFormatter,
};

fn identity() -> HandlerIdentity {
    HandlerIdentity::new("CreatedAction", "WebApiController")
}

fn created_at(location: &Url) -> Invocation {
    Invocation::returning(identity(), ActionResult::created(location.clone()))
}

fn panics(run: impl FnOnce()) -> Option<String> {
    match catch_unwind(AssertUnwindSafe(run)) {
        Ok(()) => None,
        Err(payload) => payload
            .downcast_ref::<String>()
            .cloned()
            .or_else(|| panic!("assertion panics carry rendered sentences")),
    }
}

#[derive(Debug, Clone)]
struct UriParts {
    scheme: String,
    host: String,
    port: Option<u16>,
    path: Vec<String>,
    query: Option<String>,
    fragment: Option<String>,
}

impl UriParts {
    fn literal(&self) -> String {
        let mut literal = format!("{}://{}", self.scheme, self.host);
        if let Some(port) = self.port {
            literal.push_str(&format!(":{port}"));
        }
        if self.path.is_empty() {
            literal.push('/');
        } else {
            for segment in &self.path {
                literal.push('/');
                literal.push_str(segment);
            }
        }
        if let Some(query) = &self.query {
            literal.push('?');
            literal.push_str(query);
        }
        if let Some(fragment) = &self.fragment {
            literal.push('#');
            literal.push_str(fragment);
        }
        literal
    }

    fn url(&self) -> Url {
        Url::parse(&self.literal()).expect("generated literals are well-formed")
    }
}

fn uri_parts() -> impl Strategy<Value = UriParts> {
    (
        prop::sample::select(vec!["http", "https"]),
        "[a-z]{3,8}",
        prop::option::of(1024u16..9999),
        prop::collection::vec("[a-z]{1,6}", 0..3),
        prop::option::of("[a-z]{1,5}=[a-z]{1,5}"),
        prop::option::of("[a-z]{1,6}"),
    )
        .prop_map(|(scheme, host, port, path, query, fragment)| UriParts {
            scheme: scheme.to_string(),
            host: format!("{host}.com"),
            port,
            path,
            query,
            fragment,
        })
}

proptest! {
    /// Component-equal URIs compare equal whether the expectation is a
    /// literal or built component by component.
    #[test]
    fn equal_uris_match_in_literal_and_builder_form(parts in uri_parts()) {
        let url = parts.url();
        let literal = parts.literal();

        expect(created_at(&url))
            .to_return_created()
            .at_location(&literal);

        expect(created_at(&url))
            .to_return_created()
            .at_location_uri(&url);

        let builder_parts = parts.clone();
        expect(created_at(&url))
            .to_return_created()
            .at_location_with(move |mut builder| {
                builder = builder
                    .with_scheme(&builder_parts.scheme)
                    .with_host(&builder_parts.host);
                if let Some(port) = builder_parts.port {
                    builder = builder.with_port(port);
                }
                let path: String = if builder_parts.path.is_empty() {
                    "/".to_string()
                } else {
                    format!("/{}", builder_parts.path.join("/"))
                };
                builder = builder.with_absolute_path(path);
                if let Some(query) = &builder_parts.query {
                    builder = builder.with_query(query);
                }
                if let Some(fragment) = &builder_parts.fragment {
                    builder = builder.with_fragment(fragment);
                }
                builder
            });
    }

    /// A single differing component fails the comparison and the rendered
    /// sentence names both URIs in full.
    #[test]
    fn any_differing_component_fails_and_names_both_uris(parts in uri_parts()) {
        let url = parts.url();
        let mut other = parts.clone();
        other.host = format!("x{}", other.host);
        let other_literal = other.literal();

        let sentence = panics(|| {
            expect(created_at(&url))
                .to_return_created()
                .at_location(&other_literal);
        })
        .expect("differing hosts must fail the location check");

        prop_assert!(sentence.contains(&url.to_string()));
        prop_assert!(sentence.contains(&other.url().to_string()));
    }

    /// Formatter-set equality ignores ordering.
    #[test]
    fn default_formatter_set_matches_in_any_order(order in Just(vec![0usize, 1, 2, 3]).prop_shuffle()) {
        fn formatter(index: usize) -> Box<dyn MediaTypeFormatter> {
            match index {
                0 => Box::new(JsonFormatter),
                1 => Box::new(XmlFormatter),
                2 => Box::new(FormUrlEncodedFormatter),
                _ => Box::new(PlainTextFormatter),
            }
        }

        let location = Url::parse("http://somehost.com/").unwrap();
        let result = ActionResult::Created {
            location,
            negotiator: Box::new(verdict::DefaultContentNegotiator),
            formatters: order.iter().map(|&i| formatter(i)).collect(),
            payload: None,
        };
        let invocation = Invocation::returning(identity(), result);

        expect(invocation)
            .to_return_created()
            .containing_default_formatters();
    }

    /// The map is valid exactly when no key carries an error.
    #[test]
    fn field_error_map_is_valid_iff_empty(
        entries in prop::collection::btree_map("[A-Z][a-z]{2,6}", "[a-z ]{3,12}", 0..4)
    ) {
        let mut map = FieldErrorMap::new();
        for (key, message) in &entries {
            map.add_error(key, message);
        }
        prop_assert_eq!(map.is_valid(), entries.is_empty());
    }

    /// For any key, exactly one of the two key-level verbs succeeds.
    #[test]
    fn key_level_verbs_are_mutually_exclusive_and_exhaustive(
        entries in prop::collection::btree_map("[A-Z][a-z]{2,6}", "[a-z ]{3,12}", 0..4),
        probe in "[A-Z][a-z]{2,6}",
    ) {
        let mut map = FieldErrorMap::new();
        for (key, message) in &entries {
            map.add_error(key, message);
        }

        let with_errors = {
            let map = map.clone();
            let probe = probe.clone();
            panics(move || {
                let invocation = Invocation::returning(identity(), ActionResult::ok_with(1u8))
                    .with_field_errors(map);
                expect(invocation)
                    .to_return_ok()
                    .with_response_model_of::<u8>()
                    .containing_model_state_error(&probe);
            })
            .is_none()
        };
        let without_errors = {
            let map = map.clone();
            let probe = probe.clone();
            panics(move || {
                let invocation = Invocation::returning(identity(), ActionResult::ok_with(1u8))
                    .with_field_errors(map);
                expect(invocation)
                    .to_return_ok()
                    .with_response_model_of::<u8>()
                    .containing_no_model_state_error(&probe);
            })
            .is_none()
        };

        prop_assert!(with_errors != without_errors);
        prop_assert_eq!(with_errors, entries.contains_key(&probe));
    }
}
