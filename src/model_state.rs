//! Field-level validation errors and the model-state validator.
//!
//! The upstream validation collaborator produces a [`FieldErrorMap`] while
//! binding the request; the core only reads it. The validator answers three
//! questions (any errors at all, error(s) against a key, no error(s)
//! against a key) and renders a fixed sentence fragment for each failure.
//!
//! Field selectors resolve through an explicit [`FieldRegistry`] built from
//! the payload type's [`DeclaredFields`] impl, so a selector naming a field
//! the type does not declare fails loudly instead of silently checking a key
//! that can never exist.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Mismatch;
use crate::error::AssertionError;

/// Per-field validation error accumulation for one request payload.
///
/// Keys are unique (enforced upstream); messages for a key keep insertion
/// order. A key is only ever stored with at least one message, so "the map
/// is empty" and "no field has errors" coincide.
///
/// # Example
///
/// ```rust
/// use verdict::FieldErrorMap;
///
/// let mut errors = FieldErrorMap::new();
/// errors.add_error("RequiredString", "The RequiredString field is required");
/// assert!(!errors.is_valid());
/// assert!(errors.contains_errors_for("RequiredString"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrorMap {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrorMap {
    /// An empty map: valid model state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `key`.
    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(key.into())
            .or_default()
            .push(message.into());
    }

    /// Whether no field has any error.
    pub fn is_valid(&self) -> bool {
        self.errors.values().all(|messages| messages.is_empty())
    }

    /// Whether `key` has at least one recorded error.
    pub fn contains_errors_for(&self, key: &str) -> bool {
        self.errors
            .get(key)
            .map(|messages| !messages.is_empty())
            .unwrap_or(false)
    }

    /// The messages recorded against `key`; empty when the key is absent.
    pub fn errors_for(&self, key: &str) -> &[String] {
        self.errors
            .get(key)
            .map(|messages| messages.as_slice())
            .unwrap_or(&[])
    }

    /// Keys that have at least one recorded error.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.errors
            .iter()
            .filter(|(_, messages)| !messages.is_empty())
            .map(|(key, _)| key.as_str())
    }

    /// Ingest the common key-to-messages JSON shape produced by validation
    /// layers, e.g. `{"Name": ["The Name field is required"]}`. Keys with an
    /// empty message list are dropped.
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let mut map: Self = serde_json::from_value(value)?;
        map.errors.retain(|_, messages| !messages.is_empty());
        Ok(map)
    }
}

// The model-state validator proper. Renderings are fixed; the fluent layer
// and the scenario runner both consume these verbatim.

pub(crate) fn check_no_errors(map: &FieldErrorMap) -> Result<(), Mismatch> {
    if map.is_valid() {
        Ok(())
    } else {
        Err(Mismatch::bare(
            "to have valid model state with no errors",
            "it had some",
        ))
    }
}

pub(crate) fn check_error_against(map: &FieldErrorMap, key: &str) -> Result<(), Mismatch> {
    if map.contains_errors_for(key) {
        Ok(())
    } else {
        Err(Mismatch::bare(
            format!("to have a model error against key {key}"),
            "none found",
        ))
    }
}

pub(crate) fn check_no_error_against(map: &FieldErrorMap, key: &str) -> Result<(), Mismatch> {
    if map.contains_errors_for(key) {
        Err(Mismatch::bare(
            format!("to have no model errors against key {key}"),
            "found some",
        ))
    } else {
        Ok(())
    }
}

/// Payload types list their validatable fields so selectors can be checked
/// against the declared structure instead of resolved by runtime
/// introspection.
///
/// # Example
///
/// ```rust
/// use verdict::DeclaredFields;
///
/// struct RequestModel {
///     integer: i32,
///     required_string: String,
/// }
///
/// impl DeclaredFields for RequestModel {
///     fn declared_fields() -> &'static [&'static str] {
///         &["Integer", "RequiredString"]
///     }
/// }
/// ```
pub trait DeclaredFields {
    /// Field keys as they appear in the field-error map.
    fn declared_fields() -> &'static [&'static str];
}

// A list payload validates per element, so selectors resolve against the
// element's declared fields.
impl<T: DeclaredFields> DeclaredFields for Vec<T> {
    fn declared_fields() -> &'static [&'static str] {
        T::declared_fields()
    }
}

/// Declared-field lookup for one payload type, built once per chain.
#[derive(Debug, Clone, Copy)]
pub struct FieldRegistry {
    fields: &'static [&'static str],
    model: &'static str,
}

impl FieldRegistry {
    /// The registry for `T`.
    pub fn of<T: DeclaredFields>() -> Self {
        Self {
            fields: T::declared_fields(),
            model: std::any::type_name::<T>(),
        }
    }

    /// Resolve a selector to its field-error key.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::UnknownField`] when `field` is not declared.
    pub fn resolve(&self, field: &str) -> Result<&'static str, AssertionError> {
        self.fields
            .iter()
            .find(|declared| **declared == field)
            .copied()
            .ok_or_else(|| AssertionError::UnknownField {
                field: field.to_string(),
                model: self.model,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct RequestModel;

    impl DeclaredFields for RequestModel {
        fn declared_fields() -> &'static [&'static str] {
            &["Integer", "RequiredString", "NonRequiredString"]
        }
    }

    #[test]
    fn test_empty_map_is_valid() {
        assert!(FieldErrorMap::new().is_valid());
    }

    #[test]
    fn test_recorded_error_invalidates() {
        let mut map = FieldErrorMap::new();
        map.add_error("RequiredString", "The RequiredString field is required");
        assert!(!map.is_valid());
        assert!(map.contains_errors_for("RequiredString"));
        assert!(!map.contains_errors_for("Integer"));
    }

    #[test]
    fn test_errors_for_absent_key_is_empty() {
        let map = FieldErrorMap::new();
        assert!(map.errors_for("Name").is_empty());
    }

    #[test]
    fn test_multiple_messages_keep_order() {
        let mut map = FieldErrorMap::new();
        map.add_error("Name", "first");
        map.add_error("Name", "second");
        assert_eq!(map.errors_for("Name"), ["first", "second"]);
    }

    #[test]
    fn test_from_json_key_to_messages_shape() {
        let map = FieldErrorMap::from_json(json!({
            "Name": ["The Name field is required"],
            "Ignored": [],
        }))
        .unwrap();
        assert!(map.contains_errors_for("Name"));
        assert!(!map.contains_errors_for("Ignored"));
    }

    #[test]
    fn test_check_no_errors_verdicts() {
        assert!(check_no_errors(&FieldErrorMap::new()).is_ok());

        let mut map = FieldErrorMap::new();
        map.add_error("Name", "bad");
        assert!(check_no_errors(&map).is_err());
    }

    #[test]
    fn test_key_checks_are_exclusive_and_exhaustive() {
        let mut map = FieldErrorMap::new();
        map.add_error("Name", "bad");

        assert!(check_error_against(&map, "Name").is_ok());
        assert!(check_no_error_against(&map, "Name").is_err());

        assert!(check_error_against(&map, "Other").is_err());
        assert!(check_no_error_against(&map, "Other").is_ok());
    }

    #[test]
    fn test_registry_resolves_declared_field() {
        let registry = FieldRegistry::of::<RequestModel>();
        assert_eq!(registry.resolve("RequiredString").unwrap(), "RequiredString");
    }

    #[test]
    fn test_registry_rejects_unknown_field() {
        let registry = FieldRegistry::of::<RequestModel>();
        let error = registry.resolve("Missing").unwrap_err();
        assert!(matches!(error, AssertionError::UnknownField { .. }));
    }
}
