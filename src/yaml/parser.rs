//! Scenario parsing and kind-name resolution.
//!
//! This module handles YAML deserialization and string-to-ResultKind
//! conversion. All string parsing logic (case handling, aliases) lives here.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::kind::ResultKind;

/// Error type for scenario parsing issues.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("Unknown result kind: '{0}'. Available kinds: ok, created, content, bad_request, not_found, status_code")]
    UnknownKind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A scenario loaded from YAML.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    /// Human-readable name for this scenario.
    pub name: String,
    /// Optional description shown alongside results.
    #[serde(default)]
    pub description: Option<String>,
    /// The expected outcome.
    pub expected: Expected,
}

/// The declared expectations over one captured outcome.
#[derive(Debug, Deserialize)]
pub struct Expected {
    /// Result kind (case-insensitive, supports aliases).
    pub kind: String,
    /// Expected location literal, compared component by component.
    pub location: Option<String>,
    /// Expected status code.
    pub status: Option<u16>,
    /// Whether the formatter set must equal the default set.
    #[serde(default)]
    pub default_formatters: bool,
    /// Formatter variant names that must each be present.
    pub formatters: Option<Vec<String>>,
    /// Expected negotiator variant name.
    pub negotiator: Option<String>,
    /// Expected bad-request error message.
    pub error_message: Option<String>,
    /// Model-state expectations.
    pub model_state: Option<ModelStateExpectation>,
}

/// Declared model-state expectations.
#[derive(Debug, Default, Deserialize)]
pub struct ModelStateExpectation {
    /// `true` requires an empty field-error map; `false` requires a
    /// non-empty one.
    #[serde(default)]
    pub valid: Option<bool>,
    /// Keys that must have at least one recorded error.
    #[serde(default)]
    pub with_errors: Vec<String>,
    /// Keys that must have no recorded error.
    #[serde(default)]
    pub without_errors: Vec<String>,
}

/// Load a scenario from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the YAML is malformed.
///
/// # Example
///
/// ```rust,ignore
/// let scenario = load_scenario("scenarios/create_user.yaml".as_ref())?;
/// println!("Running: {}", scenario.name);
/// ```
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let content = std::fs::read_to_string(path).context("Failed to read scenario file")?;
    let scenario: Scenario = serde_yaml::from_str(&content).context("Failed to parse YAML")?;
    Ok(scenario)
}

/// Parse a kind name string into a [`ResultKind`].
///
/// Handles case-insensitive matching and snake/compact aliases.
///
/// # Errors
///
/// Returns [`ScenarioError::UnknownKind`] if the string doesn't match any
/// supported kind.
///
/// # Example
///
/// ```rust
/// use verdict::yaml::parse_kind_name;
/// use verdict::ResultKind;
///
/// assert_eq!(parse_kind_name("created").unwrap(), ResultKind::Created);
/// assert_eq!(parse_kind_name("BadRequest").unwrap(), ResultKind::BadRequest);
/// ```
pub fn parse_kind_name(s: &str) -> Result<ResultKind, ScenarioError> {
    match s.to_lowercase().as_str() {
        "ok" => Ok(ResultKind::Ok),
        "created" => Ok(ResultKind::Created),
        "content" => Ok(ResultKind::Content),
        "bad_request" | "badrequest" => Ok(ResultKind::BadRequest),
        "not_found" | "notfound" => Ok(ResultKind::NotFound),
        "status_code" | "statuscode" | "status" => Ok(ResultKind::StatusCode),
        _ => Err(ScenarioError::UnknownKind(s.to_string())),
    }
}
