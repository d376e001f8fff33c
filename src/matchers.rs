//! Text matching for message assertions.
//!
//! Error-message and failure-message verbs accept patterns, tried in order:
//! glob first, then regex, then literal comparison. A pattern that fails to
//! compile under one mode silently falls through to the next, so plain
//! strings always work.

use glob::Pattern;
use regex::Regex;

/// Match `actual` against `pattern`.
///
/// Three matching modes, tried in order:
/// 1. **Glob patterns**: e.g. `*required*`, `field ?`
/// 2. **Regex**: e.g. `^The .* field is required$`
/// 3. **Exact match**: literal string comparison
///
/// # Example
///
/// ```rust
/// use verdict::text_matches;
///
/// assert!(text_matches("*required*", "The Name field is required"));
/// assert!(text_matches("^value .* range$", "value out of range"));
/// assert!(text_matches("exact text", "exact text"));
/// assert!(!text_matches("*missing*", "nothing here"));
/// ```
pub fn text_matches(pattern: &str, actual: &str) -> bool {
    if let Ok(glob) = Pattern::new(pattern) {
        if glob.matches(actual) {
            return true;
        }
    }

    if let Ok(re) = Regex::new(pattern) {
        if re.is_match(actual) {
            return true;
        }
    }

    pattern == actual
}

/// Build a [`FieldErrorMap`](crate::FieldErrorMap) from key/message pairs.
///
/// # Example
///
/// ```rust,ignore
/// use verdict::field_errors;
///
/// let errors = field_errors! {
///     "RequiredString" => "The RequiredString field is required",
///     "Integer" => "out of range",
/// };
/// ```
#[macro_export]
macro_rules! field_errors {
    ($($key:expr => $message:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::FieldErrorMap::new();
        $(
            map.add_error($key, $message);
        )*
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_matching() {
        assert!(text_matches("*required*", "The Name field is required"));
        assert!(!text_matches("*required*", "looks fine"));
    }

    #[test]
    fn test_regex_matching() {
        assert!(text_matches(r"^error \d+$", "error 42"));
        assert!(!text_matches(r"^error \d+$", "error forty-two"));
    }

    #[test]
    fn test_exact_fallback() {
        assert!(text_matches("plain message", "plain message"));
        assert!(!text_matches("plain message", "other message"));
    }

    #[test]
    fn test_field_errors_macro() {
        let errors = field_errors! {
            "RequiredString" => "The RequiredString field is required",
            "Integer" => "out of range",
        };
        assert!(errors.contains_errors_for("RequiredString"));
        assert!(errors.contains_errors_for("Integer"));
        assert!(!errors.contains_errors_for("Name"));
    }

    #[test]
    fn test_field_errors_macro_empty() {
        let errors = field_errors! {};
        assert!(errors.is_valid());
    }
}
