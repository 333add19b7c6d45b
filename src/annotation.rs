//! Per-field annotation parsing.
//!
//! An annotation is a single string of `;`-separated `key:value` clauses:
//!
//! ```text
//! required:true;in:query;multiple:true;enum:['available','pending','sold'];name:status
//! ```
//!
//! Recognized keys are `required`, `in`, `multiple`, `enum` and `name`. Unknown
//! keys, clauses without a `:` and malformed boolean literals are ignored; the
//! affected option keeps its default. Parsing never fails.

use log::debug;

/// Collection format emitted for `multiple:true`
pub const MULTI_COLLECTION_FORMAT: &str = "multi";

/// Options parsed from one field annotation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOptions {
    /// Externally visible parameter name, overriding the field name
    pub name: Option<String>,
    pub required: bool,
    /// Parameter location, stored verbatim
    pub location: String,
    /// `"multi"` when the parameter may repeat
    pub collection_format: String,
    pub enumeration: Vec<String>,
}

/// Parse an annotation string.
///
/// Returns `None` for an empty annotation, meaning the field is not a parameter.
pub fn parse_annotation(annotation: &str) -> Option<FieldOptions> {
    if annotation.trim().is_empty() {
        return None;
    }

    let mut options = FieldOptions::default();
    for clause in annotation.split(';') {
        let clause = clause.trim();
        if clause.is_empty() {
            continue;
        }
        let Some((key, value)) = clause.split_once(':') else {
            debug!("Ignoring annotation clause without value: {}", clause);
            continue;
        };
        let value = value.trim();

        match key.trim() {
            "required" => options.required = parse_bool_or(value, options.required),
            "in" => options.location = value.to_string(),
            "multiple" => {
                if parse_bool_or(value, false) {
                    options.collection_format = MULTI_COLLECTION_FORMAT.to_string();
                }
            }
            "enum" => options.enumeration = parse_enum_list(value),
            "name" => options.name = Some(value.to_string()),
            other => debug!("Ignoring unknown annotation key: {}", other),
        }
    }

    Some(options)
}

/// Parse a boolean literal, falling back to `default` when it is not one.
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool_or(value: &str, default: bool) -> bool {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => true,
        "0" | "f" | "F" | "FALSE" | "false" | "False" => false,
        _ => {
            debug!("Malformed boolean literal {:?}, keeping {}", value, default);
            default
        }
    }
}

/// `['a','b']` -> `["a", "b"]`
fn parse_enum_list(value: &str) -> Vec<String> {
    let inner = value
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(value);

    if inner.trim().is_empty() {
        return Vec::new();
    }

    inner
        .split(',')
        .map(|item| strip_quotes(item.trim()).to_string())
        .collect()
}

fn strip_quotes(item: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(unquoted) = item
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return unquoted;
        }
    }
    item
}
