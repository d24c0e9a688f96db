//! Placeholder extraction for `{name}` templates.
//!
//! A placeholder is a non-empty name between a single `{` `}` pair, with no
//! braces inside. Anything else (an unmatched brace, `{}`) is literal text.
//! Names are kept verbatim, whitespace included.

use std::collections::HashSet;
use std::sync::LazyLock;

use heck::ToTitleCase;
use regex::Regex;
use serde::Serialize;

pub(crate) static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

/// Distinct placeholder names in first-occurrence order.
pub fn extract(template: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    PLACEHOLDER_PATTERN
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .filter(|name| seen.insert(*name))
        .map(String::from)
        .collect()
}

/// An input field derived from a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub label: String,
    pub hint: String,
}

impl Field {
    pub fn from_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: name.to_title_case(),
            hint: format!("Enter {}", name.replace('-', " ")),
        }
    }
}

/// Input fields for every placeholder of `template`, in extraction order.
pub fn fields(template: &str) -> Vec<Field> {
    extract(template)
        .iter()
        .map(|name| Field::from_name(name))
        .collect()
}
