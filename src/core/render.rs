//! Placeholder substitution.
//!
//! Rendering itself is pure: it never touches history or the parameter
//! store. Every `{name}` occurrence is substituted independently, left to
//! right. Placeholders with no value are reported in `unresolved`; the
//! render still succeeds so partially filled commands stay usable.

use regex::Captures;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::params::{ParameterMap, Selection};
use crate::placeholder::PLACEHOLDER_PATTERN;

/// What an unresolved placeholder renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Substitute the empty string.
    #[default]
    Empty,
    /// Leave the `{name}` text in place.
    Keep,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderOutput {
    pub command: String,
    /// Distinct names with no value, in first-occurrence order.
    pub unresolved: Vec<String>,
}

impl RenderOutput {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

pub fn render(template: &str, parameters: &ParameterMap) -> RenderOutput {
    render_with(template, parameters, UnresolvedPolicy::default())
}

pub fn render_with(
    template: &str,
    parameters: &ParameterMap,
    policy: UnresolvedPolicy,
) -> RenderOutput {
    let mut unresolved: Vec<String> = Vec::new();

    let command = PLACEHOLDER_PATTERN
        .replace_all(template, |caps: &Captures| {
            let full = caps.get(0).map(|m| m.as_str()).unwrap_or("");
            let name = caps.get(1).map(|m| m.as_str()).unwrap_or("");

            match parameters.get(name) {
                Some(value) => value.clone(),
                None => {
                    if !unresolved.iter().any(|n| n == name) {
                        unresolved.push(name.to_string());
                    }
                    match policy {
                        UnresolvedPolicy::Empty => String::new(),
                        UnresolvedPolicy::Keep => full.to_string(),
                    }
                }
            }
        })
        .into_owned();

    RenderOutput {
        command,
        unresolved,
    }
}

/// Look up the selection's template and render it.
///
/// A selection absent from the catalog fails with
/// `render.catalog_lookup_failed` and produces no output.
pub fn render_selection(
    catalog: &Catalog,
    selection: &Selection,
    parameters: &ParameterMap,
    policy: UnresolvedPolicy,
) -> Result<RenderOutput> {
    let record = catalog
        .record(&selection.category, &selection.subcommand)
        .map_err(|cause| {
            Error::catalog_lookup_failure(&selection.category, &selection.subcommand, cause)
        })?;

    Ok(render_with(&record.template, parameters, policy))
}
