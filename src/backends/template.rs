//! Install command templates.
//!
//! Templates use `{placeholder}` syntax. Built-in placeholders are `name`,
//! `version` (empty when absent), `type` and `job_directory`; any other
//! placeholder is looked up in the request's extension options. Substituted
//! values are shell-quoted.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{DepchainError, Result};
use crate::requirements::{Requirement, ResolveOptions};
use crate::shell::shell_quote;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// Placeholder names used in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Render `template` for `requirement`.
///
/// Fails if a placeholder is neither built in nor present in `options.extra`.
pub fn render(
    template: &str,
    requirement: &Requirement,
    options: &ResolveOptions,
) -> Result<String> {
    let mut values: BTreeMap<&str, String> = options
        .extra
        .iter()
        .map(|(k, v)| (k.as_str(), v.clone()))
        .collect();
    values.insert("name", requirement.name.clone());
    values.insert(
        "version",
        requirement.version.clone().unwrap_or_default(),
    );
    values.insert("type", requirement.requirement_type.clone());
    values.insert(
        "job_directory",
        options
            .job_directory
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
    );

    if let Some(missing) = placeholders(template)
        .into_iter()
        .find(|key| !values.contains_key(key.as_str()))
    {
        return Err(DepchainError::InvalidField {
            field: missing.clone(),
            message: format!("no value for placeholder '{{{}}}' in install template", missing),
        });
    }

    let rendered = PLACEHOLDER.replace_all(template, |caps: &Captures| {
        values
            .get(&caps[1])
            .map(|value| shell_quote(value))
            .unwrap_or_default()
    });
    Ok(rendered.into_owned())
}
