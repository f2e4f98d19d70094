//! Configuration validation rules.
//!
//! - Directory resolvers need a non-empty `base_path`
//! - Command resolvers need non-empty, unique package names
//! - Install templates must reference `{name}`
//! - Resolver type labels must not be blank

use crate::backends::template::placeholders;
use crate::config::schema::{DepchainConfig, ResolverConfig};
use crate::error::{DepchainError, Result};
use std::collections::HashSet;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Position of the offending resolver in the chain
    pub resolver_index: usize,
}

impl ValidationError {
    fn new(rule: &str, resolver_index: usize, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            resolver_index,
        }
    }
}

/// Validate a configuration and return all errors.
///
/// All errors are collected so several problems can be fixed in one pass.
pub fn validate_config(config: &DepchainConfig) -> Vec<ValidationError> {
    config
        .resolvers
        .iter()
        .enumerate()
        .flat_map(|(index, resolver)| validate_resolver(index, resolver))
        .collect()
}

fn validate_resolver(index: usize, resolver: &ResolverConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let resolver_type = match resolver {
        ResolverConfig::Directory {
            base_path,
            resolver_type,
        } => {
            if base_path.as_os_str().is_empty() {
                errors.push(ValidationError::new(
                    "empty-base-path",
                    index,
                    format!("Resolver {} (directory) has an empty 'base_path'", index),
                ));
            }
            resolver_type
        }
        ResolverConfig::Command {
            packages,
            install,
            resolver_type,
            ..
        } => {
            let mut seen = HashSet::new();
            for package in packages {
                if package.trim().is_empty() {
                    errors.push(ValidationError::new(
                        "empty-package",
                        index,
                        format!("Resolver {} (command) lists an empty package name", index),
                    ));
                } else if !seen.insert(package.as_str()) {
                    errors.push(ValidationError::new(
                        "duplicate-package",
                        index,
                        format!(
                            "Resolver {} (command) lists package '{}' more than once",
                            index, package
                        ),
                    ));
                }
            }
            if let Some(template) = install {
                if !placeholders(template).iter().any(|p| p == "name") {
                    errors.push(ValidationError::new(
                        "install-missing-name",
                        index,
                        format!(
                            "Resolver {} (command) install template must contain '{{name}}'",
                            index
                        ),
                    ));
                }
            }
            resolver_type
        }
    };

    if matches!(resolver_type, Some(t) if t.trim().is_empty()) {
        errors.push(ValidationError::new(
            "empty-resolver-type",
            index,
            format!("Resolver {} has an empty 'resolver_type'", index),
        ));
    }

    errors
}

/// Validate and return Result (for use with ?).
pub fn validate(config: &DepchainConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(DepchainError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
