//! Shared display helpers for command output.
//!
//! Every command renders either these plain-text lines or JSON via
//! [`write_json`], so the formats stay consistent across commands.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::requirements::{
    Dependency, Exactness, InstallStatus, Requirement, RequirementStatus, ResolverDescriptor,
};

/// Serialize `value` as pretty JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(anyhow::Error::from)?;
    writeln!(out, "{}", json)?;
    Ok(())
}

/// `name` or `name@version`.
pub fn requirement_label(name: &str, version: Option<&str>) -> String {
    match version {
        Some(v) => format!("{}@{}", name, v),
        None => name.to_string(),
    }
}

/// Bracketed symbol for an install status.
pub fn status_symbol(status: InstallStatus) -> &'static str {
    match status {
        InstallStatus::Installed => "[ok]",
        InstallStatus::NotInstalled => "[missing]",
    }
}

/// Human word for exactness.
pub fn exactness_label(exact: Exactness) -> &'static str {
    match exact {
        Exactness::Exact => "exact",
        Exactness::Inexact => "inexact",
        Exactness::NotApplicable => "n/a",
    }
}

/// One line describing a resolver.
pub fn descriptor_line(descriptor: &ResolverDescriptor) -> String {
    let caps: Vec<&str> = descriptor
        .capabilities
        .iter()
        .map(|c| c.as_str())
        .collect();
    let caps = if caps.is_empty() {
        "none".to_string()
    } else {
        caps.join(", ")
    };
    let mut line = format!(
        "[{}] {}  capabilities: {}",
        descriptor.index, descriptor.resolver_type, caps
    );
    if descriptor.versionless {
        line.push_str("  (versionless)");
    }
    line
}

/// One line describing a find result.
pub fn dependency_line(dependency: &Dependency) -> String {
    let label = requirement_label(&dependency.name, dependency.version.as_deref());
    match (
        dependency.dependency_type,
        dependency.path(),
        dependency.resolver_index,
        dependency.resolver_type.as_deref(),
    ) {
        (Some(kind), Some(path), Some(index), Some(resolver_type)) => format!(
            "{} -> {} {} ({}, resolver [{}] {})",
            label,
            kind,
            path.display(),
            if dependency.exact { "exact" } else { "inexact" },
            index,
            resolver_type
        ),
        _ => format!("{}: not found", label),
    }
}

/// One line for an installed requirement.
pub fn installed_line(index: Option<usize>, requirement: &Requirement) -> String {
    let label = requirement_label(&requirement.name, requirement.version());
    match index {
        Some(i) => format!("[{}] {} ({})", i, label, requirement.requirement_type),
        None => format!("{} ({})", label, requirement.requirement_type),
    }
}

/// One line for a reconciled status.
pub fn status_line(status: &RequirementStatus) -> String {
    let label = requirement_label(&status.requirement.name, status.requirement.version());
    let mut line = format!("{} {}", status_symbol(status.status), label);
    if let Some(resolver_type) = &status.resolver_type {
        line.push_str(&format!(
            "  {} via {}",
            exactness_label(status.exact),
            resolver_type
        ));
    }
    line
}
