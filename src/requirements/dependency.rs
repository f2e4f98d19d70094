//! Resolved dependencies.
//!
//! A [`Dependency`] is what the manager hands back for a find request. It is
//! a flat record: resolved or not, it always names the requirement it was
//! asked for, so callers can serialize it without inspecting its shape.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::requirement::Requirement;

/// How a resolved dependency is made available to a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// A directory to prepend to `PATH`.
    Path,
    /// A shell script to source before the job runs.
    Environment,
    /// A single executable.
    Executable,
}

impl DependencyKind {
    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Path => "path",
            DependencyKind::Environment => "environment",
            DependencyKind::Executable => "executable",
        }
    }
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a resolver reports for a requirement it can satisfy.
///
/// The manager adds provenance when it turns this into a [`Dependency`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// How the dependency is exposed.
    pub kind: DependencyKind,
    /// Location of the directory, script or executable.
    pub path: PathBuf,
    /// Whether the requested version was matched precisely.
    pub exact: bool,
}

impl Resolved {
    /// Create a resolution result.
    pub fn new(kind: DependencyKind, path: impl Into<PathBuf>, exact: bool) -> Self {
        Self {
            kind,
            path: path.into(),
            exact,
        }
    }
}

/// Result of a find request, resolved or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Requested name.
    pub name: String,
    /// Requested version.
    pub version: Option<String>,
    /// Requested type.
    #[serde(rename = "type")]
    pub requirement_type: String,
    /// How the dependency is exposed; `None` when unresolved.
    pub dependency_type: Option<DependencyKind>,
    /// Location of the dependency; `None` when unresolved.
    pub path: Option<PathBuf>,
    /// Whether the match was exact. Always `false` when unresolved.
    pub exact: bool,
    /// Index of the resolver that produced this dependency.
    pub resolver_index: Option<usize>,
    /// Type tag of the resolver that produced this dependency.
    pub resolver_type: Option<String>,
}

impl Dependency {
    /// An unresolved dependency attributed to no resolver.
    pub fn unresolved(requirement: &Requirement) -> Self {
        Self {
            name: requirement.name.clone(),
            version: requirement.version.clone(),
            requirement_type: requirement.requirement_type.clone(),
            dependency_type: None,
            path: None,
            exact: false,
            resolver_index: None,
            resolver_type: None,
        }
    }

    /// A dependency resolved by the resolver at `resolver_index`.
    pub fn resolved(
        requirement: &Requirement,
        resolver_index: usize,
        resolver_type: &str,
        resolved: Resolved,
    ) -> Self {
        Self {
            name: requirement.name.clone(),
            version: requirement.version.clone(),
            requirement_type: requirement.requirement_type.clone(),
            dependency_type: Some(resolved.kind),
            path: Some(resolved.path),
            exact: resolved.exact,
            resolver_index: Some(resolver_index),
            resolver_type: Some(resolver_type.to_string()),
        }
    }

    /// Whether a resolver satisfied the requirement.
    pub fn is_resolved(&self) -> bool {
        self.dependency_type.is_some()
    }

    /// Location of the dependency, if resolved.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
