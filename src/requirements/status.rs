//! Requirement status reconciliation.
//!
//! [`StatusReconciler`] cross-references requested requirements against
//! everything the manager's resolvers report as installed and annotates each
//! one with an installed/not-installed status and match exactness.
//!
//! Matching walks the installed list in resolver index order and takes the
//! first entry with the same name that satisfies the version rule:
//!
//! - version-aware resolver: requested version non-empty and equal to the
//!   installed version, reported exact
//! - versionless resolver: installed entry has no version, reported inexact
//!
//! Name matches that fail the version rule are passed over. There is no
//! best-version search across resolvers.

use serde::{Serialize, Serializer};

use super::manager::{DependencyManager, InstalledRequirement};
use super::requirement::Requirement;

/// Whether a requested requirement is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InstallStatus {
    /// A resolver reports it installed.
    #[serde(rename = "installed")]
    Installed,
    /// No resolver reports a matching installation.
    #[serde(rename = "not installed")]
    NotInstalled,
}

/// How precisely an installation matches the request.
///
/// Serializes as `true`, `false` or `"NA"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exactness {
    /// Installed version equals the requested version.
    Exact,
    /// Matched through a versionless resolver.
    Inexact,
    /// Not installed.
    NotApplicable,
}

impl Serialize for Exactness {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Exactness::Exact => serializer.serialize_bool(true),
            Exactness::Inexact => serializer.serialize_bool(false),
            Exactness::NotApplicable => serializer.serialize_str("NA"),
        }
    }
}

/// A requested requirement annotated with its installation status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementStatus {
    /// The requirement as requested.
    #[serde(flatten)]
    pub requirement: Requirement,
    /// Installed or not.
    pub status: InstallStatus,
    /// Match precision.
    pub exact: Exactness,
    /// Type tag of the resolver that has it installed.
    pub resolver_type: Option<String>,
}

impl RequirementStatus {
    /// Status for a requirement no resolver has installed.
    pub fn not_installed(requirement: Requirement) -> Self {
        Self {
            requirement,
            status: InstallStatus::NotInstalled,
            exact: Exactness::NotApplicable,
            resolver_type: None,
        }
    }

    /// Status for a requirement installed by `resolver_type`.
    pub fn installed(requirement: Requirement, resolver_type: &str, exact: bool) -> Self {
        Self {
            requirement,
            status: InstallStatus::Installed,
            exact: if exact {
                Exactness::Exact
            } else {
                Exactness::Inexact
            },
            resolver_type: Some(resolver_type.to_string()),
        }
    }

    /// Whether the requirement is installed.
    pub fn is_installed(&self) -> bool {
        self.status == InstallStatus::Installed
    }
}

/// Annotates requested requirements against a manager's installed state.
pub struct StatusReconciler<'a> {
    manager: &'a DependencyManager,
}

impl<'a> StatusReconciler<'a> {
    /// Create a reconciler over `manager`.
    pub fn new(manager: &'a DependencyManager) -> Self {
        Self { manager }
    }

    /// Annotate every requested requirement, in request order.
    ///
    /// The installed list is gathered once per call. Resolvers that fail to
    /// list are skipped, so one bad backend never aborts the batch.
    pub fn reconcile(&self, requested: &[Requirement]) -> Vec<RequirementStatus> {
        let installed = self.manager.list_all_installed();
        requested
            .iter()
            .map(|requirement| self.reconcile_one(requirement, &installed))
            .collect()
    }

    fn reconcile_one(
        &self,
        requested: &Requirement,
        installed: &[InstalledRequirement],
    ) -> RequirementStatus {
        for entry in installed {
            if entry.requirement.name != requested.name {
                continue;
            }
            let Ok(resolver) = self.manager.resolver(entry.index) else {
                continue;
            };
            let versionless = resolver.versionless();
            let versions_match = !versionless
                && requested.version().is_some_and(|v| !v.is_empty())
                && requested.version() == entry.requirement.version();
            let versionless_match = versionless && entry.requirement.version.is_none();

            if versions_match || versionless_match {
                return RequirementStatus::installed(
                    requested.clone(),
                    resolver.resolver_type(),
                    !versionless,
                );
            }
        }
        RequirementStatus::not_installed(requested.clone())
    }
}
