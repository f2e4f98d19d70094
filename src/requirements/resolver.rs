//! The resolver capability contract.
//!
//! Every resolver implements [`DependencyResolver`]. What it can actually do
//! is discovered structurally: a resolver exposes zero or more of the
//! [`Resolve`], [`ListInstalled`] and [`Install`] facets through the
//! `as_*` accessors, and [`capabilities`] reports which ones are present.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::dependency::Resolved;
use super::requirement::{Requirement, ResolveOptions};

/// One optional facet of a resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Locate a requirement.
    Resolve,
    /// Enumerate installed requirements.
    List,
    /// Install a requirement.
    Install,
}

impl Capability {
    /// All capabilities in canonical order.
    pub const ALL: [Capability; 3] = [Capability::Resolve, Capability::List, Capability::Install];

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Resolve => "resolve",
            Capability::List => "list",
            Capability::Install => "install",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of capabilities a resolver exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    resolve: bool,
    list: bool,
    install: bool,
}

impl Capabilities {
    /// Whether the set contains `capability`.
    pub fn contains(&self, capability: Capability) -> bool {
        match capability {
            Capability::Resolve => self.resolve,
            Capability::List => self.list,
            Capability::Install => self.install,
        }
    }

    /// Capabilities present, in canonical order.
    pub fn to_vec(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| self.contains(*c))
            .collect()
    }

    /// Whether no capability is present.
    pub fn is_empty(&self) -> bool {
        !(self.resolve || self.list || self.install)
    }
}

/// Locate a requirement.
pub trait Resolve {
    /// Resolve `requirement`, returning `Ok(None)` when this resolver cannot
    /// satisfy it. `Err` is reserved for backend failures.
    fn resolve(
        &self,
        requirement: &Requirement,
        options: &ResolveOptions,
    ) -> Result<Option<Resolved>>;
}

/// Enumerate everything currently installed or visible to a resolver.
pub trait ListInstalled {
    /// Installed requirements in the resolver's own order.
    fn list_installed(&self) -> Result<Vec<Requirement>>;
}

/// Install a requirement.
///
/// Implementations are treated as single-writer: callers must serialize
/// concurrent installs against one resolver unless it says otherwise.
pub trait Install {
    /// Install `requirement`, returning `Ok(false)` when the backend tried
    /// and did not succeed. Partial side effects are not rolled back.
    fn install(&self, requirement: &Requirement, options: &ResolveOptions) -> Result<bool>;
}

/// A strategy for satisfying requirements through one backend mechanism.
pub trait DependencyResolver: Send + Sync {
    /// Tag identifying the strategy (e.g. `"conda"`, `"modules"`).
    fn resolver_type(&self) -> &str;

    /// Whether this resolver ignores version distinctions.
    fn versionless(&self) -> bool {
        false
    }

    /// The resolve facet, if supported.
    fn as_resolve(&self) -> Option<&dyn Resolve> {
        None
    }

    /// The list facet, if supported.
    fn as_list(&self) -> Option<&dyn ListInstalled> {
        None
    }

    /// The install facet, if supported.
    fn as_install(&self) -> Option<&dyn Install> {
        None
    }
}

/// Compute the capabilities a resolver exposes.
pub fn capabilities(resolver: &dyn DependencyResolver) -> Capabilities {
    Capabilities {
        resolve: resolver.as_resolve().is_some(),
        list: resolver.as_list().is_some(),
        install: resolver.as_install().is_some(),
    }
}

/// Serializable summary of a resolver at a given index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverDescriptor {
    /// Position in the manager's resolver list.
    pub index: usize,
    /// Strategy tag.
    pub resolver_type: String,
    /// Whether versions are ignored.
    pub versionless: bool,
    /// Facets the resolver exposes.
    pub capabilities: Vec<Capability>,
}

impl ResolverDescriptor {
    /// Describe `resolver` as found at `index`.
    pub fn describe(index: usize, resolver: &dyn DependencyResolver) -> Self {
        Self {
            index,
            resolver_type: resolver.resolver_type().to_string(),
            versionless: resolver.versionless(),
            capabilities: capabilities(resolver).to_vec(),
        }
    }

    /// Whether the described resolver exposes `capability`.
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}
