//! Filesystem package tree resolver.
//!
//! Packages live under `<base>/<name>/<version>/`. A version directory that
//! contains `env.sh` is sourced as an environment; otherwise its `bin/` is
//! put on the path. `<base>/<name>/default` (usually a symlink) serves
//! unversioned requests.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::requirements::{
    DependencyKind, DependencyResolver, ListInstalled, Requirement, Resolve, ResolveOptions,
    Resolved,
};

/// Directory name that serves unversioned requests.
pub const DEFAULT_VERSION_DIR: &str = "default";

/// Environment script looked for in a version directory.
pub const ENV_SCRIPT: &str = "env.sh";

/// Resolves `package` requirements from a directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    base_path: PathBuf,
    resolver_type: String,
}

impl DirectoryResolver {
    /// Resolver type tag used when none is configured.
    pub const DEFAULT_TYPE: &'static str = "directory";

    /// Create a resolver rooted at `base_path`.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            resolver_type: Self::DEFAULT_TYPE.to_string(),
        }
    }

    /// Override the resolver type tag.
    pub fn with_resolver_type(mut self, resolver_type: impl Into<String>) -> Self {
        self.resolver_type = resolver_type.into();
        self
    }

    fn version_dir(&self, requirement: &Requirement) -> Option<PathBuf> {
        let version = requirement.version().unwrap_or(DEFAULT_VERSION_DIR);
        if !is_plain_component(&requirement.name) || !is_plain_component(version) {
            return None;
        }
        Some(self.base_path.join(&requirement.name).join(version))
    }
}

/// Whether `value` is usable as a single path component.
fn is_plain_component(value: &str) -> bool {
    !value.is_empty()
        && value != "."
        && value != ".."
        && !value.contains('/')
        && !value.contains('\\')
}

impl DependencyResolver for DirectoryResolver {
    fn resolver_type(&self) -> &str {
        &self.resolver_type
    }

    fn as_resolve(&self) -> Option<&dyn Resolve> {
        Some(self)
    }

    fn as_list(&self) -> Option<&dyn ListInstalled> {
        Some(self)
    }
}

impl Resolve for DirectoryResolver {
    fn resolve(
        &self,
        requirement: &Requirement,
        _options: &ResolveOptions,
    ) -> Result<Option<Resolved>> {
        if !requirement.is_package() {
            return Ok(None);
        }
        let Some(dir) = self.version_dir(requirement) else {
            return Ok(None);
        };
        if !dir.is_dir() {
            debug!(path = %dir.display(), "package directory not found");
            return Ok(None);
        }

        let exact = requirement.version.is_some();
        let script = dir.join(ENV_SCRIPT);
        if script.is_file() {
            return Ok(Some(Resolved::new(
                DependencyKind::Environment,
                script,
                exact,
            )));
        }
        let bin = dir.join("bin");
        if bin.is_dir() {
            return Ok(Some(Resolved::new(DependencyKind::Path, bin, exact)));
        }

        debug!(path = %dir.display(), "package directory has neither env.sh nor bin/");
        Ok(None)
    }
}

impl ListInstalled for DirectoryResolver {
    fn list_installed(&self) -> Result<Vec<Requirement>> {
        if !self.base_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut installed = Vec::new();
        for name in sorted_subdirs(&self.base_path)? {
            for version in sorted_subdirs(&self.base_path.join(&name))? {
                if version == DEFAULT_VERSION_DIR {
                    continue;
                }
                installed.push(Requirement::new(name.as_str())?.with_version(version));
            }
        }
        Ok(installed)
    }
}

fn sorted_subdirs(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();
    Ok(names)
}
