//! Executable-on-path resolver.
//!
//! A requirement resolves when an executable of the same name is found on
//! the search path. Versions are never inspected, so the resolver is
//! versionless. When configured with an install template it can also
//! install packages by running that template through the shell.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;
use crate::requirements::{
    DependencyKind, DependencyResolver, Install, ListInstalled, Requirement, Resolve,
    ResolveOptions, Resolved,
};
use crate::shell::{self, CommandOptions};

use super::template;

/// Environment variables exported to install commands.
pub const ENV_NAME: &str = "DEPCHAIN_NAME";
pub const ENV_VERSION: &str = "DEPCHAIN_VERSION";
pub const ENV_TYPE: &str = "DEPCHAIN_TYPE";

/// Resolves `package` requirements to executables on a search path.
#[derive(Debug, Clone)]
pub struct CommandResolver {
    resolver_type: String,
    packages: Vec<String>,
    search_path: Option<Vec<PathBuf>>,
    install_template: Option<String>,
}

impl CommandResolver {
    /// Resolver type tag used when none is configured.
    pub const DEFAULT_TYPE: &'static str = "command";

    /// Create a resolver that lists `packages` and searches `$PATH`.
    pub fn new<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            resolver_type: Self::DEFAULT_TYPE.to_string(),
            packages: packages.into_iter().map(Into::into).collect(),
            search_path: None,
            install_template: None,
        }
    }

    /// Override the resolver type tag.
    pub fn with_resolver_type(mut self, resolver_type: impl Into<String>) -> Self {
        self.resolver_type = resolver_type.into();
        self
    }

    /// Search these directories instead of `$PATH`.
    pub fn with_search_path(mut self, search_path: Vec<PathBuf>) -> Self {
        self.search_path = Some(search_path);
        self
    }

    /// Enable installation with a command template.
    pub fn with_install_template(mut self, template: impl Into<String>) -> Self {
        self.install_template = Some(template.into());
        self
    }

    fn search_path(&self) -> Vec<PathBuf> {
        match &self.search_path {
            Some(dirs) => dirs.clone(),
            None => shell::parse_system_path(),
        }
    }
}

impl DependencyResolver for CommandResolver {
    fn resolver_type(&self) -> &str {
        &self.resolver_type
    }

    fn versionless(&self) -> bool {
        true
    }

    fn as_resolve(&self) -> Option<&dyn Resolve> {
        Some(self)
    }

    fn as_list(&self) -> Option<&dyn ListInstalled> {
        Some(self)
    }

    fn as_install(&self) -> Option<&dyn Install> {
        self.install_template
            .as_ref()
            .map(|_| self as &dyn Install)
    }
}

impl Resolve for CommandResolver {
    fn resolve(
        &self,
        requirement: &Requirement,
        _options: &ResolveOptions,
    ) -> Result<Option<Resolved>> {
        if !requirement.is_package() {
            return Ok(None);
        }
        let found = shell::resolve_tool_path(&requirement.name, &self.search_path());
        debug!(name = %requirement.name, found = ?found, "looked up executable");
        Ok(found.map(|path| {
            Resolved::new(
                DependencyKind::Executable,
                path,
                requirement.version.is_none(),
            )
        }))
    }
}

impl ListInstalled for CommandResolver {
    fn list_installed(&self) -> Result<Vec<Requirement>> {
        let search_path = self.search_path();
        let mut installed = Vec::new();
        for package in &self.packages {
            if shell::resolve_tool_path(package, &search_path).is_some() {
                installed.push(Requirement::new(package.as_str())?);
            }
        }
        Ok(installed)
    }
}

impl Install for CommandResolver {
    fn install(&self, requirement: &Requirement, options: &ResolveOptions) -> Result<bool> {
        let Some(install_template) = &self.install_template else {
            return Ok(false);
        };
        let command = template::render(install_template, requirement, options)?;
        debug!(command = %command, "running install command");

        let mut env = HashMap::new();
        env.insert(ENV_NAME.to_string(), requirement.name.clone());
        env.insert(
            ENV_VERSION.to_string(),
            requirement.version.clone().unwrap_or_default(),
        );
        env.insert(ENV_TYPE.to_string(), requirement.requirement_type.clone());

        let result = shell::execute(
            &command,
            &CommandOptions {
                cwd: options.job_directory.clone(),
                env,
                capture: true,
            },
        )?;
        if !result.success {
            debug!(
                exit_code = ?result.exit_code,
                stderr = %result.stderr.trim(),
                "install command failed"
            );
        }
        Ok(result.success)
    }
}
