//! Boundary operations for presentation layers.
//!
//! [`ResolverApi`] is what an HTTP handler or the CLI talks to. It receives
//! its [`DependencyManager`] explicitly and adds nothing but request parsing
//! on top of it; transport, auth and rendering stay with the caller.

use std::collections::BTreeMap;

use crate::error::Result;

use super::dependency::Dependency;
use super::manager::{DependencyManager, InstalledRequirement};
use super::requirement::{DependencyRequest, Requirement};
use super::resolver::ResolverDescriptor;
use super::status::{RequirementStatus, StatusReconciler};

/// Facade exposing the resolver operations over an injected manager.
#[derive(Debug, Clone, Copy)]
pub struct ResolverApi<'a> {
    manager: &'a DependencyManager,
}

impl<'a> ResolverApi<'a> {
    /// Create the facade.
    pub fn new(manager: &'a DependencyManager) -> Self {
        Self { manager }
    }

    /// Describe every resolver in priority order.
    pub fn list_resolvers(&self) -> Vec<ResolverDescriptor> {
        self.manager.descriptors()
    }

    /// Describe one resolver; `IndexOutOfRange` if it does not exist.
    pub fn get_resolver(&self, index: usize) -> Result<ResolverDescriptor> {
        self.manager.descriptor(index)
    }

    /// Resolve a parsed request.
    pub fn find_dependency(&self, request: &DependencyRequest) -> Result<Dependency> {
        self.manager.find_dep(request)
    }

    /// Resolve from flat parameters (`name`, `version`, `type`, `index`, ...).
    pub fn find_dependency_params(&self, params: BTreeMap<String, String>) -> Result<Dependency> {
        self.find_dependency(&DependencyRequest::from_params(params)?)
    }

    /// Install a parsed request.
    pub fn install_dependency(&self, request: &DependencyRequest) -> Result<bool> {
        self.manager.install(request)
    }

    /// Install from flat parameters.
    pub fn install_dependency_params(&self, params: BTreeMap<String, String>) -> Result<bool> {
        self.install_dependency(&DependencyRequest::from_params(params)?)
    }

    /// What one resolver reports as installed.
    pub fn list_installed_for_resolver(&self, index: usize) -> Result<Vec<Requirement>> {
        self.manager.list_installed(index)
    }

    /// What every listing resolver reports as installed.
    pub fn list_all_installed(&self) -> Vec<InstalledRequirement> {
        self.manager.list_all_installed()
    }

    /// Annotate requested requirements with installation status.
    pub fn reconcile_status(&self, requested: &[Requirement]) -> Vec<RequirementStatus> {
        StatusReconciler::new(self.manager).reconcile(requested)
    }
}
