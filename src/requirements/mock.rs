//! Mock resolver for testing.
//!
//! `MockResolver` implements every facet of the resolver contract but only
//! exposes the ones it was configured with, and records each call for later
//! assertion.
//!
//! # Example
//!
//! ```
//! use depchain::requirements::{DependencyManager, DependencyRequest, MockResolver, Requirement};
//!
//! let resolver = MockResolver::new("conda").resolving(["samtools"]);
//! let manager = DependencyManager::new(vec![Box::new(resolver)]);
//!
//! let request = DependencyRequest::new(Requirement::new("samtools").unwrap());
//! let dep = manager.find_dep(&request).unwrap();
//! assert_eq!(dep.resolver_type.as_deref(), Some("conda"));
//! ```

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{DepchainError, Result};

use super::dependency::{DependencyKind, Resolved};
use super::requirement::{Requirement, ResolveOptions};
use super::resolver::{DependencyResolver, Install, ListInstalled, Resolve};

/// A call received by a [`MockResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// `resolve` was called.
    Resolve {
        requirement: Requirement,
        options: ResolveOptions,
    },
    /// `install` was called.
    Install {
        requirement: Requirement,
        options: ResolveOptions,
    },
    /// `list_installed` was called.
    List,
}

/// Shared handle to the calls a mock received, usable after the mock has
/// been moved into a manager.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<MockCall>>>);

impl CallLog {
    fn lock(&self) -> MutexGuard<'_, Vec<MockCall>> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, call: MockCall) {
        self.lock().push(call);
    }

    /// Snapshot of all calls so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.lock().clone()
    }

    /// Number of `resolve` calls.
    pub fn resolve_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|c| matches!(c, MockCall::Resolve { .. }))
            .count()
    }

    /// Number of `install` calls.
    pub fn install_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|c| matches!(c, MockCall::Install { .. }))
            .count()
    }

    /// Number of `list_installed` calls.
    pub fn list_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|c| matches!(c, MockCall::List))
            .count()
    }
}

#[derive(Debug, Default)]
struct MockState {
    resolvable: HashSet<String>,
    installed: Vec<Requirement>,
}

/// Configurable in-memory resolver.
#[derive(Debug)]
pub struct MockResolver {
    resolver_type: String,
    versionless: bool,
    can_resolve: bool,
    can_list: bool,
    install_result: Option<bool>,
    failing: bool,
    state: Mutex<MockState>,
    log: CallLog,
}

impl MockResolver {
    /// A resolver with no capabilities.
    pub fn new(resolver_type: &str) -> Self {
        Self {
            resolver_type: resolver_type.to_string(),
            versionless: false,
            can_resolve: false,
            can_list: false,
            install_result: None,
            failing: false,
            state: Mutex::new(MockState::default()),
            log: CallLog::default(),
        }
    }

    /// Mark the resolver versionless.
    pub fn versionless(mut self, versionless: bool) -> Self {
        self.versionless = versionless;
        self
    }

    /// Expose `resolve`, satisfying the given names.
    pub fn resolving<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.can_resolve = true;
        self.state_mut()
            .resolvable
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Expose `list_installed`, reporting the given requirements.
    pub fn listing(mut self, installed: Vec<Requirement>) -> Self {
        self.can_list = true;
        self.state_mut().installed = installed;
        self
    }

    /// Expose `install`, always returning `result`.
    ///
    /// A successful install makes the requirement resolvable and listed.
    pub fn installing(mut self, result: bool) -> Self {
        self.install_result = Some(result);
        self
    }

    /// Make every exposed facet fail with a backend error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Handle to this resolver's call log.
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    fn state_mut(&mut self) -> &mut MockState {
        self.state
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_failing(&self) -> Result<()> {
        if self.failing {
            return Err(DepchainError::BackendFailed {
                resolver_type: self.resolver_type.clone(),
                message: "mock failure".to_string(),
            });
        }
        Ok(())
    }
}

impl DependencyResolver for MockResolver {
    fn resolver_type(&self) -> &str {
        &self.resolver_type
    }

    fn versionless(&self) -> bool {
        self.versionless
    }

    fn as_resolve(&self) -> Option<&dyn Resolve> {
        self.can_resolve.then_some(self as &dyn Resolve)
    }

    fn as_list(&self) -> Option<&dyn ListInstalled> {
        self.can_list.then_some(self as &dyn ListInstalled)
    }

    fn as_install(&self) -> Option<&dyn Install> {
        self.install_result.map(|_| self as &dyn Install)
    }
}

impl Resolve for MockResolver {
    fn resolve(
        &self,
        requirement: &Requirement,
        options: &ResolveOptions,
    ) -> Result<Option<Resolved>> {
        self.log.push(MockCall::Resolve {
            requirement: requirement.clone(),
            options: options.clone(),
        });
        self.check_failing()?;

        if !self.state().resolvable.contains(&requirement.name) {
            return Ok(None);
        }
        let exact = !self.versionless && requirement.version.is_some();
        let path = PathBuf::from("/mock")
            .join(&self.resolver_type)
            .join(&requirement.name);
        Ok(Some(Resolved::new(DependencyKind::Path, path, exact)))
    }
}

impl ListInstalled for MockResolver {
    fn list_installed(&self) -> Result<Vec<Requirement>> {
        self.log.push(MockCall::List);
        self.check_failing()?;
        Ok(self.state().installed.clone())
    }
}

impl Install for MockResolver {
    fn install(&self, requirement: &Requirement, options: &ResolveOptions) -> Result<bool> {
        self.log.push(MockCall::Install {
            requirement: requirement.clone(),
            options: options.clone(),
        });
        self.check_failing()?;

        let success = self.install_result.unwrap_or(false);
        if success {
            let mut state = self.state();
            state.resolvable.insert(requirement.name.clone());
            state.installed.push(requirement.clone());
        }
        Ok(success)
    }
}
