//! The dependency manager.
//!
//! [`DependencyManager`] owns an ordered chain of resolvers. Position in the
//! chain is both priority (index 0 is tried first) and the stable external
//! handle for a resolver. The chain is fixed at construction; a host that
//! wants to reload configuration builds a new manager.
//!
//! No method takes `&mut self`, so concurrent finds are safe. Concurrent
//! installs against the same resolver must be serialized by the caller.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{DepchainError, Result};

use super::dependency::Dependency;
use super::requirement::{DependencyRequest, Requirement};
use super::resolver::{Capability, DependencyResolver, ResolverDescriptor};

/// An installed requirement tagged with the resolver that reported it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledRequirement {
    /// Index of the reporting resolver.
    pub index: usize,
    /// The installed requirement.
    pub requirement: Requirement,
}

/// Ordered chain of resolvers with fallback resolution and installation.
pub struct DependencyManager {
    resolvers: Vec<Box<dyn DependencyResolver>>,
}

impl DependencyManager {
    /// Create a manager; `resolvers` order is priority order.
    pub fn new(resolvers: Vec<Box<dyn DependencyResolver>>) -> Self {
        Self { resolvers }
    }

    /// Number of resolvers.
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Iterate resolvers with their indices, in priority order.
    pub fn resolvers(&self) -> impl Iterator<Item = (usize, &dyn DependencyResolver)> {
        self.resolvers
            .iter()
            .enumerate()
            .map(|(index, resolver)| (index, resolver.as_ref()))
    }

    /// The resolver at `index`.
    pub fn resolver(&self, index: usize) -> Result<&dyn DependencyResolver> {
        self.resolvers
            .get(index)
            .map(|r| r.as_ref())
            .ok_or(DepchainError::IndexOutOfRange {
                index,
                count: self.resolvers.len(),
            })
    }

    /// Describe every resolver.
    pub fn descriptors(&self) -> Vec<ResolverDescriptor> {
        self.resolvers()
            .map(|(index, resolver)| ResolverDescriptor::describe(index, resolver))
            .collect()
    }

    /// Describe the resolver at `index`.
    pub fn descriptor(&self, index: usize) -> Result<ResolverDescriptor> {
        Ok(ResolverDescriptor::describe(index, self.resolver(index)?))
    }

    /// Indices of resolvers exposing the install facet, ascending.
    pub fn installable_indices(&self) -> Vec<usize> {
        self.resolvers()
            .filter(|(_, resolver)| resolver.as_install().is_some())
            .map(|(index, _)| index)
            .collect()
    }

    /// Resolve a requirement.
    ///
    /// With an explicit index only that resolver is asked. Without one,
    /// resolvers are tried in ascending index order and the first hit wins;
    /// resolvers without the resolve facet are skipped. Not finding the
    /// requirement yields an unresolved [`Dependency`], never an error.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` for an unknown index, `CapabilityNotSupported` if
    /// the targeted resolver cannot resolve.
    pub fn find_dep(&self, request: &DependencyRequest) -> Result<Dependency> {
        let requirement = &request.requirement;

        if let Some(index) = request.index {
            let resolver = self.resolver(index)?;
            let facet = resolver
                .as_resolve()
                .ok_or_else(|| not_supported(index, resolver, Capability::Resolve))?;
            return Ok(self
                .try_resolve(index, resolver, facet, request)
                .unwrap_or_else(|| Dependency::unresolved(requirement)));
        }

        for (index, resolver) in self.resolvers() {
            let Some(facet) = resolver.as_resolve() else {
                debug!(index, resolver = resolver.resolver_type(), "skipping: cannot resolve");
                continue;
            };
            if let Some(dependency) = self.try_resolve(index, resolver, facet, request) {
                return Ok(dependency);
            }
        }

        debug!(requirement = %requirement, "no resolver satisfied requirement");
        Ok(Dependency::unresolved(requirement))
    }

    fn try_resolve(
        &self,
        index: usize,
        resolver: &dyn DependencyResolver,
        facet: &dyn super::resolver::Resolve,
        request: &DependencyRequest,
    ) -> Option<Dependency> {
        let requirement = &request.requirement;
        debug!(index, resolver = resolver.resolver_type(), requirement = %requirement, "resolving");

        match facet.resolve(requirement, &request.options) {
            Ok(Some(resolved)) => Some(Dependency::resolved(
                requirement,
                index,
                resolver.resolver_type(),
                resolved,
            )),
            Ok(None) => None,
            Err(e) => {
                warn!(
                    index,
                    resolver = resolver.resolver_type(),
                    requirement = %requirement,
                    "resolution failed: {}",
                    e
                );
                None
            }
        }
    }

    /// Install a requirement.
    ///
    /// With an explicit index only that resolver is asked. Without one, every
    /// resolver with the install facet is tried in ascending index order until
    /// one reports success. Installation is not transactional: a resolver
    /// that fails part way is not rolled back before the next one is tried.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` for an unknown index, `CapabilityNotSupported` if
    /// the targeted resolver cannot install. "Nobody could install it" is
    /// `Ok(false)`.
    pub fn install(&self, request: &DependencyRequest) -> Result<bool> {
        if let Some(index) = request.index {
            let resolver = self.resolver(index)?;
            if resolver.as_install().is_none() {
                return Err(not_supported(index, resolver, Capability::Install));
            }
            return Ok(self.try_install(index, resolver, request));
        }

        for index in self.installable_indices() {
            let resolver = self.resolver(index)?;
            if self.try_install(index, resolver, request) {
                return Ok(true);
            }
        }

        debug!(requirement = %request.requirement, "no resolver installed requirement");
        Ok(false)
    }

    fn try_install(
        &self,
        index: usize,
        resolver: &dyn DependencyResolver,
        request: &DependencyRequest,
    ) -> bool {
        let Some(facet) = resolver.as_install() else {
            return false;
        };
        let requirement = &request.requirement;
        debug!(index, resolver = resolver.resolver_type(), requirement = %requirement, "installing");

        match facet.install(requirement, &request.options) {
            Ok(true) => {
                info!(
                    index,
                    resolver = resolver.resolver_type(),
                    "installed {}",
                    requirement
                );
                true
            }
            Ok(false) => false,
            Err(e) => {
                warn!(
                    index,
                    resolver = resolver.resolver_type(),
                    requirement = %requirement,
                    "install failed: {}",
                    e
                );
                false
            }
        }
    }

    /// Requirements installed according to the resolver at `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange`, `CapabilityNotSupported` if the resolver cannot
    /// list, or `BackendFailed` if the listing itself failed.
    pub fn list_installed(&self, index: usize) -> Result<Vec<Requirement>> {
        let resolver = self.resolver(index)?;
        let facet = resolver
            .as_list()
            .ok_or_else(|| not_supported(index, resolver, Capability::List))?;
        facet
            .list_installed()
            .map_err(|e| DepchainError::BackendFailed {
                resolver_type: resolver.resolver_type().to_string(),
                message: e.to_string(),
            })
    }

    /// Everything installed across all resolvers that can list.
    ///
    /// Ordered by resolver index, then by each resolver's own order. The
    /// same requirement visible through two resolvers appears twice.
    /// Resolvers without the list facet, or whose listing fails, contribute
    /// nothing.
    pub fn list_all_installed(&self) -> Vec<InstalledRequirement> {
        let mut installed = Vec::new();
        for (index, resolver) in self.resolvers() {
            let Some(facet) = resolver.as_list() else {
                continue;
            };
            match facet.list_installed() {
                Ok(requirements) => installed.extend(
                    requirements
                        .into_iter()
                        .map(|requirement| InstalledRequirement { index, requirement }),
                ),
                Err(e) => warn!(
                    index,
                    resolver = resolver.resolver_type(),
                    "listing installed requirements failed: {}",
                    e
                ),
            }
        }
        installed
    }
}

impl std::fmt::Debug for DependencyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyManager")
            .field(
                "resolvers",
                &self
                    .resolvers
                    .iter()
                    .map(|r| r.resolver_type())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn not_supported(
    index: usize,
    resolver: &dyn DependencyResolver,
    capability: Capability,
) -> DepchainError {
    DepchainError::CapabilityNotSupported {
        index,
        resolver_type: resolver.resolver_type().to_string(),
        capability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::mock::{MockCall, MockResolver};
    use crate::requirements::requirement::ResolveOptions;

    fn request(name: &str) -> DependencyRequest {
        DependencyRequest::new(Requirement::new(name).unwrap())
    }

    #[test]
    fn empty_manager() {
        let manager = DependencyManager::new(vec![]);
        assert!(manager.is_empty());
        assert!(manager.descriptors().is_empty());
        let dep = manager.find_dep(&request("samtools")).unwrap();
        assert!(!dep.is_resolved());
        assert!(!manager.install(&request("samtools")).unwrap());
        assert!(manager.list_all_installed().is_empty());
    }

    #[test]
    fn find_dep_stops_at_first_hit() {
        let first = MockResolver::new("modules").resolving(["bwa"]);
        let second = MockResolver::new("conda").resolving(["samtools"]);
        let third = MockResolver::new("brew").resolving(["samtools"]);
        let (l1, l2, l3) = (first.log(), second.log(), third.log());
        let manager =
            DependencyManager::new(vec![Box::new(first), Box::new(second), Box::new(third)]);

        let dep = manager.find_dep(&request("samtools")).unwrap();
        assert_eq!(dep.resolver_index, Some(1));
        assert_eq!(dep.resolver_type.as_deref(), Some("conda"));
        assert_eq!(l1.resolve_count(), 1);
        assert_eq!(l2.resolve_count(), 1);
        assert_eq!(l3.resolve_count(), 0);
    }

    #[test]
    fn find_dep_skips_resolvers_without_resolve() {
        let lister = MockResolver::new("lister").listing(vec![]);
        let conda = MockResolver::new("conda").resolving(["samtools"]);
        let manager = DependencyManager::new(vec![Box::new(lister), Box::new(conda)]);
        let dep = manager.find_dep(&request("samtools")).unwrap();
        assert_eq!(dep.resolver_index, Some(1));
    }

    #[test]
    fn find_dep_absorbs_backend_errors() {
        let broken = MockResolver::new("broken").resolving(["samtools"]).failing();
        let conda = MockResolver::new("conda").resolving(["samtools"]);
        let manager = DependencyManager::new(vec![Box::new(broken), Box::new(conda)]);
        let dep = manager.find_dep(&request("samtools")).unwrap();
        assert_eq!(dep.resolver_index, Some(1));

        let targeted = manager.find_dep(&request("samtools").at_index(0)).unwrap();
        assert!(!targeted.is_resolved());
    }

    #[test]
    fn find_dep_with_index_asks_only_that_resolver() {
        let first = MockResolver::new("modules").resolving(["samtools"]);
        let second = MockResolver::new("conda").resolving(["samtools"]);
        let (l1, l2) = (first.log(), second.log());
        let manager = DependencyManager::new(vec![Box::new(first), Box::new(second)]);

        let dep = manager.find_dep(&request("samtools").at_index(1)).unwrap();
        assert_eq!(dep.resolver_index, Some(1));
        assert_eq!(l1.resolve_count(), 0);
        assert_eq!(l2.resolve_count(), 1);
    }

    #[test]
    fn find_dep_with_index_unresolved_is_not_an_error() {
        let manager =
            DependencyManager::new(vec![Box::new(MockResolver::new("conda").resolving(["bwa"]))]);
        let dep = manager.find_dep(&request("samtools").at_index(0)).unwrap();
        assert!(!dep.is_resolved());
        assert_eq!(dep.name, "samtools");
    }

    #[test]
    fn find_dep_with_bad_index_fails() {
        let manager =
            DependencyManager::new(vec![Box::new(MockResolver::new("conda").resolving(["bwa"]))]);
        let err = manager.find_dep(&request("bwa").at_index(5)).unwrap_err();
        assert!(matches!(err, DepchainError::IndexOutOfRange { index: 5, count: 1 }));
    }

    #[test]
    fn find_dep_targeting_non_resolver_is_capability_error() {
        let manager =
            DependencyManager::new(vec![Box::new(MockResolver::new("lister").listing(vec![]))]);
        let err = manager.find_dep(&request("bwa").at_index(0)).unwrap_err();
        assert!(matches!(
            err,
            DepchainError::CapabilityNotSupported {
                capability: Capability::Resolve,
                ..
            }
        ));
    }

    #[test]
    fn find_dep_passes_options_through() {
        let conda = MockResolver::new("conda").resolving(["bwa"]);
        let log = conda.log();
        let manager = DependencyManager::new(vec![Box::new(conda)]);
        let options = ResolveOptions::default().with_extra("channel", "bioconda");
        manager
            .find_dep(&request("bwa").with_options(options.clone()))
            .unwrap();
        assert!(matches!(
            &log.calls()[0],
            MockCall::Resolve { options: seen, .. } if *seen == options
        ));
    }

    #[test]
    fn install_tries_only_installable_resolvers() {
        let modules = MockResolver::new("modules").resolving(["numpy"]);
        let conda = MockResolver::new("conda").installing(true);
        let (lm, lc) = (modules.log(), conda.log());
        let manager = DependencyManager::new(vec![Box::new(modules), Box::new(conda)]);

        assert_eq!(manager.installable_indices(), vec![1]);
        assert!(manager.install(&request("numpy")).unwrap());
        assert!(lm.calls().is_empty());
        assert_eq!(lc.install_count(), 1);
    }

    #[test]
    fn install_falls_through_failures() {
        let failing = MockResolver::new("brew").installing(false);
        let broken = MockResolver::new("broken").installing(true).failing();
        let conda = MockResolver::new("conda").installing(true);
        let after = MockResolver::new("pip").installing(true);
        let (lf, lb, lc, la) = (failing.log(), broken.log(), conda.log(), after.log());
        let manager = DependencyManager::new(vec![
            Box::new(failing),
            Box::new(broken),
            Box::new(conda),
            Box::new(after),
        ]);

        assert!(manager.install(&request("numpy")).unwrap());
        assert_eq!(lf.install_count(), 1);
        assert_eq!(lb.install_count(), 1);
        assert_eq!(lc.install_count(), 1);
        assert_eq!(la.install_count(), 0);
    }

    #[test]
    fn install_returns_false_when_nobody_succeeds() {
        let manager = DependencyManager::new(vec![
            Box::new(MockResolver::new("brew").installing(false)),
            Box::new(MockResolver::new("modules").resolving(["numpy"])),
        ]);
        assert!(!manager.install(&request("numpy")).unwrap());
    }

    #[test]
    fn install_with_index_zero_targets_first_resolver() {
        let first = MockResolver::new("conda").installing(false);
        let second = MockResolver::new("brew").installing(true);
        let (l1, l2) = (first.log(), second.log());
        let manager = DependencyManager::new(vec![Box::new(first), Box::new(second)]);

        assert!(!manager.install(&request("numpy").at_index(0)).unwrap());
        assert_eq!(l1.install_count(), 1);
        assert_eq!(l2.install_count(), 0);
    }

    #[test]
    fn install_with_index_on_non_installer_fails() {
        let manager = DependencyManager::new(vec![Box::new(
            MockResolver::new("modules").resolving(["numpy"]),
        )]);
        let err = manager.install(&request("numpy").at_index(0)).unwrap_err();
        assert!(matches!(
            err,
            DepchainError::CapabilityNotSupported {
                capability: Capability::Install,
                ..
            }
        ));
    }

    #[test]
    fn list_installed_requires_list_capability() {
        let manager = DependencyManager::new(vec![Box::new(
            MockResolver::new("modules").resolving(["numpy"]),
        )]);
        let err = manager.list_installed(0).unwrap_err();
        assert!(matches!(
            err,
            DepchainError::CapabilityNotSupported {
                capability: Capability::List,
                ..
            }
        ));
        assert!(matches!(
            manager.list_installed(1),
            Err(DepchainError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn list_installed_surfaces_backend_failure() {
        let manager = DependencyManager::new(vec![Box::new(
            MockResolver::new("broken").listing(vec![]).failing(),
        )]);
        assert!(matches!(
            manager.list_installed(0),
            Err(DepchainError::BackendFailed { .. })
        ));
        assert!(manager.list_all_installed().is_empty());
    }

    #[test]
    fn list_all_installed_tags_and_orders_by_index() {
        let samtools = Requirement::new("samtools").unwrap();
        let bwa = Requirement::new("bwa").unwrap().with_version("0.7");
        let manager = DependencyManager::new(vec![
            Box::new(MockResolver::new("conda").listing(vec![bwa.clone(), samtools.clone()])),
            Box::new(MockResolver::new("modules").resolving(["x"])),
            Box::new(MockResolver::new("brew").listing(vec![samtools.clone()])),
        ]);

        let all = manager.list_all_installed();
        assert_eq!(
            all,
            vec![
                InstalledRequirement {
                    index: 0,
                    requirement: bwa
                },
                InstalledRequirement {
                    index: 0,
                    requirement: samtools.clone()
                },
                InstalledRequirement {
                    index: 2,
                    requirement: samtools
                },
            ]
        );
    }

    #[test]
    fn descriptors_follow_chain_order() {
        let manager = DependencyManager::new(vec![
            Box::new(MockResolver::new("conda").installing(true)),
            Box::new(MockResolver::new("modules").versionless(true)),
        ]);
        let descriptors = manager.descriptors();
        assert_eq!(descriptors[0].index, 0);
        assert_eq!(descriptors[0].capabilities, vec![Capability::Install]);
        assert_eq!(descriptors[1].resolver_type, "modules");
        assert!(descriptors[1].versionless);
        assert!(manager.descriptor(2).is_err());
        assert!(format!("{:?}", manager).contains("modules"));
    }
}
