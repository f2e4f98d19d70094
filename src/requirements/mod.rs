//! Requirement resolution core.
//!
//! This module turns named requirements into concrete dependencies through
//! an ordered chain of pluggable resolvers.
//!
//! # Modules
//!
//! - [`requirement`] - Requirement value object and request parsing
//! - [`dependency`] - Resolution results
//! - [`resolver`] - Resolver contract and capability discovery
//! - [`manager`] - Ordered resolver chain with fallback
//! - [`status`] - Installed-status reconciliation
//! - [`api`] - Boundary operations for presentation layers
//! - [`mock`] - Configurable resolver for tests
//!
//! # Example
//!
//! ```
//! use depchain::requirements::{
//!     DependencyManager, MockResolver, Requirement, ResolverApi,
//! };
//!
//! let modules = MockResolver::new("modules")
//!     .versionless(true)
//!     .listing(vec![Requirement::new("samtools").unwrap()]);
//! let manager = DependencyManager::new(vec![Box::new(modules)]);
//! let api = ResolverApi::new(&manager);
//!
//! let status = api.reconcile_status(&[Requirement::parse_spec("samtools@1.9", None).unwrap()]);
//! assert!(status[0].is_installed());
//! ```

pub mod api;
pub mod dependency;
pub mod manager;
pub mod mock;
pub mod requirement;
pub mod resolver;
pub mod status;

pub use api::ResolverApi;
pub use dependency::{Dependency, DependencyKind, Resolved};
pub use manager::{DependencyManager, InstalledRequirement};
pub use mock::{CallLog, MockCall, MockResolver};
pub use requirement::{DependencyRequest, Requirement, ResolveOptions, DEFAULT_REQUIREMENT_TYPE};
pub use resolver::{
    capabilities, Capabilities, Capability, DependencyResolver, Install, ListInstalled, Resolve,
    ResolverDescriptor,
};
pub use status::{Exactness, InstallStatus, RequirementStatus, StatusReconciler};
