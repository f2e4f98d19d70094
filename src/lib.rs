//! depchain - Ordered dependency resolution over pluggable resolvers.
//!
//! A [`DependencyManager`](requirements::DependencyManager) holds an ordered
//! chain of resolvers. Each resolver may resolve a requirement to a
//! concrete dependency, list what it has installed, or install new
//! requirements. The manager tries resolvers in priority order and the
//! status reconciler reports which requested requirements are installed.
//!
//! # Modules
//!
//! - [`requirements`] - Core model, resolver contract, manager and status reconciliation
//! - [`backends`] - Built-in directory and command resolvers
//! - [`config`] - Resolver chain configuration loading and validation
//! - [`cli`] - Command-line interface and argument parsing
//! - [`shell`] - Shell command execution and executable lookup
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use depchain::requirements::{
//!     DependencyManager, DependencyRequest, MockResolver, Requirement, ResolverApi,
//! };
//!
//! let manager = DependencyManager::new(vec![
//!     Box::new(MockResolver::new("modules")),
//!     Box::new(MockResolver::new("conda").resolving(["samtools"])),
//! ]);
//! let api = ResolverApi::new(&manager);
//!
//! let request = DependencyRequest::new(Requirement::new("samtools").unwrap());
//! let dependency = api.find_dependency(&request).unwrap();
//! assert_eq!(dependency.resolver_index, Some(1));
//! ```

pub mod backends;
pub mod cli;
pub mod config;
pub mod error;
pub mod requirements;
pub mod shell;

pub use error::{DepchainError, Result};
