//! Concrete resolver backends and the factory that builds a resolver chain
//! from configuration.
//!
//! - [`directory::DirectoryResolver`] looks packages up in a versioned tree
//! - [`command::CommandResolver`] finds executables and runs install templates

pub mod command;
pub mod directory;
pub mod template;

pub use command::CommandResolver;
pub use directory::DirectoryResolver;

use crate::config::{DepchainConfig, ResolverConfig};
use crate::requirements::{DependencyManager, DependencyResolver};
use tracing::debug;

/// Create a resolver from one configuration entry.
pub fn build_resolver(config: &ResolverConfig) -> Box<dyn DependencyResolver> {
    match config {
        ResolverConfig::Directory {
            base_path,
            resolver_type,
        } => {
            let resolver = DirectoryResolver::new(base_path);
            let resolver = match resolver_type {
                Some(t) => resolver.with_resolver_type(t),
                None => resolver,
            };
            Box::new(resolver)
        }
        ResolverConfig::Command {
            packages,
            search_path,
            install,
            resolver_type,
        } => {
            let mut resolver = CommandResolver::new(packages.iter().cloned());
            if let Some(t) = resolver_type {
                resolver = resolver.with_resolver_type(t);
            }
            if let Some(dirs) = search_path {
                resolver = resolver.with_search_path(dirs.clone());
            }
            if let Some(template) = install {
                resolver = resolver.with_install_template(template);
            }
            Box::new(resolver)
        }
    }
}

/// Build the full resolver chain, preserving configuration order.
pub fn build_manager(config: &DepchainConfig) -> DependencyManager {
    let resolvers: Vec<_> = config.resolvers.iter().map(build_resolver).collect();
    debug!(count = resolvers.len(), "built resolver chain");
    DependencyManager::new(resolvers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::{capabilities, Capability};
    use std::path::PathBuf;

    #[test]
    fn builds_chain_in_config_order() {
        let config = DepchainConfig {
            resolvers: vec![
                ResolverConfig::Command {
                    packages: vec!["samtools".to_string()],
                    search_path: Some(vec![]),
                    install: Some("conda install -y {name}".to_string()),
                    resolver_type: Some("conda".to_string()),
                },
                ResolverConfig::Directory {
                    base_path: PathBuf::from("/opt/deps"),
                    resolver_type: None,
                },
            ],
        };
        let manager = build_manager(&config);
        assert_eq!(manager.len(), 2);

        let types: Vec<&str> = manager.resolvers().map(|(_, r)| r.resolver_type()).collect();
        assert_eq!(types, vec!["conda", "directory"]);
        assert_eq!(manager.installable_indices(), vec![0]);
    }

    #[test]
    fn command_without_install_has_no_install_capability() {
        let resolver = build_resolver(&ResolverConfig::Command {
            packages: vec![],
            search_path: None,
            install: None,
            resolver_type: None,
        });
        let caps = capabilities(resolver.as_ref());
        assert!(!caps.contains(Capability::Install));
        assert_eq!(resolver.resolver_type(), CommandResolver::DEFAULT_TYPE);
    }
}
