//! Configuration schema definitions for depchain.
//!
//! This module contains the struct definitions that map to the
//! `resolvers.yml` file format.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for resolvers.yml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepchainConfig {
    /// Resolver chain, highest priority first
    pub resolvers: Vec<ResolverConfig>,
}

/// One resolver in the chain, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum ResolverConfig {
    /// Package tree on disk: `<base_path>/<name>/<version>/`
    Directory {
        /// Root of the package tree
        base_path: PathBuf,

        /// Resolver type label (default: "directory")
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resolver_type: Option<String>,
    },

    /// Executables on a search path
    Command {
        /// Package names reported as installed when found
        #[serde(default)]
        packages: Vec<String>,

        /// Directories to search (default: $PATH)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        search_path: Option<Vec<PathBuf>>,

        /// Install command template, e.g. "conda install -y {name}"
        #[serde(default, skip_serializing_if = "Option::is_none")]
        install: Option<String>,

        /// Resolver type label (default: "command")
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resolver_type: Option<String>,
    },
}

impl ResolverConfig {
    /// The `kind` tag of this entry.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolverConfig::Directory { .. } => "directory",
            ResolverConfig::Command { .. } => "command",
        }
    }
}
