//! Configuration file discovery and loading.
//!
//! Exactly one resolvers file is used. Candidates are checked in priority
//! order and the first one that exists wins:
//!
//! 1. An explicit path (`--config`)
//! 2. Project config (`<project>/.depchain/resolvers.yml`)
//! 3. User global config (`~/.depchain/resolvers.yml`)

use crate::config::schema::DepchainConfig;
use crate::error::{DepchainError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory holding depchain configuration.
pub const CONFIG_DIR: &str = ".depchain";

/// Resolvers file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "resolvers.yml";

/// Candidate configuration files in priority order.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .depchain/resolvers.yml
    pub project: Option<PathBuf>,

    /// User's global config: ~/.depchain/resolvers.yml
    pub user_global: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_DIR).join(CONFIG_FILE)),
            user_global: dirs::home_dir()
                .and_then(|home| existing(home.join(CONFIG_DIR).join(CONFIG_FILE))),
        }
    }

    /// The file that should be loaded, if any.
    pub fn selected(&self) -> Option<&PathBuf> {
        self.project.as_ref().or(self.user_global.as_ref())
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<DepchainConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DepchainError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DepchainError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into DepchainConfig.
///
/// `source_path` is only used for error reporting.
pub fn parse_config(content: &str, source_path: &Path) -> Result<DepchainConfig> {
    serde_yaml::from_str(content).map_err(|e| DepchainError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Locate and load the resolvers file for a project.
///
/// An explicit `override_path` is used as-is and must exist.
///
/// # Errors
///
/// Returns `ConfigNotFound` when no candidate exists; the reported path is
/// the project location, which is where a new file would normally go.
pub fn load_config(project_root: &Path, override_path: Option<&Path>) -> Result<DepchainConfig> {
    if let Some(path) = override_path {
        debug!(path = %path.display(), "loading explicit config");
        return load_config_file(path);
    }

    let paths = ConfigPaths::discover(project_root);
    match paths.selected() {
        Some(path) => {
            debug!(path = %path.display(), "loading discovered config");
            load_config_file(path)
        }
        None => Err(DepchainError::ConfigNotFound {
            path: project_root.join(CONFIG_DIR).join(CONFIG_FILE),
        }),
    }
}
