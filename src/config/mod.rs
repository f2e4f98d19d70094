//! Resolver chain configuration.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use depchain::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".depchain");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(
//!     dir.join("resolvers.yml"),
//!     "resolvers:\n  - kind: directory\n    base_path: /opt/deps\n",
//! )
//! .unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.resolvers.len(), 1);
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{load_config, load_config_file, parse_config, ConfigPaths, CONFIG_DIR, CONFIG_FILE};
pub use schema::{DepchainConfig, ResolverConfig};
pub use validator::{validate, validate_config, ValidationError};
