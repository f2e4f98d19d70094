//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::backends::build_manager;
use crate::cli::args::Commands;
use crate::config::{load_config, validate};
use crate::error::{DepchainError, Result};
use crate::requirements::{DependencyManager, ResolverApi};

/// Exit code used when no resolvers file can be found.
pub const EXIT_NO_CONFIG: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command, writing its report to `out`.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            config_path: None,
        }
    }

    /// Use an explicit resolvers file instead of discovery.
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Load, validate and build the resolver chain.
    pub fn load_manager(&self) -> Result<DependencyManager> {
        let config = load_config(&self.project_root, self.config_path.as_deref())?;
        validate(&config)?;
        let manager = build_manager(&config);
        debug!(resolvers = manager.len(), "resolver chain ready");
        Ok(manager)
    }

    /// Dispatch and execute a command.
    ///
    /// A missing resolvers file is reported on stderr and mapped to
    /// [`EXIT_NO_CONFIG`]; other errors are returned to the caller.
    pub fn dispatch(&self, command: &Commands, out: &mut dyn Write) -> Result<CommandResult> {
        let manager = match self.load_manager() {
            Ok(m) => m,
            Err(DepchainError::ConfigNotFound { path }) => {
                eprintln!(
                    "No resolver configuration found (expected {}). Use --config to point at one.",
                    path.display()
                );
                return Ok(CommandResult::failure(EXIT_NO_CONFIG));
            }
            Err(e) => return Err(e),
        };
        let api = ResolverApi::new(&manager);

        match command {
            Commands::Resolvers(args) => {
                super::resolvers::ResolversCommand::new(api, args.clone()).execute(out)
            }
            Commands::Find(args) => super::find::FindCommand::new(api, args.clone()).execute(out),
            Commands::Install(args) => {
                super::install::InstallCommand::new(api, args.clone()).execute(out)
            }
            Commands::Installed(args) => {
                super::installed::InstalledCommand::new(api, args.clone()).execute(out)
            }
            Commands::Status(args) => {
                super::status::StatusCommand::new(api, args.clone()).execute(out)
            }
        }
    }
}
