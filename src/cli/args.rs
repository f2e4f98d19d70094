//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// depchain - Resolve, install and audit tool dependencies.
#[derive(Debug, Parser)]
#[command(name = "depchain")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to resolvers file (overrides .depchain/resolvers.yml)
    #[arg(short, long, global = true, env = "DEPCHAIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Describe configured resolvers
    Resolvers(ResolversArgs),

    /// Find a dependency through the resolver chain
    Find(RequestArgs),

    /// Install a dependency through the resolver chain
    Install(RequestArgs),

    /// List installed requirements
    Installed(InstalledArgs),

    /// Report installation status of requirements
    Status(StatusArgs),
}

/// Arguments for the `resolvers` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ResolversArgs {
    /// Describe only the resolver at this index
    #[arg(long)]
    pub index: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments shared by `find` and `install`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RequestArgs {
    /// Requirement name
    pub name: String,

    /// Requested version
    #[arg(long)]
    pub version: Option<String>,

    /// Requirement type
    #[arg(long = "type", value_name = "TYPE")]
    pub requirement_type: Option<String>,

    /// Target a single resolver instead of the fallback chain
    #[arg(long)]
    pub index: Option<usize>,

    /// Resolver-specific option (repeatable)
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `installed` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstalledArgs {
    /// List only what the resolver at this index reports
    #[arg(long)]
    pub index: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Requirements as `name` or `name@version`
    #[arg(required = true, value_name = "SPEC")]
    pub specs: Vec<String>,

    /// Requirement type applied to every spec
    #[arg(long = "type", value_name = "TYPE")]
    pub requirement_type: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
