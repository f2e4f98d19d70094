//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads the
//! resolver chain once and hands every command a
//! [`ResolverApi`](crate::requirements::ResolverApi) over it. Commands are
//! thin adapters: they parse arguments into requests and render results.

pub mod dispatcher;
pub mod display;
pub mod find;
pub mod install;
pub mod installed;
pub mod resolvers;
pub mod status;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, EXIT_NO_CONFIG};
