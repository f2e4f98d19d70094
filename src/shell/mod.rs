//! Shell command execution and executable lookup for resolver backends.

pub mod command;
pub mod path;

pub use command::{execute, shell_quote, CommandOptions, CommandResult};
pub use path::{is_executable, parse_system_path, resolve_tool_path};
