//! Install command implementation.
//!
//! The `depchain install` command asks the resolver chain (or one resolver)
//! to install a requirement. Exit code 1 means nothing installed it.

use std::io::Write;

use serde_json::json;

use crate::cli::args::RequestArgs;
use crate::error::Result;
use crate::requirements::ResolverApi;

use super::dispatcher::{Command, CommandResult};
use super::display;
use super::find::build_request;

/// The install command implementation.
pub struct InstallCommand<'a> {
    api: ResolverApi<'a>,
    args: RequestArgs,
}

impl<'a> InstallCommand<'a> {
    /// Create a new install command.
    pub fn new(api: ResolverApi<'a>, args: RequestArgs) -> Self {
        Self { api, args }
    }
}

impl Command for InstallCommand<'_> {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let request = build_request(&self.args)?;
        let installed = self.api.install_dependency(&request)?;
        let label = display::requirement_label(
            &request.requirement.name,
            request.requirement.version(),
        );

        if self.args.json {
            display::write_json(
                out,
                &json!({ "requirement": request.requirement, "installed": installed }),
            )?;
        } else if installed {
            writeln!(out, "Installed {}", label)?;
        } else {
            writeln!(out, "Could not install {}", label)?;
        }

        if installed {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
