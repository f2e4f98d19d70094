//! Status command implementation.
//!
//! The `depchain status` command reports, for each requested requirement,
//! whether some resolver has it installed.

use std::io::Write;

use crate::cli::args::StatusArgs;
use crate::error::Result;
use crate::requirements::{Requirement, ResolverApi};

use super::dispatcher::{Command, CommandResult};
use super::display;

/// The status command implementation.
pub struct StatusCommand<'a> {
    api: ResolverApi<'a>,
    args: StatusArgs,
}

impl<'a> StatusCommand<'a> {
    /// Create a new status command.
    pub fn new(api: ResolverApi<'a>, args: StatusArgs) -> Self {
        Self { api, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &StatusArgs {
        &self.args
    }
}

impl Command for StatusCommand<'_> {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let requested = self
            .args
            .specs
            .iter()
            .map(|spec| Requirement::parse_spec(spec, self.args.requirement_type.as_deref()))
            .collect::<Result<Vec<_>>>()?;

        let statuses = self.api.reconcile_status(&requested);

        if self.args.json {
            display::write_json(out, &statuses)?;
        } else {
            for status in &statuses {
                writeln!(out, "{}", display::status_line(status))?;
            }
            let missing = statuses.iter().filter(|s| !s.is_installed()).count();
            if missing > 0 {
                writeln!(out)?;
                writeln!(out, "{} of {} not installed", missing, statuses.len())?;
            }
        }

        Ok(CommandResult::success())
    }
}
