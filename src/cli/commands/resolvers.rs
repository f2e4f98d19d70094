//! Resolvers command implementation.
//!
//! The `depchain resolvers` command describes the configured resolver chain.

use std::io::Write;

use crate::cli::args::ResolversArgs;
use crate::error::Result;
use crate::requirements::ResolverApi;

use super::dispatcher::{Command, CommandResult};
use super::display;

/// The resolvers command implementation.
pub struct ResolversCommand<'a> {
    api: ResolverApi<'a>,
    args: ResolversArgs,
}

impl<'a> ResolversCommand<'a> {
    /// Create a new resolvers command.
    pub fn new(api: ResolverApi<'a>, args: ResolversArgs) -> Self {
        Self { api, args }
    }
}

impl Command for ResolversCommand<'_> {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let descriptors = match self.args.index {
            Some(index) => vec![self.api.get_resolver(index)?],
            None => self.api.list_resolvers(),
        };

        if self.args.json {
            match self.args.index {
                Some(_) => display::write_json(out, &descriptors[0])?,
                None => display::write_json(out, &descriptors)?,
            }
        } else if descriptors.is_empty() {
            writeln!(out, "No resolvers configured.")?;
        } else {
            for descriptor in &descriptors {
                writeln!(out, "{}", display::descriptor_line(descriptor))?;
            }
        }

        Ok(CommandResult::success())
    }
}
