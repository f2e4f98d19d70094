//! Find command implementation.
//!
//! The `depchain find` command resolves one requirement, either through the
//! whole chain or against a single resolver with `--index`.

use std::io::Write;

use crate::cli::args::RequestArgs;
use crate::error::Result;
use crate::requirements::{DependencyRequest, Requirement, ResolveOptions, ResolverApi};

use super::dispatcher::{Command, CommandResult};
use super::display;

/// Turn `find`/`install` arguments into a request.
pub fn build_request(args: &RequestArgs) -> Result<DependencyRequest> {
    let requirement = Requirement::from_fields(
        Some(args.name.clone()),
        args.version.clone(),
        args.requirement_type.clone(),
    )?;
    let mut request = DependencyRequest::new(requirement)
        .with_options(ResolveOptions::from_pairs(&args.options)?);
    if let Some(index) = args.index {
        request = request.at_index(index);
    }
    Ok(request)
}

/// The find command implementation.
pub struct FindCommand<'a> {
    api: ResolverApi<'a>,
    args: RequestArgs,
}

impl<'a> FindCommand<'a> {
    /// Create a new find command.
    pub fn new(api: ResolverApi<'a>, args: RequestArgs) -> Self {
        Self { api, args }
    }
}

impl Command for FindCommand<'_> {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let request = build_request(&self.args)?;
        let dependency = self.api.find_dependency(&request)?;

        if self.args.json {
            display::write_json(out, &dependency)?;
        } else {
            writeln!(out, "{}", display::dependency_line(&dependency))?;
        }

        // Not finding a dependency is a normal outcome, not a failure.
        Ok(CommandResult::success())
    }
}
