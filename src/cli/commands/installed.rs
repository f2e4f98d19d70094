//! Installed command implementation.
//!
//! The `depchain installed` command lists what resolvers report installed.

use std::io::Write;

use crate::cli::args::InstalledArgs;
use crate::error::Result;
use crate::requirements::ResolverApi;

use super::dispatcher::{Command, CommandResult};
use super::display;

/// The installed command implementation.
pub struct InstalledCommand<'a> {
    api: ResolverApi<'a>,
    args: InstalledArgs,
}

impl<'a> InstalledCommand<'a> {
    /// Create a new installed command.
    pub fn new(api: ResolverApi<'a>, args: InstalledArgs) -> Self {
        Self { api, args }
    }
}

impl Command for InstalledCommand<'_> {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        match self.args.index {
            Some(index) => {
                let installed = self.api.list_installed_for_resolver(index)?;
                if self.args.json {
                    display::write_json(out, &installed)?;
                } else {
                    for requirement in &installed {
                        writeln!(out, "{}", display::installed_line(None, requirement))?;
                    }
                }
            }
            None => {
                let installed = self.api.list_all_installed();
                if self.args.json {
                    display::write_json(out, &installed)?;
                } else {
                    for entry in &installed {
                        writeln!(
                            out,
                            "{}",
                            display::installed_line(Some(entry.index), &entry.requirement)
                        )?;
                    }
                }
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DepchainError;
    use crate::requirements::{DependencyManager, MockResolver, Requirement};

    fn manager() -> DependencyManager {
        DependencyManager::new(vec![
            Box::new(
                MockResolver::new("modules")
                    .listing(vec![Requirement::new("samtools").unwrap().with_version("1.9")]),
            ),
            Box::new(MockResolver::new("nolist")),
            Box::new(MockResolver::new("conda").listing(vec![Requirement::new("bwa").unwrap()])),
        ])
    }

    fn run(args: InstalledArgs) -> Result<String> {
        let manager = manager();
        let mut out = Vec::new();
        InstalledCommand::new(ResolverApi::new(&manager), args).execute(&mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn lists_all_with_indices() {
        let text = run(InstalledArgs::default()).unwrap();
        assert_eq!(text, "[0] samtools@1.9 (package)\n[2] bwa (package)\n");
    }

    #[test]
    fn lists_single_resolver_as_json() {
        let text = run(InstalledArgs {
            index: Some(2),
            json: true,
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["name"], "bwa");
        assert_eq!(value[0]["type"], "package");
    }

    #[test]
    fn resolver_without_list_is_error() {
        let err = run(InstalledArgs {
            index: Some(1),
            json: false,
        })
        .unwrap_err();
        assert!(matches!(err, DepchainError::CapabilityNotSupported { .. }));
    }
}
