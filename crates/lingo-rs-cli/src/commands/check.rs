//! The `check` command.
//!
//! Loads every catalog and runs the catalog checks: missing default locale,
//! untranslated keys, and orphaned keys.

use std::io::Write;

use async_trait::async_trait;
use lingo_rs_core::checks::{CheckLevel, CheckRegistry};
use lingo_rs_core::{LanguageService, LanguageSettings, LingoError};

use crate::command::ManagementCommand;

/// Runs the catalog checks and fails if any error is found.
pub struct CheckCommand;

#[async_trait]
impl ManagementCommand for CheckCommand {
    fn name(&self) -> &'static str {
        "check"
    }

    fn help(&self) -> &'static str {
        "Validate catalogs against the default locale"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("tag")
                .long("tag")
                .short('t')
                .action(clap::ArgAction::Append)
                .help("Only run checks with this tag (catalog, coverage)"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &LanguageSettings,
        out: &mut (dyn Write + Send),
    ) -> Result<(), LingoError> {
        let service = LanguageService::load(settings)?;

        let tags: Option<Vec<&str>> = matches
            .get_many::<String>("tag")
            .map(|values| values.map(String::as_str).collect());
        let messages = CheckRegistry::with_builtins().run_checks(tags.as_deref(), &service);

        for msg in &messages {
            writeln!(out, "{msg}")?;
        }

        let errors = messages.iter().filter(|m| m.level >= CheckLevel::Error).count();
        let warnings = messages
            .iter()
            .filter(|m| m.level == CheckLevel::Warning)
            .count();

        if messages.is_empty() {
            writeln!(out, "System check identified no issues.")?;
        } else {
            writeln!(
                out,
                "System check identified {} issue(s) ({errors} error(s), {warnings} warning(s)).",
                messages.len()
            )?;
        }
        tracing::info!(errors, warnings, "system check finished");

        if errors > 0 {
            return Err(LingoError::ConfigurationError(format!(
                "System check found {errors} error(s)"
            )));
        }

        Ok(())
    }
}
