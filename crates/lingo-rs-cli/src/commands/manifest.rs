//! The `manifest` command: lists the resource files that would be loaded.

use std::io::Write;

use async_trait::async_trait;
use lingo_rs_core::i18n::manifest::build_manifest;
use lingo_rs_core::{LanguageSettings, LingoError};

use crate::command::ManagementCommand;

/// Prints one `locale<TAB>domain<TAB>path` line per matched file.
pub struct ManifestCommand;

#[async_trait]
impl ManagementCommand for ManifestCommand {
    fn name(&self) -> &'static str {
        "manifest"
    }

    fn help(&self) -> &'static str {
        "List the catalog files matched by the naming convention"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("json")
                .long("json")
                .action(clap::ArgAction::SetTrue)
                .help("Print the manifest as a JSON array"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &LanguageSettings,
        out: &mut (dyn Write + Send),
    ) -> Result<(), LingoError> {
        settings.validate()?;
        let manifest = build_manifest(&settings.path, settings.file_format, settings.layout)?;

        if matches.get_flag("json") {
            let entries: Vec<serde_json::Value> = manifest
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "locale": entry.locale.as_str(),
                        "domain": entry.domain,
                        "path": entry.path.display().to_string(),
                    })
                })
                .collect();
            let rendered = serde_json::to_string_pretty(&entries).map_err(|e| {
                LingoError::ConfigurationError(format!("Failed to render manifest: {e}"))
            })?;
            writeln!(out, "{rendered}")?;
        } else {
            for entry in &manifest {
                writeln!(out, "{}\t{}\t{}", entry.locale, entry.domain, entry.path.display())?;
            }
        }

        Ok(())
    }
}
