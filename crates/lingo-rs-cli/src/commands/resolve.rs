//! The `resolve` command: shows which locale a request would get.

use std::io::Write;

use async_trait::async_trait;
use lingo_rs_core::i18n::locale;
use lingo_rs_core::{LanguageSettings, LingoError};

use crate::command::ManagementCommand;

/// Runs locale resolution on an explicit value and a language header.
pub struct ResolveCommand;

#[async_trait]
impl ManagementCommand for ResolveCommand {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn help(&self) -> &'static str {
        "Resolve a locale from an explicit value and an Accept-Language header"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("explicit")
                .long("explicit")
                .short('e')
                .value_name("LOCALE")
                .help("Explicitly requested locale"),
        )
        .arg(
            clap::Arg::new("header")
                .long("header")
                .short('H')
                .value_name("ACCEPT_LANGUAGE")
                .help("Raw Accept-Language header value"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &LanguageSettings,
        out: &mut (dyn Write + Send),
    ) -> Result<(), LingoError> {
        let default = settings.validate()?;
        let explicit = matches.get_one::<String>("explicit").map(String::as_str);
        let header = matches.get_one::<String>("header").map(String::as_str);

        writeln!(out, "{}", locale::resolve(explicit, header, &default))?;
        Ok(())
    }
}
