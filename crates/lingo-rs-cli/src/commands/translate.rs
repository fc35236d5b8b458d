//! The `translate` command: renders a single key from the loaded catalogs.

use std::io::Write;

use async_trait::async_trait;
use lingo_rs_core::i18n::{Locale, Params};
use lingo_rs_core::{LanguageService, LanguageSettings, LingoError};

use crate::command::ManagementCommand;

/// Renders one message with `--param NAME=VALUE` substitutions.
pub struct TranslateCommand;

/// Splits a `NAME=VALUE` pair. The value may itself contain `=`.
pub fn parse_param(raw: &str) -> Result<(&str, &str), LingoError> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => Err(LingoError::ConfigurationError(format!(
            "Invalid parameter {raw:?}: expected NAME=VALUE"
        ))),
    }
}

#[async_trait]
impl ManagementCommand for TranslateCommand {
    fn name(&self) -> &'static str {
        "translate"
    }

    fn help(&self) -> &'static str {
        "Render a message key"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("key")
                .required(true)
                .help("Message key, e.g. greeting or nav.home"),
        )
        .arg(
            clap::Arg::new("param")
                .long("param")
                .short('p')
                .value_name("NAME=VALUE")
                .action(clap::ArgAction::Append)
                .help("Placeholder value; may be repeated"),
        )
        .arg(
            clap::Arg::new("domain")
                .long("domain")
                .short('d')
                .help("Domain to look the key up in"),
        )
        .arg(
            clap::Arg::new("locale")
                .long("locale")
                .short('l')
                .help("Locale to render in (defaults to the configured locale)"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &LanguageSettings,
        out: &mut (dyn Write + Send),
    ) -> Result<(), LingoError> {
        let key = matches
            .get_one::<String>("key")
            .ok_or_else(|| LingoError::ConfigurationError("A key is required".to_string()))?;

        let mut params = Params::new();
        for raw in matches.get_many::<String>("param").into_iter().flatten() {
            let (name, value) = parse_param(raw)?;
            params.insert(name, value);
        }

        let service = LanguageService::load(settings)?;
        let locale = matches
            .get_one::<String>("locale")
            .and_then(|tag| Locale::explicit(tag))
            .unwrap_or_else(|| service.default_locale().clone());
        let domain = matches.get_one::<String>("domain").map(String::as_str);

        writeln!(out, "{}", service.translate(key, &params, domain, &locale))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(parse_param("name=Ana").unwrap(), ("name", "Ana"));
        assert_eq!(parse_param("expr=a=b").unwrap(), ("expr", "a=b"));
        assert_eq!(parse_param("empty=").unwrap(), ("empty", ""));
    }

    #[test]
    fn test_parse_param_invalid() {
        assert!(parse_param("name").is_err());
        assert!(parse_param("=value").is_err());
    }
}
