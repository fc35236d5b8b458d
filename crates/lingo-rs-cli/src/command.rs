//! Command framework for the `lingo` tool.
//!
//! This module provides the [`ManagementCommand`] trait for defining CLI
//! commands and [`CommandRegistry`] for registering and dispatching them.
//!
//! ## Defining a Custom Command
//!
//! ```rust,no_run
//! use std::io::Write;
//!
//! use async_trait::async_trait;
//! use lingo_rs_cli::command::ManagementCommand;
//! use lingo_rs_core::{LanguageSettings, LingoError};
//!
//! struct LocaleCommand;
//!
//! #[async_trait]
//! impl ManagementCommand for LocaleCommand {
//!     fn name(&self) -> &str { "locale" }
//!     fn help(&self) -> &str { "Print the configured default locale" }
//!
//!     async fn handle(
//!         &self,
//!         _matches: &clap::ArgMatches,
//!         settings: &LanguageSettings,
//!         out: &mut (dyn Write + Send),
//!     ) -> Result<(), LingoError> {
//!         writeln!(out, "{}", settings.locale)?;
//!         Ok(())
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::io::Write;

use async_trait::async_trait;
use lingo_rs_core::{LanguageSettings, LingoError};

/// Name of the global option pointing at a settings file.
pub const CONFIG_ARG: &str = "config";

/// A command that can be registered and invoked through the CLI.
///
/// Implementations define a name, help text, optional arguments, and an async
/// handler. Output goes to `out` so commands can be driven from tests.
#[async_trait]
pub trait ManagementCommand: Send + Sync {
    /// Returns the name of this command (used to invoke it from the CLI).
    fn name(&self) -> &str;

    /// Returns a short help description for this command.
    fn help(&self) -> &str;

    /// Adds custom arguments to the clap command.
    ///
    /// The default implementation returns the command unchanged.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Executes the command with the given argument matches and settings.
    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &LanguageSettings,
        out: &mut (dyn Write + Send),
    ) -> Result<(), LingoError>;
}

/// A registry of commands, keyed by name.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn ManagementCommand>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Registers a command, replacing any command with the same name.
    pub fn register(&mut self, command: Box<dyn ManagementCommand>) {
        let name = command.name().to_string();
        self.commands.insert(name, command);
    }

    /// Returns the command with the given name, if registered.
    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Returns a sorted list of all registered command names.
    pub fn list_commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the top-level clap `Command` with every registered subcommand
    /// and the global `--config` option.
    pub fn build_cli(&self) -> clap::Command {
        let mut app = clap::Command::new("lingo")
            .about("Translation catalog tooling")
            .subcommand_required(true)
            .arg(
                clap::Arg::new(CONFIG_ARG)
                    .long(CONFIG_ARG)
                    .short('c')
                    .value_name("FILE")
                    .global(true)
                    .help("Settings file (TOML, or JSON by extension); LINGO_* variables override it"),
            );

        let mut entries: Vec<_> = self.commands.iter().collect();
        entries.sort_by_key(|(name, _)| (*name).clone());

        for (name, cmd) in entries {
            // clap wants 'static names; commands are registered once at startup.
            let static_name: &'static str = Box::leak(name.clone().into_boxed_str());
            let subcmd = clap::Command::new(static_name).about(cmd.help().to_string());
            app = app.subcommand(cmd.add_arguments(subcmd));
        }

        app
    }

    /// Dispatches to the subcommand named in `matches`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no subcommand (or an unknown one) was
    /// given, otherwise whatever the command's handler returns.
    pub async fn execute(
        &self,
        matches: &clap::ArgMatches,
        settings: &LanguageSettings,
        out: &mut (dyn Write + Send),
    ) -> Result<(), LingoError> {
        let (name, sub_matches) = matches.subcommand().ok_or_else(|| {
            LingoError::ConfigurationError("No subcommand specified".to_string())
        })?;

        let cmd = self.get(name).ok_or_else(|| {
            LingoError::ConfigurationError(format!("Unknown command: {name}"))
        })?;

        tracing::debug!(command = name, "running command");
        cmd.handle(sub_matches, settings, out).await
    }
}
