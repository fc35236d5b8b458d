//! Built-in commands of the `lingo` tool.
//!
//! Each command implements the
//! [`ManagementCommand`](crate::command::ManagementCommand) trait.

pub mod check;
pub mod manifest;
pub mod resolve;
pub mod translate;

pub use check::CheckCommand;
pub use manifest::ManifestCommand;
pub use resolve::ResolveCommand;
pub use translate::TranslateCommand;

use crate::command::CommandRegistry;

/// Registers all built-in commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(CheckCommand));
    registry.register(Box::new(ManifestCommand));
    registry.register(Box::new(ResolveCommand));
    registry.register(Box::new(TranslateCommand));
}
