//! CLI domain: parse, route, prompts, output, and presentation only.
//! No domain logic; a single route table dispatches to the keystore, site, and tool services.

mod output;
mod parse;
mod presentation;
mod prompt;
mod route;

pub use output::map_error;
pub use parse::{BlobCommands, Cli, Commands, ConfigCommands, KeystoreCommands};
pub use presentation::{format_bytes, format_diff, format_scan};
pub use prompt::{Prompter, TerminalPrompter};
pub use route::RunContext;
