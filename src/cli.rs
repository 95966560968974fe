//! CLI domain: parse, route, prompt, output, and presentation only.
//! No domain orchestration; single route table dispatches to the state layer.

mod output;
mod parse;
mod presentation;
mod prompt;
mod route;

pub use output::map_error;
pub use parse::{command_name, Cli, Commands, StateCommands};
pub use presentation::{format_state_data, format_state_dump, OutputFormat};
pub use prompt::{confirm, DialoguerPrompter, Prompter};
pub use route::RunContext;
