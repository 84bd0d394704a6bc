/*
[INPUT]:  Parsed CLI subcommands
[OUTPUT]: Controller calls and rendered output
[POS]:    CLI layer - one-shot commands and the interactive loop
[UPDATE]: When adding subcommands
*/

pub mod commands;
pub mod interactive;

pub use commands::{Command, Session, run_command};
pub use interactive::run_interactive;
