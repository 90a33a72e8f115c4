// Command-line entry points
mod commands;

pub use commands::{Cli, Commands, run};
