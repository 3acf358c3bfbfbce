//! Line-oriented console front end.

pub mod commands;
pub mod render;
pub mod session;

pub use commands::{parse_command, CommandError, ConsoleCommand, HELP};
pub use session::{Console, Reply};
