pub mod app;
pub mod commands;
pub mod output;
pub mod prompts;

pub use app::{Cli, Commands};
