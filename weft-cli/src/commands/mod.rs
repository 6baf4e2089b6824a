//! CLI subcommand implementations.

pub mod print;
pub mod run;
pub mod validate;
