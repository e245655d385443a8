//! Command-line interface module.

mod args;
pub mod common;
pub mod rewrite;
pub mod status;

pub use args::{Cli, Commands};
