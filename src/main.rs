//! assetstamp - embed release identifiers into CDN asset paths.

#![allow(dead_code)]

mod cli;
mod config;
mod core;
mod logger;
mod pipeline;
mod resolver;
mod versioning;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, common::Stamp};
use config::AssetsConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = AssetsConfig::load(&cli)?;
    let stamp = Stamp::from_cli(config, &cli);

    match &cli.command {
        Commands::Status => {
            cli::status::print_status(&stamp);
            Ok(())
        }
        Commands::Host => {
            cli::status::print_host(&stamp);
            Ok(())
        }
        Commands::Path { paths, source } => {
            cli::rewrite::run_path(&stamp, paths, source.as_deref())
        }
        Commands::Css { files, output } => cli::rewrite::run_css(&stamp, files, output.as_deref()),
    }
}
