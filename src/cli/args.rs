//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::versioning::Strategy;

/// Embed release identifiers into CDN asset paths
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: assets.toml)
    #[arg(short = 'C', long, global = true, default_value = "assets.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Release token to embed, instead of reading the configured environment variable
    #[arg(long, global = true, value_name = "VERSION")]
    pub asset_version: Option<String>,

    /// Versioning strategy, overrides `versioning.strategy`
    #[arg(long, global = true, value_enum)]
    pub strategy: Option<Strategy>,

    /// Print debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show whether versioning is active and with which settings
    #[command(visible_alias = "st")]
    Status,

    /// Print the asset host to advertise
    #[command(visible_alias = "h")]
    Host,

    /// Resolve asset paths and print one result per line
    #[command(visible_alias = "p")]
    Path {
        /// Asset paths. Use `-` to read paths from stdin.
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<String>,

        /// File the paths were referenced from
        #[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
        source: Option<PathBuf>,
    },

    /// Rewrite url(...) references in stylesheets
    #[command(visible_alias = "c")]
    Css {
        /// Stylesheets to rewrite
        #[arg(value_name = "FILE", required = true, value_hint = clap::ValueHint::FilePath)]
        files: Vec<PathBuf>,

        /// Write each rewritten stylesheet into this directory instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,
    },
}
