//! Common utilities shared across CLI commands.

use std::io::{self, BufRead};

use anyhow::Result;

use crate::cli::Cli;
use crate::config::{AssetsConfig, ConfigHandle};
use crate::debug;
use crate::resolver::{PassThrough, VersioningResolver};
use crate::versioning::{PathVersioner, Trace, VersionToken, VersioningPolicy};

/// Everything a command needs to resolve asset paths.
///
/// The version token is sourced here, at the process boundary, and passed
/// down explicitly from then on.
#[derive(Debug, Clone)]
pub struct Stamp {
    pub config: ConfigHandle,
    pub token: VersionToken,
    pub policy: VersioningPolicy,
    pub resolver: VersioningResolver<PassThrough>,
}

impl Stamp {
    pub fn new(config: AssetsConfig, token: VersionToken) -> Self {
        let trace = config.versioning.trace;
        let mut versioner = PathVersioner::new(config.versioning.strategy);
        if trace {
            versioner = versioner.with_trace(Trace::changing());
        }

        let config = ConfigHandle::new(config);
        let policy = VersioningPolicy::new(config.clone());
        let mut resolver =
            VersioningResolver::new(PassThrough, policy.clone(), versioner, token.clone());
        if trace {
            resolver = resolver.with_trace(Trace::rewriting());
        }

        Self {
            config,
            token,
            policy,
            resolver,
        }
    }

    /// Source the token from the configured environment variable, letting
    /// `--asset-version` override it.
    pub fn from_cli(config: AssetsConfig, cli: &Cli) -> Self {
        let token = VersionToken::from_env(&config.versioning.env);
        if let Some(version) = &cli.asset_version {
            debug!("version"; "using --asset-version {}", version);
            token.set(version.as_str());
        }
        Self::new(config, token)
    }
}

/// Expand a lone `-` argument into paths read from stdin.
pub fn expand_stdin_paths(paths: &[String]) -> Result<Vec<String>> {
    if paths.len() == 1 && paths[0] == "-" {
        read_paths(io::stdin().lock())
    } else {
        Ok(paths.to_vec())
    }
}

/// Read one path per non-blank line.
pub fn read_paths(input: impl BufRead) -> Result<Vec<String>> {
    let mut paths = Vec::new();

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(trimmed.to_string());
        }
    }

    Ok(paths)
}
