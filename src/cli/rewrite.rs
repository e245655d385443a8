//! `path` and `css` commands.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;

use crate::cli::common::{Stamp, expand_stdin_paths};
use crate::log;
use crate::pipeline::rewrite_file;
use crate::resolver::AssetPathResolver;

/// Resolve each path and print one result per line.
pub fn run_path(stamp: &Stamp, paths: &[String], source: Option<&Path>) -> Result<()> {
    let paths = expand_stdin_paths(paths)?;
    let resolved = resolve_paths(&stamp.resolver, &paths, source.unwrap_or(Path::new("")));

    let mut stdout = io::stdout().lock();
    for path in resolved {
        writeln!(stdout, "{path}")?;
    }
    stdout.flush()?;
    Ok(())
}

fn resolve_paths<R>(resolver: &R, paths: &[String], source: &Path) -> Vec<String>
where
    R: AssetPathResolver + ?Sized,
{
    paths.iter().map(|p| resolver.resolve(p, source)).collect()
}

/// Rewrite stylesheets to stdout, or into `output` when given.
pub fn run_css(stamp: &Stamp, files: &[PathBuf], output: Option<&Path>) -> Result<()> {
    let public_root = stamp.config.load().public_root.clone();
    match output {
        Some(dir) => {
            let written = rewrite_into(&stamp.resolver, files, &public_root, dir)?;
            let n = written.len();
            log!("css"; "rewrote {} stylesheet{} into {}", n, if n == 1 { "" } else { "s" }, dir.display());
            Ok(())
        }
        None => {
            let mut stdout = io::stdout().lock();
            for file in files {
                let css = rewrite_file(file, &public_root, &stamp.resolver)?;
                stdout.write_all(css.as_bytes())?;
            }
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Rewrite `files` in parallel into `dir/<file name>`.
fn rewrite_into<R>(
    resolver: &R,
    files: &[PathBuf],
    public_root: &Path,
    dir: &Path,
) -> Result<Vec<PathBuf>>
where
    R: AssetPathResolver + ?Sized,
{
    let targets = output_targets(files, dir)?;
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    files
        .par_iter()
        .zip(targets.par_iter())
        .map(|(file, target)| {
            let css = rewrite_file(file, public_root, resolver)?;
            fs::write(target, css)
                .with_context(|| format!("failed to write {}", target.display()))?;
            Ok(target.clone())
        })
        .collect()
}

/// Map each input to `dir/<file name>`, rejecting collisions.
fn output_targets(files: &[PathBuf], dir: &Path) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut targets = Vec::with_capacity(files.len());

    for file in files {
        let Some(name) = file.file_name() else {
            bail!("not a stylesheet file: {}", file.display());
        };
        if !seen.insert(name) {
            bail!(
                "output conflict: more than one input named '{}'",
                name.to_string_lossy()
            );
        }
        targets.push(dir.join(name));
    }

    Ok(targets)
}
