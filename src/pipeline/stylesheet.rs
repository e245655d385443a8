//! `url(...)` rewriting for stylesheets.
//!
//! Every local reference is handed to an [`AssetPathResolver`] together with
//! the stylesheet path. References are classified with [`LinkKind`]:
//!
//! | LinkKind       | Example                   | Result                    |
//! |----------------|---------------------------|---------------------------|
//! | `External`     | `https://...`, `data:...` | Preserved as-is           |
//! | `Fragment`     | `#filter`                 | Preserved as-is           |
//! | `SiteRoot`     | `/images/logo.png`        | Passed to the resolver    |
//! | `FileRelative` | `../images/logo.png`      | Rooted, then resolved     |
//!
//! A file-relative reference is first joined with the stylesheet's directory
//! and expressed relative to the public root (`public/css/app.css` +
//! `../img/a.png` → `/img/a.png`). References that land outside the public
//! root are left alone.
//!
//! A `?query` or `#fragment` suffix stays out of the resolved path and is
//! re-attached afterwards. Matches the resolver leaves unchanged are
//! copied through byte for byte.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::{Captures, Regex};

use crate::core::LinkKind;
use crate::resolver::AssetPathResolver;

/// `url(...)` (any case) with double-quoted, single-quoted or bare argument.
static URL_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?P<func>(?i-u:url))\([ \t\r\n]*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^'"() \t\r\n]*))[ \t\r\n]*\)"#,
    )
    .expect("url() pattern is valid")
});

/// Rewrite all local `url(...)` references in `css`.
///
/// `source_file` and `public_root` must both be absolute or both be relative
/// to the same directory.
pub fn rewrite_stylesheet<R>(css: &str, source_file: &Path, public_root: &Path, resolver: &R) -> String
where
    R: AssetPathResolver + ?Sized,
{
    URL_REF
        .replace_all(css, |caps: &Captures<'_>| {
            rewrite_ref(caps, source_file, public_root, resolver)
        })
        .into_owned()
}

/// Read `path` and rewrite its references.
pub fn rewrite_file<R>(path: &Path, public_root: &Path, resolver: &R) -> Result<String>
where
    R: AssetPathResolver + ?Sized,
{
    let css = fs::read_to_string(path)
        .with_context(|| format!("failed to read stylesheet {}", path.display()))?;
    let source_file = std::path::absolute(path)
        .with_context(|| format!("failed to resolve {}", path.display()))?;
    let public_root = std::path::absolute(public_root)
        .with_context(|| format!("failed to resolve public root {}", public_root.display()))?;
    Ok(rewrite_stylesheet(&css, &source_file, &public_root, resolver))
}

fn rewrite_ref<R>(caps: &Captures<'_>, source_file: &Path, public_root: &Path, resolver: &R) -> String
where
    R: AssetPathResolver + ?Sized,
{
    let whole = &caps[0];
    let (quote, reference) = if let Some(m) = caps.name("dq") {
        ("\"", m.as_str())
    } else if let Some(m) = caps.name("sq") {
        ("'", m.as_str())
    } else if let Some(m) = caps.name("bare") {
        ("", m.as_str())
    } else {
        return whole.to_string();
    };

    let (path, suffix) = split_suffix(reference);
    let kind = LinkKind::parse(path);
    if !kind.is_local_asset() {
        return whole.to_string();
    }
    let target = match kind {
        LinkKind::FileRelative(link) => match site_root_path(link, source_file, public_root) {
            Some(target) => target,
            None => return whole.to_string(),
        },
        _ => path.to_string(),
    };

    let resolved = resolver.resolve(&target, source_file);
    if resolved == target {
        return whole.to_string();
    }
    format!("{}({quote}{resolved}{suffix}{quote})", &caps["func"])
}

/// Express a stylesheet-relative `reference` as a `/`-rooted path under
/// `public_root`, or `None` when it points outside of it.
fn site_root_path(reference: &str, source_file: &Path, public_root: &Path) -> Option<String> {
    let dir = source_file.parent()?;
    let target = normalize_lexically(&dir.join(reference))?;
    let root = normalize_lexically(public_root)?;
    let relative = target.strip_prefix(&root).ok()?;

    let mut out = String::new();
    for component in relative.components() {
        out.push('/');
        out.push_str(component.as_os_str().to_str()?);
    }
    if out.is_empty() {
        return None;
    }
    Some(out)
}

/// Fold `.` and `..` without touching the filesystem.
///
/// Returns `None` when `..` would climb above the start of the path.
fn normalize_lexically(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    return None;
                }
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    Some(out)
}

/// Split `a.eot?#iefix` into `("a.eot", "?#iefix")`.
fn split_suffix(reference: &str) -> (&str, &str) {
    match reference.find(['?', '#']) {
        // A leading `#` is a fragment reference, not a suffix
        Some(0) => (reference, ""),
        Some(i) => reference.split_at(i),
        None => (reference, ""),
    }
}
