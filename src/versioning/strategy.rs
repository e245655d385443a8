//! Path versioning strategies.
//!
//! | Strategy             | Input              | Version | Output                |
//! |----------------------|--------------------|---------|-----------------------|
//! | `Prefix`             | `/images/logo.png` | `1`     | `/1/images/logo.png`  |
//! | `Prefix`             | `images/logo.png`  | `1`     | `1/images/logo.png`   |
//! | `ExtensionInsertion` | `images/logo.png`  | `1`     | `images/logo.1.png`   |
//!
//! Both strategies return the input unchanged when the path or the version
//! is empty.

use serde::Deserialize;

/// How a release identifier is embedded into an asset path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Version becomes the leading directory: one asset root per release.
    #[default]
    Prefix,
    /// Version is inserted before the file extension.
    #[serde(rename = "extension")]
    #[value(name = "extension")]
    ExtensionInsertion,
}

impl Strategy {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Prefix => "prefix",
            Self::ExtensionInsertion => "extension",
        }
    }
}

/// Prepend `version` as the leading path segment.
///
/// A rooted path stays rooted and a relative path stays relative. The
/// rooted form keeps the original leading `/`, so `/images/logo.png`
/// becomes `/1` + `/images/logo.png`.
pub fn prepend_version(path: &str, version: &str) -> String {
    if version.is_empty() || path.is_empty() {
        return path.to_string();
    }

    if path.starts_with('/') {
        format!("/{version}{path}")
    } else {
        format!("{version}/{path}")
    }
}

/// Insert `.{version}` in front of the file extension.
///
/// A path without extension gets the version appended: `README` → `README.1`.
pub fn insert_before_extension(path: &str, version: &str) -> String {
    if version.is_empty() || path.is_empty() {
        return path.to_string();
    }

    let (stem, ext) = split_extension(path);
    format!("{stem}.{version}{ext}")
}

/// Split `path` into `(stem, extension)`.
///
/// The extension starts at the last `.` of the final segment and includes
/// it. Leading dots of the segment never start an extension, so dotfiles
/// like `.htaccess` have none.
pub fn split_extension(path: &str) -> (&str, &str) {
    let segment_start = path.rfind('/').map_or(0, |i| i + 1);
    let segment = &path[segment_start..];
    let leading_dots = segment.len() - segment.trim_start_matches('.').len();

    match segment[leading_dots..].rfind('.') {
        Some(i) => path.split_at(segment_start + leading_dots + i),
        None => (path, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepend_rooted_path() {
        assert_eq!(prepend_version("/images/logo.png", "1"), "/1/images/logo.png");
        assert_eq!(prepend_version("/a", "v20240101"), "/v20240101/a");
        // A lone slash still gains the version segment
        assert_eq!(prepend_version("/", "1"), "/1/");
    }

    #[test]
    fn test_prepend_relative_path() {
        assert_eq!(prepend_version("images/logo.png", "1"), "1/images/logo.png");
        assert_eq!(prepend_version("../fonts/a.woff", "r7"), "r7/../fonts/a.woff");
    }

    #[test]
    fn test_prepend_empty_inputs() {
        assert_eq!(prepend_version("/images/logo.png", ""), "/images/logo.png");
        assert_eq!(prepend_version("images/logo.png", ""), "images/logo.png");
        assert_eq!(prepend_version("", "1"), "");
        assert_eq!(prepend_version("", ""), "");
    }

    #[test]
    fn test_prepend_is_not_idempotent() {
        let once = prepend_version("/images/logo.png", "1");
        let twice = prepend_version(&once, "1");
        assert_eq!(twice, "/1/1/images/logo.png");
        assert_ne!(once, twice);
    }

    #[test]
    fn test_insert_before_extension() {
        assert_eq!(insert_before_extension("images/logo.png", "1"), "images/logo.1.png");
        assert_eq!(insert_before_extension("/js/app.min.js", "42"), "/js/app.min.42.js");
        assert_eq!(insert_before_extension("README", "1"), "README.1");
        assert_eq!(insert_before_extension("v1.2/README", "3"), "v1.2/README.3");
        assert_eq!(insert_before_extension("fonts/.hidden", "3"), "fonts/.hidden.3");
    }

    #[test]
    fn test_insert_before_extension_empty_inputs() {
        assert_eq!(insert_before_extension("images/logo.png", ""), "images/logo.png");
        assert_eq!(insert_before_extension("README", ""), "README");
        assert_eq!(insert_before_extension("", "1"), "");
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("images/logo.png"), ("images/logo", ".png"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension("dir.d/file"), ("dir.d/file", ""));
        assert_eq!(split_extension(".htaccess"), (".htaccess", ""));
        assert_eq!(split_extension("conf/.env.local"), ("conf/.env", ".local"));
        assert_eq!(split_extension(""), ("", ""));
    }

    #[test]
    fn test_strategy_default_and_names() {
        assert_eq!(Strategy::default(), Strategy::Prefix);
        assert_eq!(Strategy::Prefix.name(), "prefix");
        assert_eq!(Strategy::ExtensionInsertion.name(), "extension");
    }

    #[test]
    fn test_strategy_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            strategy: Strategy,
        }

        let parsed: Wrapper = toml::from_str("strategy = \"extension\"").unwrap();
        assert_eq!(parsed.strategy, Strategy::ExtensionInsertion);
        let parsed: Wrapper = toml::from_str("strategy = \"prefix\"").unwrap();
        assert_eq!(parsed.strategy, Strategy::Prefix);
        assert!(toml::from_str::<Wrapper>("strategy = \"suffix\"").is_err());
    }
}
