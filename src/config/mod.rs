//! Asset versioning configuration (`assets.toml`).
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   └── handle     # ConfigHandle (swappable snapshot)
//! ├── util           # Config file discovery
//! └── mod.rs         # AssetsConfig (this file)
//! ```
//!
//! # Example
//!
//! ```toml
//! package_assets = true
//! s3_cloudfront_host = "d1234abcd.cloudfront.net"
//! s3_bucket = "myapp-assets"
//! public_root = "public"     # directory served at the site root
//!
//! [versioning]
//! strategy = "prefix"        # prefix | extension
//! env = "RAILS_ASSET_ID"     # environment variable holding the release token
//! trace = true               # log every rewritten path
//! ```

pub mod types;
mod util;

use util::find_config_file;

pub use types::{ConfigDiagnostics, ConfigError, ConfigHandle, FieldPath};

use crate::{cli::Cli, debug, log, versioning::DEFAULT_VERSION_ENV, versioning::Strategy};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing assets.toml
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Whether assets are packaged for the CDN at all.
    pub package_assets: bool,

    /// CloudFront distribution host. Versioning requires it.
    pub s3_cloudfront_host: Option<String>,

    /// Bucket name, used for the fallback `{bucket}.s3.amazonaws.com` host.
    pub s3_bucket: Option<String>,

    /// Directory served at the site root. Stylesheet-relative references
    /// are resolved against it. Relative to the config file's directory.
    pub public_root: PathBuf,

    /// Versioning settings
    pub versioning: VersioningConfig,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            package_assets: false,
            s3_cloudfront_host: None,
            s3_bucket: None,
            public_root: PathBuf::from(DEFAULT_PUBLIC_ROOT),
            versioning: VersioningConfig::default(),
        }
    }
}

/// Default directory served at the site root.
pub const DEFAULT_PUBLIC_ROOT: &str = "public";

impl AssetsConfig {
    pub const S3_CLOUDFRONT_HOST: FieldPath = FieldPath::new("s3_cloudfront_host");
    pub const S3_BUCKET: FieldPath = FieldPath::new("s3_bucket");
    pub const PUBLIC_ROOT: FieldPath = FieldPath::new("public_root");

    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. Without one, defaults
    /// apply and versioning stays off.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                debug!("config"; "loading {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.config_path = path;
                config
            }
            None => {
                log!("hint"; "no {} found, asset versioning is off", cli.config.display());
                Self::default()
            }
        };

        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file, warning about unknown fields.
    ///
    /// A relative `public_root` is anchored at the file's directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("in {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        if let Some(dir) = path.parent() {
            config.public_root = dir.join(&config.public_root);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "ignoring unknown fields in {}: {}", display_path, fields.join(", "));
    }

    /// Apply command-line overrides.
    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(strategy) = cli.strategy {
            self.versioning.strategy = strategy;
        }
    }

    /// CloudFront host, if set and non-empty.
    #[inline]
    pub fn cloudfront_host(&self) -> Option<&str> {
        self.s3_cloudfront_host.as_deref().filter(|h| !h.is_empty())
    }

    /// Validate configuration, printing hints and warnings.
    pub fn validate(&self) -> Result<()> {
        let diag = self.diagnose();
        diag.print_hints_and_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Collect diagnostics without printing them.
    pub fn diagnose(&self) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();

        if self.package_assets && self.cloudfront_host().is_none() {
            let bucket_missing = self.s3_bucket.as_deref().is_none_or(str::is_empty);
            if bucket_missing {
                diag.warn(
                    Self::S3_BUCKET,
                    format!(
                        "neither {} nor {} is set, the asset host will be malformed",
                        Self::S3_CLOUDFRONT_HOST.as_str(),
                        Self::S3_BUCKET.as_str()
                    ),
                );
            }
            diag.hint(
                Self::S3_CLOUDFRONT_HOST,
                "path versioning only applies when serving through CloudFront",
            );
        }

        if self.public_root.as_os_str().is_empty() {
            diag.error_with_hint(
                Self::PUBLIC_ROOT,
                "public root is empty",
                format!("remove the key to use `{DEFAULT_PUBLIC_ROOT}`"),
            );
        }

        self.versioning.validate(&mut diag);
        diag
    }
}

// ============================================================================
// [versioning]
// ============================================================================

/// `[versioning]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VersioningConfig {
    /// How the release token is embedded into paths.
    pub strategy: Strategy,

    /// Environment variable holding the release token.
    pub env: String,

    /// Log every path that gets rewritten.
    pub trace: bool,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            env: DEFAULT_VERSION_ENV.to_string(),
            trace: true,
        }
    }
}

impl VersioningConfig {
    pub const ENV: FieldPath = FieldPath::new("versioning.env");

    /// # Checks
    /// - `env` must be a usable environment variable name.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.env.is_empty() {
            diag.error_with_hint(
                Self::ENV,
                "environment variable name is empty",
                format!("remove the key to use {DEFAULT_VERSION_ENV}"),
            );
        } else if self.env.contains(['=', '\0']) {
            diag.error(
                Self::ENV,
                format!("`{}` is not a valid environment variable name", self.env),
            );
        }
    }
}

// ============================================================================
// test helpers
// ============================================================================

#[cfg(test)]
pub fn test_parse_config(content: &str) -> AssetsConfig {
    let (parsed, ignored) = AssetsConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_str_invalid_toml() {
        // Invalid TOML syntax - unclosed bracket
        assert!(AssetsConfig::parse_with_ignored("[versioning\nenv = \"X\"").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config, AssetsConfig::default());
        assert!(!config.package_assets);
        assert_eq!(config.public_root, PathBuf::from("public"));
        assert_eq!(config.versioning.strategy, Strategy::Prefix);
        assert_eq!(config.versioning.env, "RAILS_ASSET_ID");
        assert!(config.versioning.trace);
    }

    #[test]
    fn test_full_config() {
        let config = test_parse_config(
            r#"package_assets = true
s3_cloudfront_host = "d1.cloudfront.net"
s3_bucket = "media"
public_root = "site/www"

[versioning]
strategy = "extension"
env = "RELEASE_ID"
trace = false
"#,
        );
        assert!(config.package_assets);
        assert_eq!(config.cloudfront_host(), Some("d1.cloudfront.net"));
        assert_eq!(config.s3_bucket.as_deref(), Some("media"));
        assert_eq!(config.public_root, PathBuf::from("site/www"));
        assert_eq!(config.versioning.strategy, Strategy::ExtensionInsertion);
        assert_eq!(config.versioning.env, "RELEASE_ID");
        assert!(!config.versioning.trace);
    }

    #[test]
    fn test_empty_cloudfront_host_is_absent() {
        let config = test_parse_config("s3_cloudfront_host = \"\"");
        assert_eq!(config.s3_cloudfront_host.as_deref(), Some(""));
        assert_eq!(config.cloudfront_host(), None);
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let (config, ignored) =
            AssetsConfig::parse_with_ignored("package_assets = true\ngzip_assets = true\n")
                .unwrap();
        assert!(config.package_assets);
        assert_eq!(ignored, vec!["gzip_assets".to_string()]);
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let result = AssetsConfig::parse_with_ignored("[versioning]\nstrategy = \"query\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_diagnose_env_name() {
        let config = test_parse_config("[versioning]\nenv = \"\"");
        let diag = config.diagnose();
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, VersioningConfig::ENV);

        let config = test_parse_config("[versioning]\nenv = \"A=B\"");
        assert!(config.diagnose().has_errors());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_diagnose_missing_hosts_only_warns() {
        let config = test_parse_config("package_assets = true");
        let diag = config.diagnose();
        assert!(!diag.has_errors());
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].field, AssetsConfig::S3_BUCKET);
        assert_eq!(diag.hints().len(), 1);

        let config = test_parse_config("package_assets = true\ns3_bucket = \"media\"");
        let diag = config.diagnose();
        assert!(diag.warnings().is_empty());
        assert_eq!(diag.hints().len(), 1);
    }

    #[test]
    fn test_diagnose_empty_public_root() {
        let config = test_parse_config("public_root = \"\"");
        let diag = config.diagnose();
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, AssetsConfig::PUBLIC_ROOT);
    }

    #[test]
    fn test_diagnose_active_config_is_clean() {
        let config =
            test_parse_config("package_assets = true\ns3_cloudfront_host = \"d1.cloudfront.net\"");
        let diag = config.diagnose();
        assert!(diag.is_empty());
        assert!(diag.warnings().is_empty());
        assert!(diag.hints().is_empty());
    }

    #[test]
    fn test_from_path_keeps_absolute_public_root() {
        let dir = TempDir::new().unwrap();
        let www = dir.path().join("www");
        let path = dir.path().join("conf/assets.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, format!("public_root = {:?}\n", www.to_str().unwrap())).unwrap();

        let config = AssetsConfig::from_path(&path).unwrap();
        assert_eq!(config.public_root, www);
    }

    #[test]
    fn test_from_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assets.toml");
        fs::write(&path, "package_assets = true\ns3_bucket = \"media\"\n").unwrap();

        let config = AssetsConfig::from_path(&path).unwrap();
        assert!(config.package_assets);
        assert_eq!(config.s3_bucket.as_deref(), Some("media"));
        assert_eq!(config.public_root, dir.path().join("public"));

        let missing = dir.path().join("missing.toml");
        let err = AssetsConfig::from_path(&missing).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Io(p, _)) if p == &missing
        ));
    }
}
