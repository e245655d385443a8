//! When to version, and which host to advertise.
//!
//! Path versioning only makes sense when assets are packaged and served
//! through CloudFront, which ignores cache-busting query strings. Anything
//! short of that leaves paths untouched.

use crate::config::ConfigHandle;

/// Suffix of the default S3 bucket host.
pub const S3_HOST_SUFFIX: &str = "s3.amazonaws.com";

/// Stateless queries over the current configuration.
///
/// Each call loads a fresh snapshot from the handle, so a swapped config is
/// picked up immediately.
#[derive(Debug, Clone)]
pub struct VersioningPolicy {
    config: ConfigHandle,
}

impl VersioningPolicy {
    pub fn new(config: ConfigHandle) -> Self {
        Self { config }
    }

    /// True iff `package_assets` is on and a CloudFront host is set.
    pub fn is_active(&self) -> bool {
        let config = self.config.load();
        config.package_assets && config.cloudfront_host().is_some()
    }

    /// The CloudFront host if set, otherwise `{s3_bucket}.s3.amazonaws.com`.
    ///
    /// The bucket is not validated: a missing bucket yields a malformed host.
    pub fn resolve_host(&self) -> String {
        let config = self.config.load();
        match config.cloudfront_host() {
            Some(host) => host.to_string(),
            None => format!(
                "{}.{S3_HOST_SUFFIX}",
                config.s3_bucket.as_deref().unwrap_or_default()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssetsConfig;

    fn policy(package_assets: bool, host: Option<&str>, bucket: Option<&str>) -> VersioningPolicy {
        VersioningPolicy::new(ConfigHandle::new(AssetsConfig {
            package_assets,
            s3_cloudfront_host: host.map(Into::into),
            s3_bucket: bucket.map(Into::into),
            ..AssetsConfig::default()
        }))
    }

    #[test]
    fn test_is_active_truth_table() {
        assert!(policy(true, Some("d1.cloudfront.net"), None).is_active());

        assert!(!policy(false, Some("d1.cloudfront.net"), None).is_active());
        assert!(!policy(true, None, Some("bucket")).is_active());
        assert!(!policy(true, Some(""), Some("bucket")).is_active());
        assert!(!policy(false, None, None).is_active());
        assert!(!policy(false, Some(""), None).is_active());
    }

    #[test]
    fn test_resolve_host_prefers_cloudfront() {
        let p = policy(false, Some("d1.cloudfront.net"), Some("bucket"));
        assert_eq!(p.resolve_host(), "d1.cloudfront.net");
    }

    #[test]
    fn test_resolve_host_falls_back_to_bucket() {
        assert_eq!(
            policy(true, None, Some("media")).resolve_host(),
            "media.s3.amazonaws.com"
        );
        assert_eq!(
            policy(true, Some(""), Some("media")).resolve_host(),
            "media.s3.amazonaws.com"
        );
    }

    #[test]
    fn test_resolve_host_without_bucket_is_malformed() {
        assert_eq!(policy(true, None, None).resolve_host(), ".s3.amazonaws.com");
    }

    #[test]
    fn test_policy_rereads_config() {
        let handle = ConfigHandle::default();
        let policy = VersioningPolicy::new(handle.clone());
        assert!(!policy.is_active());

        handle.store(AssetsConfig {
            package_assets: true,
            s3_cloudfront_host: Some("cdn.example.com".into()),
            ..AssetsConfig::default()
        });
        assert!(policy.is_active());
        assert_eq!(policy.resolve_host(), "cdn.example.com");
    }
}
