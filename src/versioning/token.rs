//! Release token shared by everything that versions paths.
//!
//! The token is set once at startup (usually from `RAILS_ASSET_ID`) and read
//! on every rewrite. Reads and writes go through `arc-swap`, so a reader
//! sees either the previous or the new token, never a torn value.

use arc_swap::ArcSwap;
use std::sync::Arc;

/// Default environment variable holding the release token.
pub const DEFAULT_VERSION_ENV: &str = "RAILS_ASSET_ID";

/// Cloneable handle to the current release token.
///
/// An empty token means "no versioning".
#[derive(Debug, Clone)]
pub struct VersionToken(Arc<ArcSwap<String>>);

impl VersionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Arc::new(ArcSwap::from_pointee(value.into())))
    }

    pub fn empty() -> Self {
        Self::new(String::new())
    }

    /// Read the token from environment variable `name`.
    ///
    /// Unset or non-UTF-8 values yield an empty token.
    pub fn from_env(name: &str) -> Self {
        Self::new(std::env::var(name).unwrap_or_default())
    }

    /// Current token, `""` when unset.
    #[inline]
    pub fn current(&self) -> Arc<String> {
        self.0.load_full()
    }

    /// Replace the token for every clone of this handle.
    pub fn set(&self, value: impl Into<String>) {
        self.0.store(Arc::new(value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.load().is_empty()
    }
}

impl Default for VersionToken {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token() {
        let token = VersionToken::default();
        assert!(token.is_empty());
        assert_eq!(token.current().as_str(), "");
    }

    #[test]
    fn test_set_is_visible_through_clones() {
        let token = VersionToken::new("r1");
        let reader = token.clone();
        assert_eq!(reader.current().as_str(), "r1");

        token.set("r2");
        assert_eq!(reader.current().as_str(), "r2");

        token.set("");
        assert!(reader.is_empty());
    }

    #[test]
    fn test_from_unset_env() {
        let token = VersionToken::from_env("ASSETSTAMP_TEST_SURELY_UNSET_VARIABLE");
        assert!(token.is_empty());
    }

    #[test]
    fn test_from_env_reads_path() {
        // PATH is set in any test environment we run under
        let expected = std::env::var("PATH").unwrap_or_default();
        assert_eq!(VersionToken::from_env("PATH").current().as_str(), expected);
    }

    #[test]
    fn test_concurrent_readers_see_whole_values() {
        let token = VersionToken::new("aaaa");
        let writer = token.clone();

        let handle = std::thread::spawn(move || {
            for i in 0..1000 {
                writer.set(if i % 2 == 0 { "bbbb" } else { "aaaa" });
            }
        });

        for _ in 0..1000 {
            let seen = token.current();
            assert!(seen.as_str() == "aaaa" || seen.as_str() == "bbbb");
        }
        handle.join().unwrap();
    }
}
