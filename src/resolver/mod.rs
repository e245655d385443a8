//! Asset path resolution hook.
//!
//! The host pipeline resolves every asset reference it finds (for example
//! `url(...)` in a stylesheet) through an [`AssetPathResolver`]. Versioning
//! is layered on top as a decorator:
//!
//! ```text
//! VersioningResolver ──active──▶ PathVersioner::apply(path, token)
//!        │
//!        └──inactive──▶ inner.resolve(path, source_file)
//! ```

use std::path::Path;

use crate::versioning::{PathVersioner, Trace, VersionToken, VersioningPolicy};

/// Resolves an asset reference found in `source_file`.
pub trait AssetPathResolver: Send + Sync {
    fn resolve(&self, path: &str, source_file: &Path) -> String;
}

impl<R: AssetPathResolver + ?Sized> AssetPathResolver for &R {
    fn resolve(&self, path: &str, source_file: &Path) -> String {
        (**self).resolve(path, source_file)
    }
}

impl<R: AssetPathResolver + ?Sized> AssetPathResolver for Box<R> {
    fn resolve(&self, path: &str, source_file: &Path) -> String {
        (**self).resolve(path, source_file)
    }
}

/// Host default: references are kept exactly as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl AssetPathResolver for PassThrough {
    #[inline]
    fn resolve(&self, path: &str, _source_file: &Path) -> String {
        path.to_string()
    }
}

/// Versions paths while the policy is active, otherwise defers to `inner`.
///
/// When inactive the output is exactly what `inner` returns.
#[derive(Debug, Clone)]
pub struct VersioningResolver<R> {
    inner: R,
    policy: VersioningPolicy,
    versioner: PathVersioner,
    token: VersionToken,
    trace: Option<Trace>,
}

impl<R: AssetPathResolver> VersioningResolver<R> {
    pub fn new(
        inner: R,
        policy: VersioningPolicy,
        versioner: PathVersioner,
        token: VersionToken,
    ) -> Self {
        Self {
            inner,
            policy,
            versioner,
            token,
            trace: None,
        }
    }

    /// Attach a hook notified of every reference this resolver rewrites.
    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: AssetPathResolver> AssetPathResolver for VersioningResolver<R> {
    fn resolve(&self, path: &str, source_file: &Path) -> String {
        if !self.policy.is_active() {
            return self.inner.resolve(path, source_file);
        }

        let version = self.token.current();
        let versioned = self.versioner.apply(path, &version);
        if let Some(trace) = &self.trace {
            trace.emit(path, &versioned);
        }
        versioned
    }
}
