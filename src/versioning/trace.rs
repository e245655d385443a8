//! Diagnostic notices for rewritten paths.

use std::fmt;
use std::sync::Arc;

type TraceFn = dyn Fn(&str, &str) + Send + Sync;

/// Receives `(old, new)` whenever a rewrite actually changed a path.
///
/// Purely diagnostic: nothing reads the notices back.
#[derive(Clone)]
pub struct Trace(Arc<TraceFn>);

impl Trace {
    pub fn new(f: impl Fn(&str, &str) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// `Changing <old> to <new>`, logged under `[version]`.
    pub fn changing() -> Self {
        Self::new(|old, new| crate::log!("version"; "Changing {} to {}", old, new))
    }

    /// `Rewriting <old> as <new>`, logged under `[rewrite]`.
    pub fn rewriting() -> Self {
        Self::new(|old, new| crate::log!("rewrite"; "Rewriting {} as {}", old, new))
    }

    /// Forward to the hook unless the path is unchanged.
    #[inline]
    pub fn emit(&self, old: &str, new: &str) {
        if old != new {
            (self.0)(old, new);
        }
    }
}

impl fmt::Debug for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Trace(..)")
    }
}
