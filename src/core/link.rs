//! Asset reference classification.

/// Syntactic classification of asset references
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// Reference with URL scheme (https:, data:, etc.) or protocol-relative (`//cdn/...`)
    External(&'a str),
    /// Pure fragment reference (#filter). Value is anchor without `#`.
    Fragment(&'a str),
    /// Site-root-relative path (/images/logo.png).
    SiteRoot(&'a str),
    /// File-relative path (../images/logo.png, logo.png).
    FileRelative(&'a str),
}

impl<'a> LinkKind<'a> {
    /// Parse a reference into its syntactic kind.
    #[inline]
    pub fn parse(link: &'a str) -> Self {
        if is_external_link(link) || link.starts_with("//") {
            Self::External(link)
        } else if let Some(anchor) = link.strip_prefix('#') {
            Self::Fragment(anchor)
        } else if link.starts_with('/') {
            Self::SiteRoot(link)
        } else {
            Self::FileRelative(link)
        }
    }

    /// Whether the reference names a file served alongside the stylesheet.
    #[inline]
    pub fn is_local_asset(&self) -> bool {
        match self {
            Self::SiteRoot(_) => true,
            Self::FileRelative(link) => !link.is_empty(),
            Self::External(_) | Self::Fragment(_) => false,
        }
    }
}

/// Check whether `link` starts with a URL scheme (`https:`, `data:`, ...)
///
/// # Examples
/// ```ignore
/// assert!(is_external_link("https://example.com"));
/// assert!(is_external_link("data:image/png;base64,AAAA"));
/// assert!(!is_external_link("../images/logo.png"));
/// ```
#[inline]
pub fn is_external_link(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}
