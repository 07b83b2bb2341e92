/// How a reserved sitemap match on the first segment interacts with the
/// dotted-slug rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SitemapScope {
    /// A match on the first segment defers the whole request. Dots in later
    /// segments are not inspected.
    #[default]
    FirstSegment,
    /// A match on the first segment only exempts that segment. Any later
    /// segment containing a dot still yields a dotted-slug outcome.
    WholePath,
}

/// Per-filter switches, fixed once the [`Filter`](crate::Filter) is built.
///
/// # Examples
///
/// ```
/// use dot404::{FilterConfig, SitemapScope};
///
/// let config = FilterConfig::default();
/// assert!(config.block_non_latin_slug);
/// assert!(!config.block_non_ascii_slug);
/// assert!(!config.serve_robots_txt);
/// assert_eq!(config.sitemap_scope, SitemapScope::FirstSegment);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterConfig {
    /// Answer slugs containing characters outside Latin letters and numbers
    pub block_non_latin_slug: bool,
    /// Answer slugs containing characters outside `[0-9A-Za-z_-]`
    pub block_non_ascii_slug: bool,
    /// Serve a permissive robots policy for a dotted `robots.txt` request
    pub serve_robots_txt: bool,
    /// Sitemap exemption semantics
    pub sitemap_scope: SitemapScope,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            block_non_latin_slug: true,
            block_non_ascii_slug: false,
            serve_robots_txt: false,
            sitemap_scope: SitemapScope::FirstSegment,
        }
    }
}
