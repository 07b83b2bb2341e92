//! Dotted paths the CMS serves itself and that must reach its router.
//!
//! The table mirrors the CMS's built-in rewrite rules that contain an
//! escaped dot (its XML sitemaps and their XSL stylesheets). Patterns are
//! matched against the first path segment only.

use regex::RegexSet;

use crate::error::Error;

/// Built-in sitemap patterns, in rewrite-rule order.
pub const SITEMAP_PATTERNS: &[&str] = &[
    r"sitemap_index\.xml$",
    r"([^/]+?)-sitemap([0-9]+)?\.xml$",
    r"([a-z]+)?-?sitemap\.xsl$",
    r"^wp-sitemap\.xml$",
    r"^wp-sitemap\.xsl$",
    r"^wp-sitemap-index\.xsl$",
    r"^wp-sitemap-([a-z]+?)-([a-z\d_-]+?)-(\d+?)\.xml$",
    r"^wp-sitemap-([a-z]+?)-(\d+?)\.xml$",
];

/// Compiled set of reserved first-segment patterns.
#[derive(Debug, Clone)]
pub struct ReservedPaths {
    set: RegexSet,
}

impl ReservedPaths {
    /// Compiles the built-in sitemap table followed by `extra` patterns.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` naming the first pattern that does not
    /// compile.
    pub fn compile<S: AsRef<str>>(extra: &[S]) -> Result<Self, Error> {
        let patterns: Vec<&str> = SITEMAP_PATTERNS
            .iter()
            .copied()
            .chain(extra.iter().map(AsRef::as_ref))
            .collect();

        match RegexSet::new(&patterns) {
            Ok(set) => Ok(Self { set }),
            Err(err) => Err(Self::first_invalid(&patterns, err)),
        }
    }

    // RegexSet reports a failure without saying which member caused it.
    fn first_invalid(patterns: &[&str], fallback: regex::Error) -> Error {
        patterns
            .iter()
            .find_map(|pattern| {
                regex::Regex::new(pattern)
                    .err()
                    .map(|err| Error::invalid_pattern(*pattern, &err))
            })
            .unwrap_or_else(|| Error::invalid_pattern(patterns.join("|"), &fallback))
    }

    /// Returns true if `segment` is a path the CMS reserves for itself.
    pub fn is_reserved(&self, segment: &str) -> bool {
        self.set.is_match(segment)
    }

    /// Number of compiled patterns, built-ins included.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Always false; the built-in table is never empty.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> ReservedPaths {
        ReservedPaths::compile::<&str>(&[]).unwrap()
    }

    #[test]
    fn builtin_table_compiles() {
        assert_eq!(builtin().len(), SITEMAP_PATTERNS.len());
    }

    #[test]
    fn core_sitemaps_are_reserved() {
        let paths = builtin();
        for segment in [
            "wp-sitemap.xml",
            "wp-sitemap.xsl",
            "wp-sitemap-index.xsl",
            "wp-sitemap-posts-1.xml",
            "wp-sitemap-posts-page-2.xml",
            "wp-sitemap-taxonomies-category-1.xml",
            "wp-sitemap-users-1.xml",
        ] {
            assert!(paths.is_reserved(segment), "{segment} should be reserved");
        }
    }

    #[test]
    fn plugin_sitemaps_are_reserved() {
        let paths = builtin();
        for segment in [
            "sitemap_index.xml",
            "post-sitemap.xml",
            "page-sitemap2.xml",
            "main-sitemap.xsl",
            "sitemap.xsl",
        ] {
            assert!(paths.is_reserved(segment), "{segment} should be reserved");
        }
    }

    #[test]
    fn ordinary_dotted_slugs_are_not_reserved() {
        let paths = builtin();
        for segment in ["foo.bar", "sitemap.xml", "wp-sitemap.xml.bak", "index.php"] {
            assert!(!paths.is_reserved(segment), "{segment} should not be reserved");
        }
    }

    #[test]
    fn patterns_are_case_sensitive() {
        assert!(!builtin().is_reserved("WP-SITEMAP.XML"));
    }

    #[test]
    fn extra_patterns_are_appended() {
        let paths = ReservedPaths::compile(&[r"^feed\.rss$"]).unwrap();
        assert_eq!(paths.len(), SITEMAP_PATTERNS.len() + 1);
        assert!(paths.is_reserved("feed.rss"));
    }

    #[test]
    fn invalid_extra_pattern_is_named() {
        let err = ReservedPaths::compile(&["ok", "(unclosed"]).unwrap_err();
        match err {
            Error::InvalidPattern { pattern, .. } => assert_eq!(pattern, "(unclosed"),
        }
    }
}
