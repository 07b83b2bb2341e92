//! Path classification.
//!
//! Rules run in a fixed priority order and the first one that fires decides
//! the [`Outcome`]. Classification is pure: the same context, pattern table
//! and configuration always give the same outcome.

use std::fmt;

use crate::config::{FilterConfig, SitemapScope};
use crate::request::RequestContext;
use crate::sitemap::ReservedPaths;

/// Result of classifying one request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The site root; nothing to do
    Homepage,
    /// The server rewrote the request toward a PHP script that does not exist
    SuspiciousProbe,
    /// A dotted path the CMS serves itself
    ReservedSitemapPath,
    /// Some segment contains a `.`
    DottedSlug,
    /// Some segment contains a character outside `[0-9A-Za-z_-]`
    NonAsciiSlug,
    /// Some segment contains a character that is neither a Latin letter nor a number
    NonLatinSlug,
    /// No rule fired
    NoMatch,
}

impl Outcome {
    /// Returns true if this outcome ends the request with a synthetic response.
    ///
    /// `Homepage`, `ReservedSitemapPath` and `NoMatch` leave the request to
    /// the host.
    pub fn responds(self) -> bool {
        matches!(
            self,
            Outcome::SuspiciousProbe
                | Outcome::DottedSlug
                | Outcome::NonAsciiSlug
                | Outcome::NonLatinSlug
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Homepage => write!(f, "homepage"),
            Outcome::SuspiciousProbe => write!(f, "suspicious_probe"),
            Outcome::ReservedSitemapPath => write!(f, "reserved_sitemap_path"),
            Outcome::DottedSlug => write!(f, "dotted_slug"),
            Outcome::NonAsciiSlug => write!(f, "non_ascii_slug"),
            Outcome::NonLatinSlug => write!(f, "non_latin_slug"),
            Outcome::NoMatch => write!(f, "no_match"),
        }
    }
}

/// Classifies a request.
///
/// # Examples
///
/// ```
/// use dot404::{classify, FilterConfig, Outcome, ReservedPaths, RequestContext};
///
/// let reserved = ReservedPaths::compile::<&str>(&[]).unwrap();
/// let config = FilterConfig::default();
///
/// let ctx = RequestContext::new().with_path("/foo.bar");
/// assert_eq!(classify(&ctx, &reserved, &config), Outcome::DottedSlug);
///
/// let ctx = RequestContext::new().with_path("/wp-sitemap.xml");
/// assert_eq!(classify(&ctx, &reserved, &config), Outcome::ReservedSitemapPath);
/// ```
pub fn classify(ctx: &RequestContext, reserved: &ReservedPaths, config: &FilterConfig) -> Outcome {
    if ctx.is_homepage() {
        return Outcome::Homepage;
    }

    if is_nonexistent_php(ctx.redirect_url()) {
        return Outcome::SuspiciousProbe;
    }

    let segments = ctx.segments();
    let first_reserved = segments
        .first()
        .is_some_and(|first| reserved.is_reserved(first));

    if first_reserved {
        match config.sitemap_scope {
            SitemapScope::FirstSegment => return Outcome::ReservedSitemapPath,
            SitemapScope::WholePath => {
                return if any_segment(&segments[1..], is_dotted) {
                    Outcome::DottedSlug
                } else {
                    Outcome::ReservedSitemapPath
                };
            }
        }
    }

    if any_segment(segments, is_dotted) {
        return Outcome::DottedSlug;
    }

    if config.block_non_ascii_slug && any_segment(segments, is_non_ascii) {
        return Outcome::NonAsciiSlug;
    }

    if config.block_non_latin_slug && any_segment(segments, is_non_latin) {
        return Outcome::NonLatinSlug;
    }

    Outcome::NoMatch
}

fn any_segment(segments: &[String], rule: fn(&str) -> bool) -> bool {
    segments.iter().any(|segment| rule(segment))
}

/// A web server only rewrites toward a `.php` target when the requested PHP
/// file does not exist on disk.
fn is_nonexistent_php(redirect_url: Option<&str>) -> bool {
    redirect_url.is_some_and(|url| url.to_ascii_lowercase().contains(".php"))
}

fn is_dotted(segment: &str) -> bool {
    segment.contains('.')
}

fn is_non_ascii(segment: &str) -> bool {
    segment
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
}

fn is_non_latin(segment: &str) -> bool {
    segment.chars().any(|c| !is_latin_slug_char(c))
}

/// Code point ranges of the Latin script's letters, plus combining
/// diacritics so that decomposed accented letters pass too.
const LATIN_RANGES: &[(char, char)] = &[
    ('A', 'Z'),
    ('a', 'z'),
    ('\u{00AA}', '\u{00AA}'),
    ('\u{00BA}', '\u{00BA}'),
    ('\u{00C0}', '\u{00D6}'),
    ('\u{00D8}', '\u{00F6}'),
    ('\u{00F8}', '\u{02AF}'),
    ('\u{0300}', '\u{036F}'),
    ('\u{1D00}', '\u{1D25}'),
    ('\u{1E00}', '\u{1EFF}'),
    ('\u{2C60}', '\u{2C7F}'),
    ('\u{A720}', '\u{A7FF}'),
    ('\u{AB30}', '\u{AB6F}'),
    ('\u{FB00}', '\u{FB06}'),
    ('\u{FF21}', '\u{FF3A}'),
    ('\u{FF41}', '\u{FF5A}'),
];

fn is_latin_slug_char(c: char) -> bool {
    if c == '-' || c == '_' || c.is_numeric() {
        return true;
    }

    LATIN_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&c))
}
