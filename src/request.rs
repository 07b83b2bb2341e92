//! Immutable per-request view of the inputs the filter cares about.

use percent_encoding::percent_decode_str;

/// Everything the classifier and negotiator read about one request.
///
/// Built once at the boundary from raw strings and never mutated. Absent or
/// malformed inputs degrade to defaults: a missing path is the homepage and
/// a missing `Accept` header is an empty list.
///
/// # Examples
///
/// ```
/// use dot404::RequestContext;
///
/// let ctx = RequestContext::new()
///     .with_path("/blog/hello%20world.html?ref=1")
///     .with_accept("text/html, application/xhtml+xml;q=0.9")
///     .with_requested_with("XMLHttpRequest");
///
/// assert_eq!(ctx.segments(), ["blog", "hello world.html"]);
/// assert_eq!(ctx.accepted_types(), ["text/html", "application/xhtml+xml"]);
/// assert!(ctx.is_ajax());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    segments: Vec<String>,
    accepted_types: Vec<String>,
    is_ajax: bool,
    redirect_url: Option<String>,
}

impl RequestContext {
    /// Creates the context of a plain homepage request with no headers.
    pub fn new() -> Self {
        Self {
            segments: vec![String::new()],
            accepted_types: Vec::new(),
            is_ajax: false,
            redirect_url: None,
        }
    }

    /// Sets the segments from a raw, percent-encoded request URI.
    ///
    /// Query string and fragment are dropped before decoding, `+` decodes to
    /// a space, and invalid UTF-8 is replaced lossily.
    pub fn with_path(mut self, raw_uri: &str) -> Self {
        self.segments = split_segments(raw_uri);
        self
    }

    /// Sets the accepted media types from a raw `Accept` header value.
    pub fn with_accept(mut self, header: &str) -> Self {
        self.accepted_types = parse_accept(header);
        self
    }

    /// Sets the ajax flag from a raw `X-Requested-With` header value.
    pub fn with_requested_with(mut self, header: &str) -> Self {
        self.is_ajax = header.eq_ignore_ascii_case("xmlhttprequest");
        self
    }

    /// Sets the server-internal rewrite target, e.g. Apache's `REDIRECT_URL`.
    pub fn with_redirect_url(mut self, target: impl Into<String>) -> Self {
        self.redirect_url = Some(target.into());
        self
    }

    /// Decoded path segments. Never empty; the homepage is `[""]`.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The final path segment.
    pub fn last_segment(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Lowercased, parameter-free media types in header order.
    pub fn accepted_types(&self) -> &[String] {
        &self.accepted_types
    }

    /// Whether the client announced itself as `XMLHttpRequest`.
    pub fn is_ajax(&self) -> bool {
        self.is_ajax
    }

    /// The rewrite target the web server resolved, if any.
    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }

    /// Returns true if the request is for the site root.
    pub fn is_homepage(&self) -> bool {
        self.segments.len() == 1 && self.segments[0].is_empty()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn split_segments(raw_uri: &str) -> Vec<String> {
    let path = raw_uri
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let plus_decoded = strip_scheme_and_authority(path).replace('+', " ");
    let decoded = percent_decode_str(&plus_decoded).decode_utf8_lossy();

    // An absolute path always starts with a slash; strip it so the first
    // component is segments[0].
    let relative = decoded.strip_prefix('/').unwrap_or(&*decoded);

    relative.split('/').map(str::to_owned).collect()
}

/// Reduces an absolute-form URI (`http://host/path`) to its path.
fn strip_scheme_and_authority(uri: &str) -> &str {
    let Some((scheme, rest)) = uri.split_once("://") else {
        return uri;
    };

    let is_scheme = scheme
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !is_scheme {
        return uri;
    }

    rest.find('/').map(|at| &rest[at..]).unwrap_or("/")
}

fn parse_accept(header: &str) -> Vec<String> {
    header
        .split(',')
        .map(|part| {
            part.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
        .filter(|media_type| !media_type.is_empty())
        .collect()
}
