//! Integration with the `http` crate's request type.

use http::header::{HeaderMap, ACCEPT};
use http::Request;

use crate::request::RequestContext;

use super::ExtractContext;

const X_REQUESTED_WITH: &str = "x-requested-with";

/// Rewrite target attached to a request as an extension.
///
/// Servers that emulate Apache's `REDIRECT_URL` insert this before handing
/// the request to the filter.
///
/// # Examples
///
/// ```
/// use dot404::web::{ExtractContext, RewriteTarget};
///
/// let mut req = http::Request::builder()
///     .uri("/wp-config.php")
///     .body(())
///     .unwrap();
/// req.extensions_mut().insert(RewriteTarget::new("/index.php"));
///
/// assert_eq!(req.extract_context().redirect_url(), Some("/index.php"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteTarget(String);

impl RewriteTarget {
    /// Wraps a rewrite target.
    pub fn new(target: impl Into<String>) -> Self {
        Self(target.into())
    }

    /// Returns the target path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<B> ExtractContext for Request<B> {
    fn extract_context(&self) -> RequestContext {
        let path = self
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        let mut ctx = RequestContext::new().with_path(path);

        if let Some(accept) = header_str(self.headers(), ACCEPT.as_str()) {
            ctx = ctx.with_accept(accept);
        }
        if let Some(requested_with) = header_str(self.headers(), X_REQUESTED_WITH) {
            ctx = ctx.with_requested_with(requested_with);
        }
        if let Some(target) = self.extensions().get::<RewriteTarget>() {
            ctx = ctx.with_redirect_url(target.as_str());
        }

        ctx
    }
}

// Non-UTF-8 header values are treated as absent.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
