//! Request adapter for hosts that hand over raw strings.

use crate::request::RequestContext;

use super::ExtractContext;

/// Owned raw request parts, collected by the host before classification.
///
/// All fields are optional. Missing values degrade the same way missing
/// headers do: no path is the homepage, no `Accept` is an empty list.
///
/// # Examples
///
/// ```
/// use dot404::web::{ExtractContext, RequestAdapter};
///
/// let mut adapter = RequestAdapter::new();
/// adapter.set_path("/images/logo.png");
/// adapter.set_accept("image/avif,image/webp,*/*");
///
/// let ctx = adapter.extract_context();
/// assert_eq!(ctx.last_segment(), "logo.png");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestAdapter {
    /// Raw, percent-encoded request URI
    path: Option<String>,
    /// Raw `Accept` header
    accept: Option<String>,
    /// Raw `X-Requested-With` header
    requested_with: Option<String>,
    /// Server-internal rewrite target
    redirect_url: Option<String>,
}

impl RequestAdapter {
    /// Creates an empty adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an adapter from CGI-style server variables.
    ///
    /// Reads `REQUEST_URI`, `HTTP_ACCEPT`, `HTTP_X_REQUESTED_WITH` and
    /// `REDIRECT_URL`; everything else is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use dot404::web::{ExtractContext, RequestAdapter};
    ///
    /// let vars = [
    ///     ("REQUEST_URI", "/wp-login.php"),
    ///     ("REDIRECT_URL", "/wp-login.php"),
    ///     ("SERVER_SOFTWARE", "Apache"),
    /// ];
    /// let ctx = RequestAdapter::from_server_vars(vars).extract_context();
    /// assert_eq!(ctx.redirect_url(), Some("/wp-login.php"));
    /// ```
    pub fn from_server_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut adapter = Self::new();
        for (key, value) in vars {
            match key.as_ref() {
                "REQUEST_URI" => adapter.set_path(value),
                "HTTP_ACCEPT" => adapter.set_accept(value),
                "HTTP_X_REQUESTED_WITH" => adapter.set_requested_with(value),
                "REDIRECT_URL" => adapter.set_redirect_url(value),
                _ => {}
            }
        }
        adapter
    }

    /// Sets the raw request URI.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = Some(path.into());
    }

    /// Sets the raw `Accept` header.
    pub fn set_accept(&mut self, accept: impl Into<String>) {
        self.accept = Some(accept.into());
    }

    /// Sets the raw `X-Requested-With` header.
    pub fn set_requested_with(&mut self, value: impl Into<String>) {
        self.requested_with = Some(value.into());
    }

    /// Sets the rewrite target the web server resolved.
    pub fn set_redirect_url(&mut self, target: impl Into<String>) {
        self.redirect_url = Some(target.into());
    }

    /// Returns the raw request URI, if set.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

impl ExtractContext for RequestAdapter {
    fn extract_context(&self) -> RequestContext {
        let mut ctx = RequestContext::new();
        if let Some(path) = &self.path {
            ctx = ctx.with_path(path);
        }
        if let Some(accept) = &self.accept {
            ctx = ctx.with_accept(accept);
        }
        if let Some(requested_with) = &self.requested_with {
            ctx = ctx.with_requested_with(requested_with);
        }
        if let Some(target) = &self.redirect_url {
            ctx = ctx.with_redirect_url(target.as_str());
        }
        ctx
    }
}
