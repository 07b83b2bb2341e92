//! Synthetic responses and the decision handed back to the host.

use std::io::{self, Write};

use http::header::{self, HeaderName, HeaderValue};
use http::StatusCode;

/// A 1x1 transparent PNG.
pub const PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x04, 0x00, 0x00, 0x00, 0xB5, 0x1C, 0x0C,
    0x02, 0x00, 0x00, 0x00, 0x0B, 0x49, 0x44, 0x41, 0x54, 0x78, 0xDA, 0x63, 0xFC, 0xFF, 0x1F, 0x00,
    0x03, 0x03, 0x01, 0xFF, 0xA5, 0xB7, 0x59, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

pub(crate) const HTML_NOT_FOUND: &str = "<h1>404</h1><p>Post not found</p>";
pub(crate) const JSON_NOT_FOUND: &str = r#"{"error":"Post not found"}"#;
pub(crate) const XML_NOT_FOUND: &str =
    r#"<?xml version="1.0"?><response><error>Post not found</error></response>"#;
pub(crate) const TEXT_NOT_FOUND: &str = "Post not found";
pub(crate) const ROBOTS_ALLOW_ALL: &str = "User-agent: *\nDisallow:\n";
pub(crate) const FORBIDDEN: &str = "Forbidden";

/// Headers every synthetic 404 carries so it is never cached or indexed.
const NOT_FOUND_HEADERS: &[(&str, &str)] = &[
    ("Expires", "Wed, 11 Jan 1984 05:00:00 GMT"),
    ("Cache-Control", "no-cache, must-revalidate, max-age=0"),
    ("Pragma", "no-cache"),
    ("X-Robots-Tag", "noindex, nofollow"),
];

/// What the host should do with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Write this response and stop processing the request
    Respond(Response),
    /// Leave the request to the host's own not-found handling
    Defer,
}

impl Decision {
    /// Returns the response, if the filter answered the request.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Decision::Respond(response) => Some(response),
            Decision::Defer => None,
        }
    }

    /// Returns true if the request is left to the host.
    pub fn is_defer(&self) -> bool {
        matches!(self, Decision::Defer)
    }
}

/// A fixed response chosen by the negotiator.
///
/// All parts are static; building one never allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    content_type: &'static str,
    body: &'static [u8],
    cache_busting: bool,
}

impl Response {
    /// A `404 Not Found` with cache-busting and no-index headers.
    ///
    /// `content_type` must be a valid header value; only the negotiator's
    /// fixed media types are passed here.
    pub(crate) fn not_found(content_type: &'static str, body: &'static [u8]) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            content_type,
            body,
            cache_busting: true,
        }
    }

    /// The `403 Forbidden` sent to blocked probes.
    pub fn forbidden() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            content_type: "text/plain",
            body: FORBIDDEN.as_bytes(),
            cache_busting: false,
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Value of the `Content-Type` header.
    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Response body.
    pub fn body(&self) -> &'static [u8] {
        self.body
    }

    /// All headers in emission order, `Content-Type` last.
    pub fn headers(&self) -> Vec<(&'static str, &'static str)> {
        let mut headers = Vec::with_capacity(NOT_FOUND_HEADERS.len() + 1);
        if self.cache_busting {
            headers.extend_from_slice(NOT_FOUND_HEADERS);
        }
        headers.push(("Content-Type", self.content_type));
        headers
    }

    /// Returns the value of a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&'static str> {
        self.headers()
            .into_iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Converts into an [`http::Response`] for frameworks built on the `http` crate.
    ///
    /// # Examples
    ///
    /// ```
    /// use dot404::Response;
    ///
    /// let resp = Response::forbidden().into_http::<Vec<u8>>();
    /// assert_eq!(resp.status(), 403);
    /// assert_eq!(resp.body(), b"Forbidden");
    /// ```
    pub fn into_http<B>(self) -> http::Response<B>
    where
        B: From<&'static [u8]>,
    {
        let mut response = http::Response::new(B::from(self.body));
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        if self.cache_busting {
            headers.insert(
                header::EXPIRES,
                HeaderValue::from_static("Wed, 11 Jan 1984 05:00:00 GMT"),
            );
            headers.insert(
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-cache, must-revalidate, max-age=0"),
            );
            headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
            headers.insert(
                HeaderName::from_static("x-robots-tag"),
                HeaderValue::from_static("noindex, nofollow"),
            );
        }
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(self.content_type),
        );

        response
    }

    /// Writes the response in CGI form: a `Status:` line, headers, a blank
    /// line and the body.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from `out`.
    pub fn write_cgi<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(
            out,
            "Status: {} {}\r\n",
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or_default()
        )?;
        for (name, value) in self.headers() {
            write!(out, "{}: {}\r\n", name, value)?;
        }
        out.write_all(b"\r\n")?;
        out.write_all(self.body)?;
        out.flush()
    }
}
