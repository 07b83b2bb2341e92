//! Content negotiation for synthetic responses.

use glob::Pattern;

use crate::classify::Outcome;
use crate::config::FilterConfig;
use crate::request::RequestContext;
use crate::response::{
    Decision, Response, HTML_NOT_FOUND, JSON_NOT_FOUND, PIXEL_PNG, ROBOTS_ALLOW_ALL,
    TEXT_NOT_FOUND, XML_NOT_FOUND,
};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "ico", "webp", "bmp"];
const IMAGE_GLOB: &str = "image/*";

/// Picks the response for an outcome.
///
/// Non-terminal outcomes always give [`Decision::Defer`].
///
/// # Examples
///
/// ```
/// use dot404::{negotiate, FilterConfig, Outcome, RequestContext};
///
/// let ctx = RequestContext::new()
///     .with_path("/foo.bar")
///     .with_accept("application/json")
///     .with_requested_with("XMLHttpRequest");
///
/// let decision = negotiate(Outcome::DottedSlug, &ctx, &FilterConfig::default());
/// let response = decision.response().unwrap();
/// assert_eq!(response.status(), 404);
/// assert_eq!(response.content_type(), "application/json");
/// assert_eq!(response.body(), br#"{"error":"Post not found"}"#);
/// ```
pub fn negotiate(outcome: Outcome, ctx: &RequestContext, config: &FilterConfig) -> Decision {
    match outcome {
        Outcome::SuspiciousProbe => Decision::Respond(Response::forbidden()),
        Outcome::DottedSlug | Outcome::NonAsciiSlug | Outcome::NonLatinSlug => {
            Decision::Respond(not_found(ctx, config))
        }
        Outcome::Homepage | Outcome::ReservedSitemapPath | Outcome::NoMatch => Decision::Defer,
    }
}

fn not_found(ctx: &RequestContext, config: &FilterConfig) -> Response {
    let accepted = ctx.accepted_types();

    if ctx.is_ajax() {
        return if accepts(accepted, "application/json") {
            Response::not_found("application/json", JSON_NOT_FOUND.as_bytes())
        } else if accepts(accepted, "application/xml") {
            Response::not_found("application/xml", XML_NOT_FOUND.as_bytes())
        } else if accepts(accepted, "text/plain") {
            Response::not_found("text/plain", TEXT_NOT_FOUND.as_bytes())
        } else {
            html()
        };
    }

    let last = ctx.last_segment();

    if last == "favicon.ico" || has_image_extension(last) || accepts_image(accepted) {
        return Response::not_found("image/png", PIXEL_PNG);
    }

    if config.serve_robots_txt && last == "robots.txt" {
        return Response::not_found("text/plain", ROBOTS_ALLOW_ALL.as_bytes());
    }

    html()
}

fn html() -> Response {
    Response::not_found("text/html", HTML_NOT_FOUND.as_bytes())
}

fn has_image_extension(segment: &str) -> bool {
    segment
        .rsplit_once('.')
        .is_some_and(|(_, ext)| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Returns true if some accepted entry is an image type.
///
/// Here `image/*` is the pattern and each entry is the candidate, the
/// reverse of [`accepts`]: `image/webp` and a literal `image/*` both count.
/// `*/*` is skipped as it is in [`accepts`].
fn accepts_image(accepted_types: &[String]) -> bool {
    let Ok(pattern) = Pattern::new(IMAGE_GLOB) else {
        return false;
    };

    accepted_types
        .iter()
        .filter(|accepted| accepted.as_str() != "*/*")
        .any(|accepted| pattern.matches(accepted))
}

/// Returns true if any accepted type names `mime`.
///
/// An accepted entry matches when it equals `mime` or, read as a shell glob,
/// matches it. A bare `*/*` never counts, so a browser that accepts anything
/// does not look like a client asking for JSON or images.
///
/// # Examples
///
/// ```
/// use dot404::accepts;
///
/// let wildcard = vec!["*/*".to_string()];
/// assert!(!accepts(&wildcard, "image/*"));
///
/// let images = vec!["image/*".to_string()];
/// assert!(accepts(&images, "image/png"));
/// ```
pub fn accepts(accepted_types: &[String], mime: &str) -> bool {
    accepted_types
        .iter()
        .filter(|accepted| accepted.as_str() != "*/*")
        .any(|accepted| {
            accepted == mime
                || Pattern::new(accepted)
                    .map(|pattern| pattern.matches(mime))
                    .unwrap_or(false)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn respond(ctx: &RequestContext) -> Response {
        respond_with(ctx, &FilterConfig::default())
    }

    fn respond_with(ctx: &RequestContext, config: &FilterConfig) -> Response {
        match negotiate(Outcome::DottedSlug, ctx, config) {
            Decision::Respond(response) => response,
            Decision::Defer => panic!("slug outcomes always respond"),
        }
    }

    #[test]
    fn wildcard_never_matches() {
        assert!(!accepts(&types(&["*/*"]), "image/*"));
        assert!(!accepts(&types(&["*/*"]), "application/json"));
    }

    #[test]
    fn glob_direction_is_pattern_then_candidate() {
        assert!(accepts(&types(&["image/*"]), "image/png"));
        // image/png is not a pattern that matches the literal "image/*"
        assert!(!accepts(&types(&["image/png"]), "image/*"));
    }

    #[test]
    fn exact_match_counts() {
        assert!(accepts(&types(&["text/html", "application/json"]), "application/json"));
        assert!(!accepts(&types(&["text/html"]), "application/json"));
    }

    #[test]
    fn image_entries_match_the_image_glob() {
        assert!(accepts_image(&types(&["image/webp"])));
        assert!(accepts_image(&types(&["text/html", "image/avif"])));
        assert!(accepts_image(&types(&["image/*"])));
        assert!(!accepts_image(&types(&["*/*"])));
        assert!(!accepts_image(&types(&["text/html", "application/xhtml+xml"])));
    }

    #[test]
    fn broken_glob_entries_are_ignored() {
        assert!(!accepts(&types(&["image/[png"]), "image/png"));
    }

    #[test]
    fn non_terminal_outcomes_defer() {
        let ctx = RequestContext::new().with_path("/x");
        let config = FilterConfig::default();
        for outcome in [Outcome::Homepage, Outcome::ReservedSitemapPath, Outcome::NoMatch] {
            assert!(negotiate(outcome, &ctx, &config).is_defer());
        }
    }

    #[test]
    fn probe_is_forbidden_regardless_of_accept() {
        let ctx = RequestContext::new()
            .with_path("/x.php")
            .with_accept("application/json")
            .with_requested_with("XMLHttpRequest");
        let decision = negotiate(Outcome::SuspiciousProbe, &ctx, &FilterConfig::default());
        assert_eq!(decision, Decision::Respond(Response::forbidden()));
    }

    #[test]
    fn ajax_prefers_json_then_xml_then_text() {
        let base = RequestContext::new()
            .with_path("/foo.bar")
            .with_requested_with("XMLHttpRequest");

        let json = respond(&base.clone().with_accept("text/plain, application/json"));
        assert_eq!(json.content_type(), "application/json");
        assert_eq!(json.body(), JSON_NOT_FOUND.as_bytes());

        let xml = respond(&base.clone().with_accept("text/plain, application/xml"));
        assert_eq!(xml.content_type(), "application/xml");
        assert_eq!(xml.body(), XML_NOT_FOUND.as_bytes());

        let text = respond(&base.clone().with_accept("text/plain"));
        assert_eq!(text.content_type(), "text/plain");
        assert_eq!(text.body(), b"Post not found");
    }

    #[test]
    fn ajax_without_known_type_gets_html_not_pixel() {
        let ctx = RequestContext::new()
            .with_path("/favicon.ico")
            .with_accept("image/*, */*")
            .with_requested_with("XMLHttpRequest");
        let resp = respond(&ctx);
        assert_eq!(resp.content_type(), "text/html");
        assert_eq!(resp.body(), HTML_NOT_FOUND.as_bytes());
    }

    #[test]
    fn ajax_with_wildcard_only_gets_html() {
        let ctx = RequestContext::new()
            .with_path("/foo.bar")
            .with_accept("*/*")
            .with_requested_with("XMLHttpRequest");
        assert_eq!(respond(&ctx).content_type(), "text/html");
    }

    #[test]
    fn favicon_gets_pixel() {
        let ctx = RequestContext::new().with_path("/favicon.ico");
        let resp = respond(&ctx);
        assert_eq!(resp.content_type(), "image/png");
        assert_eq!(resp.body(), PIXEL_PNG);
    }

    #[test]
    fn nested_favicon_gets_pixel() {
        let ctx = RequestContext::new().with_path("/theme/favicon.ico");
        assert_eq!(respond(&ctx).content_type(), "image/png");
    }

    #[test]
    fn image_extensions_are_case_insensitive() {
        for path in ["/a.jpg", "/b/c.JPEG", "/d.Png", "/e.gif", "/f.webp", "/g.bmp", "/h.ICO"] {
            let ctx = RequestContext::new().with_path(path);
            assert_eq!(respond(&ctx).content_type(), "image/png", "{path}");
        }
    }

    #[test]
    fn image_accept_gets_pixel() {
        let ctx = RequestContext::new()
            .with_path("/foo.bar")
            .with_accept("image/avif,image/webp,*/*");
        assert_eq!(respond(&ctx).content_type(), "image/png");
    }

    #[test]
    fn single_concrete_image_accept_gets_pixel() {
        let ctx = RequestContext::new()
            .with_path("/post/missing.thing")
            .with_accept("image/webp");
        assert_eq!(respond(&ctx).content_type(), "image/png");
    }

    #[test]
    fn wildcard_accept_does_not_get_pixel() {
        let ctx = RequestContext::new().with_path("/foo.bar").with_accept("*/*");
        assert_eq!(respond(&ctx).content_type(), "text/html");
    }

    #[test]
    fn extension_must_be_final() {
        let ctx = RequestContext::new().with_path("/photo.jpg.html");
        assert_eq!(respond(&ctx).content_type(), "text/html");
    }

    #[test]
    fn robots_is_opt_in() {
        let ctx = RequestContext::new().with_path("/robots.txt");
        assert_eq!(respond(&ctx).content_type(), "text/html");

        let config = FilterConfig {
            serve_robots_txt: true,
            ..FilterConfig::default()
        };
        let resp = respond_with(&ctx, &config);
        assert_eq!(resp.content_type(), "text/plain");
        assert_eq!(resp.body(), ROBOTS_ALLOW_ALL.as_bytes());
    }

    #[test]
    fn default_is_html() {
        let ctx = RequestContext::new()
            .with_path("/foo.bar")
            .with_accept("text/html,application/xhtml+xml,*/*;q=0.8");
        let resp = respond(&ctx);
        assert_eq!(resp.status(), http::StatusCode::NOT_FOUND);
        assert_eq!(resp.content_type(), "text/html");
        assert_eq!(resp.body(), b"<h1>404</h1><p>Post not found</p>");
    }
}
