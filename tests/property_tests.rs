//! Property tests for dot404.
//!
//! These tests check classification invariants over generated paths and
//! headers.

use dot404::{accepts, Filter, Outcome, RequestContext};
use proptest::prelude::*;

fn filter() -> Filter {
    Filter::new().unwrap()
}

// Strategy: a plain ASCII slug with no dots
fn arb_plain_slug() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9_-]{1,16}").unwrap()
}

// Strategy: a slug with at least one dot that is not a core sitemap name
fn arb_dotted_slug() -> impl Strategy<Value = String> {
    (arb_plain_slug(), arb_plain_slug())
        .prop_filter("avoid sitemap names", |(stem, _)| !stem.contains("sitemap"))
        .prop_map(|(stem, ext)| format!("{stem}.{ext}"))
}

fn arb_accept() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("text/html"),
            Just("application/json"),
            Just("application/xml"),
            Just("text/plain"),
            Just("image/*"),
            Just("image/png"),
            Just("*/*"),
        ],
        0..5,
    )
    .prop_map(|types| types.join(", "))
}

proptest! {
    /// Property: classification is a pure function of its input
    #[test]
    fn proptest_classify_is_idempotent(
        path in "/[ -~]{0,40}",
        accept in arb_accept(),
        ajax in any::<bool>(),
    ) {
        let mut ctx = RequestContext::new().with_path(&path).with_accept(&accept);
        if ajax {
            ctx = ctx.with_requested_with("XMLHttpRequest");
        }

        let filter = filter();
        prop_assert_eq!(filter.classify(&ctx), filter.classify(&ctx));
        prop_assert_eq!(filter.handle(&ctx), filter.handle(&ctx));
    }

    /// Property: a dot in any non-sitemap segment always yields a 404
    #[test]
    fn proptest_dotted_slugs_respond_404(
        prefix in prop::collection::vec(arb_plain_slug(), 0..3),
        dotted in arb_dotted_slug(),
        accept in arb_accept(),
    ) {
        let mut segments = prefix;
        segments.push(dotted);
        let path = format!("/{}", segments.join("/"));

        let ctx = RequestContext::new().with_path(&path).with_accept(&accept);
        let filter = filter();

        prop_assert_eq!(filter.classify(&ctx), Outcome::DottedSlug);
        let decision = filter.handle(&ctx);
        prop_assert_eq!(decision.response().map(|r| r.status().as_u16()), Some(404));
    }

    /// Property: plain ASCII slugs are never answered
    #[test]
    fn proptest_plain_slugs_defer(
        segments in prop::collection::vec(arb_plain_slug(), 1..4),
    ) {
        let path = format!("/{}", segments.join("/"));
        let ctx = RequestContext::new().with_path(&path);
        prop_assert!(filter().handle(&ctx).is_defer());
    }

    /// Property: a wildcard-only accept list never matches anything
    #[test]
    fn proptest_wildcard_accept_never_matches(
        mime in "[a-z]{1,8}/[a-z*]{1,8}",
        count in 1usize..4,
    ) {
        let accepted = vec!["*/*".to_string(); count];
        prop_assert!(!accepts(&accepted, &mime));
    }

    /// Property: the homepage defers no matter what headers arrive
    #[test]
    fn proptest_homepage_always_defers(
        accept in arb_accept(),
        redirect in prop::option::of("[a-z/]{0,10}\\.php"),
    ) {
        let mut ctx = RequestContext::new().with_path("/").with_accept(&accept);
        if let Some(target) = redirect {
            ctx = ctx.with_redirect_url(target);
        }
        prop_assert_eq!(filter().classify(&ctx), Outcome::Homepage);
        prop_assert!(filter().handle(&ctx).is_defer());
    }
}
