use crate::{
    audit::{self, AuditEvent, AuditRule, AuditTrail},
    classify::{classify, Outcome},
    config::{FilterConfig, SitemapScope},
    error::Error,
    negotiate::negotiate,
    request::RequestContext,
    response::Decision,
    sitemap::ReservedPaths,
};

/// The not-found filter.
///
/// Holds the configuration and the compiled reserved-path table. A `Filter`
/// is immutable once built and can be shared between requests and threads;
/// every request brings its own [`RequestContext`].
///
/// # Examples
///
/// ```
/// use dot404::{Decision, Filter, RequestContext};
///
/// let filter = Filter::builder()
///     .disallow_non_ascii_slug()
///     .build()
///     .expect("built-in patterns compile");
///
/// let ctx = RequestContext::new().with_path("/caf%C3%A9");
/// let decision = filter.handle(&ctx);
/// assert_eq!(decision.response().map(|r| r.status().as_u16()), Some(404));
///
/// let ctx = RequestContext::new().with_path("/");
/// assert_eq!(filter.handle(&ctx), Decision::Defer);
/// ```
#[derive(Debug, Clone)]
pub struct Filter {
    config: FilterConfig,
    reserved: ReservedPaths,
}

impl Filter {
    /// Builds a filter with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` if the reserved-path table fails to
    /// compile.
    pub fn new() -> Result<Self, Error> {
        Self::builder().build()
    }

    /// Starts a builder with the default configuration.
    pub fn builder() -> FilterBuilder {
        FilterBuilder::new()
    }

    /// Returns the configuration this filter was built with.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Classifies the request without producing a response.
    pub fn classify(&self, ctx: &RequestContext) -> Outcome {
        classify(ctx, &self.reserved, &self.config)
    }

    /// Classifies the request and, for terminal outcomes, picks a response.
    ///
    /// Probes are logged under the `dot404_audit` target before the 403 is
    /// returned.
    pub fn handle(&self, ctx: &RequestContext) -> Decision {
        self.decide(ctx, |event| audit::emit(&event))
    }

    /// Like [`handle`](Self::handle), but also records probe events to `trail`.
    pub fn handle_with_trail(&self, ctx: &RequestContext, trail: &AuditTrail) -> Decision {
        self.decide(ctx, |event| audit::emit_and_record(event, trail))
    }

    fn decide(&self, ctx: &RequestContext, on_probe: impl FnOnce(AuditEvent)) -> Decision {
        let outcome = self.classify(ctx);

        tracing::debug!(
            outcome = %outcome,
            segments = ctx.segments().len(),
            ajax = ctx.is_ajax(),
            "classified not-found request"
        );

        if outcome == Outcome::SuspiciousProbe {
            on_probe(AuditEvent::from_context(AuditRule::NonexistentPhp, ctx));
        }

        negotiate(outcome, ctx, &self.config)
    }
}

/// Builder for [`Filter`].
///
/// Toggles can be called in any order; the last call for a given switch wins.
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    config: FilterConfig,
    extra_patterns: Vec<String>,
}

impl FilterBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: FilterConfig) -> Self {
        self.config = config;
        self
    }

    /// Stops answering slugs written in non-Latin scripts.
    pub fn allow_non_latin_slug(mut self) -> Self {
        self.config.block_non_latin_slug = false;
        self
    }

    /// Answers slugs written in non-Latin scripts (the default).
    pub fn block_non_latin_slug(mut self) -> Self {
        self.config.block_non_latin_slug = true;
        self
    }

    /// Answers any slug with a character outside `[0-9A-Za-z_-]`.
    pub fn disallow_non_ascii_slug(mut self) -> Self {
        self.config.block_non_ascii_slug = true;
        self
    }

    /// Lets non-ASCII slugs through to the Latin check (the default).
    pub fn allow_non_ascii_slug(mut self) -> Self {
        self.config.block_non_ascii_slug = false;
        self
    }

    /// Enables or disables the permissive `robots.txt` answer.
    pub fn serve_robots_txt(mut self, enabled: bool) -> Self {
        self.config.serve_robots_txt = enabled;
        self
    }

    /// Selects how a sitemap match on the first segment exempts the path.
    pub fn sitemap_scope(mut self, scope: SitemapScope) -> Self {
        self.config.sitemap_scope = scope;
        self
    }

    /// Adds a first-segment pattern the host serves itself, after the
    /// built-in sitemap table. Duplicate patterns are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use dot404::{Filter, Outcome, RequestContext};
    ///
    /// let filter = Filter::builder()
    ///     .reserve_pattern(r"^feed\.atom$")
    ///     .reserve_pattern(r"^feed\.atom$")
    ///     .build()
    ///     .unwrap();
    ///
    /// let ctx = RequestContext::new().with_path("/feed.atom");
    /// assert_eq!(filter.classify(&ctx), Outcome::ReservedSitemapPath);
    /// ```
    pub fn reserve_pattern(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        if !self.extra_patterns.contains(&pattern) {
            self.extra_patterns.push(pattern);
        }
        self
    }

    /// Compiles the reserved-path table and returns the filter.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` naming the first pattern that does not
    /// compile.
    pub fn build(self) -> Result<Filter, Error> {
        let reserved = ReservedPaths::compile(&self.extra_patterns)?;

        tracing::debug!(
            patterns = reserved.len(),
            block_non_latin_slug = self.config.block_non_latin_slug,
            block_non_ascii_slug = self.config.block_non_ascii_slug,
            "built not-found filter"
        );

        Ok(Filter {
            config: self.config,
            reserved,
        })
    }
}
