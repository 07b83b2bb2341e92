//! Audit event schema.

use std::fmt;

use crate::classify::Outcome;
use crate::request::RequestContext;

/// The heuristic that produced an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditRule {
    /// The server rewrote the request toward a PHP script that does not exist
    NonexistentPhp,
}

impl AuditRule {
    /// Stable identifier used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            AuditRule::NonexistentPhp => "dot404_nonexistent_php",
        }
    }
}

impl fmt::Display for AuditRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A blocked request, reduced to what is safe and useful to log.
///
/// # Example
///
/// ```
/// use dot404::audit::{AuditEvent, AuditRule};
/// use dot404::{Outcome, RequestContext};
///
/// let ctx = RequestContext::new()
///     .with_path("/wp-content/shell.php")
///     .with_redirect_url("/wp-content/shell.php");
///
/// let event = AuditEvent::from_context(AuditRule::NonexistentPhp, &ctx);
/// assert_eq!(event.outcome(), Outcome::SuspiciousProbe);
/// assert_eq!(event.path(), "/wp-content/shell.php");
/// assert_eq!(event.redirect_url(), Some("/wp-content/shell.php"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    rule: AuditRule,
    outcome: Outcome,
    /// Decoded path rebuilt from segments
    path: String,
    redirect_url: Option<String>,
}

impl AuditEvent {
    /// Creates an event for `rule` describing the request in `ctx`.
    pub fn from_context(rule: AuditRule, ctx: &RequestContext) -> Self {
        Self {
            rule,
            outcome: match rule {
                AuditRule::NonexistentPhp => Outcome::SuspiciousProbe,
            },
            path: format!("/{}", ctx.segments().join("/")),
            redirect_url: ctx.redirect_url().map(str::to_owned),
        }
    }

    /// Returns the rule that fired.
    pub fn rule(&self) -> AuditRule {
        self.rule
    }

    /// Returns the classification outcome the rule maps to.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the decoded request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the rewrite target, if the server supplied one.
    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AuditEvent[rule={}, outcome={}, path={}",
            self.rule, self.outcome, self.path
        )?;

        if let Some(url) = &self.redirect_url {
            write!(f, ", redirect_url={}", url)?;
        }

        write!(f, "]")
    }
}
