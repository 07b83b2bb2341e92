//! Per-request-batch record of blocked probes.

use super::{AuditEvent, AuditRule};
use std::cell::RefCell;

/// Collects the probe events a filter emits, oldest first.
///
/// A host that answers many requests on one thread can hand the same trail
/// to every [`Filter::handle_with_trail`](crate::Filter::handle_with_trail)
/// call and periodically [`drain`](Self::drain) it into its own storage.
///
/// # Example
///
/// ```
/// use dot404::audit::{AuditRule, AuditTrail};
/// use dot404::{Filter, RequestContext};
///
/// let filter = Filter::new().unwrap();
/// let trail = AuditTrail::new();
///
/// for path in ["/xmlrpc.php", "/hello-world", "/wp-login.php"] {
///     let ctx = RequestContext::new().with_path(path).with_redirect_url(path);
///     filter.handle_with_trail(&ctx, &trail);
/// }
///
/// assert_eq!(trail.count(AuditRule::NonexistentPhp), 2);
/// assert_eq!(trail.paths(), ["/xmlrpc.php", "/wp-login.php"]);
/// ```
#[derive(Debug, Default)]
pub struct AuditTrail {
    events: RefCell<Vec<AuditEvent>>,
}

impl AuditTrail {
    /// Creates an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn record(&self, event: AuditEvent) {
        self.events.borrow_mut().push(event);
    }

    /// Snapshot of every event so far.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.borrow().clone()
    }

    /// Events produced by `rule`, in recording order.
    pub fn events_for(&self, rule: AuditRule) -> Vec<AuditEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.rule() == rule)
            .cloned()
            .collect()
    }

    /// Number of events produced by `rule`.
    pub fn count(&self, rule: AuditRule) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.rule() == rule)
            .count()
    }

    /// Decoded paths of the blocked requests, in recording order.
    pub fn paths(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .map(|event| event.path().to_owned())
            .collect()
    }

    /// Total number of events.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Returns true if nothing was blocked.
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Removes and returns every event, leaving the trail empty.
    pub fn drain(&self) -> Vec<AuditEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}
