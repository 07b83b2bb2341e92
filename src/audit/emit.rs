//! Emission of audit events through `tracing`.

use super::{AuditEvent, AuditTrail};

/// `tracing` target of every audit event.
pub const AUDIT_TARGET: &str = "dot404_audit";

/// Emits an audit event as a structured `warn` record.
pub fn emit(event: &AuditEvent) {
    tracing::warn!(
        target: AUDIT_TARGET,
        rule = %event.rule(),
        outcome = %event.outcome(),
        path = %event.path(),
        redirect_url = ?event.redirect_url(),
        "Break-in attempt detected"
    );
}

/// Emits an audit event and also records it to `trail`.
pub fn emit_and_record(event: AuditEvent, trail: &AuditTrail) {
    emit(&event);
    trail.record(event);
}
