//! Diagnostic records for blocked break-in attempts.
//!
//! This module provides:
//! - `AuditEvent`: what was blocked and why
//! - `AuditTrail`: in-memory recorder, mostly for tests and embedding hosts
//! - `emit`: structured `tracing` output under the `dot404_audit` target
//!
//! Events carry the decoded path and the rewrite target only. Headers are
//! never recorded.

mod emit;
mod event;
mod trail;

pub use emit::{emit, emit_and_record, AUDIT_TARGET};
pub use event::{AuditEvent, AuditRule};
pub use trail::AuditTrail;
