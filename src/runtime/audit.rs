//! Mediator lifecycle audit hooks.
//!
//! Lightweight instrumentation so callers can observe the major transitions
//! of the mediator without contorting its core paths. Records carry a stage
//! identifier plus structured metadata; sinks can log, buffer, or visualize
//! them.

use std::time::SystemTime;

use serde_json::Value;

/// Distinct lifecycle checkpoints emitted by the mediator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditStage {
    /// Mediator construction finished; every screen is installed.
    HubConstructed,
    /// One screen instance was built and installed.
    ScreenInstalled,
    /// A message finished routing (known tag or not).
    MessageDispatched,
    /// An update pass ran to completion.
    PassCompleted,
    /// A modal alert was presented.
    AlertRaised,
    /// The mediator released its screens.
    HubShutdown,
}

/// Structured audit entry.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub timestamp: SystemTime,
    pub stage: AuditStage,
    pub details: Vec<(String, Value)>,
}

impl AuditEvent {
    fn new(stage: AuditStage) -> Self {
        Self {
            timestamp: SystemTime::now(),
            stage,
            details: Vec::new(),
        }
    }
}

/// Builder helper to append fields ergonomically.
pub struct AuditEventBuilder {
    event: AuditEvent,
}

impl AuditEventBuilder {
    pub fn new(stage: AuditStage) -> Self {
        Self {
            event: AuditEvent::new(stage),
        }
    }

    pub fn detail(mut self, key: impl Into<String>, value: Value) -> Self {
        self.event.details.push((key.into(), value));
        self
    }

    pub fn finish(self) -> AuditEvent {
        self.event
    }
}

/// Trait implemented by any audit sink.
pub trait CockpitAudit: Send + Sync {
    fn record(&self, event: AuditEvent);
}

/// Default no-op implementation used when auditing is disabled.
#[derive(Debug, Default)]
pub struct NullCockpitAudit;

impl CockpitAudit for NullCockpitAudit {
    fn record(&self, _event: AuditEvent) {}
}
