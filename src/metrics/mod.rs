use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters accumulated by the mediator while it runs.
#[derive(Debug, Default, Clone)]
pub struct CockpitMetrics {
    messages_routed: u64,
    unknown_tags: u64,
    update_passes: u64,
    screens_updated: u64,
    alerts_shown: u64,
}

impl CockpitMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_message(&mut self) {
        self.messages_routed = self.messages_routed.saturating_add(1);
    }

    pub fn record_unknown_tag(&mut self) {
        self.unknown_tags = self.unknown_tags.saturating_add(1);
    }

    pub fn record_pass(&mut self, screens_updated: usize) {
        self.update_passes = self.update_passes.saturating_add(1);
        self.screens_updated = self
            .screens_updated
            .saturating_add(screens_updated as u64);
    }

    pub fn record_alert(&mut self) {
        self.alerts_shown = self.alerts_shown.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            messages_routed: self.messages_routed,
            unknown_tags: self.unknown_tags,
            update_passes: self.update_passes,
            screens_updated: self.screens_updated,
            alerts_shown: self.alerts_shown,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub messages_routed: u64,
    pub unknown_tags: u64,
    pub update_passes: u64,
    pub screens_updated: u64,
    pub alerts_shown: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        let mut fields = LogFields::new();
        fields.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        fields.insert("messages_routed".to_string(), json!(self.messages_routed));
        fields.insert("unknown_tags".to_string(), json!(self.unknown_tags));
        fields.insert("update_passes".to_string(), json!(self.update_passes));
        fields.insert("screens_updated".to_string(), json!(self.screens_updated));
        fields.insert("alerts_shown".to_string(), json!(self.alerts_shown));
        LogEvent::with_fields(LogLevel::Info, target, "cockpit_metrics", fields)
    }
}
