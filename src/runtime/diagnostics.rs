use crossterm::event::KeyEvent;
use serde_json::json;

use crate::error::Result;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::runtime::{EventFlow, InputContext, InputHandler};

/// Logs key traffic moving through the handler chain; never consumes.
///
/// Slot it anywhere in the chain to see what reaches that position — after
/// the escape interceptor it shows exactly what the host's own handlers get.
pub struct KeyTraceHandler {
    logger: Logger,
    level: LogLevel,
}

impl KeyTraceHandler {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            level: LogLevel::Debug,
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }
}

impl InputHandler for KeyTraceHandler {
    fn name(&self) -> &str {
        "cockpit::diagnostics.key_trace"
    }

    fn on_key(&mut self, _ctx: &mut InputContext<'_>, key: &KeyEvent) -> Result<EventFlow> {
        let event = event_with_fields(
            self.level,
            "cockpit::diagnostics",
            "event.key",
            [
                json_kv("code", json!(format!("{:?}", key.code))),
                json_kv("modifiers", json!(format!("{:?}", key.modifiers))),
                json_kv("kind", json!(format!("{:?}", key.kind))),
            ],
        );
        let _ = self.logger.log_event(event);
        Ok(EventFlow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::Arc;

    use crate::logging::{LogSink, MemorySink};
    use crate::model::ModelHub;

    #[derive(Default)]
    struct InertModel;

    impl ModelHub for InertModel {
        fn selection(&self) -> Vec<String> {
            Vec::new()
        }

        fn set_selection(&self, _ids: &[String]) {}

        fn set_collision_detection(&self, _enabled: bool) {}
    }

    #[test]
    fn traces_without_consuming() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::from_shared(sink.clone() as Arc<dyn LogSink>);
        let mut handler = KeyTraceHandler::new(logger).with_level(LogLevel::Trace);

        let model = InertModel;
        let mut ctx = InputContext::new(&model);
        let flow = handler
            .on_key(
                &mut ctx,
                &KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL),
            )
            .unwrap();

        assert_eq!(flow, EventFlow::Continue);
        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "event.key");
        assert!(format!("{:?}", events[0].fields).contains("CONTROL"));
    }
}
