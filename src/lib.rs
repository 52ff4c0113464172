//! Screen-management mediator for a terminal engineering workbench.
//!
//! The cockpit owns one instance of every screen kind, coalesces refresh
//! requests into periodic update passes, routes tagged notifications from
//! background workers to subscriber screens, fronts the file chooser behind
//! a persisted backend preference, and intercepts the global Escape key to
//! clear the active selection.
//!
//! The host toolkit keeps its own event loop; it feeds key events into
//! [`Cockpit::handle_key`] and calls [`Cockpit::on_tick`] at
//! `CockpitConfig::tick_interval`. Everything runs on that one thread —
//! background producers hand their notifications over through
//! [`Cockpit::postbox`].

pub mod console;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod prefs;
pub mod runtime;
pub mod shell;
pub mod width;

pub use console::ConsoleBuffer;
pub use error::{CockpitError, Result};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{CockpitMetrics, MetricSnapshot};
pub use model::ModelHub;
pub use prefs::{ChooserBackend, FilePreferences, MemoryPreferences, Preferences};
pub use runtime::audit::{
    AuditEvent, AuditEventBuilder, AuditStage, CockpitAudit, NullCockpitAudit,
};
pub use runtime::chooser::{ChooseRequest, ChooserMode, FileFilter, PickerScreen};
pub use runtime::diagnostics::KeyTraceHandler;
pub use runtime::interceptor::EscapeInterceptor;
pub use runtime::postbox::Postbox;
pub use runtime::router::{Message, MessageRouter, Route, tags};
pub use runtime::scheduler::{DEFAULT_TICK_INTERVAL, ShowRequest, UpdateScheduler};
pub use runtime::screens::{
    OutputChannel, Screen, ScreenDefinition, ScreenFactory, ScreenId, ScreenRegistry,
};
pub use runtime::{
    Cockpit, CockpitConfig, CockpitEvent, EventFlow, InputContext, InputHandler,
};
pub use shell::PlatformShell;
pub use width::display_width;
