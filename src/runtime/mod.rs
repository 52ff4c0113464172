use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyModifiers};
use serde_json::json;

use crate::error::Result;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::CockpitMetrics;
use crate::model::ModelHub;
use crate::prefs::{ChooserBackend, Preferences};
use crate::shell::PlatformShell;

pub mod audit;
pub mod chooser;
pub mod diagnostics;
pub mod interceptor;
pub mod postbox;
pub mod router;
pub mod scheduler;
pub mod screens;

use audit::{AuditEvent, AuditEventBuilder, AuditStage, CockpitAudit};
use chooser::{ChooseRequest, ChooserMode};
use interceptor::EscapeInterceptor;
use postbox::{Envelope, Postbox};
use router::{Message, MessageRouter, Route};
use scheduler::{DEFAULT_TICK_INTERVAL, ShowRequest, UpdateScheduler};
use screens::{ScreenDefinition, ScreenId, ScreenRegistry};

/// Configuration knobs for the mediator.
#[derive(Clone)]
pub struct CockpitConfig {
    /// Cadence the host loop should call `on_tick` at.
    pub tick_interval: Duration,
    /// Optional structured logger.
    pub logger: Option<Logger>,
    /// Metrics accumulator used for periodic snapshots.
    pub metrics: Option<Arc<Mutex<CockpitMetrics>>>,
    /// Interval between metrics snapshot emissions. Zero disables snapshots.
    pub metrics_interval: Duration,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
    /// Optional lifecycle audit sink.
    pub audit: Option<Arc<dyn CockpitAudit>>,
    /// The one screen updated every pass whether or not it is shown.
    pub always_update: ScreenId,
}

impl Default for CockpitConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            logger: None,
            metrics: None,
            metrics_interval: Duration::from_secs(5),
            metrics_target: "cockpit::metrics".to_string(),
            audit: None,
            always_update: ScreenId::ModelBrowser,
        }
    }
}

impl CockpitConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(CockpitMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<CockpitMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Control the propagation of a key event across handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlow {
    Continue,
    Consumed,
}

/// Context passed to input handlers so they can reach the model and queue
/// messages without touching the mediator directly. Queued messages are
/// dispatched after the handler returns.
pub struct InputContext<'a> {
    model: &'a dyn ModelHub,
    posted: Vec<Message>,
}

impl<'a> InputContext<'a> {
    pub fn new(model: &'a dyn ModelHub) -> Self {
        Self {
            model,
            posted: Vec::new(),
        }
    }

    pub fn model(&self) -> &dyn ModelHub {
        self.model
    }

    /// Queue a message for dispatch once the handler completes.
    pub fn post(&mut self, message: Message) {
        self.posted.push(message);
    }

    pub fn into_posted(self) -> Vec<Message> {
        self.posted
    }
}

/// Behaviour injection point for key events. Handlers run in installation
/// order; the first to return [`EventFlow::Consumed`] stops the walk.
pub trait InputHandler {
    fn name(&self) -> &str {
        "cockpit_handler"
    }

    fn on_key(&mut self, ctx: &mut InputContext<'_>, key: &KeyEvent) -> Result<EventFlow>;
}

/// Scripted input for tests, benches, and replay tooling.
#[derive(Debug, Clone)]
pub enum CockpitEvent {
    Tick,
    Key(KeyEvent),
    Message(Message),
}

/// The screen-management mediator.
///
/// Owns one instance of every screen kind, coalesces refresh requests into
/// periodic update passes, routes tagged notifications to subscriber
/// screens, fronts the file chooser, and intercepts the global Escape key.
/// Single-threaded by contract: every method runs on the host UI thread;
/// background producers reach it only through [`Cockpit::postbox`].
pub struct Cockpit {
    registry: ScreenRegistry,
    scheduler: UpdateScheduler,
    router: MessageRouter,
    handlers: Vec<Box<dyn InputHandler>>,
    model: Arc<dyn ModelHub>,
    shell: Box<dyn PlatformShell>,
    prefs: Arc<dyn Preferences>,
    postbox_tx: Sender<Envelope>,
    postbox_rx: Receiver<Envelope>,
    modifiers: KeyModifiers,
    config: CockpitConfig,
    started_at: Instant,
    last_metrics_emit: Option<Instant>,
}

impl std::fmt::Debug for Cockpit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cockpit")
            .field("installed", &self.registry.installed())
            .finish_non_exhaustive()
    }
}

impl Cockpit {
    /// Build the mediator: construct and install every screen, wire the
    /// default routing table, and install the Escape interceptor at the head
    /// of the handler chain. Fails fast on a doubled or missing screen kind.
    ///
    /// The main view and the model browser come up shown, as the workbench
    /// presents them from the first frame.
    pub fn new(
        definitions: &[ScreenDefinition],
        model: Arc<dyn ModelHub>,
        shell: Box<dyn PlatformShell>,
        prefs: Arc<dyn Preferences>,
    ) -> Result<Self> {
        let (postbox_tx, postbox_rx) = channel();
        let mut cockpit = Self {
            registry: ScreenRegistry::new(),
            scheduler: UpdateScheduler::new(),
            router: MessageRouter::with_default_routes(),
            handlers: vec![Box::new(EscapeInterceptor)],
            model,
            shell,
            prefs,
            postbox_tx,
            postbox_rx,
            modifiers: KeyModifiers::NONE,
            config: CockpitConfig::default(),
            started_at: Instant::now(),
            last_metrics_emit: None,
        };

        for definition in definitions {
            cockpit.registry.install(definition)?;
            cockpit.record_audit(
                AuditEventBuilder::new(AuditStage::ScreenInstalled)
                    .detail("screen", json!(format!("{:?}", definition.id)))
                    .detail("title", json!(definition.title.clone()))
                    .finish(),
            );
        }
        cockpit.registry.validate()?;

        cockpit.show_screen(ScreenId::Main);
        cockpit.show_screen(ScreenId::ModelBrowser);

        cockpit.record_audit(
            AuditEventBuilder::new(AuditStage::HubConstructed)
                .detail("screens", json!(cockpit.registry.installed()))
                .finish(),
        );
        cockpit.log_hub_event(
            LogLevel::Info,
            "hub_started",
            [json_kv("screens", json!(cockpit.registry.installed()))],
        );

        Ok(cockpit)
    }

    pub fn config_mut(&mut self) -> &mut CockpitConfig {
        &mut self.config
    }

    /// Append a handler behind the Escape interceptor.
    pub fn add_handler<H>(&mut self, handler: H)
    where
        H: InputHandler + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    /// Clone-able, `Send` handle for background producers.
    pub fn postbox(&self) -> Postbox {
        Postbox::new(self.postbox_tx.clone())
    }

    /// Show a screen. Idempotent; a vacant slot is silently ignored.
    pub fn show_screen(&mut self, id: ScreenId) {
        if let Some(screen) = self.registry.try_screen_mut(id) {
            screen.show();
        }
    }

    /// Hide a screen. Idempotent; a vacant slot is silently ignored.
    pub fn hide_screen(&mut self, id: ScreenId) {
        if let Some(screen) = self.registry.try_screen_mut(id) {
            screen.hide();
        }
    }

    pub fn is_screen_shown(&self, id: ScreenId) -> bool {
        self.registry.is_shown(id)
    }

    /// Arm the scheduler: the next tick runs one update pass, however many
    /// times this is called before then.
    pub fn request_update(&mut self) {
        self.scheduler.request_update();
    }

    /// Queue a one-shot show serviced by the next scheduled pass.
    pub fn request_show_once(&mut self, request: ShowRequest) {
        self.scheduler.request_show(request);
    }

    /// Run a pass right now, bypassing the Pending/Idle check. Queued
    /// one-shot shows stay queued for the next scheduled pass.
    pub fn force_update(&mut self) {
        self.scheduler.clear_pending();
        self.update_pass();
    }

    /// Periodic tick entry. The host loop must call this at
    /// `config.tick_interval` and reschedule unconditionally — an idle tick
    /// is cheap and keeps the scheduler alive.
    pub fn on_tick(&mut self) {
        self.drain_postbox();

        if let Some(shows) = self.scheduler.take_pass() {
            for request in shows {
                if let Some(context) = request.context {
                    self.show_screen(context);
                }
                self.show_screen(request.screen);
            }
            self.update_pass();
        }

        self.maybe_emit_metrics();
    }

    /// Sole ingress for tagged notifications. Unknown tags are dropped by
    /// design; fan-out targets with vacant slots are skipped.
    pub fn dispatch(&mut self, message: Message) {
        let routes: Vec<Route> = self.router.routes(&message.tag).to_vec();

        if routes.is_empty() {
            self.record_unknown_tag_metric();
            self.log_hub_event(
                LogLevel::Debug,
                "unknown_tag_dropped",
                [json_kv("tag", json!(message.tag.clone()))],
            );
            return;
        }

        for route in &routes {
            match *route {
                Route::RequestUpdate => self.scheduler.request_update(),
                Route::Console { screen, channel } => {
                    if let Some(target) = self.registry.try_screen_mut(screen) {
                        for line in &message.lines {
                            target.append_output(channel, line);
                        }
                    }
                }
                Route::Alert => {
                    if let Some(first) = message.lines.first() {
                        self.present_alert(first);
                    }
                }
                Route::CollisionProbe => {
                    let alt_held = self.modifiers.contains(KeyModifiers::ALT);
                    self.model.set_collision_detection(alt_held);
                }
            }
        }

        self.record_message_metric();
        self.record_audit(
            AuditEventBuilder::new(AuditStage::MessageDispatched)
                .detail("tag", json!(message.tag.clone()))
                .detail("routes", json!(routes.len()))
                .finish(),
        );
    }

    /// Walk the handler chain with a key event. The modifier set travels
    /// with every event and is remembered for the collision probe.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<EventFlow> {
        self.modifiers = key.modifiers;
        let model = Arc::clone(&self.model);

        let mut handlers = std::mem::take(&mut self.handlers);
        let mut outcome = Ok(EventFlow::Continue);
        for handler in handlers.iter_mut() {
            let mut ctx = InputContext::new(model.as_ref());
            let flow = match handler.on_key(&mut ctx, &key) {
                Ok(flow) => flow,
                Err(err) => {
                    outcome = Err(err);
                    break;
                }
            };
            for message in ctx.into_posted() {
                self.dispatch(message);
            }
            if flow == EventFlow::Consumed {
                outcome = Ok(EventFlow::Consumed);
                break;
            }
        }
        self.handlers = handlers;
        outcome
    }

    /// Chooser facade. Reads the persisted backend preference on every call,
    /// delegates to the in-app picker screen or the platform dialog, and
    /// applies extension enforcement for unambiguous Save filters. Failure
    /// and cancellation both come back as `None`; the failure leg leaves its
    /// reason on the diagnostic log.
    pub fn choose_file(&mut self, request: ChooseRequest) -> Option<PathBuf> {
        let backend = self.prefs.chooser_backend();
        let picked = match backend {
            ChooserBackend::Workbench => {
                let choice = self
                    .registry
                    .try_screen_mut(ScreenId::FilePicker)
                    .and_then(|screen| screen.as_picker())
                    .map(|picker| picker.choose(&request));
                match choice {
                    Some(path) => path,
                    None => {
                        self.log_chooser_event(
                            LogLevel::Warn,
                            "picker_screen_unavailable",
                            [json_kv("title", json!(request.title.clone()))],
                        );
                        None
                    }
                }
            }
            ChooserBackend::Native => match self.shell.choose(&request) {
                Ok(path) => path,
                Err(text) => {
                    self.log_chooser_event(
                        LogLevel::Warn,
                        "native_chooser_failed",
                        [json_kv("error", json!(text))],
                    );
                    None
                }
            },
        };

        picked.map(|path| {
            if request.mode == ChooserMode::Save && !request.filter.is_multi() {
                request.filter.enforce_extension(path)
            } else {
                path
            }
        })
    }

    /// Marshaled pop-up: queued through the postbox and presented when the
    /// mediator next drains it, so this is safe to expose to code that does
    /// not know which thread it runs on.
    pub fn alert(&mut self, text: impl Into<String>) {
        let _ = self.postbox_tx.send(Envelope::Alert(text.into()));
    }

    /// The single selected model item, if the selection holds exactly one.
    pub fn solo_selection(&self) -> Option<String> {
        let selection = self.model.selection();
        if selection.len() == 1 {
            selection.into_iter().next()
        } else {
            None
        }
    }

    /// Apply a scripted event sequence. Test and bench entry; replays are
    /// deterministic because everything runs on the calling thread.
    pub fn run_scripted<I>(&mut self, events: I) -> Result<()>
    where
        I: IntoIterator<Item = CockpitEvent>,
    {
        for event in events {
            match event {
                CockpitEvent::Tick => self.on_tick(),
                CockpitEvent::Key(key) => {
                    self.handle_key(key)?;
                }
                CockpitEvent::Message(message) => self.dispatch(message),
            }
        }
        Ok(())
    }

    /// Defined teardown: release every owned screen. Strict registry fetches
    /// panic afterwards; tolerant paths become no-ops.
    pub fn shutdown(&mut self) {
        self.registry.shutdown();
        self.record_audit(AuditEventBuilder::new(AuditStage::HubShutdown).finish());
        self.log_hub_event(
            LogLevel::Info,
            "hub_shutdown",
            [json_kv(
                "uptime_ms",
                json!(self.started_at.elapsed().as_millis() as u64),
            )],
        );
    }

    fn update_pass(&mut self) {
        let model = Arc::clone(&self.model);
        let always = self.config.always_update;
        let mut updated = 0usize;

        for id in ScreenId::ALL {
            if let Some(screen) = self.registry.try_screen_mut(id) {
                if screen.is_shown() || id == always {
                    screen.update(model.as_ref());
                    updated += 1;
                }
            }
        }

        self.record_pass_metric(updated);
        self.record_audit(
            AuditEventBuilder::new(AuditStage::PassCompleted)
                .detail("screens_updated", json!(updated))
                .finish(),
        );
        self.log_hub_event(
            LogLevel::Debug,
            "update_pass",
            [json_kv("screens_updated", json!(updated))],
        );
    }

    fn drain_postbox(&mut self) {
        let mut drained = Vec::new();
        while let Ok(envelope) = self.postbox_rx.try_recv() {
            drained.push(envelope);
        }
        for envelope in drained {
            match envelope {
                Envelope::Message(message) => self.dispatch(message),
                Envelope::Alert(text) => self.present_alert(&text),
            }
        }
    }

    fn present_alert(&mut self, text: &str) {
        self.shell.alert(text);
        self.record_alert_metric();
        self.record_audit(AuditEventBuilder::new(AuditStage::AlertRaised).finish());
        self.log_hub_event(LogLevel::Info, "alert_presented", std::iter::empty());
    }

    fn record_audit(&self, event: AuditEvent) {
        if let Some(audit) = self.config.audit.as_ref() {
            audit.record(event);
        }
    }

    fn log_hub_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, "cockpit::hub", message, fields);
            let _ = logger.log_event(event);
        }
    }

    fn log_chooser_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, "cockpit::chooser", message, fields);
            let _ = logger.log_event(event);
        }
    }

    fn record_message_metric(&mut self) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_message();
            }
        }
    }

    fn record_unknown_tag_metric(&mut self) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_unknown_tag();
            }
        }
    }

    fn record_pass_metric(&mut self, updated: usize) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_pass(updated);
            }
        }
    }

    fn record_alert_metric(&mut self) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_alert();
            }
        }
    }

    fn maybe_emit_metrics(&mut self) {
        if self.config.metrics.is_none()
            || self.config.metrics_interval == Duration::from_millis(0)
        {
            return;
        }

        let now = Instant::now();
        match self.last_metrics_emit {
            Some(last) if now.duration_since(last) < self.config.metrics_interval => return,
            _ => self.last_metrics_emit = Some(now),
        }

        let uptime = now.duration_since(self.started_at);
        if let (Some(logger), Some(metrics)) =
            (self.config.logger.as_ref(), self.config.metrics.as_ref())
        {
            if let Ok(guard) = metrics.lock() {
                let event = guard.snapshot(uptime).to_log_event(&self.config.metrics_target);
                let _ = logger.log_event(event);
            }
        }
    }
}
