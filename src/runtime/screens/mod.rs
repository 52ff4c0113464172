use std::sync::Arc;

use crate::error::{CockpitError, Result};
use crate::model::ModelHub;
use crate::runtime::chooser::PickerScreen;

/// Stable handle identifying one screen kind. The set is fixed at compile
/// time and indexes densely into the registry.
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    /// Primary workbench view; the context screen for one-shot shows.
    Main,
    /// Model browser — the always-updated editing surface.
    ModelBrowser,
    /// Flow solver control screen; carries a dedicated solver console pane.
    Solver,
    /// Coupled aero-structural analysis screen.
    Coupled,
    /// Structural analysis screen.
    Structure,
    /// Structure assembly screen.
    Assembly,
    /// Mesh generation screen.
    Mesh,
    /// Surface intersection screen.
    Intersection,
    /// Solver results plotting screen.
    Plot,
    /// In-app file picker.
    FilePicker,
    /// Preferences editor.
    Preferences,
}

impl ScreenId {
    pub const COUNT: usize = 11;

    pub const ALL: [ScreenId; Self::COUNT] = [
        ScreenId::Main,
        ScreenId::ModelBrowser,
        ScreenId::Solver,
        ScreenId::Coupled,
        ScreenId::Structure,
        ScreenId::Assembly,
        ScreenId::Mesh,
        ScreenId::Intersection,
        ScreenId::Plot,
        ScreenId::FilePicker,
        ScreenId::Preferences,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<ScreenId> {
        Self::ALL.get(index).copied()
    }
}

/// Destination pane for routed console output. Most screens have a single
/// console; the solver screen splits solver output from its primary pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputChannel {
    Primary,
    Solver,
}

/// Uniform capability set the mediator relies on. Concrete screens live in
/// the host application; this crate only ever sees them boxed behind this
/// trait.
pub trait Screen {
    fn name(&self) -> &str;

    fn show(&mut self);

    fn hide(&mut self);

    fn is_shown(&self) -> bool;

    /// Pull current model state and refresh widget contents. Called once per
    /// update pass while shown (or unconditionally for the always-update
    /// screen).
    fn update(&mut self, model: &dyn ModelHub);

    /// Append one line of routed console output. Screens without a console
    /// ignore it.
    fn append_output(&mut self, _channel: OutputChannel, _line: &str) {}

    /// Picker role for the in-app chooser backend. Only the file-picker
    /// screen overrides this.
    fn as_picker(&mut self) -> Option<&mut dyn PickerScreen> {
        None
    }
}

/// Factory responsible for creating a screen instance during registry
/// initialization.
pub type ScreenFactory = Arc<dyn Fn() -> Box<dyn Screen> + Send + Sync>;

/// Declarative screen registration handed to the mediator at construction.
pub struct ScreenDefinition {
    pub id: ScreenId,
    pub title: String,
    pub factory: ScreenFactory,
}

impl ScreenDefinition {
    pub fn new(id: ScreenId, title: impl Into<String>, factory: ScreenFactory) -> Self {
        Self {
            id,
            title: title.into(),
            factory,
        }
    }
}

/// Owns exactly one instance of every screen kind for the mediator lifetime.
pub struct ScreenRegistry {
    slots: Vec<Option<Box<dyn Screen>>>,
}

impl Default for ScreenRegistry {
    fn default() -> Self {
        Self {
            slots: (0..ScreenId::COUNT).map(|_| None).collect(),
        }
    }
}

impl ScreenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct and install the screen for `definition.id`. Installing the
    /// same id twice is an error.
    pub fn install(&mut self, definition: &ScreenDefinition) -> Result<()> {
        let slot = &mut self.slots[definition.id.index()];
        if slot.is_some() {
            return Err(CockpitError::DuplicateScreen(definition.id));
        }
        *slot = Some((definition.factory)());
        Ok(())
    }

    /// Every id must be covered before the mediator goes live.
    pub fn validate(&self) -> Result<()> {
        for id in ScreenId::ALL {
            if self.slots[id.index()].is_none() {
                return Err(CockpitError::MissingScreen(id));
            }
        }
        Ok(())
    }

    /// Strict fetch. A vacant slot is a programming error, not a runtime
    /// condition, and panics.
    pub fn screen_mut(&mut self, id: ScreenId) -> &mut dyn Screen {
        self.slots[id.index()]
            .as_deref_mut()
            .unwrap_or_else(|| panic!("screen registry invariant violated: {id:?} not installed"))
    }

    /// Tolerant fetch used by caller-facing paths and message fan-out, where
    /// a not-yet-constructed target is skipped rather than failed.
    pub fn try_screen_mut(&mut self, id: ScreenId) -> Option<&mut (dyn Screen + '_)> {
        self.slots[id.index()]
            .as_deref_mut()
            .map(|screen| screen as &mut dyn Screen)
    }

    pub fn is_shown(&self, id: ScreenId) -> bool {
        self.slots[id.index()]
            .as_deref()
            .map(|screen| screen.is_shown())
            .unwrap_or(false)
    }

    pub fn installed(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Release every owned instance. The registry is unusable for strict
    /// fetches afterwards.
    pub fn shutdown(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }
}
