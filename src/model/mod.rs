/// Read/write seam onto the application model the screens render.
///
/// The concrete model lives outside this crate; the mediator and its screens
/// reach it only through this trait. Implementations are expected to use
/// interior mutability — the mediator holds a shared handle and every call
/// happens on the UI thread.
pub trait ModelHub: Send + Sync {
    /// Identifiers of the currently selected model items.
    fn selection(&self) -> Vec<String>;

    /// Replace the selection wholesale. An empty slice clears it.
    fn set_selection(&self, ids: &[String]);

    /// Toggle drag-collision detection, driven by the
    /// `selection-collision-check` message route.
    fn set_collision_detection(&self, enabled: bool);
}
