use std::time::Duration;

use super::screens::ScreenId;

/// Tick period the host loop should schedule update passes at.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 30);

/// One-shot request to present a screen on the next scheduled pass.
///
/// `context`, when set, is shown first so the dependent screen comes up
/// against the right surroundings (the plot screen wants the main view
/// current before it appears).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowRequest {
    pub screen: ScreenId,
    pub context: Option<ScreenId>,
}

impl ShowRequest {
    pub fn new(screen: ScreenId) -> Self {
        Self {
            screen,
            context: None,
        }
    }

    pub fn with_context(mut self, context: ScreenId) -> Self {
        self.context = Some(context);
        self
    }
}

/// Coalescing pass scheduler: Idle until any producer requests a refresh,
/// Pending until the next tick performs exactly one pass. Multiple requests
/// between ticks collapse into that one pass.
///
/// The scheduler never owns a timer; the host loop calls into it every
/// `DEFAULT_TICK_INTERVAL` (or its configured override) and must reschedule
/// unconditionally, whatever state it finds here.
#[derive(Debug, Default)]
pub struct UpdateScheduler {
    pending: bool,
    show_queue: Vec<ShowRequest>,
}

impl UpdateScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idle → Pending. Safe to call any number of times between ticks.
    pub fn request_update(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Queue a one-shot show, consumed by the pass that observes it. Also
    /// arms the scheduler so the show is serviced on the next tick.
    pub fn request_show(&mut self, request: ShowRequest) {
        self.show_queue.push(request);
        self.pending = true;
    }

    /// Tick entry: `Some(queued shows)` exactly when a pass must run, after
    /// which the scheduler is Idle again. `None` means stay idle (and the
    /// host still reschedules the next tick).
    pub fn take_pass(&mut self) -> Option<Vec<ShowRequest>> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        Some(std::mem::take(&mut self.show_queue))
    }

    /// Forced-pass entry: clears the flag as if a tick had fired, but leaves
    /// queued one-shot shows for the next scheduled pass.
    pub fn clear_pending(&mut self) {
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_coalesce_into_one_pass() {
        let mut scheduler = UpdateScheduler::new();
        for _ in 0..5 {
            scheduler.request_update();
        }
        assert!(scheduler.take_pass().is_some());
        assert!(scheduler.take_pass().is_none());
    }

    #[test]
    fn idle_tick_stays_idle() {
        let mut scheduler = UpdateScheduler::new();
        assert!(scheduler.take_pass().is_none());
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn show_request_arms_and_drains_in_order() {
        let mut scheduler = UpdateScheduler::new();
        scheduler.request_show(ShowRequest::new(ScreenId::Plot).with_context(ScreenId::Main));
        scheduler.request_show(ShowRequest::new(ScreenId::Mesh));

        let shows = scheduler.take_pass().expect("pass armed by show request");
        assert_eq!(
            shows,
            vec![
                ShowRequest::new(ScreenId::Plot).with_context(ScreenId::Main),
                ShowRequest::new(ScreenId::Mesh),
            ]
        );

        // Consumed; a later pass does not replay them.
        scheduler.request_update();
        assert_eq!(scheduler.take_pass(), Some(Vec::new()));
    }

    #[test]
    fn clear_pending_leaves_show_queue() {
        let mut scheduler = UpdateScheduler::new();
        scheduler.request_show(ShowRequest::new(ScreenId::Plot));
        scheduler.clear_pending();
        assert!(!scheduler.is_pending());

        scheduler.request_update();
        let shows = scheduler.take_pass().unwrap();
        assert_eq!(shows.len(), 1);
    }
}
