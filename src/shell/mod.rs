use std::path::PathBuf;

use crate::runtime::chooser::ChooseRequest;

/// Host-toolkit surface the mediator cannot provide itself: modal alert
/// dialogs and the platform's native file chooser.
///
/// `choose` returns `Ok(None)` on user cancellation and `Err(text)` when the
/// native dialog reports a failure; the mediator logs the text and treats
/// both as an empty result.
pub trait PlatformShell {
    fn alert(&mut self, message: &str);

    fn choose(&mut self, request: &ChooseRequest) -> Result<Option<PathBuf>, String>;
}
