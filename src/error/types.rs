use thiserror::Error;

use crate::runtime::screens::ScreenId;

/// Unified result type for the cockpit crate.
pub type Result<T> = std::result::Result<T, CockpitError>;

/// Errors surfaced by the screen mediator.
///
/// Misusing the strict registry fetch (`ScreenRegistry::screen_mut` on a
/// vacant slot) is a contract violation and panics instead of returning one
/// of these. Unknown message tags and vacant fan-out targets are not errors
/// at all.
#[derive(Debug, Error)]
pub enum CockpitError {
    #[error("screen {0:?} installed twice")]
    DuplicateScreen(ScreenId),
    #[error("screen {0:?} has no registered definition")]
    MissingScreen(ScreenId),
    #[error("input handler `{0}` failed: {1}")]
    Handler(String, String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
