use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Which chooser implementation `Cockpit::choose_file` delegates to.
///
/// Mutated by a preferences surface outside this crate; the mediator only
/// ever reads it, once per chooser invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChooserBackend {
    /// The in-app file-picker screen.
    #[default]
    Workbench,
    /// The platform's native dialog, reached through `PlatformShell`.
    Native,
}

/// Read-side view of the application settings store.
pub trait Preferences: Send + Sync {
    fn chooser_backend(&self) -> ChooserBackend;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefData {
    #[serde(default)]
    file_chooser: ChooserBackend,
}

/// JSON-file settings store. Every read goes back to disk so edits made by
/// the preferences screen (or by hand) take effect on the next invocation.
/// A missing or corrupt file falls back to defaults.
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read(&self) -> PrefData {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }
}

impl Preferences for FilePreferences {
    fn chooser_backend(&self) -> ChooserBackend {
        self.read().file_chooser
    }
}

/// In-memory store for tests and embedders without a settings file.
#[derive(Default)]
pub struct MemoryPreferences {
    backend: RwLock<ChooserBackend>,
}

impl MemoryPreferences {
    pub fn new(backend: ChooserBackend) -> Self {
        Self {
            backend: RwLock::new(backend),
        }
    }

    pub fn set_chooser_backend(&self, backend: ChooserBackend) {
        if let Ok(mut guard) = self.backend.write() {
            *guard = backend;
        }
    }
}

impl Preferences for MemoryPreferences {
    fn chooser_backend(&self) -> ChooserBackend {
        self.backend.read().map(|guard| *guard).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_workbench() {
        let prefs = FilePreferences::new("/nonexistent/cockpit-prefs.json");
        assert_eq!(prefs.chooser_backend(), ChooserBackend::Workbench);
    }

    #[test]
    fn corrupt_file_falls_back_to_workbench() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();
        let prefs = FilePreferences::new(&path);
        assert_eq!(prefs.chooser_backend(), ChooserBackend::Workbench);
    }

    #[test]
    fn file_edits_are_seen_on_next_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"file_chooser":"native"}"#).unwrap();
        let prefs = FilePreferences::new(&path);
        assert_eq!(prefs.chooser_backend(), ChooserBackend::Native);

        fs::write(&path, r#"{"file_chooser":"workbench"}"#).unwrap();
        assert_eq!(prefs.chooser_backend(), ChooserBackend::Workbench);
    }

    #[test]
    fn memory_store_flips_at_runtime() {
        let prefs = MemoryPreferences::new(ChooserBackend::Workbench);
        prefs.set_chooser_backend(ChooserBackend::Native);
        assert_eq!(prefs.chooser_backend(), ChooserBackend::Native);
    }
}
