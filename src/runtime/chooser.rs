use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooserMode {
    Open,
    Save,
}

/// Glob-style filter with comma-delimited alternatives, e.g. `"*.csv,*.txt"`.
///
/// A multi-alternative filter disables extension enforcement on the chosen
/// path: when the user faced an ambiguous choice, no single extension may be
/// forced onto the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    raw: String,
    patterns: Vec<String>,
}

impl FileFilter {
    pub fn parse(patterns: impl Into<String>) -> Self {
        let raw = patterns.into();
        let patterns = raw
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        Self { raw, patterns }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_multi(&self) -> bool {
        self.patterns.len() > 1
    }

    /// Extension of the first pattern, if it has one (`"*.csv"` → `"csv"`).
    pub fn primary_extension(&self) -> Option<&str> {
        self.patterns
            .first()
            .and_then(|p| p.rsplit_once('.'))
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty() && !ext.contains('*'))
    }

    fn matches_extension(&self, path: &std::path::Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.patterns.iter().any(|p| {
            p.rsplit_once('.')
                .map(|(_, want)| want.eq_ignore_ascii_case(ext))
                .unwrap_or(false)
        })
    }

    /// Append the primary extension when the path carries none of the
    /// filter's extensions. Returns the path untouched for multi-alternative
    /// filters (the caller is expected to gate on `is_multi`, but this is
    /// also safe to call unconditionally).
    pub fn enforce_extension(&self, mut path: PathBuf) -> PathBuf {
        if self.is_multi() || self.matches_extension(&path) {
            return path;
        }
        if let Some(ext) = self.primary_extension() {
            let mut name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            name.push('.');
            name.push_str(ext);
            path.set_file_name(name);
        }
        path
    }
}

/// Everything a chooser backend needs to pose the question.
#[derive(Debug, Clone)]
pub struct ChooseRequest {
    pub title: String,
    pub filter: FileFilter,
    pub mode: ChooserMode,
    pub initial_dir: Option<PathBuf>,
}

impl ChooseRequest {
    pub fn new(title: impl Into<String>, filter: FileFilter, mode: ChooserMode) -> Self {
        Self {
            title: title.into(),
            filter,
            mode,
            initial_dir: None,
        }
    }

    pub fn with_initial_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.initial_dir = Some(dir.into());
        self
    }
}

/// Blocking-choose role of the in-app file-picker screen. The picker runs a
/// modal interaction on the UI thread and returns the selected path, or
/// `None` on cancellation.
pub trait PickerScreen {
    fn choose(&mut self, request: &ChooseRequest) -> Option<PathBuf>;
}
