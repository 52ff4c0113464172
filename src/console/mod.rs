use std::collections::VecDeque;

use blake3::Hash;

use crate::width::display_width;

/// Bounded scrollback used by console-bearing screens.
///
/// Append-only lines roll off the front once `max_lines` is reached. The
/// banner (a single replaceable headline, typically the current solver case
/// or job name) is hash-compared so rewriting identical content does not mark
/// the buffer dirty.
#[derive(Debug)]
pub struct ConsoleBuffer {
    lines: VecDeque<String>,
    max_lines: usize,
    banner: Option<String>,
    banner_hash: Option<Hash>,
    dirty: bool,
}

impl ConsoleBuffer {
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines: max_lines.max(1),
            banner: None,
            banner_hash: None,
            dirty: false,
        }
    }

    pub fn append(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
        self.dirty = true;
    }

    pub fn set_banner(&mut self, text: impl Into<String>) {
        let text = text.into();
        let new_hash = blake3::hash(text.as_bytes());
        if self.banner_hash.map(|h| h != new_hash).unwrap_or(true) {
            self.banner = Some(text);
            self.banner_hash = Some(new_hash);
            self.dirty = true;
        }
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Last `n` lines, oldest first.
    pub fn tail(&self, n: usize) -> Vec<&str> {
        let skip = self.lines.len().saturating_sub(n);
        self.lines.iter().skip(skip).map(String::as_str).collect()
    }

    /// Widest line in terminal cells, ANSI escapes excluded.
    pub fn max_display_width(&self) -> usize {
        self.lines
            .iter()
            .map(|line| display_width(line))
            .max()
            .unwrap_or(0)
    }

    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.dirty = true;
    }
}
