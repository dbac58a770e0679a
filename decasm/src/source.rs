use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Sequential reader over the source text. Pass two rewinds it and
/// re-reads the whole program from the beginning.
#[derive(Debug, Clone)]
pub struct SourceText {
    lines: Vec<String>,
    pos: usize,
}

impl SourceText {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_owned).collect(),
            pos: 0,
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not open source file {}", path.display()))?;
        Ok(Self::from_text(&text))
    }

    pub fn next_line(&mut self) -> Option<&str> {
        let line = self.lines.get(self.pos)?;
        self.pos += 1;
        Some(line)
    }

    pub fn rewind(&mut self) {
        self.pos = 0;
    }
}
