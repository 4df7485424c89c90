use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::history::{HistoryEntry, HistoryStore};

/// One JSON entry per line. A missing file reads as an empty history.
#[derive(Debug, Clone)]
pub struct JsonlHistory {
    path: PathBuf,
}

impl JsonlHistory {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonlHistory {
    fn append(&mut self, entry: HistoryEntry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        let mut w = BufWriter::new(file);
        serde_json::to_writer(&mut w, &entry)?;
        writeln!(w)?;
        w.flush()?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read history {}", self.path.display()))?;
        let mut entries = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let entry: HistoryEntry = serde_json::from_str(trimmed).with_context(|| {
                format!("{}:{} malformed history entry", self.path.display(), idx + 1)
            })?;
            entries.push(entry);
        }
        Ok(entries)
    }

    fn clear(&mut self) -> Result<()> {
        if self.path.exists() {
            File::create(&self.path)
                .with_context(|| format!("failed to truncate {}", self.path.display()))?;
        }
        Ok(())
    }
}
