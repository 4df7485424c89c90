use anyhow::Result;

use crate::history::{HistoryEntry, HistoryStore};

#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: Vec<HistoryEntry>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistory {
    fn append(&mut self, entry: HistoryEntry) -> Result<()> {
        self.entries.push(entry);
        Ok(())
    }

    fn list(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.entries.clone())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}
