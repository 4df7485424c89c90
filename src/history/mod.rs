//! Saved prediction history.
//!
//! Stores are passed explicitly to whoever persists results; scoring never
//! touches them.

mod jsonl;
mod memory;

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use crc::{CRC_64_ECMA_182, Crc};
use serde::{Deserialize, Serialize};

use crate::record::HealthRecord;
use crate::scores::PredictionResult;

pub use jsonl::JsonlHistory;
pub use memory::MemoryHistory;

static ID_CRC: Crc<u64> = Crc::<u64>::new(&CRC_64_ECMA_182);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub record: HealthRecord,
    pub result: PredictionResult,
}

impl HistoryEntry {
    /// `seq` tells apart entries saved with the same timestamp, such as
    /// the rows of one batch.
    pub fn new(
        record: HealthRecord,
        result: PredictionResult,
        timestamp: DateTime<Utc>,
        seq: u64,
    ) -> Result<Self> {
        let id = entry_id(&record, timestamp, seq)?;
        Ok(Self {
            id,
            timestamp,
            record,
            result,
        })
    }
}

pub trait HistoryStore {
    fn append(&mut self, entry: HistoryEntry) -> Result<()>;
    /// Entries in insertion order.
    fn list(&self) -> Result<Vec<HistoryEntry>>;
    fn clear(&mut self) -> Result<()>;
}

pub fn record_prediction(
    store: &mut dyn HistoryStore,
    record: HealthRecord,
    result: PredictionResult,
    now: DateTime<Utc>,
    seq: u64,
) -> Result<HistoryEntry> {
    let entry = HistoryEntry::new(record, result, now, seq)?;
    store.append(entry.clone())?;
    Ok(entry)
}

fn entry_id(record: &HealthRecord, timestamp: DateTime<Utc>, seq: u64) -> Result<String> {
    let mut digest = ID_CRC.digest();
    digest.update(
        timestamp
            .to_rfc3339_opts(SecondsFormat::Nanos, true)
            .as_bytes(),
    );
    digest.update(&seq.to_le_bytes());
    digest.update(&serde_json::to_vec(record)?);
    Ok(format!("{:016x}", digest.finalize()))
}
