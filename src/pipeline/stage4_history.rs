use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::history::{JsonlHistory, record_prediction};
use crate::pipeline::Stage;

pub struct Stage4History;

impl Stage4History {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4History {
    fn name(&self) -> &'static str {
        "stage4_history"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let Some(path) = ctx.history_path.clone() else {
            return Ok(());
        };
        let mut store = JsonlHistory::open(path);
        let rows = ctx.records.iter().zip(ctx.results.iter());
        for (seq, (record, result)) in rows.enumerate() {
            record_prediction(&mut store, *record, result.clone(), ctx.now, seq as u64)?;
        }
        ctx.history_written = ctx.results.len();
        info!(
            store = %store.path().display(),
            entries = ctx.history_written,
            "history_saved"
        );
        Ok(())
    }
}
