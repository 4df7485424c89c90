use anyhow::{Result, bail};
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::io::records::read_records;
use crate::pipeline::Stage;

pub struct Stage1Input;

impl Stage1Input {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Input {
    fn name(&self) -> &'static str {
        "stage1_input"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        if let Some(path) = ctx.input.clone() {
            let table = read_records(&path)?;
            for w in &table.warnings {
                warn!(warning = %w, "input warning");
            }
            ctx.ids = table.ids;
            ctx.records = table.records;
            ctx.targets = table.targets;
            ctx.warnings.extend(table.warnings);
        }

        if ctx.records.is_empty() {
            bail!("no records to score");
        }
        if ctx.ids.len() != ctx.records.len() {
            bail!(
                "record id count mismatch: {} != {}",
                ctx.ids.len(),
                ctx.records.len()
            );
        }

        ctx.report.input_meta.records = ctx.records.len() as u64;
        ctx.report.input_meta.has_targets = ctx.targets.is_some();
        info!(records = ctx.records.len(), "records_loaded");
        Ok(())
    }
}
