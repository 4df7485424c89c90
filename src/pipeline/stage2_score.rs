use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::scores::batch::score_batch;

pub struct Stage2Score;

impl Stage2Score {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Score {
    fn name(&self) -> &'static str {
        "stage2_score"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        ctx.results = score_batch(&ctx.records, ctx.threads)?;
        let positive = ctx.results.iter().filter(|r| r.is_positive()).count();
        info!(scored = ctx.results.len(), positive, "scores_ready");
        Ok(())
    }
}
