use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::scores::batch::summarize;

pub struct Stage3Summary;

impl Stage3Summary {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Summary {
    fn name(&self) -> &'static str {
        "stage3_summary"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let summary = summarize(&ctx.results, ctx.targets.as_deref())?;
        if let Some(agreement) = summary.agreement {
            info!(agreement, "target_agreement");
        }
        ctx.summary = Some(summary);
        info!("summary_ready");
        Ok(())
    }
}
